use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::core::PostId;

/// 精确索引：key → PostId，O(1) 期望
///
/// 只保存句柄，不持有 Post；`put` 无条件覆盖（唯一性由 store 负责）。
#[derive(Debug, Default)]
pub struct ExactIndex<K> {
    map: HashMap<K, PostId>,
}

impl<K: Hash + Eq> ExactIndex<K> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            map: HashMap::with_capacity(cap),
        }
    }

    /// 返回被覆盖的旧句柄（如有）
    pub fn put(&mut self, key: K, id: PostId) -> Option<PostId> {
        self.map.insert(key, id)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<PostId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// 桶数组 + 控制字节的粗估，不含 key 自身的堆分配
    pub fn estimated_bytes(&self) -> u64 {
        let bucket = std::mem::size_of::<(K, PostId)>() as u64;
        self.map.capacity() as u64 * (bucket + 1)
    }
}
