use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::StoreConfig;
use crate::core::{Post, PostId, PostKey, Result};
use crate::stats::StoreReport;

/// 线程安全包装：单写锁保护 canonical 列表与三个索引
///
/// - 写路径（`add_post` / `most_viewed` / 点赞 / 评论）持写锁，插入与破坏性弹出互斥
/// - 读路径持读锁，返回克隆（锁守卫不能逃逸）
#[derive(Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<super::PostStore>>,
}

impl SharedStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(super::PostStore::with_config(config))),
        }
    }

    pub fn add_post(&self, post: Post) -> Result<PostId> {
        self.inner.write().add_post(post)
    }

    pub fn find_by_key(&self, key: &PostKey) -> Option<Post> {
        self.inner.read().find_by_key(key).cloned()
    }

    pub fn find_in_range(&self, start: &PostKey, end: &PostKey) -> Vec<Post> {
        self.inner
            .read()
            .find_in_range(start, end)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn most_viewed(&self) -> Option<Post> {
        self.inner.write().most_viewed().cloned()
    }

    pub fn most_liked(&self) -> Option<Post> {
        self.inner.read().most_liked().cloned()
    }

    pub fn list_all(&self) -> Vec<Post> {
        self.inner.read().list_all().to_vec()
    }

    pub fn add_comment(&self, key: &PostKey, text: impl Into<String>) -> bool {
        self.inner.write().add_comment(key, text)
    }

    pub fn increment_likes(&self, key: &PostKey) -> bool {
        self.inner.write().increment_likes(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn report(&self) -> StoreReport {
        self.inner.read().report()
    }
}
