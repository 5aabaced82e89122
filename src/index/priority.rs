use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::core::PostId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    views: u64,
    seq: u64,
    id: PostId,
}

impl Ord for Entry {
    // views 大者优先；views 相同则先插入者优先
    fn cmp(&self, other: &Self) -> Ordering {
        (self.views, Reverse(self.seq)).cmp(&(other.views, Reverse(other.seq)))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 优先级索引：按 view_count 快照的大顶堆
///
/// `extract_max` 是破坏性的：弹出后该帖子不再能从本索引取得
/// （canonical storage 和其它索引不受影响）。
#[derive(Debug, Default)]
pub struct PriorityIndex {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl PriorityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(cap),
            next_seq: 0,
        }
    }

    pub fn insert(&mut self, views: u64, id: PostId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { views, seq, id });
    }

    pub fn extract_max(&mut self) -> Option<PostId> {
        self.heap.pop().map(|e| e.id)
    }

    /// 非破坏性读取当前最大值
    pub fn peek_max(&self) -> Option<PostId> {
        self.heap.peek().map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn estimated_bytes(&self) -> u64 {
        (self.heap.capacity() * std::mem::size_of::<Entry>()) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> PostId {
        PostId::from_index(i).unwrap()
    }

    #[test]
    fn extracts_in_descending_view_order() {
        let mut idx = PriorityIndex::new();
        for (i, views) in [100, 200, 150, 180, 220].into_iter().enumerate() {
            idx.insert(views, id(i));
        }

        let order: Vec<_> = std::iter::from_fn(|| idx.extract_max()).collect();
        assert_eq!(order, vec![id(4), id(1), id(3), id(2), id(0)]);
        assert!(idx.is_empty());
        assert_eq!(idx.extract_max(), None);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut idx = PriorityIndex::new();
        idx.insert(1, id(0));
        idx.insert(9, id(1));

        assert_eq!(idx.peek_max(), Some(id(1)));
        assert_eq!(idx.peek_max(), Some(id(1)));
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.extract_max(), Some(id(1)));
        assert_eq!(idx.peek_max(), Some(id(0)));
    }

    #[test]
    fn ties_prefer_earliest_insert() {
        let mut idx = PriorityIndex::new();
        idx.insert(5, id(0));
        idx.insert(5, id(1));
        idx.insert(5, id(2));

        assert_eq!(idx.extract_max(), Some(id(0)));
        assert_eq!(idx.extract_max(), Some(id(1)));
        assert_eq!(idx.extract_max(), Some(id(2)));
    }

    #[test]
    fn insert_after_extract_can_become_new_max() {
        let mut idx = PriorityIndex::new();
        idx.insert(10, id(0));
        idx.insert(20, id(1));
        assert_eq!(idx.extract_max(), Some(id(1)));

        idx.insert(30, id(2));
        assert_eq!(idx.extract_max(), Some(id(2)));
        assert_eq!(idx.extract_max(), Some(id(0)));
    }
}
