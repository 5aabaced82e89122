use crate::core::PostId;

#[derive(Debug)]
struct Node<K> {
    key: K,
    id: PostId,
    left: Option<usize>,
    right: Option<usize>,
}

/// 范围索引：不平衡 BST（arena 存储，子节点用下标链接）
///
/// ## 契约
/// - `key < node.key` 走左，否则（含相等）走右：重复 key 总在已有节点的右侧
/// - 不删除、不再平衡；按递增 key 插入时退化为链表，插入/扫描最坏 O(n)
/// - 插入和扫描都是迭代实现（显式栈），退化链表不会爆调用栈
#[derive(Debug)]
pub struct RangeIndex<K> {
    nodes: Vec<Node<K>>,
    root: Option<usize>,
    depth: usize,
}

impl<K> Default for RangeIndex<K> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            depth: 0,
        }
    }
}

impl<K: Ord> RangeIndex<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(cap),
            root: None,
            depth: 0,
        }
    }

    pub fn insert(&mut self, key: K, id: PostId) {
        let new = self.nodes.len();
        let mut depth = 1;

        if let Some(mut cur) = self.root {
            loop {
                depth += 1;
                let node = &mut self.nodes[cur];
                let slot = if key < node.key {
                    &mut node.left
                } else {
                    &mut node.right
                };
                match *slot {
                    Some(next) => cur = next,
                    None => {
                        *slot = Some(new);
                        break;
                    }
                }
            }
        } else {
            self.root = Some(new);
        }

        self.nodes.push(Node {
            key,
            id,
            left: None,
            right: None,
        });
        self.depth = self.depth.max(depth);
    }

    /// 闭区间 `[start, end]` 扫描，按 key 升序惰性产出。
    ///
    /// 剪枝规则：仅当 `start < node.key` 才进左子树，仅当 `node.key < end` 才进右子树。
    /// 注意：与 `end` 相等的重复 key 位于右子树，会被剪掉（只在允许重复 key 时出现）。
    pub fn range<'a>(&'a self, start: &'a K, end: &'a K) -> RangeIter<'a, K> {
        let mut iter = RangeIter {
            nodes: &self.nodes,
            start,
            end,
            stack: Vec::new(),
        };
        if start <= end {
            iter.push_left_spine(self.root);
        }
        iter
    }

    pub fn range_query(&self, start: &K, end: &K) -> Vec<PostId> {
        self.range(start, end).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 树高（空树为 0）
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn estimated_bytes(&self) -> u64 {
        (self.nodes.capacity() * std::mem::size_of::<Node<K>>()) as u64
    }
}

/// `RangeIndex::range` 的中序迭代器；可重复创建（restartable），必然终止。
pub struct RangeIter<'a, K> {
    nodes: &'a [Node<K>],
    start: &'a K,
    end: &'a K,
    stack: Vec<usize>,
}

impl<'a, K: Ord> RangeIter<'a, K> {
    fn push_left_spine(&mut self, mut cur: Option<usize>) {
        let nodes = self.nodes;
        while let Some(i) = cur {
            self.stack.push(i);
            let node = &nodes[i];
            cur = if *self.start < node.key {
                node.left
            } else {
                None
            };
        }
    }
}

impl<'a, K: Ord> Iterator for RangeIter<'a, K> {
    type Item = PostId;

    fn next(&mut self) -> Option<PostId> {
        let nodes = self.nodes;
        loop {
            let i = self.stack.pop()?;
            let node = &nodes[i];

            let right = if node.key < *self.end {
                node.right
            } else {
                None
            };
            self.push_left_spine(right);

            if *self.start <= node.key && node.key <= *self.end {
                return Some(node.id);
            }
        }
    }
}
