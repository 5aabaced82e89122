pub mod shared;

use tracing::{debug, info, warn};

use crate::config::{DuplicateKeyPolicy, StoreConfig};
use crate::core::{Post, PostId, PostKey, Result, StoreError};
use crate::index::{ExactIndex, PriorityIndex, RangeIndex};
use crate::stats::StoreReport;

pub use shared::SharedStore;

/// 帖子存储门面：canonical storage + 三个索引
///
/// ## 不变量
/// - `add_post` 是唯一写入口：一次调用内同时更新 canonical 列表与全部三个索引
/// - 索引只保存 `PostId`；likes/comments 的修改对所有读路径立即可见
/// - 只追加，不删除
#[derive(Debug)]
pub struct PostStore {
    posts: Vec<Post>,
    exact: ExactIndex<PostKey>,
    range: RangeIndex<PostKey>,
    priority: PriorityIndex,
    config: StoreConfig,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        let cap = config.capacity;
        Self {
            posts: Vec::with_capacity(cap),
            exact: ExactIndex::with_capacity(cap),
            range: RangeIndex::with_capacity(cap),
            priority: PriorityIndex::with_capacity(cap),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// 写入一条帖子。所有检查先于任何修改，失败时结构保持原样。
    pub fn add_post(&mut self, post: Post) -> Result<PostId> {
        if self.config.duplicate_keys == DuplicateKeyPolicy::Reject
            && self.exact.contains(post.key())
        {
            warn!(key = %post.key(), "Rejecting duplicate post key");
            return Err(StoreError::DuplicateKey(post.key().clone()));
        }

        let id = PostId::from_index(self.posts.len())
            .ok_or(StoreError::CapacityExhausted(self.posts.len()))?;

        if let Some(prev) = self.exact.put(post.key().clone(), id) {
            debug!(key = %post.key(), ?prev, "Exact index now points at newer duplicate");
        }
        self.range.insert(post.key().clone(), id);
        self.priority.insert(post.view_count(), id);

        debug!(
            key = %post.key(),
            author = post.author(),
            views = post.view_count(),
            ?id,
            "Post indexed"
        );
        self.posts.push(post);
        Ok(id)
    }

    /// 批量写入，遇到第一个错误即停止（之前的已生效）。返回写入条数。
    pub fn extend<I>(&mut self, posts: I) -> Result<usize>
    where
        I: IntoIterator<Item = Post>,
    {
        let mut added = 0usize;
        for post in posts {
            self.add_post(post)?;
            added += 1;
        }
        info!("Loaded {} posts ({} total)", added, self.posts.len());
        Ok(added)
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.get(id.index())
    }

    pub fn find_by_key(&self, key: &PostKey) -> Option<&Post> {
        self.exact.get(key).and_then(|id| self.get(id))
    }

    pub fn find_by_key_mut(&mut self, key: &PostKey) -> Option<&mut Post> {
        let id = self.exact.get(key)?;
        self.posts.get_mut(id.index())
    }

    /// key 不存在时返回 false
    pub fn add_comment(&mut self, key: &PostKey, text: impl Into<String>) -> bool {
        match self.find_by_key_mut(key) {
            Some(post) => {
                post.add_comment(text);
                true
            }
            None => false,
        }
    }

    /// key 不存在时返回 false
    pub fn increment_likes(&mut self, key: &PostKey) -> bool {
        match self.find_by_key_mut(key) {
            Some(post) => {
                post.increment_likes();
                true
            }
            None => false,
        }
    }

    /// 闭区间 `[start, end]`，按 key 升序
    pub fn find_in_range(&self, start: &PostKey, end: &PostKey) -> Vec<&Post> {
        self.range
            .range(start, end)
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// 弹出当前 views 最高的帖子（破坏性）：再次调用得到次高者，耗尽后为 None。
    pub fn most_viewed(&mut self) -> Option<&Post> {
        let id = self.priority.extract_max()?;
        self.posts.get(id.index())
    }

    /// 非破坏性版本：不影响后续 `most_viewed`
    pub fn peek_most_viewed(&self) -> Option<&Post> {
        self.priority.peek_max().and_then(|id| self.get(id))
    }

    /// 还能被 `most_viewed` 弹出的帖子数
    pub fn viewed_remaining(&self) -> usize {
        self.priority.len()
    }

    /// 线性扫描；likes 相同取插入顺序最早者
    pub fn most_liked(&self) -> Option<&Post> {
        self.posts.iter().reduce(|best, post| {
            if post.like_count() > best.like_count() {
                post
            } else {
                best
            }
        })
    }

    /// canonical storage（插入顺序）
    pub fn list_all(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn report(&self) -> StoreReport {
        StoreReport {
            posts: self.posts.len(),
            exact_entries: self.exact.len(),
            range_nodes: self.range.len(),
            range_depth: self.range.depth(),
            priority_remaining: self.priority.len(),
            total_likes: self.posts.iter().map(Post::like_count).sum(),
            total_comments: self.posts.iter().map(|p| p.comments().len()).sum(),
            index_bytes: self.exact.estimated_bytes()
                + self.range.estimated_bytes()
                + self.priority.estimated_bytes(),
        }
    }
}
