use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::core::error::{Result, StoreError};

/// 排序键（时间戳字符串，如 `2024-04-20 12:00:00`）
///
/// - 构造时 trim + NFC 归一化，避免“看起来一样”的 key 绕过唯一性检查
/// - 字典序即时间序（要求定宽格式）
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostKey(String);

impl PostKey {
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let normalized: String = raw.as_ref().trim().nfc().collect();
        if normalized.is_empty() {
            return Err(StoreError::MissingKey);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PostKey {
    type Error = StoreError;

    fn try_from(raw: String) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<PostKey> for String {
    fn from(key: PostKey) -> Self {
        key.0
    }
}

impl FromStr for PostKey {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Borrow<str> for PostKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// canonical storage 中的位置；只追加不删除，所以一经分配永久有效。
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(u32);

impl PostId {
    /// 超过 u32 范围返回 None
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// 帖子：身份字段不可变，likes / comments 只能经由下面两个方法修改。
///
/// `view_count` 在创建后不可变：优先级索引在插入时对它做快照。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    key: PostKey,
    body: String,
    author: String,
    view_count: u64,
    #[serde(default)]
    like_count: u64,
    #[serde(default)]
    comments: Vec<String>,
}

impl Post {
    pub fn new(
        key: PostKey,
        body: impl Into<String>,
        author: impl Into<String>,
        view_count: u64,
    ) -> Self {
        Self {
            key,
            body: body.into(),
            author: author.into(),
            view_count,
            like_count: 0,
            comments: Vec::new(),
        }
    }

    pub fn with_likes(mut self, like_count: u64) -> Self {
        self.like_count = like_count;
        self
    }

    pub fn with_comments<I, S>(mut self, comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments = comments.into_iter().map(Into::into).collect();
        self
    }

    pub fn key(&self) -> &PostKey {
        &self.key
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn view_count(&self) -> u64 {
        self.view_count
    }

    pub fn like_count(&self) -> u64 {
        self.like_count
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn add_comment(&mut self, text: impl Into<String>) {
        self.comments.push(text.into());
    }

    pub fn increment_likes(&mut self) {
        self.like_count = self.like_count.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_trimmed_and_nfc_normalized() {
        // "é" 组合形式 vs 预组合形式
        let decomposed = PostKey::new(" cafe\u{301} ").unwrap();
        let composed = PostKey::new("caf\u{e9}").unwrap();
        assert_eq!(decomposed, composed);
        assert_eq!(composed.as_str(), "caf\u{e9}");
    }

    #[test]
    fn blank_key_is_missing() {
        assert_eq!(PostKey::new("   "), Err(StoreError::MissingKey));
        assert_eq!("".parse::<PostKey>(), Err(StoreError::MissingKey));
    }

    #[test]
    fn timestamp_keys_sort_chronologically() {
        let a = PostKey::new("2024-04-20 12:00:00").unwrap();
        let b = PostKey::new("2024-04-21 10:00:00").unwrap();
        assert!(a < b);
    }

    #[test]
    fn mutators_touch_only_likes_and_comments() {
        let key = PostKey::new("2024-04-20 12:00:00").unwrap();
        let mut post = Post::new(key, "Hello world!", "Alice", 100);
        post.increment_likes();
        post.increment_likes();
        post.add_comment("Great post!");

        assert_eq!(post.like_count(), 2);
        assert_eq!(post.comments(), ["Great post!".to_string()]);
        assert_eq!(post.view_count(), 100);
    }

    #[test]
    fn deserialize_defaults_and_rejects_empty_key() {
        let json = r#"{"key":"2024-04-20 12:00:00","body":"hi","author":"Alice","view_count":7}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.like_count(), 0);
        assert!(post.comments().is_empty());

        let bad = r#"{"key":"  ","body":"hi","author":"Alice","view_count":7}"#;
        assert!(serde_json::from_str::<Post>(bad).is_err());
    }

    #[test]
    fn post_id_bounds() {
        assert_eq!(PostId::from_index(3).map(PostId::index), Some(3));
        assert!(PostId::from_index(u32::MAX as usize + 1).is_none());
    }
}
