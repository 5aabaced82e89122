use thiserror::Error;

use crate::core::post::PostKey;

/// 存储层错误
///
/// 查不到（key 不存在 / 索引为空）不是错误：统一用 `Option` / 空 `Vec` 表达。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// key 为空（trim + NFC 之后）
    #[error("post key is missing or empty")]
    MissingKey,

    /// `DuplicateKeyPolicy::Reject` 下重复提交同一个 key
    #[error("duplicate post key: {0}")]
    DuplicateKey(PostKey),

    /// PostId 为 u32，超过上限后拒绝写入
    #[error("store capacity exhausted at {0} posts")]
    CapacityExhausted(usize),
}

pub type Result<T> = std::result::Result<T, StoreError>;
