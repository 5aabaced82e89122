#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod config;
pub mod core;
pub mod index;
pub mod query;
pub mod stats;
pub mod store;

pub use crate::config::{AppConfig, DuplicateKeyPolicy, StoreConfig};
pub use crate::core::{Post, PostId, PostKey, Result, StoreError};
pub use crate::store::{PostStore, SharedStore};
