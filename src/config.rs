use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// 重复 key 的处理策略
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKeyPolicy {
    /// 拒绝写入，返回 `StoreError::DuplicateKey`
    #[default]
    Reject,
    /// 照单全收：精确索引指向最新一条，范围索引把相等 key 放到右侧
    Allow,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub duplicate_keys: DuplicateKeyPolicy,
    /// 预分配容量（0 = 按需增长）
    pub capacity: usize,
}

/// 进程级配置（TOML）
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// tracing EnvFilter 指令；RUST_LOG 优先
    pub log_filter: Option<String>,
    /// 启动时加载的帖子（JSON 数组）
    pub seed: Option<PathBuf>,
    pub store: StoreConfig,
}

impl AppConfig {
    /// `$XDG_CONFIG_HOME/post-index/config.toml`（或平台等价路径）
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("post-index").join("config.toml"))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("invalid config")
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// 显式路径必须存在；默认路径不存在时回退到默认配置。
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_is_default() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.store.duplicate_keys, DuplicateKeyPolicy::Reject);
    }

    #[test]
    fn parses_full_config() {
        let cfg = AppConfig::from_toml_str(
            r#"
            log_filter = "post_index=debug"
            seed = "posts.json"

            [store]
            duplicate_keys = "allow"
            capacity = 64
            "#,
        )
        .unwrap();

        assert_eq!(cfg.log_filter.as_deref(), Some("post_index=debug"));
        assert_eq!(cfg.seed, Some(PathBuf::from("posts.json")));
        assert_eq!(cfg.store.duplicate_keys, DuplicateKeyPolicy::Allow);
        assert_eq!(cfg.store.capacity, 64);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = AppConfig::from_toml_str("[store]\nduplicate_keys = \"merge\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn explicit_path_is_loaded_or_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[store]\ncapacity = 8").unwrap();

        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.store.capacity, 8);

        let missing = file.path().with_extension("missing");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }
}
