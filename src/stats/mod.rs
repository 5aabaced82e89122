use std::fmt;

/// 存储与索引统计
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreReport {
    /// canonical storage 条目数
    pub posts: usize,
    /// 精确索引条目数（允许重复 key 时可能小于 posts）
    pub exact_entries: usize,
    /// 范围索引节点数
    pub range_nodes: usize,
    /// 范围索引树高（不平衡，最坏等于节点数）
    pub range_depth: usize,
    /// 优先级索引中尚未被弹出的条目数
    pub priority_remaining: usize,
    pub total_likes: u64,
    pub total_comments: usize,
    /// 三个索引的结构性内存粗估（字节，不含 key 自身的堆分配）
    pub index_bytes: u64,
}

fn human_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

impl fmt::Display for StoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔══════════════════════════════════════════╗")?;
        writeln!(f, "║          post-index Store Report         ║")?;
        writeln!(f, "╠══════════════════════════════════════════╣")?;
        writeln!(f, "║ posts:          {:>24} ║", self.posts)?;
        writeln!(f, "║ likes:          {:>24} ║", self.total_likes)?;
        writeln!(f, "║ comments:       {:>24} ║", self.total_comments)?;
        writeln!(f, "╠──────────────────────────────────────────╣")?;
        writeln!(f, "║ exact entries:  {:>24} ║", self.exact_entries)?;
        writeln!(f, "║ range nodes:    {:>24} ║", self.range_nodes)?;
        writeln!(f, "║ range depth:    {:>24} ║", self.range_depth)?;
        writeln!(f, "║ top-k left:     {:>24} ║", self.priority_remaining)?;
        writeln!(f, "║ index memory:   {:>24} ║", human_bytes(self.index_bytes))?;
        writeln!(f, "╚══════════════════════════════════════════╝")?;
        Ok(())
    }
}
