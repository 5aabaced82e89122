use std::sync::Arc;
use wildmatch::WildMatch;

use crate::core::Post;

/// Matcher 抽象接口：对帖子的某个文本字段做匹配
pub trait Matcher: Send + Sync {
    fn matches(&self, text: &str) -> bool;
}

/// 精确包含匹配 (contains)
pub struct ExactMatcher {
    pattern: String,
}

impl ExactMatcher {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
        }
    }
}

impl Matcher for ExactMatcher {
    fn matches(&self, text: &str) -> bool {
        text.contains(&self.pattern)
    }
}

/// 通配符匹配 (Glob)，整串匹配
pub struct GlobMatcher {
    wild: WildMatch,
}

impl GlobMatcher {
    pub fn new(pattern: &str) -> Self {
        Self {
            wild: WildMatch::new(pattern),
        }
    }
}

impl Matcher for GlobMatcher {
    fn matches(&self, text: &str) -> bool {
        self.wild.matches(text)
    }
}

/// 含 `*` / `?` 走 glob，否则走 contains
pub fn create_matcher(pattern: &str) -> Arc<dyn Matcher> {
    if pattern.contains('*') || pattern.contains('?') {
        Arc::new(GlobMatcher::new(pattern))
    } else {
        Arc::new(ExactMatcher::new(pattern))
    }
}

/// 按作者过滤，保持输入顺序
pub fn filter_by_author<'a>(posts: &'a [Post], matcher: &dyn Matcher) -> Vec<&'a Post> {
    posts.iter().filter(|p| matcher.matches(p.author())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PostKey;

    fn post(k: &str, author: &str) -> Post {
        Post::new(PostKey::new(k).unwrap(), "body", author, 0)
    }

    #[test]
    fn contains_vs_glob() {
        let exact = create_matcher("lic");
        assert!(exact.matches("Alice"));
        assert!(!exact.matches("Bob"));

        let glob = create_matcher("A*e");
        assert!(glob.matches("Alice"));
        assert!(!glob.matches("Alicia"));
        assert!(create_matcher("B?b").matches("Bob"));
    }

    #[test]
    fn author_filter_keeps_insertion_order() {
        let posts = vec![post("1", "Alice"), post("2", "Bob"), post("3", "Alice")];
        let hits = filter_by_author(&posts, create_matcher("Alice").as_ref());
        let keys: Vec<_> = hits.iter().map(|p| p.key().as_str()).collect();
        assert_eq!(keys, vec!["1", "3"]);
    }
}
