use std::fmt::Write;

use crate::core::Post;

/// 单条帖子的文本形式：key / 内容 / 作者 / views / likes / comments
pub fn render_post(post: &Post) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "DateTime: {}", post.key());
    let _ = writeln!(out, "Post: {}", post.body());
    let _ = writeln!(out, "Person: {}", post.author());
    let _ = writeln!(out, "Views: {}", post.view_count());
    let _ = writeln!(out, "Likes: {}", post.like_count());
    let _ = writeln!(out, "Comments: {:?}", post.comments());
    out
}

/// "For You" 页：按给定顺序编号输出
pub fn render_feed<'a, I>(posts: I) -> String
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut out = String::from("For You Page:\n");
    for (i, post) in posts.into_iter().enumerate() {
        let _ = writeln!(out, "\nPost {}:", i + 1);
        out.push_str(&render_post(post));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PostKey;

    fn sample() -> Post {
        Post::new(
            PostKey::new("2024-04-20 12:00:00").unwrap(),
            "Hello world!",
            "Alice",
            100,
        )
        .with_likes(10)
        .with_comments(["Great post!", "Keep it up!"])
    }

    #[test]
    fn post_lists_all_fields() {
        let text = render_post(&sample());
        assert_eq!(
            text,
            "DateTime: 2024-04-20 12:00:00\n\
             Post: Hello world!\n\
             Person: Alice\n\
             Views: 100\n\
             Likes: 10\n\
             Comments: [\"Great post!\", \"Keep it up!\"]\n"
        );
    }

    #[test]
    fn feed_numbers_posts_from_one() {
        let posts = [sample(), sample()];
        let text = render_feed(&posts);
        assert!(text.starts_with("For You Page:\n"));
        assert!(text.contains("\nPost 1:\n"));
        assert!(text.contains("\nPost 2:\n"));
        assert!(!text.contains("Post 3:"));
    }
}
