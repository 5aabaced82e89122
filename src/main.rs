use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use post_index::config::AppConfig;
use post_index::core::{Post, PostKey};
use post_index::query::{create_matcher, filter_by_author, render_feed, render_post};
use post_index::store::PostStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "post-index", version, about = "In-memory post store with exact/range/top-k indexes")]
struct Cli {
    /// 配置文件路径（默认 $XDG_CONFIG_HOME/post-index/config.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 帖子种子文件（JSON 数组）；缺省使用内置样例
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 按插入顺序列出全部帖子
    Feed {
        /// 作者过滤（含 * / ? 时按 glob，否则按包含）
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// 按 key 精确查找
    Get {
        key: String,
        #[arg(long)]
        json: bool,
    },
    /// 闭区间 [start, end] 范围查询
    Range {
        start: String,
        end: String,
        #[arg(long)]
        json: bool,
    },
    /// 依次弹出 views 最高的 N 条
    TopViewed {
        #[arg(short = 'n', long, default_value_t = 1)]
        n: usize,
    },
    /// likes 最高的帖子
    TopLiked,
    /// 索引统计
    Report,
    /// 跑一遍全部查询
    Demo,
}

fn init_tracing(cfg: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.log_filter.as_deref().unwrap_or("info")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_posts(path: &Path) -> anyhow::Result<Vec<Post>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed {}", path.display()))?;
    let posts = serde_json::from_str(&text)
        .with_context(|| format!("invalid seed {}", path.display()))?;
    Ok(posts)
}

fn sample_posts() -> anyhow::Result<Vec<Post>> {
    let rows = [
        ("2024-04-20 12:00:00", "Hello world!", "Alice", 100, 10, ["Great post!", "Keep it up!"]),
        ("2024-04-21 10:00:00", "Good morning!", "Bob", 200, 20, ["Good day!", "Nice weather!"]),
        ("2024-04-22 08:00:00", "Happy Friday!", "Alice", 150, 15, ["TGIF!", "Enjoy your weekend!"]),
        ("2024-04-23 15:00:00", "Just chilling!", "Carol", 180, 18, ["Relaxing day!", "Love this weather!"]),
        ("2024-04-24 09:00:00", "Sunday brunch!", "Dave", 220, 22, ["Brunch with friends!", "Yummy food!"]),
    ];
    rows.into_iter()
        .map(|(key, body, author, views, likes, comments)| -> anyhow::Result<Post> {
            Ok(Post::new(PostKey::new(key)?, body, author, views)
                .with_likes(likes)
                .with_comments(comments))
        })
        .collect()
}

fn print_posts(posts: &[&Post], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(posts)?);
    } else {
        for post in posts {
            println!("\n{}", render_post(post));
        }
    }
    Ok(())
}

fn print_one(label: &str, post: Option<&Post>, json: bool) -> anyhow::Result<()> {
    match post {
        Some(post) => {
            if !json {
                println!("{label}:");
            }
            print_posts(&[post], json)
        }
        None => {
            println!("{label}: Not found");
            Ok(())
        }
    }
}

fn run_demo(store: &mut PostStore) -> anyhow::Result<()> {
    println!("{}", render_feed(store.list_all()));

    let key = PostKey::new("2024-04-21 10:00:00")?;
    let found = store.find_by_key(&key).map(Post::body).unwrap_or("Not found");
    println!("\nPost found by datetime: {found}");

    let start = PostKey::new("2024-04-20 00:00:00")?;
    let end = PostKey::new("2024-04-21 23:59:59")?;
    println!("\nPosts found in range:");
    print_posts(&store.find_in_range(&start, &end), false)?;

    print_one("\nMost viewed post", store.most_viewed(), false)?;
    print_one("\nMost liked post", store.most_liked(), false)?;

    info!("\n{}", store.report());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref())?;
    init_tracing(&cfg);

    let mut store = PostStore::with_config(cfg.store.clone());
    let posts = match cli.seed.as_ref().or(cfg.seed.as_ref()) {
        Some(path) => load_posts(path)?,
        None => sample_posts()?,
    };
    store.extend(posts).context("failed to index seed posts")?;

    match cli.command {
        Command::Feed { author, json } => {
            let posts: Vec<&Post> = match author {
                Some(pattern) => {
                    let matcher = create_matcher(&pattern);
                    filter_by_author(store.list_all(), matcher.as_ref())
                }
                None => store.list_all().iter().collect(),
            };
            if json {
                print_posts(&posts, true)?;
            } else {
                println!("{}", render_feed(posts));
            }
        }
        Command::Get { key, json } => {
            let key = PostKey::new(key)?;
            print_one("Post", store.find_by_key(&key), json)?;
        }
        Command::Range { start, end, json } => {
            let start = PostKey::new(start)?;
            let end = PostKey::new(end)?;
            print_posts(&store.find_in_range(&start, &end), json)?;
        }
        Command::TopViewed { n } => {
            for rank in 1..=n {
                match store.most_viewed() {
                    Some(post) => println!("#{rank}\n{}", render_post(post)),
                    None => break,
                }
            }
        }
        Command::TopLiked => print_one("Most liked post", store.most_liked(), false)?,
        Command::Report => print!("{}", store.report()),
        Command::Demo => run_demo(&mut store)?,
    }

    Ok(())
}
