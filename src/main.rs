//! Sentiview CLI
//!
//! Terminal front end for the post sentiment dashboard:
//! - List posts with their comment counts
//! - Show a post's stats and sentiment trend
//! - Inspect the aggregate analytics of a post
//! - Generate a default config file

use clap::{Parser, Subcommand};
use sentiview::config::{generate_default_config, Config, LoggingConfig};
use sentiview::view::{PostDetail, PostRow, Screen};
use sentiview::{ClientConfig, PostDataStore, PostsClient};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Width of the trend bar column
const TREND_BAR_WIDTH: usize = 30;

#[derive(Parser)]
#[command(name = "sentiview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Post sentiment dashboard for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Analytics API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List recent posts
    Posts,

    /// Show stats and sentiment trend for a post
    Show {
        /// Post ID
        post_id: String,
    },

    /// Show aggregate analytics for a post
    Analytics {
        /// Post ID
        post_id: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let json = cli.format == "json";

    let command = match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            return Ok(());
        }
        command => command,
    };

    let (mut config, loaded) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => {
            let loaded = Config::load_default();
            (loaded.config.clone(), Some(loaded))
        }
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_logging(&config.logging);
    if let Some(loaded) = &loaded {
        loaded.report();
    }
    tracing::debug!(base_url = %config.api.base_url, "Sentiview v{}", env!("CARGO_PKG_VERSION"));

    let client = Arc::new(PostsClient::new(ClientConfig::from(&config.api))?);

    match command {
        Commands::Posts => {
            let store = PostDataStore::new(client);
            store.load_posts().await;

            let screen = Screen::from_state(&store.snapshot());
            exit_on_failure(&screen, json);

            if json {
                println!("{}", serde_json::to_string_pretty(&screen)?);
            } else if let Screen::Ready { rows, .. } = &screen {
                print_rows(rows);
            }
        }

        Commands::Show { post_id } => {
            let store = Arc::new(PostDataStore::new(client));
            store.load_posts().await;
            exit_on_failure(&Screen::from_state(&store.snapshot()), json);

            let Some(post) = store.snapshot().post(&post_id).cloned() else {
                eprintln!("Post not found: {}", post_id);
                eprintln!();
                eprintln!("List available posts with:");
                eprintln!("  sentiview posts");
                std::process::exit(1);
            };

            store.select_post(post).await?;

            let screen = Screen::from_state(&store.snapshot());
            if json {
                println!("{}", serde_json::to_string_pretty(&screen)?);
            } else if let Screen::Ready {
                detail: Some(detail),
                ..
            } = &screen
            {
                print_detail(detail);
            }
        }

        Commands::Analytics { post_id } => match client.fetch_analytics(&post_id).await {
            Ok(analytics) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&analytics)?);
                } else {
                    let summary = &analytics.analytics;
                    println!("Post {}", analytics.post_id);
                    println!("{}", "-".repeat(40));
                    println!("{:<20} {}", "Type", analytics.post_type.as_deref().unwrap_or("-"));
                    println!("{:<20} {}", "Comments", summary.total_comments);
                    println!("{:<20} {:.1}", "Avg sentiment", summary.average_sentiment);
                    println!("{:<20} {:.1}", "Sentiment sum", summary.sentiment_sum);
                    println!("{:<20} {:.2}", "Avg toxicity", summary.average_toxic);
                    println!("{:<20} {:.2}", "Toxicity sum", summary.toxic_sum);
                    if !analytics.media_url.is_empty() {
                        println!("{:<20} {}", "Media", analytics.media_url);
                    }
                }
            }
            Err(e) => {
                eprintln!("Failed to fetch analytics for post {}: {}", post_id, e);
                std::process::exit(1);
            }
        },

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("sentiview={}", logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Report a failed post-list load with a retry hint and exit
fn exit_on_failure(screen: &Screen, json: bool) {
    if let Screen::Failed { message } = screen {
        if json {
            if let Ok(body) = serde_json::to_string_pretty(screen) {
                println!("{}", body);
            }
        } else {
            eprintln!("Error: {}", message);
            eprintln!();
            eprintln!("Check the API URL (--api-url or SENTIVIEW_API_URL) and retry:");
            eprintln!("  sentiview posts");
        }
        std::process::exit(1);
    }
}

fn print_rows(rows: &[PostRow]) {
    if rows.is_empty() {
        println!("No posts yet.");
        return;
    }

    println!("{:<24} {:<12} {:>8}  {}", "ID", "Created", "Comments", "Content");
    println!("{}", "-".repeat(110));

    for row in rows {
        println!(
            "{:<24} {:<12} {:>8}  {}",
            row.post_id, row.created_date, row.total_comments, row.excerpt
        );
    }
}

fn print_detail(detail: &PostDetail) {
    println!("Post {}", detail.post_id);
    println!();
    println!("{:<20} {}", "Total comments", detail.stats.total_comments);
    println!("{:<20} {}", "Avg sentiment", detail.stats.average_sentiment);
    println!("{:<20} {}", "Sentiment sum", detail.stats.sentiment_sum);
    println!();

    println!("Sentiment trend (0-10)");
    if detail.trend.is_empty() {
        println!("  (no history)");
    } else {
        for point in &detail.trend {
            println!(
                "  {:<17} {:>5.1} {}",
                point.label,
                point.sentiment,
                "#".repeat(point.scaled(TREND_BAR_WIDTH))
            );
        }
    }
    println!();

    println!("{}", detail.content);
    println!();
    println!("Posted at: {}", detail.posted_at);
}
