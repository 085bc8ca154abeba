//! # pick-digest
//!
//! Renders a saved picks feed into the digest message posted to chat, or
//! dumps the structured aggregation as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use picks_books::BookRegistry;
use picks_core::config::Config;
use picks_presentation::{render_digest, Aggregator};

#[derive(Parser, Debug)]
#[command(name = "pick-digest")]
#[command(version)]
#[command(about = "Aggregate a picks feed into a categorized digest", long_about = None)]
struct Cli {
    /// Feed file containing {"data": {"picks": [...]}}
    #[arg(required_unless_present = "list_books")]
    feed: Option<PathBuf>,

    /// JSON configuration file (missing sections take defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Digest title
    #[arg(short, long, default_value = "Top Picks")]
    title: String,

    /// Override the per-category cap
    #[arg(short, long)]
    max_per_group: Option<usize>,

    /// Override the jurisdiction substituted into deep links
    #[arg(short, long)]
    state: Option<String>,

    /// Print the aggregation as JSON instead of the digest text
    #[arg(long)]
    json: bool,

    /// Print the sportsbooks to request and the US preset, then exit
    #[arg(long)]
    list_books: bool,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(max) = cli.max_per_group {
        config.aggregation.max_per_group = max;
    }
    if let Some(state) = &cli.state {
        config.aggregation.jurisdiction = state.to_lowercase();
    }

    if cli.list_books {
        let registry = BookRegistry::standard();
        println!("requested: {}", registry.requested_books(&config.books).join(","));
        println!("us preset: {}", registry.us_books().join(","));
        return Ok(());
    }

    let aggregator = Aggregator::new(&config).context("Invalid configuration")?;

    let Some(feed_path) = cli.feed else {
        anyhow::bail!("No feed file given");
    };
    let raw = std::fs::read_to_string(&feed_path)
        .with_context(|| format!("Failed to read feed {}", feed_path.display()))?;
    let feed: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse feed {}", feed_path.display()))?;

    let aggregation = aggregator.aggregate(&feed);
    info!(
        feed_size = aggregation.feed_size,
        unique = aggregation.unique_picks,
        shown = aggregation.pick_count(),
        sections = aggregation.sections.len(),
        "aggregated feed"
    );

    if cli.json {
        let out = serde_json::to_string_pretty(&aggregation).context("Failed to serialize aggregation")?;
        println!("{out}");
    } else {
        println!("{}", render_digest(&cli.title, &aggregation));
    }
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
