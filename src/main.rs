//! Skimmer main entry point
//!
//! Command-line interface for the skimmer text-harvesting crawler.

use anyhow::Context;
use clap::Parser;
use skimmer::config::{load_file_config, resolve_config, CliOverrides};
use skimmer::crawler::crawl;
use skimmer::output::print_report;
use skimmer::url::parse_seed;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Skimmer: a recursive text-harvesting web crawler
///
/// Skimmer crawls outward from a seed URL, converts every reachable page to
/// plain text, and appends the accumulated text to rotating timestamped
/// output files once the cache threshold is reached.
#[derive(Parser, Debug)]
#[command(name = "skimmer")]
#[command(version)]
#[command(about = "A recursive text-harvesting web crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from (absolute, http or https)
    #[arg(value_name = "URL")]
    seed: String,

    /// Cache size threshold in MiB before flushing to disk [default: 30]
    #[arg(long, value_name = "MB")]
    max_cache_mb: Option<u64>,

    /// Directory output files are written into
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Maximum number of concurrent page fetches
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Stop after this many pages have been fetched (0 = unlimited)
    #[arg(long, value_name = "N")]
    max_pages: Option<u64>,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Invalid seed or config is a fatal startup error (non-zero exit);
    // individual page failures during the crawl are not.
    let seed = parse_seed(&cli.seed)
        .with_context(|| format!("invalid seed URL: {}", cli.seed))?;

    let file_config = match &cli.config {
        Some(path) => Some(
            load_file_config(path)
                .with_context(|| format!("failed to load config file {}", path.display()))?,
        ),
        None => None,
    };

    let config = resolve_config(
        file_config,
        CliOverrides {
            max_cache_mb: cli.max_cache_mb,
            output_dir: cli.output_dir,
            concurrency: cli.concurrency,
            max_pages: cli.max_pages,
        },
    )?;

    tracing::info!("Target URL set to: {}", seed);
    tracing::info!(
        "Cache threshold: {} bytes, output dir: {}",
        config.output.max_cache_bytes,
        config.output.directory.display()
    );

    let report = crawl(seed, config).await.context("crawl failed")?;

    print_report(&report);
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("skimmer=info,warn"),
            1 => EnvFilter::new("skimmer=debug,info"),
            2 => EnvFilter::new("skimmer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
