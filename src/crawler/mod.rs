//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and error classification
//! - Text and link extraction
//! - The engine that drives traversal, deduplication and buffering

mod engine;
mod extract;
mod fetcher;

pub use engine::CrawlEngine;
pub use extract::{extract_links, extract_text};
pub use fetcher::{build_http_client, fetch_page, FetchResult};

use crate::config::CrawlConfig;
use crate::output::CrawlReport;
use crate::Result;
use tokio::sync::watch;
use url::Url;

/// Runs a complete crawl from a seed URL
///
/// This is the main entry point for starting a crawl. It wires Ctrl+C to a
/// shutdown signal: the first interrupt stops new fetch dispatches, lets
/// in-flight fetches drain, and still flushes the residual cache before
/// returning.
///
/// # Arguments
///
/// * `seed` - The URL to start from
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed (individual page failures included)
/// * `Err(SkimmerError)` - Startup failure or fatal output I/O error
pub async fn crawl(seed: Url, config: CrawlConfig) -> Result<CrawlReport> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received; finishing in-flight fetches and flushing cache");
            let _ = shutdown_tx.send(true);
        }
    });

    CrawlEngine::new(seed, config)?.run(shutdown_rx).await
}
