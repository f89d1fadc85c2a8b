//! Crawl engine - main traversal orchestration
//!
//! One engine task owns the visited map, the frontier, the cache buffer and
//! the file sink, so every mutation of crawl state is naturally serialized.
//! Fetches fan out through a `JoinSet` bounded by the configured concurrency
//! cap; completed fetches are reaped one at a time and fed through the
//! text/link extractors.

use crate::config::CrawlConfig;
use crate::crawler::extract::{extract_links, extract_text};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::output::{CacheBuffer, CrawlReport, FileSink};
use crate::state::PageState;
use crate::url::dedup_key;
use crate::SkimmerError;
use reqwest::Client;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinSet;
use url::Url;

/// A completed fetch, handed back from a worker to the engine
struct FetchedPage {
    url: Url,
    result: FetchResult,
}

/// Drives one crawl run from a seed URL to completion
///
/// Per-URL lifecycle: a URL enters the visited map as `Queued` when it is
/// added to the frontier (strictly before its fetch is dispatched), moves to
/// `Fetching` on dispatch, and ends in `Done`, `Failed` or `Skipped`. The
/// check-and-insert on the visited map is a single `entry` call on the only
/// task that touches it, so no URL is ever fetched twice.
pub struct CrawlEngine {
    config: CrawlConfig,
    client: Client,
    pages: HashMap<String, PageState>,
    frontier: VecDeque<Url>,
    buffer: CacheBuffer,
    sink: FileSink,
    report: CrawlReport,
    started: Instant,
}

impl CrawlEngine {
    /// Creates an engine seeded with one URL
    ///
    /// Builds the HTTP client and the file sink (creating the output
    /// directory if needed) and enqueues the seed.
    pub fn new(seed: Url, config: CrawlConfig) -> Result<Self, SkimmerError> {
        let client = build_http_client(&config.fetch)?;
        let sink = FileSink::new(&config.output.directory, &seed)?;
        let buffer = CacheBuffer::new(config.output.max_cache_bytes as usize);

        let mut pages = HashMap::new();
        let mut frontier = VecDeque::new();
        pages.insert(dedup_key(&seed), PageState::Queued);
        frontier.push_back(seed);

        Ok(Self {
            config,
            client,
            pages,
            frontier,
            buffer,
            sink,
            report: CrawlReport::default(),
            started: Instant::now(),
        })
    }

    /// Runs the crawl to completion and returns the report
    ///
    /// The run ends when the frontier is drained and no fetch is in flight
    /// (or the shutdown signal fires and in-flight fetches have drained);
    /// any residual buffer content is flushed before returning. A sink I/O
    /// error is fatal: losing buffered text is a correctness violation,
    /// unlike losing one page.
    pub async fn run(
        mut self,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<CrawlReport, SkimmerError> {
        let mut in_flight: JoinSet<FetchedPage> = JoinSet::new();
        let mut stopping = false;
        // Once the shutdown sender goes away there is nothing left to watch.
        let mut armed = true;

        loop {
            if !stopping {
                self.top_up(&mut in_flight);
            }

            if in_flight.is_empty() {
                break;
            }

            tokio::select! {
                joined = in_flight.join_next() => {
                    if let Some(joined) = joined {
                        match joined {
                            Ok(page) => self.reap(page)?,
                            Err(e) => tracing::error!("Fetch task panicked: {}", e),
                        }
                    }
                }
                changed = shutdown.changed(), if armed => {
                    match changed {
                        Ok(()) => {
                            if *shutdown.borrow() {
                                stopping = true;
                                tracing::warn!(
                                    "Shutdown requested; draining {} in-flight fetch(es), {} queued URLs abandoned",
                                    in_flight.len(),
                                    self.frontier.len()
                                );
                            }
                        }
                        Err(_) => armed = false,
                    }
                }
            }
        }

        self.buffer.flush_if_nonempty(&mut self.sink)?;

        self.report.urls_seen = self.pages.len() as u64;
        self.report.flushes = self.buffer.flushes();
        self.report.bytes_flushed = self.buffer.bytes_flushed();
        self.report.elapsed = self.started.elapsed();

        tracing::info!(
            "Crawl completed: {} pages fetched ({} ok, {} failed, {} skipped) in {:.1?}",
            self.report.pages_fetched,
            self.report.pages_ok,
            self.report.pages_failed,
            self.report.pages_skipped,
            self.report.elapsed
        );

        Ok(self.report)
    }

    /// Dispatches fetches from the frontier until the concurrency cap or the
    /// page limit is reached
    fn top_up(&mut self, in_flight: &mut JoinSet<FetchedPage>) {
        while in_flight.len() < self.config.limits.concurrency {
            if self.page_limit_reached() {
                break;
            }

            let Some(url) = self.frontier.pop_front() else {
                break;
            };

            self.pages.insert(dedup_key(&url), PageState::Fetching);
            self.report.pages_fetched += 1;

            tracing::debug!("Crawling URL: {}", url);
            let client = self.client.clone();
            in_flight.spawn(async move {
                let result = fetch_page(&client, url.as_str()).await;
                FetchedPage { url, result }
            });
        }
    }

    fn page_limit_reached(&self) -> bool {
        let max = self.config.limits.max_pages;
        max > 0 && self.report.pages_fetched >= max
    }

    /// Processes one completed fetch
    ///
    /// Fetch failures end their branch and never abort siblings; only a sink
    /// I/O error propagates out of here.
    fn reap(&mut self, page: FetchedPage) -> Result<(), SkimmerError> {
        let key = dedup_key(&page.url);

        match page.result {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                tracing::debug!("Fetched {} ({} -> {})", page.url, status_code, final_url);

                let text = extract_text(&body);
                self.report.bytes_extracted += text.len() as u64;
                self.buffer.add(&text, &mut self.sink)?;

                let links = extract_links(&body, &page.url);
                self.report.links_found += links.len() as u64;
                for link in links {
                    self.enqueue(link);
                }

                self.pages.insert(key, PageState::Done);
                self.report.pages_ok += 1;
            }

            FetchResult::NotHtml { content_type } => {
                tracing::info!("Skipping {} (content-type: {})", page.url, content_type);
                self.pages.insert(key, PageState::Skipped);
                self.report.pages_skipped += 1;
            }

            FetchResult::HttpError { status_code } => {
                tracing::warn!("Failed to retrieve {}: HTTP {}", page.url, status_code);
                self.pages.insert(key, PageState::Failed);
                self.report.pages_failed += 1;
            }

            FetchResult::NetworkError { error, timeout } => {
                if timeout {
                    tracing::warn!("Timed out retrieving {}", page.url);
                } else {
                    tracing::warn!("Failed to retrieve {}: {}", page.url, error);
                }
                self.pages.insert(key, PageState::Failed);
                self.report.pages_failed += 1;
            }
        }

        let done = self.report.pages_ok + self.report.pages_failed + self.report.pages_skipped;
        if done % 25 == 0 {
            let rate = done as f64 / self.started.elapsed().as_secs_f64();
            tracing::info!(
                "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                done,
                self.frontier.len(),
                rate
            );
        }

        Ok(())
    }

    /// Adds a candidate URL to the frontier if it has never been seen
    ///
    /// The vacancy check and the insertion are one operation; this is the
    /// de-duplication barrier.
    fn enqueue(&mut self, url: Url) {
        if let Entry::Vacant(slot) = self.pages.entry(dedup_key(&url)) {
            slot.insert(PageState::Queued);
            self.frontier.push_back(url);
        }
    }
}
