//! End-of-run crawl summary

use std::time::Duration;

/// Counters accumulated over one crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Number of fetches dispatched
    pub pages_fetched: u64,

    /// Pages fetched and processed successfully
    pub pages_ok: u64,

    /// Pages whose fetch failed (network error, timeout, non-success status)
    pub pages_failed: u64,

    /// Pages skipped because the response was not HTML
    pub pages_skipped: u64,

    /// Distinct URLs entered into the visited set
    pub urls_seen: u64,

    /// Total anchors that survived link filtering (duplicates included)
    pub links_found: u64,

    /// Bytes of text extracted across all pages
    pub bytes_extracted: u64,

    /// Number of buffer flushes performed
    pub flushes: u64,

    /// Bytes written to output files
    pub bytes_flushed: u64,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Prints a crawl report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Pages:");
    println!("  Fetched: {}", report.pages_fetched);
    println!("  Succeeded: {}", report.pages_ok);
    println!("  Failed: {}", report.pages_failed);
    println!("  Skipped (non-HTML): {}", report.pages_skipped);
    println!();

    println!("Links:");
    println!("  Distinct URLs seen: {}", report.urls_seen);
    println!("  Anchors followed up: {}", report.links_found);
    println!();

    println!("Text:");
    println!("  Extracted: {} bytes", report.bytes_extracted);
    println!(
        "  Written: {} bytes across {} flush(es)",
        report.bytes_flushed, report.flushes
    );
    println!();

    let success_rate = if report.pages_fetched > 0 {
        (report.pages_ok as f64 / report.pages_fetched as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Completed in {:.1?} ({:.1}% of fetches succeeded)",
        report.elapsed, success_rate
    );
}
