//! Output pipeline for harvested text
//!
//! This module contains the in-memory cache buffer, the flat-file sink it
//! flushes into, and the end-of-run crawl report.

mod buffer;
mod report;
mod sink;

pub use buffer::CacheBuffer;
pub use report::{print_report, CrawlReport};
pub use sink::{sanitize_host, FileSink, SinkError, TextSink};
