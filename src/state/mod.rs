//! Page state definitions for tracking crawl progress

use std::fmt;

/// Represents the current state of a URL in the crawl process
///
/// Every URL enters the visited set as `Queued` before its fetch is
/// dispatched and moves through `Fetching` to exactly one terminal state.
/// No URL re-enters `Fetching` once it has left `Queued`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// URL is in the frontier, waiting to be fetched
    Queued,

    /// URL is currently being fetched
    Fetching,

    /// Page was fetched and its text and links were processed
    Done,

    /// Fetch failed (network error, timeout, non-success status)
    Failed,

    /// Page was fetched but is not HTML; no text or links taken from it
    Skipped,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Queued | Self::Fetching)
    }

    /// Returns true if the URL may still be processed
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Queued | Self::Fetching)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Queued => "queued",
            Self::Fetching => "fetching",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        };
        write!(f, "{}", label)
    }
}
