//! Crawl state definitions for the pagination loop
//!
//! The loop has exactly two states: it is either running on a current URL or
//! done for a recorded reason.

use crate::ScrapeError;
use std::fmt;

/// Why a crawl stopped
#[derive(Debug)]
pub enum StopReason {
    /// The last page fetched had no "next page" link
    LastPage,

    /// The page cap was reached while further pages were available
    PageCap,

    /// A fetch failed; the crawl ends with the results gathered so far
    FetchFailed(ScrapeError),
}

impl StopReason {
    /// Returns true if the crawl ended without a transport failure
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::FetchFailed(_))
    }

    /// Short label for summaries and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::LastPage => "last_page",
            Self::PageCap => "page_cap",
            Self::FetchFailed(_) => "fetch_failed",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastPage => write!(f, "no more pages"),
            Self::PageCap => write!(f, "page cap reached"),
            Self::FetchFailed(e) => write!(f, "fetch failed: {}", e),
        }
    }
}

/// Current state of the crawl loop
#[derive(Debug)]
pub enum CrawlState {
    /// Fetching pages, starting from `current_url`
    Running { current_url: String },

    /// Terminal state
    Done(StopReason),
}

impl CrawlState {
    /// Initial state for a crawl starting at `base_url`
    pub fn start(base_url: impl Into<String>) -> Self {
        Self::Running {
            current_url: base_url.into(),
        }
    }

    /// Returns true if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// State after a page was processed
    ///
    /// Moves to the next URL if there is one and the page cap still allows
    /// another fetch; otherwise finishes with the matching reason.
    pub fn advance(next_url: Option<String>, pages_processed: u32, max_pages: u32) -> Self {
        match next_url {
            None => Self::Done(StopReason::LastPage),
            Some(_) if pages_processed >= max_pages => Self::Done(StopReason::PageCap),
            Some(url) => Self::Running { current_url: url },
        }
    }
}
