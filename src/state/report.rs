use crate::crawler::ProductRecord;
use crate::state::StopReason;
use std::time::Duration;

/// Result of a finished crawl
///
/// Carries everything gathered before the crawl stopped, including the
/// partial results of a crawl that ended on a fetch failure.
#[derive(Debug)]
pub struct CrawlReport {
    /// Products from every processed page, in page order
    pub products: Vec<ProductRecord>,

    /// Pages fetched and extracted successfully
    pub pages_processed: u32,

    /// Cards dropped during extraction across all pages
    pub cards_skipped: usize,

    /// URLs fetched successfully, in crawl order
    pub visited: Vec<String>,

    pub stop_reason: StopReason,

    pub elapsed: Duration,
}

impl CrawlReport {
    pub fn total_products(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the crawl ended without a transport failure
    pub fn is_success(&self) -> bool {
        self.stop_reason.is_success()
    }
}
