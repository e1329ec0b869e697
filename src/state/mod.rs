//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the two-state pagination loop (running / done)
//! - `StopReason`: why a crawl reached its terminal state
//! - `CrawlReport`: everything a finished crawl hands back to the caller

mod crawl_state;
mod report;

// Re-export main types
pub use crawl_state::{CrawlState, StopReason};
pub use report::CrawlReport;
