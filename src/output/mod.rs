//! Output module for crawl reports
//!
//! This module handles:
//! - Printing the end-of-run summary to the console
//! - Exporting all products as a markdown report

mod markdown;
mod summary;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use summary::{format_summary, print_summary};
