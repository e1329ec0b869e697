//! Crawler module for listing-page fetching and extraction
//!
//! This module contains the core scraping logic, including:
//! - Proxied HTTP fetching with a minimum gap between requests
//! - Product field extraction from listing pages
//! - Next-page discovery
//! - The sequential pagination loop

mod coordinator;
mod extractor;
mod fetcher;
mod pagination;
mod selectors;

pub use coordinator::{run_crawl, Crawler};
pub use extractor::{
    extract_cards, extract_products, parse_listing_page, CardOutcome, PageResult, ProductRecord,
    SkipReason, SkippedCard, NOT_AVAILABLE,
};
pub use fetcher::{build_http_client, FetchRequest, RateLimitedFetcher, RawResponse, RequestBody};
pub use pagination::{find_next_page, next_page_url, next_page_url_with};
pub use selectors::ListingSelectors;
