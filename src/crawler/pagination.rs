//! Pagination link discovery
//!
//! A listing page either links to its successor through the "next" pagination
//! control or it is the last page. A present-but-blank href counts as absent.

use crate::crawler::selectors::ListingSelectors;
use crate::url::resolve_link;
use scraper::{Html, Selector};

/// Finds the absolute URL of the next page in a parsed document
pub fn find_next_page(document: &Html, base_url: &str, next_selector: &Selector) -> Option<String> {
    let anchor = document.select(next_selector).next()?;
    let href = anchor.value().attr("href")?.trim();

    if href.is_empty() {
        return None;
    }

    Some(resolve_link(href, base_url))
}

/// Returns the next-page URL using the default pagination selector
///
/// # Returns
///
/// * `Some(String)` - Absolute URL of the next page
/// * `None` - This is the last page
///
/// # Example
///
/// ```
/// use listing_scraper::next_page_url;
///
/// let html = r#"<ul class="pager"><li class="next"><a href="catalogue/page-2.html">next</a></li></ul>"#;
/// assert_eq!(
///     next_page_url(html, "https://example.com").as_deref(),
///     Some("https://example.com/catalogue/page-2.html")
/// );
/// assert_eq!(next_page_url("<p>end</p>", "https://example.com"), None);
/// ```
pub fn next_page_url(html: &str, base_url: &str) -> Option<String> {
    let selectors = match ListingSelectors::defaults() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Default selectors failed to compile: {}", e);
            return None;
        }
    };

    next_page_url_with(html, base_url, &selectors)
}

/// Returns the next-page URL using a custom selector set
pub fn next_page_url_with(html: &str, base_url: &str, selectors: &ListingSelectors) -> Option<String> {
    let document = Html::parse_document(html);
    find_next_page(&document, base_url, &selectors.next_page)
}
