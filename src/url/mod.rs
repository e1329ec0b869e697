//! URL handling module for Listing-Scraper
//!
//! Product links and pagination links share one resolution routine so the two
//! can never disagree about how a relative href becomes an absolute URL.

/// Returns true if `href` already carries an absolute http(s) scheme
///
/// The comparison is ASCII case-insensitive.
pub fn is_absolute(href: &str) -> bool {
    let lower = href.get(..8).unwrap_or(href).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolves a possibly-relative href against the base URL
///
/// Absolute hrefs are returned unchanged. Relative hrefs are joined to
/// `base_url` with exactly one separating slash: trailing slashes on the base
/// and leading slashes on the href are dropped first. An empty href resolves
/// to an empty string.
///
/// # Examples
///
/// ```
/// use listing_scraper::url::resolve_link;
///
/// assert_eq!(
///     resolve_link("catalogue/book_1/index.html", "https://example.com"),
///     "https://example.com/catalogue/book_1/index.html"
/// );
/// assert_eq!(
///     resolve_link("https://other.com/x", "https://example.com"),
///     "https://other.com/x"
/// );
/// ```
pub fn resolve_link(href: &str, base_url: &str) -> String {
    let href = href.trim();

    if href.is_empty() {
        return String::new();
    }

    if is_absolute(href) {
        return href.to_string();
    }

    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}
