//! Product field extraction from listing pages
//!
//! Each product card is read independently. Missing field nodes fall back to
//! sentinel values, so one broken card never costs the rest of the page.
//!
//! # Fields
//!
//! | Field | Source | Default |
//! |-------|--------|---------|
//! | title | `title` attribute of the heading anchor (inner text as fallback) | `""` |
//! | price | text of the price element | `"N/A"` |
//! | availability | text of the availability element | `"N/A"` |
//! | rating | last class token of the star-rating element | `"N/A"` |
//! | link | `href` of the heading anchor, made absolute | `""` |

use crate::crawler::pagination::find_next_page;
use crate::crawler::selectors::ListingSelectors;
use crate::url::resolve_link;
use scraper::{ElementRef, Html};
use std::fmt;

/// Placeholder for a missing text field
pub const NOT_AVAILABLE: &str = "N/A";

/// One product extracted from a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub title: String,

    /// Raw currency-formatted text, e.g. `£51.77`
    pub price: String,

    pub availability: String,

    /// Rating word taken from the class list, e.g. `Three`
    pub rating: String,

    /// Absolute product URL, or empty if the card has no link
    pub link: String,
}

/// Why a card was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The product link did not resolve to a valid URL
    InvalidLink(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLink(link) => write!(f, "invalid product link '{}'", link),
        }
    }
}

/// A card that could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCard {
    /// Position of the card on the page (0-based)
    pub index: usize,
    pub reason: SkipReason,
}

/// Result of extracting a single card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    Extracted(ProductRecord),
    Skipped(SkippedCard),
}

/// Everything extracted from one listing page
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    /// Records in page order
    pub products: Vec<ProductRecord>,

    pub skipped: Vec<SkippedCard>,

    /// Absolute URL of the next page, if the page links to one
    pub next_page: Option<String>,
}

/// Parses a listing page once and extracts products and the next-page link
///
/// # Arguments
///
/// * `html` - The page HTML
/// * `base_url` - Base URL for resolving relative links
/// * `selectors` - Compiled selectors for the listing layout
pub fn parse_listing_page(html: &str, base_url: &str, selectors: &ListingSelectors) -> PageResult {
    let document = Html::parse_document(html);

    let mut result = PageResult::default();
    for outcome in extract_from_document(&document, base_url, selectors) {
        match outcome {
            CardOutcome::Extracted(record) => result.products.push(record),
            CardOutcome::Skipped(skipped) => {
                tracing::warn!("Skipping product card #{}: {}", skipped.index, skipped.reason);
                result.skipped.push(skipped);
            }
        }
    }

    result.next_page = find_next_page(&document, base_url, &selectors.next_page);
    result
}

/// Extracts every card on the page, keeping skip outcomes
pub fn extract_cards(html: &str, base_url: &str, selectors: &ListingSelectors) -> Vec<CardOutcome> {
    let document = Html::parse_document(html);
    extract_from_document(&document, base_url, selectors)
}

/// Extracts product records using the default catalogue selectors
///
/// Skipped cards are logged and left out. A page without cards yields an
/// empty vector.
///
/// # Example
///
/// ```
/// use listing_scraper::extract_products;
///
/// let html = r#"<article class="product_pod">
///     <h3><a href="catalogue/book_1/index.html" title="Book One">Book...</a></h3>
///     <p class="price_color">£10.00</p>
/// </article>"#;
/// let products = extract_products(html, "https://example.com");
/// assert_eq!(products[0].title, "Book One");
/// assert_eq!(products[0].link, "https://example.com/catalogue/book_1/index.html");
/// ```
pub fn extract_products(html: &str, base_url: &str) -> Vec<ProductRecord> {
    let selectors = match ListingSelectors::defaults() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Default selectors failed to compile: {}", e);
            return Vec::new();
        }
    };

    parse_listing_page(html, base_url, &selectors).products
}

fn extract_from_document(
    document: &Html,
    base_url: &str,
    selectors: &ListingSelectors,
) -> Vec<CardOutcome> {
    document
        .select(&selectors.card)
        .enumerate()
        .map(|(index, card)| extract_card(card, index, base_url, selectors))
        .collect()
}

/// Reads the five fields of one card
fn extract_card(
    card: ElementRef<'_>,
    index: usize,
    base_url: &str,
    selectors: &ListingSelectors,
) -> CardOutcome {
    let anchor = card.select(&selectors.title).next();
    let price = card.select(&selectors.price).next();
    let availability = card.select(&selectors.availability).next();
    let rating = card.select(&selectors.rating).next();

    let title = anchor
        .and_then(|a| {
            a.value()
                .attr("title")
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .or_else(|| Some(element_text(a)).filter(|t| !t.is_empty()))
        })
        .unwrap_or_default();

    let link = anchor
        .and_then(|a| a.value().attr("href"))
        .map(|href| resolve_link(href, base_url))
        .unwrap_or_default();

    if !link.is_empty() && url::Url::parse(&link).is_err() {
        return CardOutcome::Skipped(SkippedCard {
            index,
            reason: SkipReason::InvalidLink(link),
        });
    }

    CardOutcome::Extracted(ProductRecord {
        title,
        price: text_or_default(price),
        availability: text_or_default(availability),
        rating: rating
            .and_then(|r| r.value().attr("class"))
            .and_then(|class| class.split_whitespace().last())
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        link,
    })
}

/// Text content with runs of whitespace collapsed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(|t| t.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

fn text_or_default(element: Option<ElementRef<'_>>) -> String {
    element
        .map(element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
