//! Configuration types and their defaults

use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Listing-Scraper
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scraper: ScraperConfig,
    pub proxy: ProxyFileConfig,
    pub selectors: SelectorConfig,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// First listing page; relative links are resolved against it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Minimum gap between the start of two requests (seconds)
    #[serde(rename = "delay-between-requests")]
    pub delay_between_requests: f64,

    /// Accepted for compatibility; the fetch path does not retry
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Maximum number of listing pages to crawl
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://books.toscrape.com".to_string(),
            timeout_secs: 10,
            delay_between_requests: 1.0,
            max_retries: 3,
            max_pages: 2,
            user_agent: format!("listing-scraper/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ScraperConfig {
    /// Builds the immutable request policy for the fetcher
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            min_interval: Duration::try_from_secs_f64(self.delay_between_requests)
                .unwrap_or(Duration::ZERO),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Request throttling and timeout policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Minimum wall-clock gap between the start of successive requests
    pub min_interval: Duration,

    /// Timeout applied to a request unless the caller overrides it
    pub timeout: Duration,

    pub user_agent: String,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        ScraperConfig::default().fetch_policy()
    }
}

/// Proxy values from the config file; environment variables take precedence
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProxyFileConfig {
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub scheme: Option<String>,
}

/// CSS selectors describing the listing markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One product card per match
    pub card: String,

    /// Heading anchor carrying the title attribute and product link
    pub title: String,

    pub price: String,

    pub availability: String,

    /// Element whose last class token encodes the star rating
    pub rating: String,

    /// Anchor inside the "next page" pagination control
    #[serde(rename = "next-page")]
    pub next_page: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: "article.product_pod".to_string(),
            title: "h3 a".to_string(),
            price: ".price_color".to_string(),
            availability: ".availability".to_string(),
            rating: ".star-rating".to_string(),
            next_page: "li.next a".to_string(),
        }
    }
}
