//! Listing-Scraper: a polite paginated catalogue scraper
//!
//! This crate fetches product-listing pages through an authenticated upstream
//! proxy, one page at a time with a minimum gap between requests, and extracts
//! structured product records from each page until pagination runs out.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Listing-Scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{}", transport_message(.url, .status, .source))]
    Transport {
        url: String,
        status: Option<u16>,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn transport_message(url: &str, status: &Option<u16>, source: &reqwest::Error) -> String {
    match status {
        Some(code) => format!("HTTP {} for {} through proxy: {}", code, url, source),
        None => format!("Request to {} through proxy failed: {}", url, source),
    }
}

impl ScrapeError {
    /// Returns the HTTP status carried by a transport error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Proxy credentials missing: MAGNETIC_PROXY_USER and MAGNETIC_PROXY_PASSWORD must be set \
         in the environment or the [proxy] section of the config file"
    )]
    MissingCredentials,

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Result type alias for Listing-Scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{ProxyEndpoint, Settings};
pub use crawler::{extract_products, next_page_url, Crawler, ProductRecord, RateLimitedFetcher};
pub use state::{CrawlReport, StopReason};
pub use crate::url::resolve_link;
