//! Configuration module for Listing-Scraper
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and resolving proxy credentials from the environment.
//!
//! # Example
//!
//! ```no_run
//! use listing_scraper::config::{load_settings, ProxyEndpoint};
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("scraper.toml")).unwrap();
//! let proxy = ProxyEndpoint::resolve(&settings.proxy).unwrap();
//! println!("Crawling {} via {}", settings.scraper.base_url, proxy.host());
//! ```

mod parser;
mod proxy;
mod types;
mod validation;

// Re-export types
pub use proxy::{
    ProxyEndpoint, DEFAULT_PROXY_HOST, DEFAULT_PROXY_PORT, DEFAULT_PROXY_SCHEME, ENV_PROXY_HOST,
    ENV_PROXY_PASSWORD, ENV_PROXY_PORT, ENV_PROXY_SCHEME, ENV_PROXY_USER,
};
pub use types::{FetchPolicy, ProxyFileConfig, ScraperConfig, SelectorConfig, Settings};

// Re-export parser functions
pub use parser::{load_env_file, load_settings, load_settings_or_default, revalidate};

pub(crate) use validation::parse_selector;
