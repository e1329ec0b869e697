//! Compiled CSS selectors for product cards and pagination

use crate::config::{parse_selector, SelectorConfig};
use crate::ConfigError;
use scraper::Selector;

/// Compiled selector set for one listing layout
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    pub card: Selector,
    pub title: Selector,
    pub price: Selector,
    pub availability: Selector,
    pub rating: Selector,
    pub next_page: Selector,
}

impl ListingSelectors {
    /// Compiles every selector in `config`
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            card: parse_selector(&config.card)?,
            title: parse_selector(&config.title)?,
            price: parse_selector(&config.price)?,
            availability: parse_selector(&config.availability)?,
            rating: parse_selector(&config.rating)?,
            next_page: parse_selector(&config.next_page)?,
        })
    }

    /// Selector set for the default catalogue markup
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::compile(&SelectorConfig::default())
    }
}
