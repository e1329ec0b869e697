use crate::config::proxy::ProxyEndpoint;
use crate::config::types::{ScraperConfig, SelectorConfig, Settings};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

const MAX_RETRIES_LIMIT: u32 = 10;
const SUPPORTED_PROXY_SCHEMES: [&str; 3] = ["http", "https", "socks5"];

/// Validates the entire configuration
///
/// Proxy credentials are not checked here: they usually come from the
/// environment and are validated when the `ProxyEndpoint` is resolved.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    validate_scraper_config(&settings.scraper)?;
    validate_selectors(&settings.selectors)?;
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if !config.delay_between_requests.is_finite() || config.delay_between_requests < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay-between-requests must be a non-negative number of seconds, got {}",
            config.delay_between_requests
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.max_retries > MAX_RETRIES_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max-retries must be <= {}, got {}",
            MAX_RETRIES_LIMIT, config.max_retries
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates that every selector compiles
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    for selector in [
        &config.card,
        &config.title,
        &config.price,
        &config.availability,
        &config.rating,
        &config.next_page,
    ] {
        parse_selector(selector)?;
    }
    Ok(())
}

/// Compiles a CSS selector, mapping failures to a configuration error
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector {
            selector: selector.to_string(),
            message: "selector cannot be empty".to_string(),
        });
    }

    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Validates a resolved proxy endpoint
pub(crate) fn validate_proxy(endpoint: &ProxyEndpoint) -> Result<(), ConfigError> {
    if endpoint.user().is_empty() || endpoint.password().is_empty() {
        return Err(ConfigError::MissingCredentials);
    }

    if endpoint.host().is_empty() {
        return Err(ConfigError::Validation(
            "proxy host cannot be empty".to_string(),
        ));
    }

    if endpoint.port().parse::<u16>().is_err() {
        return Err(ConfigError::Validation(format!(
            "proxy port must be a number between 0 and 65535, got '{}'",
            endpoint.port()
        )));
    }

    if !SUPPORTED_PROXY_SCHEMES.contains(&endpoint.scheme()) {
        return Err(ConfigError::Validation(format!(
            "proxy scheme must be one of {:?}, got '{}'",
            SUPPORTED_PROXY_SCHEMES,
            endpoint.scheme()
        )));
    }

    Ok(())
}
