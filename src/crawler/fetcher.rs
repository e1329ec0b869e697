//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building an HTTP client that routes every request through the proxy
//! - Enforcing a minimum gap between the start of successive requests
//! - GET and POST requests with per-request timeouts
//! - Mapping non-success statuses and network failures to transport errors
//!
//! There is no retry logic: a failed request is surfaced immediately.

use crate::config::{FetchPolicy, ProxyEndpoint};
use crate::ScrapeError;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Proxy};
use std::time::{Duration, Instant};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of an outgoing request
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Raw text sent as-is
    Text(String),

    /// Form fields, sent `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
}

/// A single outgoing request
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: String,
    pub method: Method,
    pub body: Option<RequestBody>,

    /// Overrides the policy timeout for this request only
    pub timeout: Option<Duration>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::GET,
            body: None,
            timeout: None,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::POST,
            body: None,
            timeout: None,
        }
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A successful response
#[derive(Debug)]
pub struct RawResponse {
    /// Final URL after redirects
    pub url: String,

    pub status: u16,

    pub headers: HeaderMap,

    pub body: String,
}

/// Builds an HTTP client that sends all traffic through the proxy
///
/// The same proxy URL is installed for plaintext and TLS requests.
///
/// # Arguments
///
/// * `proxy` - The upstream proxy endpoint
/// * `policy` - The fetch policy (user agent)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(ScrapeError::ClientBuild)` - The proxy URL or client settings were rejected
pub fn build_http_client(proxy: &ProxyEndpoint, policy: &FetchPolicy) -> Result<Client, ScrapeError> {
    let proxy = Proxy::all(proxy.proxy_url()).map_err(ScrapeError::ClientBuild)?;

    Client::builder()
        .proxy(proxy)
        .user_agent(policy.user_agent.as_str())
        .connect_timeout(CONNECT_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(ScrapeError::ClientBuild)
}

/// HTTP client wrapper enforcing a minimum interval between request starts
///
/// Timing state belongs to the instance, so independent fetchers never
/// throttle each other.
pub struct RateLimitedFetcher {
    client: Client,
    policy: FetchPolicy,

    /// Start time of the previous request; `None` until the first request
    last_request: Option<Instant>,
}

impl RateLimitedFetcher {
    /// Creates a fetcher routed through `proxy`
    pub fn new(proxy: &ProxyEndpoint, policy: FetchPolicy) -> Result<Self, ScrapeError> {
        let client = build_http_client(proxy, &policy)?;
        tracing::debug!("HTTP client routed through proxy {}", proxy.redacted_url());
        Ok(Self::with_client(client, policy))
    }

    /// Creates a fetcher around an already-configured client
    pub fn with_client(client: Client, policy: FetchPolicy) -> Self {
        Self {
            client,
            policy,
            last_request: None,
        }
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Start time of the most recent request
    pub fn last_request(&self) -> Option<Instant> {
        self.last_request
    }

    /// Sleeps until the minimum interval has passed, then records the new start
    async fn wait_if_needed(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.policy.min_interval {
                let wait = self.policy.min_interval - elapsed;
                tracing::trace!("Rate limit: waiting {:?} before next request", wait);
                tokio::time::sleep(wait).await;
            }
        }

        self.last_request = Some(Instant::now());
    }

    /// Sends a request through the proxy
    ///
    /// # Returns
    ///
    /// * `Ok(RawResponse)` - The server answered with a 1xx/2xx/3xx status
    /// * `Err(ScrapeError::Transport)` - 4xx/5xx status, timeout, or network failure
    pub async fn fetch(&mut self, request: FetchRequest) -> Result<RawResponse, ScrapeError> {
        self.wait_if_needed().await;

        let FetchRequest {
            url,
            method,
            body,
            timeout,
        } = request;

        tracing::debug!("{} {}", method, url);

        let mut builder = self
            .client
            .request(method, url.as_str())
            .timeout(timeout.unwrap_or(self.policy.timeout));

        builder = match body {
            Some(RequestBody::Text(text)) => builder.body(text),
            Some(RequestBody::Form(fields)) => builder.form(&fields),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| ScrapeError::Transport {
            url: url.clone(),
            status: e.status().map(|s| s.as_u16()),
            source: e,
        })?;

        let response = response.error_for_status().map_err(|e| ScrapeError::Transport {
            url: url.clone(),
            status: e.status().map(|s| s.as_u16()),
            source: e,
        })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = response.headers().clone();

        let body = response.text().await.map_err(|e| ScrapeError::Transport {
            url: url.clone(),
            status: Some(status),
            source: e,
        })?;

        tracing::debug!("{} answered {} ({} bytes)", url, status, body.len());

        Ok(RawResponse {
            url: final_url,
            status,
            headers,
            body,
        })
    }

    /// Sends a GET request through the proxy
    pub async fn get(&mut self, url: &str) -> Result<RawResponse, ScrapeError> {
        self.fetch(FetchRequest::get(url)).await
    }

    /// Sends a POST request with `body` through the proxy
    pub async fn post(&mut self, url: &str, body: RequestBody) -> Result<RawResponse, ScrapeError> {
        self.fetch(FetchRequest::post(url).with_body(body)).await
    }
}
