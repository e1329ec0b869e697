//! Crawler coordinator - the pagination loop
//!
//! Pages are processed strictly one at a time: the next URL is only known
//! after the current page has been fetched and parsed. The loop ends when a
//! page has no next link, the page cap is reached, or a fetch fails.

use crate::config::{revalidate, ProxyEndpoint, Settings};
use crate::crawler::extractor::parse_listing_page;
use crate::crawler::fetcher::RateLimitedFetcher;
use crate::crawler::selectors::ListingSelectors;
use crate::state::{CrawlReport, CrawlState, StopReason};
use crate::ScrapeError;
use std::time::Instant;

/// Main crawler coordinator structure
pub struct Crawler {
    fetcher: RateLimitedFetcher,
    selectors: ListingSelectors,
    base_url: String,
    max_pages: u32,
}

impl Crawler {
    /// Creates a crawler that fetches through `proxy`
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(ScrapeError)` - Invalid settings or the HTTP client could not be built
    pub fn new(settings: &Settings, proxy: &ProxyEndpoint) -> Result<Self, ScrapeError> {
        let fetcher = RateLimitedFetcher::new(proxy, settings.scraper.fetch_policy())?;
        Self::with_fetcher(fetcher, settings)
    }

    /// Creates a crawler around an existing fetcher
    pub fn with_fetcher(fetcher: RateLimitedFetcher, settings: &Settings) -> Result<Self, ScrapeError> {
        revalidate(settings)?;
        let selectors = ListingSelectors::compile(&settings.selectors)?;

        Ok(Self {
            fetcher,
            selectors,
            base_url: settings.scraper.base_url.clone(),
            max_pages: settings.scraper.max_pages,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Runs the pagination loop to completion
    ///
    /// A fetch failure ends the crawl but does not discard the products
    /// gathered from earlier pages; it is reported in the stop reason.
    pub async fn run(&mut self) -> CrawlReport {
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl at {} (page cap {})",
            self.base_url,
            self.max_pages
        );

        let mut state = CrawlState::start(self.base_url.clone());
        let mut products = Vec::new();
        let mut visited = Vec::new();
        let mut pages_processed: u32 = 0;
        let mut cards_skipped = 0;

        let stop_reason = loop {
            let current_url = match state {
                CrawlState::Running { current_url } => current_url,
                CrawlState::Done(reason) => break reason,
            };

            tracing::info!("Fetching page {}: {}", pages_processed + 1, current_url);

            let response = match self.fetcher.get(&current_url).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!("Fetch failed for {}: {}", current_url, e);
                    state = CrawlState::Done(StopReason::FetchFailed(e));
                    continue;
                }
            };

            let page = parse_listing_page(&response.body, &self.base_url, &self.selectors);
            pages_processed += 1;

            tracing::info!(
                "Page {} (status {}): {} products, {} skipped",
                pages_processed,
                response.status,
                page.products.len(),
                page.skipped.len()
            );

            products.extend(page.products);
            cards_skipped += page.skipped.len();
            visited.push(current_url);

            match &page.next_page {
                Some(next) => tracing::debug!("Next page: {}", next),
                None => tracing::info!("No more pages"),
            }

            state = CrawlState::advance(page.next_page, pages_processed, self.max_pages);
            if state.is_terminal() {
                tracing::debug!("Stopping after page {}", pages_processed);
            }
        };

        let elapsed = start_time.elapsed();
        tracing::info!(
            "Crawl finished ({}): {} products from {} pages in {:?}",
            stop_reason,
            products.len(),
            pages_processed,
            elapsed
        );

        CrawlReport {
            products,
            pages_processed,
            cards_skipped,
            visited,
            stop_reason,
            elapsed,
        }
    }
}

/// Runs a complete crawl with the given settings and proxy
///
/// # Example
///
/// ```no_run
/// use listing_scraper::config::{load_settings_or_default, ProxyEndpoint};
/// use listing_scraper::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = load_settings_or_default(None)?;
/// let proxy = ProxyEndpoint::resolve(&settings.proxy)?;
/// let report = run_crawl(&settings, &proxy).await?;
/// println!("{} products", report.total_products());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(settings: &Settings, proxy: &ProxyEndpoint) -> Result<CrawlReport, ScrapeError> {
    let mut crawler = Crawler::new(settings, proxy)?;
    Ok(crawler.run().await)
}
