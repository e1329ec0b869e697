use listing_scraper::config::{ProxyEndpoint, Settings};
use wiremock::MockServer;

pub const SITE: &str = "http://books.test";
pub const PROXY_USER: &str = "tester";
pub const PROXY_PASSWORD: &str = "secret";

/// Basic auth header the proxy should receive for tester:secret
pub const PROXY_AUTH_HEADER: &str = "Basic dGVzdGVyOnNlY3JldA==";

/// Points a proxy endpoint at the mock server
pub fn proxy_for(server: &MockServer) -> ProxyEndpoint {
    let address = server.address();
    ProxyEndpoint::new(PROXY_USER, PROXY_PASSWORD)
        .expect("test credentials are non-empty")
        .with_scheme("http")
        .with_host(address.ip().to_string())
        .with_port(address.port().to_string())
}

/// Creates test settings crawling `SITE` with the given cap and delay
pub fn create_test_settings(max_pages: u32, delay_secs: f64) -> Settings {
    let mut settings = Settings::default();
    settings.scraper.base_url = SITE.to_string();
    settings.scraper.max_pages = max_pages;
    settings.scraper.delay_between_requests = delay_secs;
    settings.scraper.timeout_secs = 5;
    settings
}

pub fn product_card(title: &str, slug: &str, price: &str, rating: &str) -> String {
    format!(
        r#"<article class="product_pod">
            <p class="star-rating {rating}"><i class="icon-star"></i></p>
            <h3><a href="catalogue/{slug}/index.html" title="{title}">{title}</a></h3>
            <div class="product_price">
                <p class="price_color">{price}</p>
                <p class="instock availability"><i class="icon-ok"></i> In stock </p>
            </div>
        </article>"#
    )
}

/// Builds a listing page with the given cards and optional next href
pub fn listing_page(cards: &[String], next_href: Option<&str>) -> String {
    let pager = match next_href {
        Some(href) => format!(
            r#"<ul class="pager"><li class="next"><a href="{}">next</a></li></ul>"#,
            href
        ),
        None => r#"<ul class="pager"><li class="previous"><a href="index.html">previous</a></li></ul>"#
            .to_string(),
    };

    format!(
        "<html><head><title>All products</title></head><body><ol class=\"row\">{}</ol>{}</body></html>",
        cards
            .iter()
            .map(|c| format!("<li>{}</li>", c))
            .collect::<String>(),
        pager
    )
}
