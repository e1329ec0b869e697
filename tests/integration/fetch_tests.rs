use crate::support::{proxy_for, PROXY_AUTH_HEADER, SITE};
use listing_scraper::config::FetchPolicy;
use listing_scraper::crawler::{FetchRequest, RateLimitedFetcher, RequestBody};
use listing_scraper::ProxyEndpoint;
use std::time::Duration;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_policy(min_interval: Duration) -> FetchPolicy {
    FetchPolicy {
        min_interval,
        timeout: Duration::from_secs(5),
        user_agent: "TestScraper/1.0".to_string(),
    }
}

#[tokio::test]
async fn test_get_goes_through_proxy_with_credentials() {
    let proxy_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index.html"))
        .and(header("proxy-authorization", PROXY_AUTH_HEADER))
        .and(header("user-agent", "TestScraper/1.0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>hello</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&proxy_server)
        .await;

    let mut fetcher =
        RateLimitedFetcher::new(&proxy_for(&proxy_server), create_test_policy(Duration::ZERO))
            .expect("Failed to build fetcher");

    let response = fetcher
        .get(&format!("{}/index.html", SITE))
        .await
        .expect("GET through proxy failed");

    assert_eq!(response.status, 200);
    assert!(response.body.contains("hello"));
    assert_eq!(
        response
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/html")
    );
}

#[tokio::test]
async fn test_post_form_goes_through_proxy() {
    let proxy_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("proxy-authorization", PROXY_AUTH_HEADER))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("q=rust"))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .expect(1)
        .mount(&proxy_server)
        .await;

    let mut fetcher =
        RateLimitedFetcher::new(&proxy_for(&proxy_server), create_test_policy(Duration::ZERO))
            .expect("Failed to build fetcher");

    let response = fetcher
        .post(
            &format!("{}/search", SITE),
            RequestBody::Form(vec![("q".to_string(), "rust".to_string())]),
        )
        .await
        .expect("POST through proxy failed");

    assert_eq!(response.status, 201);
    assert_eq!(response.body, "created");
}

#[tokio::test]
async fn test_error_status_is_transport_error() {
    let proxy_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&proxy_server)
        .await;

    let mut fetcher =
        RateLimitedFetcher::new(&proxy_for(&proxy_server), create_test_policy(Duration::ZERO))
            .expect("Failed to build fetcher");

    let url = format!("{}/missing.html", SITE);
    let err = fetcher.get(&url).await.expect_err("404 must fail");

    assert_eq!(err.status(), Some(404));
    match err {
        listing_scraper::ScrapeError::Transport { url: failed, .. } => assert_eq!(failed, url),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let proxy_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&proxy_server)
        .await;

    let mut fetcher =
        RateLimitedFetcher::new(&proxy_for(&proxy_server), create_test_policy(Duration::ZERO))
            .expect("Failed to build fetcher");

    let err = fetcher.get(&format!("{}/", SITE)).await.unwrap_err();
    assert_eq!(err.status(), Some(503));

    let requests = proxy_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_unreachable_proxy_is_transport_error() {
    // Grab a free port, then close it so nothing is listening
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let proxy = ProxyEndpoint::new("tester", "secret")
        .unwrap()
        .with_scheme("http")
        .with_host("127.0.0.1")
        .with_port(port.to_string());

    let mut fetcher = RateLimitedFetcher::new(&proxy, create_test_policy(Duration::ZERO))
        .expect("Failed to build fetcher");

    let err = fetcher.get(&format!("{}/", SITE)).await.unwrap_err();
    assert!(matches!(
        err,
        listing_scraper::ScrapeError::Transport { status: None, .. }
    ));
}

#[tokio::test]
async fn test_https_target_is_tunnelled_through_proxy() {
    let proxy_server = MockServer::start().await;

    let mut fetcher =
        RateLimitedFetcher::new(&proxy_for(&proxy_server), create_test_policy(Duration::ZERO))
            .expect("Failed to build fetcher");

    // The mock proxy refuses the tunnel, so the request itself fails
    let err = fetcher.get("https://books.test/").await.unwrap_err();
    assert!(matches!(
        err,
        listing_scraper::ScrapeError::Transport { status: None, .. }
    ));

    let requests = proxy_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method.to_string(), "CONNECT");
    assert_eq!(requests[0].url.host_str(), Some("books.test"));
    assert_eq!(requests[0].url.port_or_known_default(), Some(443));
}

#[tokio::test]
async fn test_timeout_override_applies() {
    let proxy_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&proxy_server)
        .await;

    let mut fetcher =
        RateLimitedFetcher::new(&proxy_for(&proxy_server), create_test_policy(Duration::ZERO))
            .expect("Failed to build fetcher");

    let started = std::time::Instant::now();
    let err = fetcher
        .fetch(FetchRequest::get(format!("{}/slow", SITE)).with_timeout(Duration::from_millis(200)))
        .await
        .unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(matches!(
        err,
        listing_scraper::ScrapeError::Transport { status: None, .. }
    ));
}

#[tokio::test]
async fn test_gap_between_request_starts() {
    let proxy_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&proxy_server)
        .await;

    let interval = Duration::from_millis(200);
    let mut fetcher =
        RateLimitedFetcher::new(&proxy_for(&proxy_server), create_test_policy(interval))
            .expect("Failed to build fetcher");

    let mut starts = Vec::new();
    for i in 0..3 {
        fetcher
            .get(&format!("{}/page-{}.html", SITE, i))
            .await
            .expect("fetch failed");
        starts.push(fetcher.last_request().expect("start recorded"));
    }

    for pair in starts.windows(2) {
        assert!(
            pair[1].duration_since(pair[0]) >= interval,
            "requests started {:?} apart",
            pair[1].duration_since(pair[0])
        );
    }
}
