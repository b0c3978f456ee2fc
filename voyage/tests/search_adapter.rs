//! Web search adapter over HTTP: local mock endpoints for DuckDuckGo and Exa, unreachable
//! endpoints, and a live DuckDuckGo query that is ignored by default.


use std::sync::Arc;

use serde_json::json;
use voyage::search::{DuckDuckGoProvider, ExaProvider};
use voyage::{WebSearchAdapter, CONNECTION_ERROR_SENTINEL, NO_DATA_SENTINEL};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nothing listens on the discard port.
const UNREACHABLE: &str = "http://127.0.0.1:9/";

const RESULTS_PAGE: &str = r##"
<html><body>
  <div class="result result--ad">
    <a class="result__a" href="https://duckduckgo.com/y.js?ad_domain=zalando.it">Zalando Shoes</a>
  </div>
  <div class="result">
    <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.hoteltilto.lt%2F&amp;rut=x">Hotel Tilto Vilnius</a>
    <a class="result__snippet" href="#">Old Town hotel from 60 EUR per night.</a>
  </div>
  <div class="result">
    <a class="result__a" href="https://www.radissonhotels.com/vilnius">Radisson Blu Royal Astorija</a>
    <div class="result__snippet">Town Hall Square.</div>
  </div>
</body></html>"##;

fn duckduckgo_adapter(server: &MockServer) -> WebSearchAdapter {
    let provider = DuckDuckGoProvider::new("it-it").with_url(format!("{}/html/", server.uri()));
    WebSearchAdapter::new(Arc::new(provider), 5)
}

fn exa_adapter(server: &MockServer) -> WebSearchAdapter {
    let provider = ExaProvider::new("test-key", "it-it").with_url(format!("{}/search", server.uri()));
    WebSearchAdapter::new(Arc::new(provider), 5)
}

/// **Scenario**: DuckDuckGo answers 200 with results; ads are dropped, records are formatted.
#[tokio::test]
async fn duckduckgo_results_are_formatted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .and(body_string_contains("kl=it-it"))
        .and(body_string_contains("-zalando"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(RESULTS_PAGE, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let out = duckduckgo_adapter(&server).search("hotels Vilnius").await;
    assert_eq!(
        out,
        "INFO: Hotel Tilto Vilnius | DESC: Old Town hotel from 60 EUR per night. | URL: https://www.hoteltilto.lt/\n\n\
         INFO: Radisson Blu Royal Astorija | DESC: Town Hall Square. | URL: https://www.radissonhotels.com/vilnius"
    );
}

/// **Scenario**: DuckDuckGo answers 200 with a page that has no results.
#[tokio::test]
async fn duckduckgo_empty_page_returns_no_data_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body><div class=\"no-results\">No results.</div></body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let out = duckduckgo_adapter(&server).search("hotels Vilnius").await;
    assert_eq!(out, NO_DATA_SENTINEL);
}

/// **Scenario**: DuckDuckGo answers 500; the adapter returns the connection sentinel.
#[tokio::test]
async fn duckduckgo_server_error_returns_connection_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let out = duckduckgo_adapter(&server).search("flights Rome Vilnius").await;
    assert_eq!(out, CONNECTION_ERROR_SENTINEL);
}

/// **Scenario**: Exa answers 200 with results; key, cap and country are sent.
#[tokio::test]
async fn exa_results_are_formatted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("x-api-key", "test-key"))
        .and(body_string_contains("\"userLocation\":\"IT\""))
        .and(body_string_contains("\"numResults\":5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "title": "airBaltic", "url": "https://www.airbaltic.com", "summary": "Rome to Vilnius from 89 EUR" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let out = exa_adapter(&server).search("flights Rome Vilnius").await;
    assert_eq!(
        out,
        "INFO: airBaltic | DESC: Rome to Vilnius from 89 EUR | URL: https://www.airbaltic.com"
    );
}

/// **Scenario**: Exa answers 200 with an empty results array.
#[tokio::test]
async fn exa_empty_results_return_no_data_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;

    assert_eq!(exa_adapter(&server).search("q").await, NO_DATA_SENTINEL);
}

/// **Scenario**: Exa answers 200 with a body that is not JSON.
#[tokio::test]
async fn exa_unparseable_body_returns_connection_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    assert_eq!(exa_adapter(&server).search("q").await, CONNECTION_ERROR_SENTINEL);
}

/// **Scenario**: Exa rejects the key with 401.
#[tokio::test]
async fn exa_unauthorized_returns_connection_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "invalid key" })))
        .mount(&server)
        .await;

    assert_eq!(exa_adapter(&server).search("q").await, CONNECTION_ERROR_SENTINEL);
}

/// **Scenario**: DuckDuckGo endpoint unreachable; adapter returns the connection sentinel.
#[tokio::test]
async fn duckduckgo_unreachable_returns_connection_sentinel() {
    let provider = DuckDuckGoProvider::new("it-it").with_url(UNREACHABLE);
    let adapter = WebSearchAdapter::new(Arc::new(provider), 5);
    assert_eq!(adapter.search("flights Rome Vilnius").await, CONNECTION_ERROR_SENTINEL);
}

/// **Scenario**: Exa endpoint unreachable; adapter returns the connection sentinel.
#[tokio::test]
async fn exa_unreachable_returns_connection_sentinel() {
    let provider = ExaProvider::new("test-key", "it-it").with_url(UNREACHABLE);
    let adapter = WebSearchAdapter::new(Arc::new(provider), 5);
    assert_eq!(adapter.search("hotels Vilnius").await, CONNECTION_ERROR_SENTINEL);
}

/// Live query; output is either records or one of the sentinels, never a panic.
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires network; run with: cargo test -p voyage search_adapter -- --ignored"]
async fn duckduckgo_live_query() {
    let adapter = WebSearchAdapter::new(Arc::new(DuckDuckGoProvider::new("it-it")), 5);
    let out = adapter.search("hotel Vilnius old town").await;
    assert!(
        out.contains("INFO: ") || out == NO_DATA_SENTINEL || out == CONNECTION_ERROR_SENTINEL,
        "{out}"
    );
    assert!(out.matches("INFO: ").count() <= 5);
}
