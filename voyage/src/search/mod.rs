//! Web search for the researcher node.
//!
//! A [`SearchProvider`] talks to one engine and reports failures as [`SearchError`].
//! [`WebSearchAdapter`] wraps a provider, applies the fixed negative-keyword filter and the
//! result cap, formats records for the synthesis prompt, and turns every failure into one of
//! two sentinel strings. A search outage therefore never aborts a turn.

mod duckduckgo;
mod exa;

pub use duckduckgo::{extract_ddg_url, DuckDuckGoProvider, DUCKDUCKGO_HTML_URL};
pub use exa::{ExaProvider, EXA_SEARCH_URL};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::settings::Settings;

/// Returned when the provider answered but had no results.
pub const NO_DATA_SENTINEL: &str = "no data found";
/// Returned when the provider could not be reached or its answer could not be read.
pub const CONNECTION_ERROR_SENTINEL: &str = "connection error";

/// Appended to every query to keep brand and tech noise out of travel results.
pub const NEGATIVE_KEYWORDS: &str = "-shoes -scarpe -zalando -ai -software";

pub(crate) const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

impl SearchRecord {
    pub fn new(title: impl Into<String>, snippet: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            link: link.into(),
        }
    }

    /// `INFO: <title> | DESC: <snippet> | URL: <link>`
    pub fn format(&self) -> String {
        format!("INFO: {} | DESC: {} | URL: {}", self.title, self.snippet, self.link)
    }
}

/// Provider failures. Never escapes [`WebSearchAdapter`].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search transport error: {0}")]
    Transport(String),
    #[error("search endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not parse search response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        SearchError::Transport(e.to_string())
    }
}

/// A web search engine.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Runs `query` and returns at most `max_results` records.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchRecord>, SearchError>;
}

/// Infallible search front used by the researcher node.
#[derive(Clone)]
pub struct WebSearchAdapter {
    provider: Arc<dyn SearchProvider>,
    max_results: usize,
}

impl WebSearchAdapter {
    pub fn new(provider: Arc<dyn SearchProvider>, max_results: usize) -> Self {
        Self {
            provider,
            max_results: max_results.max(1),
        }
    }

    /// Exa when an Exa key is configured, DuckDuckGo otherwise.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(provider_from_settings(settings), settings.search_max_results)
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Searches and formats the results; returns a sentinel instead of failing.
    pub async fn search(&self, query: &str) -> String {
        let filtered = filtered_query(query);
        debug!(provider = self.provider.name(), query = %filtered, "web search");
        match self.provider.search(&filtered, self.max_results).await {
            Ok(records) if records.is_empty() => {
                debug!(provider = self.provider.name(), "web search returned no results");
                NO_DATA_SENTINEL.to_string()
            }
            Ok(records) => format_records(&records, self.max_results),
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "web search failed");
                CONNECTION_ERROR_SENTINEL.to_string()
            }
        }
    }
}

/// Provider selected by settings.
pub fn provider_from_settings(settings: &Settings) -> Arc<dyn SearchProvider> {
    match &settings.exa_api_key {
        Some(key) => {
            let mut exa = ExaProvider::new(key.clone(), settings.search_region.clone());
            if let Some(url) = &settings.search_url {
                exa = exa.with_url(url.clone());
            }
            Arc::new(exa)
        }
        None => {
            let mut ddg = DuckDuckGoProvider::new(settings.search_region.clone());
            if let Some(url) = &settings.search_url {
                ddg = ddg.with_url(url.clone());
            }
            Arc::new(ddg)
        }
    }
}

/// Appends [`NEGATIVE_KEYWORDS`] to the query.
pub fn filtered_query(query: &str) -> String {
    format!("{} {}", query.trim(), NEGATIVE_KEYWORDS)
}

/// Formats up to `max_results` records, separated by blank lines.
pub fn format_records(records: &[SearchRecord], max_results: usize) -> String {
    records
        .iter()
        .take(max_results)
        .map(SearchRecord::format)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub(crate) fn http_client() -> Result<reqwest::Client, SearchError> {
    Ok(reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?)
}

/// Collapses runs of whitespace left over from HTML text nodes.
pub(crate) fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Fixed(Result<Vec<SearchRecord>, &'static str>, Mutex<Vec<String>>);

    #[async_trait]
    impl SearchProvider for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn search(&self, query: &str, _max: usize) -> Result<Vec<SearchRecord>, SearchError> {
            self.1.lock().unwrap().push(query.to_string());
            match &self.0 {
                Ok(r) => Ok(r.clone()),
                Err(e) => Err(SearchError::Transport(e.to_string())),
            }
        }
    }

    fn records(n: usize) -> Vec<SearchRecord> {
        (0..n)
            .map(|i| SearchRecord::new(format!("t{i}"), format!("s{i}"), format!("https://x/{i}")))
            .collect()
    }

    #[test]
    fn record_format() {
        let r = SearchRecord::new("Hotel Neringa", "Central hotel", "https://neringa.lt");
        assert_eq!(
            r.format(),
            "INFO: Hotel Neringa | DESC: Central hotel | URL: https://neringa.lt"
        );
    }

    #[test]
    fn filter_appends_negative_keywords() {
        assert_eq!(
            filtered_query(" flights Rome Vilnius "),
            "flights Rome Vilnius -shoes -scarpe -zalando -ai -software"
        );
    }

    #[test]
    fn format_caps_and_separates() {
        let out = format_records(&records(7), 5);
        assert_eq!(out.split("\n\n").count(), 5);
        assert!(out.starts_with("INFO: t0 | DESC: s0 | URL: https://x/0"));
    }

    #[tokio::test]
    async fn empty_results_become_no_data_sentinel() {
        let adapter = WebSearchAdapter::new(Arc::new(Fixed(Ok(vec![]), Mutex::default())), 5);
        assert_eq!(adapter.search("q").await, NO_DATA_SENTINEL);
    }

    #[tokio::test]
    async fn provider_error_becomes_connection_sentinel() {
        let adapter = WebSearchAdapter::new(Arc::new(Fixed(Err("down"), Mutex::default())), 5);
        assert_eq!(adapter.search("q").await, CONNECTION_ERROR_SENTINEL);
    }

    #[tokio::test]
    async fn adapter_filters_query_and_caps_results() {
        let provider = Arc::new(Fixed(Ok(records(9)), Mutex::default()));
        let adapter = WebSearchAdapter::new(provider.clone(), 3);
        let out = adapter.search("hotels Vilnius").await;
        assert_eq!(out.matches("INFO:").count(), 3);
        let seen = provider.1.lock().unwrap().clone();
        assert_eq!(seen, vec![filtered_query("hotels Vilnius")]);
    }

    #[test]
    fn zero_cap_is_raised_to_one() {
        let adapter = WebSearchAdapter::new(Arc::new(Fixed(Ok(vec![]), Mutex::default())), 0);
        assert_eq!(adapter.max_results(), 1);
    }

    #[test]
    fn squash_whitespace_collapses_runs() {
        assert_eq!(squash_whitespace("  a \n\t b  "), "a b");
    }
}
