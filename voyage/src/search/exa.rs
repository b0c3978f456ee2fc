//! Exa search API (`POST /search` with `x-api-key`).

use async_trait::async_trait;
use serde_json::json;
use tracing::trace;

use super::{http_client, squash_whitespace, SearchError, SearchProvider, SearchRecord};

pub const EXA_SEARCH_URL: &str = "https://api.exa.ai/search";
const NUM_RESULTS_MAX: usize = 100;
const SNIPPET_MAX_CHARS: usize = 300;

pub struct ExaProvider {
    api_key: String,
    url: String,
    region: String,
}

impl ExaProvider {
    pub fn new(api_key: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            url: EXA_SEARCH_URL.to_string(),
            region: region.into(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    fn build_body(&self, query: &str, max_results: usize) -> serde_json::Value {
        let mut body = json!({
            "query": query,
            "numResults": max_results.min(NUM_RESULTS_MAX),
            "type": "auto",
            "contents": { "text": { "maxCharacters": SNIPPET_MAX_CHARS } },
        });
        if let (Some(obj), Some(country)) = (body.as_object_mut(), user_location(&self.region)) {
            obj.insert("userLocation".to_string(), json!(country));
        }
        body
    }
}

/// `it-it` -> `IT`. Exa takes a two-letter country code.
fn user_location(region: &str) -> Option<String> {
    let country = region.split('-').next()?.trim();
    (country.len() == 2 && country.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| country.to_ascii_uppercase())
}

#[async_trait]
impl SearchProvider for ExaProvider {
    fn name(&self) -> &str {
        "exa"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchRecord>, SearchError> {
        let body = self.build_body(query, max_results);
        let res = http_client()?
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }
        let value: serde_json::Value = res
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;
        trace!(response = %value, "exa response");
        parse_results(&value, max_results)
    }
}

/// Reads `results[]` into records; snippet prefers `summary`, then highlights, then text.
pub(crate) fn parse_results(
    value: &serde_json::Value,
    max_results: usize,
) -> Result<Vec<SearchRecord>, SearchError> {
    let results = value
        .get("results")
        .and_then(|r| r.as_array())
        .ok_or_else(|| SearchError::Parse("missing results array".to_string()))?;

    Ok(results
        .iter()
        .take(max_results)
        .map(|r| {
            let title = r.get("title").and_then(|t| t.as_str()).unwrap_or("(no title)");
            let url = r.get("url").and_then(|u| u.as_str()).unwrap_or("");
            SearchRecord::new(squash_whitespace(title), snippet_of(r), url)
        })
        .collect())
}

fn snippet_of(r: &serde_json::Value) -> String {
    let summary = r.get("summary").and_then(|v| v.as_str()).unwrap_or("");
    let highlight = r
        .get("highlights")
        .and_then(|h| h.as_array())
        .and_then(|a| a.iter().filter_map(|v| v.as_str()).next())
        .unwrap_or("");
    let text = r.get("text").and_then(|t| t.as_str()).unwrap_or("");
    let raw = [summary, highlight, text]
        .into_iter()
        .find(|s| !s.trim().is_empty())
        .unwrap_or("");
    let squashed = squash_whitespace(raw);
    match squashed.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((idx, _)) => format!("{}...", &squashed[..idx]),
        None => squashed,
    }
}
