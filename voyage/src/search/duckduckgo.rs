//! DuckDuckGo HTML endpoint. Keyless; the region goes in the `kl` form field.

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use scraper::{ElementRef, Html, Selector};
use tracing::trace;

use super::{http_client, squash_whitespace, SearchError, SearchProvider, SearchRecord};

pub const DUCKDUCKGO_HTML_URL: &str = "https://html.duckduckgo.com/html/";

const AD_REDIRECT: &str = "duckduckgo.com/y.js";

pub struct DuckDuckGoProvider {
    url: String,
    region: String,
}

impl DuckDuckGoProvider {
    /// `region` is a DuckDuckGo locale such as `it-it`.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            url: DUCKDUCKGO_HTML_URL.to_string(),
            region: region.into(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchRecord>, SearchError> {
        let client = http_client()?;
        let res = client
            .post(&self.url)
            .form(&[("q", query), ("kl", self.region.as_str())])
            .header("Accept", "text/html")
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }
        let body = res.text().await?;
        trace!(bytes = body.len(), "duckduckgo response");
        parse_results(&body, max_results)
    }
}

/// Extracts result records from a DuckDuckGo HTML results page.
///
/// `Html` is `!Send`, so parsing stays in this synchronous function.
pub fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchRecord>, SearchError> {
    let result_sel = selector(".result")?;
    let link_sel = selector("a.result__a")?;
    let snippet_sel = selector("a.result__snippet, .result__snippet")?;

    let doc = Html::parse_document(html);
    let mut records = Vec::new();
    for result in doc.select(&result_sel) {
        if records.len() >= max_results {
            break;
        }
        if is_ad(&result) {
            continue;
        }
        let Some(link) = result.select(&link_sel).next() else {
            continue;
        };
        let title = squash_whitespace(&link.text().collect::<String>());
        if title.is_empty() {
            continue;
        }
        let raw_href = link.value().attr("href").unwrap_or("");
        if raw_href.contains(AD_REDIRECT) {
            continue;
        }
        let href = extract_ddg_url(raw_href);
        let snippet = result
            .select(&snippet_sel)
            .next()
            .map(|el| squash_whitespace(&el.text().collect::<String>()))
            .unwrap_or_default();
        records.push(SearchRecord::new(title, snippet, href));
    }
    Ok(records)
}

/// Sponsored blocks carry the `result--ad` class.
fn is_ad(result: &ElementRef<'_>) -> bool {
    result.value().classes().any(|c| c == "result--ad")
}

/// DuckDuckGo wraps result links as `//duckduckgo.com/l/?uddg=<encoded>&rut=...`;
/// returns the decoded destination, or `href` unchanged when it is not wrapped.
pub fn extract_ddg_url(href: &str) -> String {
    if let Some(pos) = href.find("uddg=") {
        let start = pos + "uddg=".len();
        let end = href[start..]
            .find('&')
            .map(|i| start + i)
            .unwrap_or(href.len());
        let encoded = &href[start..end];
        if !encoded.is_empty() {
            return percent_decode_str(encoded).decode_utf8_lossy().into_owned();
        }
    }
    href.to_string()
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("selector {css}: {e:?}")))
}
