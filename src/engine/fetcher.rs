//! HTTP page fetcher for snippet enrichment.
//!
//! Fetches a result page and extracts its visible text so the searcher can
//! locate the original snippet and widen it with surrounding context. Script,
//! style, and noscript contents are excluded; whitespace is collapsed.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;

use super::{EngineError, FetchedPage, PageFetcher};

/// Timeout for one context fetch. Tighter than the search timeout: enrichment
/// is optional and must not stall the whole domain search.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// `reqwest`-backed page fetcher collaborator.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new() -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_text(&self, url: &str) -> Result<FetchedPage, EngineError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchedPage {
            status,
            text: extract_visible_text(&body),
        })
    }
}

/// Extract the visible text of an HTML document.
pub(crate) fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(body_sel) = Selector::parse("body") else {
        return String::new();
    };
    let Some(body) = document.select(&body_sel).next() else {
        return String::new();
    };

    let mut parts: Vec<&str> = Vec::new();
    for node in body.descendants() {
        if let Some(text) = node.value().as_text() {
            let parent_tag = node
                .parent()
                .and_then(|p| p.value().as_element())
                .map(|el| el.name());
            if matches!(parent_tag, Some("script" | "style" | "noscript")) {
                continue;
            }
            parts.push(text);
        }
    }

    parts
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
