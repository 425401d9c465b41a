//! DuckDuckGo HTML search client.
//!
//! Queries the no-JavaScript endpoint (`html.duckduckgo.com/html/`) and
//! parses the static result markup with `scraper`. DuckDuckGo is used to
//! avoid CAPTCHA interstitials on automated queries. Organic results are
//! `div.result` blocks; destination URLs arrive wrapped in a `/l/?uddg=`
//! redirect which is unwrapped here. Paid placements survive parsing and are
//! dropped downstream by the ad filter.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{EngineError, RawHit, SearchEngine};

/// Default endpoint serving static result markup.
const SEARCH_BASE_URL: &str = "https://html.duckduckgo.com";

/// Timeout for one search request.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Desktop user agent; the HTML endpoint rejects clients without one.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// CSS selector for one organic result block.
const RESULT_SELECTOR: &str = "div.result";
/// CSS selector for the title link inside a result (carries the URL).
const TITLE_SELECTOR: &str = "a.result__a";
/// CSS selector for the snippet inside a result.
const SNIPPET_SELECTOR: &str = "a.result__snippet, div.result__snippet";

/// `reqwest`-backed search engine collaborator.
#[derive(Debug, Clone)]
pub struct DuckDuckGoClient {
    client: reqwest::Client,
    base_url: String,
}

impl DuckDuckGoClient {
    /// Build a client with the production endpoint.
    pub fn new() -> Result<Self, EngineError> {
        Self::with_base_url(SEARCH_BASE_URL)
    }

    /// Build a client against a custom endpoint. Tests point this at a local
    /// mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl SearchEngine for DuckDuckGoClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawHit>, EngineError> {
        let url = format!(
            "{}/html/?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!(%query, "dispatching engine query");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let hits = parse_results(&body, max_results)?;
        debug!(%query, hit_count = hits.len(), "engine query complete");
        Ok(hits)
    }
}

/// Parse the static result page into raw hits, capped at `max_results`.
fn parse_results(body: &str, max_results: usize) -> Result<Vec<RawHit>, EngineError> {
    let document = Html::parse_document(body);
    let result_sel = selector(RESULT_SELECTOR)?;
    let title_sel = selector(TITLE_SELECTOR)?;
    let snippet_sel = selector(SNIPPET_SELECTOR)?;

    let mut hits = Vec::new();
    for block in document.select(&result_sel) {
        if hits.len() >= max_results {
            break;
        }

        let Some(title_el) = block.select(&title_sel).next() else {
            continue;
        };
        let title = collapse_whitespace(&title_el.text().collect::<String>());
        let Some(href) = title_el.value().attr("href") else {
            continue;
        };
        let url = unwrap_redirect(href);
        if title.is_empty() || url.is_empty() {
            continue;
        }

        let snippet = block
            .select(&snippet_sel)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .unwrap_or_default();

        hits.push(RawHit {
            title,
            url,
            snippet,
        });
    }

    Ok(hits)
}

fn selector(css: &str) -> Result<Selector, EngineError> {
    Selector::parse(css).map_err(|e| EngineError::Parse(e.to_string()))
}

/// Unwrap DuckDuckGo's `/l/?uddg=<destination>` redirect link.
///
/// Scheme-relative hrefs (`//duckduckgo.com/...`) are normalized first. When
/// the redirect parameter is missing the href is returned as-is; ad redirects
/// (`y.js?ad_domain=...`) intentionally stay wrapped so the ad filter sees
/// their tracking parameters.
fn unwrap_redirect(href: &str) -> String {
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        href.to_string()
    };

    let Ok(parsed) = Url::parse(&absolute) else {
        return absolute;
    };
    if !parsed.path().starts_with("/l/") {
        return absolute;
    }
    parsed
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned())
        .unwrap_or(absolute)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_uddg_redirects() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fdeveloper.nvidia.com%2Fcuda&rut=abc123";
        assert_eq!(unwrap_redirect(href), "https://developer.nvidia.com/cuda");
    }

    #[test]
    fn leaves_direct_links_untouched() {
        assert_eq!(
            unwrap_redirect("https://docs.nvidia.com/cuda/"),
            "https://docs.nvidia.com/cuda/"
        );
    }

    #[test]
    fn keeps_ad_redirects_wrapped() {
        let href = "https://duckduckgo.com/y.js?ad_domain=wyzant.com";
        assert_eq!(unwrap_redirect(href), href);
    }

    #[test]
    fn parses_result_blocks() {
        let body = r#"
            <html><body>
              <div class="result">
                <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fdeveloper.nvidia.com%2Fcuda">
                  CUDA   Toolkit
                </a>
                <a class="result__snippet">Develop, optimize and deploy GPU-accelerated apps.</a>
              </div>
              <div class="result">
                <a class="result__a" href="https://docs.nvidia.com/cuda/">CUDA docs</a>
              </div>
            </body></html>
        "#;
        let hits = parse_results(body, 10).expect("parse");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "CUDA Toolkit");
        assert_eq!(hits[0].url, "https://developer.nvidia.com/cuda");
        assert_eq!(
            hits[0].snippet,
            "Develop, optimize and deploy GPU-accelerated apps."
        );
        assert_eq!(hits[1].snippet, "");
    }

    #[test]
    fn caps_results() {
        let block = r#"<div class="result">
            <a class="result__a" href="https://docs.nvidia.com/a">T</a>
        </div>"#;
        let body = format!("<html><body>{}</body></html>", block.repeat(8));
        let hits = parse_results(&body, 3).expect("parse");
        assert_eq!(hits.len(), 3);
    }
}
