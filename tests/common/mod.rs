//! Shared fakes for pipeline tests: scripted search engine and page fetcher.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use mcp_nvidia_search::aggregator::DEFAULT_MIN_RELEVANCE;
use mcp_nvidia_search::domains::default_domains;
use mcp_nvidia_search::engine::{EngineError, FetchedPage, PageFetcher, RawHit, SearchEngine};
use mcp_nvidia_search::{DomainSearcher, SearchPipeline, SearchRateLimiter};

/// Search engine fake scripted per domain. The pipeline scopes queries with
/// `site:<host> ...`, which is how responses are keyed.
#[derive(Default)]
pub struct FakeEngine {
    responses: HashMap<String, Result<Vec<RawHit>, String>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, domain: &str, hits: Vec<RawHit>) -> Self {
        self.responses.insert(domain.to_string(), Ok(hits));
        self
    }

    #[allow(dead_code)]
    pub fn fail(mut self, domain: &str, message: &str) -> Self {
        self.responses
            .insert(domain.to_string(), Err(message.to_string()));
        self
    }
}

#[async_trait]
impl SearchEngine for FakeEngine {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawHit>, EngineError> {
        let host = query
            .strip_prefix("site:")
            .and_then(|rest| rest.split_whitespace().next())
            .unwrap_or("");
        match self.responses.get(host) {
            Some(Ok(hits)) => Ok(hits.iter().take(max_results).cloned().collect()),
            Some(Err(message)) => Err(EngineError::Parse(message.clone())),
            None => Ok(Vec::new()),
        }
    }
}

/// Page fetcher fake: serves one canned page for every URL, or always fails.
pub struct FakeFetcher {
    page: Option<FetchedPage>,
}

impl FakeFetcher {
    pub fn unavailable() -> Self {
        Self { page: None }
    }

    #[allow(dead_code)]
    pub fn serving(text: &str) -> Self {
        Self {
            page: Some(FetchedPage {
                status: 200,
                text: text.to_string(),
            }),
        }
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch_text(&self, _url: &str) -> Result<FetchedPage, EngineError> {
        match &self.page {
            Some(page) => Ok(page.clone()),
            None => Err(EngineError::Status(503)),
        }
    }
}

pub fn hit(title: &str, url: &str, snippet: &str) -> RawHit {
    RawHit {
        title: title.to_string(),
        url: url.to_string(),
        snippet: snippet.to_string(),
    }
}

/// Pipeline over the fake engine, default domains, zero throttle interval.
pub fn pipeline(engine: FakeEngine) -> SearchPipeline {
    pipeline_with(engine, FakeFetcher::unavailable(), false)
}

pub fn pipeline_with(engine: FakeEngine, fetcher: FakeFetcher, enrich: bool) -> SearchPipeline {
    let searcher = DomainSearcher::new(
        Arc::new(engine),
        Arc::new(fetcher),
        Arc::new(SearchRateLimiter::new(Duration::ZERO)),
        enrich,
    );
    SearchPipeline::new(searcher, default_domains(), DEFAULT_MIN_RELEVANCE)
}
