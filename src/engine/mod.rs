//! External collaborators: the search engine and the page fetcher.
//!
//! The pipeline never implements search or HTML rendering itself; it consumes
//! raw hits and page text through these traits. The default implementations
//! ([`DuckDuckGoClient`], [`HttpPageFetcher`]) talk HTTP via `reqwest`; tests
//! substitute in-memory fakes.

mod duckduckgo;
mod fetcher;

pub use duckduckgo::DuckDuckGoClient;
pub use fetcher::HttpPageFetcher;

use async_trait::async_trait;
use thiserror::Error;

/// Failure from a collaborator call. The pipeline catches these per domain
/// and degrades; they never cross the tool boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("collaborator returned status {0}")]
    Status(u16),

    #[error("failed to parse response: {0}")]
    Parse(String),
}

/// One raw hit from the search engine, before filtering and scoring.
#[derive(Debug, Clone)]
pub struct RawHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Page text returned by the fetcher for snippet enrichment.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    /// Visible text content with whitespace collapsed.
    pub text: String,
}

/// External search engine: one query in, a bounded sequence of raw hits out.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawHit>, EngineError>;
}

/// Page fetcher used only for optional snippet enrichment.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<FetchedPage, EngineError>;
}
