//! MCP tool server for searching across NVIDIA web properties.
//!
//! Exposes two tools over the MCP stdio transport:
//!
//! - `search_nvidia`: fan a query out across NVIDIA domains, rank and filter
//!   the merged results.
//! - `discover_nvidia_content`: content-type aware discovery (videos, courses,
//!   tutorials, webinars, blogs) built on top of the same pipeline.
//!
//! The search engine and page fetcher are collaborators behind traits in
//! [`engine`]; everything else (scoring, filtering, rate limiting, domain
//! validation) is implemented here.

pub mod ad_filter;
pub mod aggregator;
pub mod config;
pub mod discovery;
pub mod domains;
pub mod engine;
pub mod format;
pub mod keywords;
pub mod mcp;
pub mod rate_limiter;
pub mod results;
pub mod scoring;
pub mod searcher;

pub use aggregator::SearchPipeline;
pub use config::ServerConfig;
pub use discovery::{ContentStrategy, ContentType};
pub use engine::{EngineError, FetchedPage, PageFetcher, RawHit, SearchEngine};
pub use mcp::NvidiaSearchServer;
pub use rate_limiter::SearchRateLimiter;
pub use results::SearchResult;
pub use searcher::DomainSearcher;
