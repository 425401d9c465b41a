//! Result records shared between the per-domain searcher and the aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One discovered item.
///
/// Value object: freely cloned and merged between pipeline stages. Once a
/// result is emitted to a caller its `relevance_score` is in `[0, 100]` and
/// its `url` has passed the ad filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title, never empty.
    pub title: String,

    /// Absolute destination URL.
    pub url: String,

    /// Result excerpt; may be enriched with surrounding page context and may
    /// be empty.
    pub snippet: String,

    /// Bare hostname the result was scoped to, no scheme.
    pub domain: String,

    /// Weighted keyword-match score, 0-100.
    pub relevance_score: u8,

    /// Content classification tag set by content discovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Publication date when the engine surfaced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,

    /// Open extension point for engine-specific fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl SearchResult {
    /// Build an unscored result for a domain-scoped hit.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            domain: domain.into(),
            relevance_score: 0,
            content_type: None,
            published_date: None,
            metadata: None,
        }
    }
}
