//! Per-domain search with ad filtering and optional snippet enrichment.
//!
//! One searcher call covers one domain: throttle, issue a `site:`-scoped
//! engine query, drop ad redirects, and optionally widen each surviving
//! snippet with context fetched from the result page. Fails soft: any engine
//! error degrades to a placeholder result for that domain and is never
//! propagated to the aggregator.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::ad_filter::is_ad_url;
use crate::domains::normalize_domain;
use crate::engine::{PageFetcher, SearchEngine};
use crate::rate_limiter::SearchRateLimiter;
use crate::results::SearchResult;

/// Prefix of the original snippet used to locate it in the fetched page text.
const SNIPPET_LOCATE_PREFIX: usize = 50;

/// Characters of page context kept on each side of the located snippet.
const CONTEXT_WINDOW: usize = 300;

/// Searches a single domain through the engine collaborator.
#[derive(Clone)]
pub struct DomainSearcher {
    engine: Arc<dyn SearchEngine>,
    fetcher: Arc<dyn PageFetcher>,
    limiter: Arc<SearchRateLimiter>,
    enrich_context: bool,
}

impl DomainSearcher {
    #[must_use]
    pub fn new(
        engine: Arc<dyn SearchEngine>,
        fetcher: Arc<dyn PageFetcher>,
        limiter: Arc<SearchRateLimiter>,
        enrich_context: bool,
    ) -> Self {
        Self {
            engine,
            fetcher,
            limiter,
            enrich_context,
        }
    }

    /// Search one domain, returning at most `max_results` ad-filtered results
    /// in engine order.
    ///
    /// Never fails: an engine error yields a single "search unavailable"
    /// placeholder so the aggregator can keep sibling domains going.
    pub async fn search(&self, domain: &str, query: &str, max_results: usize) -> Vec<SearchResult> {
        let host = match normalize_domain(domain) {
            Some(host) => host,
            None => {
                warn!(%domain, "skipping unparseable domain");
                return Vec::new();
            }
        };

        self.limiter.throttle().await;

        let scoped_query = format!("site:{host} {query}");
        let hits = match self.engine.search(&scoped_query, max_results).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(domain = %host, error = %e, "engine query failed, degrading");
                return vec![unavailable_placeholder(&host, query)];
            }
        };

        let mut results = Vec::new();
        for hit in hits {
            if results.len() >= max_results {
                break;
            }
            if is_ad_url(&hit.url) {
                debug!(url = %hit.url, "dropping ad result");
                continue;
            }
            let mut result = SearchResult::new(hit.title, hit.url, hit.snippet, host.clone());
            if self.enrich_context {
                result.snippet = self.enrich(&result).await;
            }
            results.push(result);
        }

        debug!(domain = %host, count = results.len(), "domain search complete");
        results
    }

    /// Fetch the result page and widen the snippet with surrounding context.
    /// Best-effort: any failure keeps the original snippet.
    async fn enrich(&self, result: &SearchResult) -> String {
        let page = match self.fetcher.fetch_text(&result.url).await {
            Ok(page) if page.status == 200 => page,
            Ok(page) => {
                debug!(url = %result.url, status = page.status, "skipping enrichment");
                return result.snippet.clone();
            }
            Err(e) => {
                debug!(url = %result.url, error = %e, "context fetch failed");
                return result.snippet.clone();
            }
        };

        enrich_snippet(&page.text, &result.snippet).unwrap_or_else(|| result.snippet.clone())
    }
}

/// Synthetic result emitted when the engine cannot be reached for a domain,
/// so a degraded domain is distinguishable from one with no matches.
fn unavailable_placeholder(domain: &str, query: &str) -> SearchResult {
    SearchResult::new(
        format!("Search temporarily unavailable for {domain}"),
        format!("https://{domain}/"),
        format!("The search engine could not be reached while searching {domain} for '{query}'."),
        domain,
    )
}

/// Locate the original snippet inside the page text and return it wrapped in
/// emphasis delimiters with surrounding context.
///
/// Heuristic by design: the first `SNIPPET_LOCATE_PREFIX` characters of the
/// snippet are matched case-insensitively, and duplicated page text can make
/// the match land on the wrong occurrence. Returns `None` whenever the
/// snippet cannot be located; the caller falls back to the original snippet.
fn enrich_snippet(page_text: &str, snippet: &str) -> Option<String> {
    let prefix: String = snippet.chars().take(SNIPPET_LOCATE_PREFIX).collect();
    if prefix.trim().is_empty() {
        return None;
    }

    let haystack = page_text.to_lowercase();
    let needle = prefix.to_lowercase();
    // Byte offsets in the lowercased text are applied to the original text;
    // they only drift for the rare characters whose lowercase form changes
    // length, and the boundary clamps below keep that safe.
    let start = haystack.find(&needle)?;
    let end = start + needle.len();
    if end > page_text.len() {
        return None;
    }

    let span_start = floor_char_boundary(page_text, start);
    let span_end = ceil_char_boundary(page_text, end.min(page_text.len()));
    let context_start =
        floor_char_boundary(page_text, span_start.saturating_sub(CONTEXT_WINDOW));
    let context_end =
        ceil_char_boundary(page_text, (span_end + CONTEXT_WINDOW).min(page_text.len()));

    let before = &page_text[context_start..span_start];
    let span = &page_text[span_start..span_end];
    let after = &page_text[span_end..context_end];

    let mut enriched = String::new();
    if context_start > 0 {
        enriched.push_str("...");
    }
    enriched.push_str(before);
    enriched.push_str("**");
    enriched.push_str(span);
    enriched.push_str("**");
    enriched.push_str(after);
    if context_end < page_text.len() {
        enriched.push_str("...");
    }
    Some(enriched)
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    index = index.min(text.len());
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    index = index.min(text.len());
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrichment_marks_snippet_and_adds_context() {
        let page = format!(
            "{} The CUDA toolkit provides GPU-accelerated libraries for building applications. {}",
            "intro ".repeat(80),
            "outro ".repeat(80)
        );
        let snippet = "The CUDA toolkit provides GPU-accelerated libraries";
        let enriched = enrich_snippet(&page, snippet).expect("snippet should be located");
        assert!(enriched.contains("**The CUDA toolkit provides GPU-accelerated l"));
        assert!(enriched.starts_with("..."));
        assert!(enriched.ends_with("..."));
    }

    #[test]
    fn enrichment_is_case_insensitive() {
        let page = "Some text about the cuda TOOLKIT here.";
        let enriched = enrich_snippet(page, "The CUDA toolkit").expect("located");
        assert!(enriched.contains("**the cuda TOOLKIT**"));
    }

    #[test]
    fn enrichment_fails_cleanly_when_snippet_absent() {
        assert!(enrich_snippet("completely unrelated text", "missing snippet").is_none());
        assert!(enrich_snippet("page text", "").is_none());
        assert!(enrich_snippet("page text", "   ").is_none());
    }

    #[test]
    fn placeholder_names_the_domain() {
        let placeholder = unavailable_placeholder("docs.nvidia.com", "cuda");
        assert!(placeholder.title.contains("docs.nvidia.com"));
        assert_eq!(placeholder.domain, "docs.nvidia.com");
        assert_eq!(placeholder.relevance_score, 0);
    }
}
