//! Concurrent multi-domain aggregation, scoring, and ranking.
//!
//! The aggregator fans one query out across the resolved domain set, one
//! task per domain, and collects whatever comes back: a domain that fails or
//! panics is logged and excluded, never allowed to abort its siblings.
//! Merged results are scored against the query, thresholded, and stably
//! sorted so the output order is deterministic regardless of task completion
//! order.

use futures::future::join_all;
use tracing::{error, info};

use crate::discovery::{ContentType, resolve_strategy};
use crate::results::SearchResult;
use crate::scoring::{score_against_query, score_with_keywords};
use crate::searcher::DomainSearcher;

/// Results scoring below this are discarded by [`SearchPipeline::search_all_domains`].
pub const DEFAULT_MIN_RELEVANCE: u8 = 33;

/// The aggregation pipeline shared by both tools.
#[derive(Clone)]
pub struct SearchPipeline {
    searcher: DomainSearcher,
    default_domains: Vec<String>,
    min_relevance: u8,
}

impl SearchPipeline {
    #[must_use]
    pub fn new(searcher: DomainSearcher, default_domains: Vec<String>, min_relevance: u8) -> Self {
        Self {
            searcher,
            default_domains,
            min_relevance,
        }
    }

    /// The domain set used when a caller does not supply one.
    #[must_use]
    pub fn default_domains(&self) -> &[String] {
        &self.default_domains
    }

    /// Search every domain concurrently and return the merged, scored,
    /// thresholded list, sorted descending by relevance.
    ///
    /// `domains` entries must already be validated by the caller; `None`
    /// selects the default set.
    pub async fn search_all_domains(
        &self,
        query: &str,
        domains: Option<Vec<String>>,
        max_results_per_domain: usize,
    ) -> Vec<SearchResult> {
        let domains = domains.unwrap_or_else(|| self.default_domains.clone());
        info!(%query, domain_count = domains.len(), "aggregating domain searches");

        let tasks = domains.into_iter().map(|domain| {
            let searcher = self.searcher.clone();
            let query = query.to_string();
            tokio::spawn(async move {
                let results = searcher.search(&domain, &query, max_results_per_domain).await;
                (domain, results)
            })
        });

        let mut merged = Vec::new();
        for joined in join_all(tasks).await {
            match joined {
                Ok((_, results)) => merged.extend(results),
                Err(e) => {
                    // Collect successes, log failures: a panicking domain
                    // task only costs its own results.
                    error!(error = %e, "domain search task failed");
                }
            }
        }

        for result in &mut merged {
            result.relevance_score = score_against_query(result, query);
        }
        merged.retain(|r| r.relevance_score >= self.min_relevance);
        merged.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

        info!(%query, result_count = merged.len(), "aggregation complete");
        merged
    }

    /// Discover content of a specific type: rewrite the query per strategy,
    /// search the strategy's domain subset, re-score with the strategy's
    /// keyword list, and cap the total.
    pub async fn discover_content(
        &self,
        content_type: ContentType,
        topic: &str,
        max_results: usize,
    ) -> Vec<SearchResult> {
        let strategy = resolve_strategy(content_type, topic, &self.default_domains);
        info!(?content_type, %topic, "discovering content");

        let mut results = self
            .search_all_domains(&strategy.query, Some(strategy.domains.clone()), max_results)
            .await;

        for result in &mut results {
            result.relevance_score =
                score_with_keywords(result, strategy.keywords.iter().map(String::as_str));
            result.content_type = Some(content_type.tag().to_string());
        }
        results.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
        results.truncate(max_results);
        results
    }
}
