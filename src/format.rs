//! Human-readable rendering of a result list.
//!
//! The tool responses carry two contents: this report for humans and a JSON
//! payload for machines. The report numbers each result and closes with a
//! citation list of the distinct URLs.

use crate::results::SearchResult;

/// Render results into a numbered report with citations.
#[must_use]
pub fn format_report(results: &[SearchResult], query: &str) -> String {
    if results.is_empty() {
        return format!("No results found for query: {query}");
    }

    let mut out = Vec::new();
    out.push(format!("Search results for: {query}"));
    out.push("=".repeat(60));

    for (i, result) in results.iter().enumerate() {
        out.push(String::new());
        out.push(format!("{}. {}", i + 1, result.title));
        out.push(format!("   URL: {}", result.url));
        if !result.snippet.is_empty() {
            out.push(format!("   {}", result.snippet));
        }
        out.push(format!(
            "   Domain: {} | Relevance: {}/100",
            result.domain, result.relevance_score
        ));
        if let Some(content_type) = &result.content_type {
            out.push(format!("   Type: {content_type}"));
        }
    }

    out.push(String::new());
    out.push("Citations:".to_string());
    let mut seen = std::collections::HashSet::new();
    let mut n = 0;
    for result in results {
        if seen.insert(result.url.as_str()) {
            n += 1;
            out.push(format!("[{n}] {}", result.url));
        }
    }

    out.join("\n")
}
