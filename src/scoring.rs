//! Weighted keyword-match relevance scoring.
//!
//! A bag-of-substrings score, not a statistical ranker: each keyword found in
//! the title counts 3, in the snippet 2, in the URL 1, normalized against the
//! maximum attainable sum. Ties are left to the caller's stable sort.

use crate::keywords::extract_keywords;
use crate::results::SearchResult;

/// Per-keyword weight for a title match.
const TITLE_WEIGHT: u32 = 3;
/// Per-keyword weight for a snippet match.
const SNIPPET_WEIGHT: u32 = 2;
/// Per-keyword weight for a URL match.
const URL_WEIGHT: u32 = 1;

/// Score a result against an already-extracted keyword list, 0-100.
///
/// An empty keyword list scores 0: there is nothing to match against.
#[must_use]
pub fn score_with_keywords<'a, I>(result: &SearchResult, keywords: I) -> u8
where
    I: IntoIterator<Item = &'a str>,
{
    let title = result.title.to_lowercase();
    let snippet = result.snippet.to_lowercase();
    let url = result.url.to_lowercase();

    let mut raw: u32 = 0;
    let mut count: u32 = 0;
    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        if keyword.is_empty() {
            continue;
        }
        count += 1;
        if title.contains(&keyword) {
            raw += TITLE_WEIGHT;
        }
        if snippet.contains(&keyword) {
            raw += SNIPPET_WEIGHT;
        }
        if url.contains(&keyword) {
            raw += URL_WEIGHT;
        }
    }

    let max_possible = count * (TITLE_WEIGHT + SNIPPET_WEIGHT + URL_WEIGHT);
    if max_possible == 0 {
        return 0;
    }

    // Round-half-up integer division keeps the result in [0, 100].
    let normalized = (raw * 100 + max_possible / 2) / max_possible;
    normalized.min(100) as u8
}

/// Score a result against a free-text query.
#[must_use]
pub fn score_against_query(result: &SearchResult, query: &str) -> u8 {
    let keywords = extract_keywords(query);
    score_with_keywords(result, keywords.iter().map(String::as_str))
}
