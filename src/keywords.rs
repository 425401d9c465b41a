//! Keyword extraction for relevance scoring.
//!
//! Turns free-text queries and topics into a normalized set of significant
//! terms: lowercase, punctuation stripped, stopwords removed. The output is
//! transient scoring input, never persisted.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Stopwords dropped from every keyword set: articles, auxiliary verbs,
/// prepositions, pronouns, and interrogatives.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "am", "do", "does",
        "did", "have", "has", "had", "having", "will", "would", "shall", "should", "can", "could",
        "may", "might", "must", "to", "of", "in", "on", "at", "by", "for", "with", "from", "into",
        "onto", "over", "under", "about", "after", "before", "between", "through", "during", "as",
        "and", "or", "but", "nor", "not", "no", "if", "then", "than", "so", "such", "what", "when",
        "where", "which", "who", "whom", "whose", "why", "how", "it", "its", "this", "that",
        "these", "those", "there", "here", "i", "you", "he", "she", "we", "they", "me", "him",
        "her", "us", "them", "my", "your", "his", "our", "their",
    ]
    .into_iter()
    .collect()
});

/// Extract the significant terms from a query or topic string.
///
/// Deterministic and pure: lowercase the input, replace punctuation with
/// whitespace, split, and drop stopwords and empty tokens. No length limit is
/// enforced here; oversized input is rejected at the tool boundary before the
/// pipeline runs.
#[must_use]
pub fn extract_keywords(text: &str) -> HashSet<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    normalized
        .split_whitespace()
        .filter(|token| !STOPWORDS.contains(token))
        .map(str::to_string)
        .collect()
}
