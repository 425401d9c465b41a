//! Content-type strategies for `discover_nvidia_content`.
//!
//! Each recognized content type rewrites the topic into a sharper query,
//! narrows the domain set to where that content actually lives, and carries
//! the keyword list used to re-score results. Unrecognized types fall back to
//! [`ContentType::Other`]: raw topic, full default domain set, no keywords.

use serde::{Deserialize, Serialize};

/// Closed set of discoverable content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Course,
    Tutorial,
    Webinar,
    Blog,
    /// Fallback for unrecognized type strings.
    Other,
}

impl ContentType {
    /// Parse a caller-supplied type tag, case-insensitively. Unknown tags map
    /// to [`ContentType::Other`] rather than failing.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "video" => Self::Video,
            "course" => Self::Course,
            "tutorial" => Self::Tutorial,
            "webinar" => Self::Webinar,
            "blog" => Self::Blog,
            _ => Self::Other,
        }
    }

    /// Classification tag stamped onto discovered results.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Course => "course",
            Self::Tutorial => "tutorial",
            Self::Webinar => "webinar",
            Self::Blog => "blog",
            Self::Other => "other",
        }
    }
}

/// One content type's search plan: rewritten query, domain subset, and the
/// keyword list used for re-scoring. Built once per discover call, immutable
/// after.
#[derive(Debug, Clone)]
pub struct ContentStrategy {
    pub query: String,
    pub domains: Vec<String>,
    pub keywords: Vec<String>,
}

/// Build the strategy for a content type and topic.
///
/// `default_domains` backs the [`ContentType::Other`] arm; the typed arms use
/// fixed subsets of the NVIDIA properties where that content type lives.
#[must_use]
pub fn resolve_strategy(
    content_type: ContentType,
    topic: &str,
    default_domains: &[String],
) -> ContentStrategy {
    match content_type {
        ContentType::Video => ContentStrategy {
            query: format!("{topic} video session recording"),
            domains: owned(&["developer.nvidia.com", "blogs.nvidia.com"]),
            keywords: keywords(&["video", "watch", "session", "gtc", "recording"]),
        },
        ContentType::Course => ContentStrategy {
            query: format!("{topic} course training certification"),
            domains: owned(&["developer.nvidia.com", "docs.nvidia.com"]),
            keywords: keywords(&["course", "training", "dli", "certification", "learn"]),
        },
        ContentType::Tutorial => ContentStrategy {
            query: format!("{topic} tutorial guide getting started"),
            domains: owned(&["developer.nvidia.com", "docs.nvidia.com"]),
            keywords: keywords(&["tutorial", "guide", "example", "walkthrough", "step"]),
        },
        ContentType::Webinar => ContentStrategy {
            query: format!("{topic} webinar gtc session"),
            domains: owned(&["developer.nvidia.com", "blogs.nvidia.com", "nvidianews.nvidia.com"]),
            keywords: keywords(&["webinar", "gtc", "session", "talk", "register"]),
        },
        ContentType::Blog => ContentStrategy {
            query: format!("{topic} blog post"),
            domains: owned(&["blogs.nvidia.com", "developer.nvidia.com"]),
            keywords: keywords(&["blog", "post", "announcement", "technical"]),
        },
        ContentType::Other => ContentStrategy {
            query: topic.to_string(),
            domains: default_domains.to_vec(),
            keywords: Vec::new(),
        },
    }
}

fn owned(domains: &[&str]) -> Vec<String> {
    domains.iter().map(|d| (*d).to_string()).collect()
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}
