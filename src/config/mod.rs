//! Server configuration.
//!
//! Everything here is resolved once at process start and read-only after:
//! the domain set (optionally overridden through `NVIDIA_SEARCH_DOMAINS`),
//! the outbound-call interval, the relevance threshold, and the enrichment
//! switch.

use std::time::Duration;
use tracing::warn;

use crate::aggregator::DEFAULT_MIN_RELEVANCE;
use crate::domains::{default_domains, is_valid_domain, normalize_domain};
use crate::rate_limiter::DEFAULT_MIN_INTERVAL;

/// Comma-separated domain list overriding the default set.
pub const DOMAINS_ENV: &str = "NVIDIA_SEARCH_DOMAINS";
/// Minimum milliseconds between outbound search calls.
pub const MIN_INTERVAL_ENV: &str = "NVIDIA_SEARCH_MIN_INTERVAL_MS";
/// Set to `0` or `false` to disable snippet context enrichment.
pub const ENRICH_ENV: &str = "NVIDIA_SEARCH_ENRICH";

/// Process-wide configuration, immutable after startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Default domain set used when a request does not narrow it.
    pub domains: Vec<String>,
    /// Minimum interval between outbound search-engine calls.
    pub min_interval: Duration,
    /// Results scoring below this are dropped by the aggregator.
    pub min_relevance: u8,
    /// Whether to fetch result pages and widen snippets with page context.
    pub enrich_context: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            domains: default_domains(),
            min_interval: DEFAULT_MIN_INTERVAL,
            min_relevance: DEFAULT_MIN_RELEVANCE,
            enrich_context: true,
        }
    }
}

impl ServerConfig {
    /// Build the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let domains = resolve_domain_override(std::env::var(DOMAINS_ENV).ok().as_deref());

        let min_interval = std::env::var(MIN_INTERVAL_ENV)
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map_or(DEFAULT_MIN_INTERVAL, Duration::from_millis);

        let enrich_context = std::env::var(ENRICH_ENV)
            .map(|raw| !matches!(raw.trim(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Self {
            domains,
            min_interval,
            min_relevance: DEFAULT_MIN_RELEVANCE,
            enrich_context,
        }
    }
}

/// Resolve the environment domain override against the default set.
///
/// Each entry is validated individually; the valid subset wins when
/// non-empty, otherwise the default set is used with a warning. This is
/// deliberately laxer than the caller-request path, which fails closed on
/// any invalid entry.
#[must_use]
pub fn resolve_domain_override(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return default_domains();
    };

    let mut valid = Vec::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        if is_valid_domain(entry) {
            if let Some(host) = normalize_domain(entry) {
                valid.push(host);
            }
        } else {
            warn!(domain = %entry, "ignoring invalid domain in {DOMAINS_ENV}");
        }
    }

    if valid.is_empty() {
        warn!("no valid domains in {DOMAINS_ENV}, falling back to defaults");
        default_domains()
    } else {
        valid
    }
}
