//! Domain validation and domain-set resolution.
//!
//! Every domain that reaches the search pipeline must belong to the trusted
//! NVIDIA domain family: the hostname is either `nvidia.com` itself or a
//! subdomain of it. Two resolution policies exist on purpose and must not be
//! unified:
//!
//! - Caller-supplied domain lists fail closed: one invalid entry rejects the
//!   whole request (see `mcp::validation`).
//! - The `NVIDIA_SEARCH_DOMAINS` environment override falls back to the
//!   default set when no entry survives validation (see `config`).

use url::Url;

/// Root of the trusted domain family.
pub const TRUSTED_ROOT: &str = "nvidia.com";

/// Default NVIDIA domains searched when the caller does not narrow the set.
pub const DEFAULT_DOMAINS: [&str; 5] = [
    "developer.nvidia.com",
    "blogs.nvidia.com",
    "nvidianews.nvidia.com",
    "docs.nvidia.com",
    "build.nvidia.com",
];

/// Default domains as an owned, ordered set.
#[must_use]
pub fn default_domains() -> Vec<String> {
    DEFAULT_DOMAINS.iter().map(|d| (*d).to_string()).collect()
}

/// Extract the bare hostname from a domain string.
///
/// Accepts either a bare hostname (`developer.nvidia.com`), a hostname with a
/// trailing path, or a full URL (`https://developer.nvidia.com/cuda`).
/// Returns `None` when no hostname can be parsed out.
#[must_use]
pub fn normalize_domain(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&candidate).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    parsed.host_str().map(str::to_lowercase)
}

/// Check whether a domain string belongs to the trusted NVIDIA family.
///
/// Pure predicate: malformed input is invalid, never an error. Matching is
/// case-insensitive and requires the hostname to equal [`TRUSTED_ROOT`] or to
/// end with `.nvidia.com` (plain suffix matching would accept
/// `notnvidia.com`).
#[must_use]
pub fn is_valid_domain(input: &str) -> bool {
    match normalize_domain(input) {
        Some(host) => host == TRUSTED_ROOT || host.ends_with(&format!(".{TRUSTED_ROOT}")),
        None => false,
    }
}
