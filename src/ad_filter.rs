//! Advertisement and tracking-redirect filtering.
//!
//! Search engines interleave paid placements with organic hits. Those links
//! point at redirect endpoints (`duckduckgo.com/y.js`, `bing.com/aclick`)
//! carrying ad-tracking query parameters instead of the destination page.
//! The pipeline drops them before scoring so an emitted result URL never
//! matches this predicate.

use url::Url;

/// Hosts that serve ad/tracking redirects rather than content.
const AD_REDIRECT_HOSTS: [&str; 4] = [
    "duckduckgo.com",
    "www.bing.com",
    "bing.com",
    "r.search.yahoo.com",
];

/// Query parameter names that only appear on ad placements.
///
/// Matching is case-sensitive: engines emit these exact names and a
/// lowercase-folded match would start flagging unrelated parameters.
const AD_QUERY_PARAMS: [&str; 6] = [
    "ad_domain",
    "ad_provider",
    "ad_type",
    "ad_url",
    "ad_click",
    "aclk",
];

/// Check whether a result URL is an advertisement or tracking redirect.
///
/// True when the URL lives on a known redirect host and carries any
/// ad-tracking parameter, or when it carries one of the fixed ad parameter
/// names regardless of host. Unparseable URLs are treated as not-ad; the
/// domain allow-list rejects anything that malformed later anyway.
#[must_use]
pub fn is_ad_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    let mut has_ad_param = false;
    let mut has_ad_prefixed_param = false;
    for (key, _) in parsed.query_pairs() {
        if AD_QUERY_PARAMS.contains(&key.as_ref()) {
            has_ad_param = true;
        }
        if key.starts_with("ad_") {
            has_ad_prefixed_param = true;
        }
    }

    if has_ad_param {
        return true;
    }

    match parsed.host_str() {
        Some(host) => AD_REDIRECT_HOSTS.contains(&host) && has_ad_prefixed_param,
        None => false,
    }
}
