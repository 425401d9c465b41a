//! Caller-input validation performed before the pipeline runs.
//!
//! Violations become structured failure payloads, never protocol errors: the
//! tool call itself succeeded, the request was bad. The caller-supplied
//! domain list fails closed on any single invalid entry; contrast with the
//! environment override in `config`, which falls back to defaults.

use serde_json::Value;

use crate::domains::{is_valid_domain, normalize_domain};

/// Maximum accepted query/topic length in characters.
pub const MAX_QUERY_LENGTH: usize = 500;

/// Hard cap on per-domain and total result counts.
pub const MAX_RESULTS_CAP: usize = 10;

/// Reject oversized query/topic strings.
///
/// `field` names the offending argument in the message, which always
/// contains "too long".
pub fn validate_length(text: &str, field: &str) -> Result<(), String> {
    let len = text.chars().count();
    if len > MAX_QUERY_LENGTH {
        return Err(format!(
            "{field} is too long: {len} characters (maximum {MAX_QUERY_LENGTH})"
        ));
    }
    Ok(())
}

/// Validate and normalize a caller-supplied `domains` argument.
///
/// - absent, `null`, or an empty list: `Ok(None)`, the default set applies;
/// - not a list: `Err("domains must be a list")`;
/// - any entry outside the trusted family: the whole request is rejected
///   with "Invalid domains detected" (fail closed, never filter-and-continue).
pub fn resolve_request_domains(raw: Option<&Value>) -> Result<Option<Vec<String>>, String> {
    let raw = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let Value::Array(entries) = raw else {
        return Err("domains must be a list".to_string());
    };
    if entries.is_empty() {
        return Ok(None);
    }

    let mut resolved = Vec::with_capacity(entries.len());
    let mut invalid = Vec::new();
    for entry in entries {
        match entry.as_str() {
            Some(text) if is_valid_domain(text) => {
                if let Some(host) = normalize_domain(text) {
                    resolved.push(host);
                }
            }
            Some(text) => invalid.push(text.to_string()),
            None => invalid.push(entry.to_string()),
        }
    }

    if invalid.is_empty() {
        Ok(Some(resolved))
    } else {
        Err(format!("Invalid domains detected: {}", invalid.join(", ")))
    }
}

/// Silently cap a requested result count.
#[must_use]
pub fn cap_max_results(requested: Option<u64>, default: usize) -> usize {
    match requested {
        Some(n) => (n as usize).min(MAX_RESULTS_CAP),
        None => default.min(MAX_RESULTS_CAP),
    }
}
