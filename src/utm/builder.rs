use log::debug;
use url::{Host, Url};

use super::error::UtmError;
use super::normalize::normalize_pair;
use super::validation::valid_host;
use crate::common::constants::DEFAULT_SCHEME;
use crate::common::{MergePolicy, NormalizationConfig, ParameterSet};

/// Build a tracking URL from `base_url` and the supplied parameters.
///
/// Existing query parameters come first in their original order (when
/// `merge_existing` is set), followed by new keys in the order supplied.
/// Pairs with a blank value, before or after normalization, are dropped.
/// The fragment of the base URL is kept.
pub fn build_utm_url(
    base_url: &str,
    pairs: &ParameterSet,
    normalization: &NormalizationConfig,
    policy: &MergePolicy,
) -> Result<String, UtmError> {
    let base = base_url.trim();
    if base.is_empty() {
        return Err(UtmError::EmptyBaseUrl);
    }

    let candidate = with_scheme(base);
    let mut url = parse_base(&candidate)?;

    let existing = existing_params(&url, policy);
    debug!(
        "Base URL '{}' carries {} existing parameter(s)",
        candidate,
        existing.len()
    );

    let mut merged = existing.clone();
    for (key, value) in pairs.iter() {
        if value.trim().is_empty() {
            continue;
        }

        let (key, value) = match normalize_pair(key, Some(value), normalization) {
            (k, Some(v)) if !k.is_empty() && !v.is_empty() => (k, v),
            _ => continue,
        };

        if policy.override_existing || !existing.contains_key(&key) {
            merged.insert(key, value);
        } else {
            debug!("Keeping existing value for '{}'", key);
        }
    }

    if merged.is_empty() {
        url.set_query(None);
    } else {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (key, value) in merged.iter() {
            query.append_pair(key, value);
        }
    }

    let built = url.to_string();
    debug!("Built URL with {} parameter(s): {}", merged.len(), built);
    Ok(built)
}

fn with_scheme(base: &str) -> String {
    if base.contains("://") {
        base.to_string()
    } else {
        format!("{}://{}", DEFAULT_SCHEME, base)
    }
}

fn parse_base(candidate: &str) -> Result<Url, UtmError> {
    if raw_authority(candidate).is_empty() {
        return Err(UtmError::invalid_base(candidate, "no host"));
    }

    let url = Url::parse(candidate).map_err(|e| UtmError::invalid_base(candidate, e.to_string()))?;

    let host_check = match url.host() {
        Some(Host::Domain(domain)) if !valid_host(domain) => {
            Err(format!("'{}' is not a host name", domain))
        }
        Some(_) => Ok(()),
        None => Err("no host".to_string()),
    };
    host_check.map_err(|reason| UtmError::invalid_base(candidate, reason))?;

    Ok(url)
}

/// Text between `://` and the start of the path, query or fragment.
fn raw_authority(candidate: &str) -> &str {
    let rest = candidate.split_once("://").map_or("", |(_, rest)| rest);
    let end = rest.find(['/', '\\', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

// Repeated keys collapse to the last value seen, at the first key's position.
fn existing_params(url: &Url, policy: &MergePolicy) -> ParameterSet {
    if !policy.merge_existing {
        return ParameterSet::new();
    }

    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
