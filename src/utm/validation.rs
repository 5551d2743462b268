use regex::Regex;
use std::sync::OnceLock;

use crate::common::constants::REQUIRED_KEYS;
use crate::common::ParameterSet;

static HOST_RE: OnceLock<Regex> = OnceLock::new();

/// Whether a parsed host name looks like a real domain, not a stray query fragment.
pub fn valid_host(host: &str) -> bool {
    let re = HOST_RE.get_or_init(|| {
        Regex::new(r"^[\w-]+(\.[\w-]+)*\.?$").expect("host pattern is valid")
    });
    re.is_match(host)
}

/// Required keys whose value is missing or blank.
pub fn missing_required_keys(pairs: &ParameterSet) -> Vec<&'static str> {
    REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| pairs.get(key).map_or(true, |v| v.trim().is_empty()))
        .collect()
}
