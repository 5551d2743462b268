use crate::common::{NormalizationConfig, SpaceMode};

/// Normalize a key/value pair. An absent value stays absent.
pub fn normalize_pair(
    key: &str,
    value: Option<&str>,
    config: &NormalizationConfig,
) -> (String, Option<String>) {
    (
        transform(key, config),
        value.map(|v| transform(v, config)),
    )
}

fn transform(s: &str, config: &NormalizationConfig) -> String {
    let s = s.trim();
    let s = if config.force_lower {
        s.to_lowercase()
    } else {
        s.to_string()
    };

    match config.space_mode {
        SpaceMode::Underscore => s.replace(' ', "_"),
        SpaceMode::Dash => s.replace(' ', "-"),
        SpaceMode::Keep => s,
    }
}
