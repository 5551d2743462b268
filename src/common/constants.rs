/// Keys that must be filled in before a URL is generated without confirmation
pub const REQUIRED_KEYS: &[&str] = &["utm_source", "utm_medium", "utm_campaign"];

/// Classic optional UTM keys shown next to the required ones
pub const CORE_OPTIONAL_KEYS: &[&str] = &["utm_term", "utm_content"];

/// GA4-extended UTM keys (optional)
pub const GA4_OPTIONAL_KEYS: &[&str] = &[
    "utm_id",
    "utm_source_platform",
    "utm_creative_format",
    "utm_marketing_tactic",
];

/// Scheme prepended when the base URL has none
pub const DEFAULT_SCHEME: &str = "https";

/// Maximum number of URLs kept in the history list
pub const HISTORY_LIMIT: usize = 20;

/// Preset file name, stored in the user's home directory
pub const PRESETS_FILE_NAME: &str = ".utm_builder_presets.json";

/// Application directory under the platform config/data dirs
pub const APP_DIR_NAME: &str = "utm-builder";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const HISTORY_FILE_NAME: &str = "history.json";

/// Timestamp format used for history entries
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// All form fields in display order
pub fn form_keys() -> impl Iterator<Item = &'static str> {
    REQUIRED_KEYS
        .iter()
        .chain(CORE_OPTIONAL_KEYS)
        .chain(GA4_OPTIONAL_KEYS)
        .copied()
}
