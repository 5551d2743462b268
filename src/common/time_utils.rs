use chrono::Local;

use super::constants::TIMESTAMP_FORMAT;

/// Get current local timestamp as formatted string
pub fn current_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
