use thiserror::Error;

/// Validation failures of the URL builder. None of them are transient.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UtmError {
    #[error("Base URL is required.")]
    EmptyBaseUrl,

    #[error("Base URL '{url}' seems invalid ({reason}). Example: https://example.com/landing")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl UtmError {
    pub(crate) fn invalid_base(url: &str, reason: impl Into<String>) -> Self {
        UtmError::InvalidBaseUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
