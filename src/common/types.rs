use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utm::UtmError;

/// How spaces inside keys and values are rewritten during normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SpaceMode {
    #[default]
    Underscore,
    Dash,
    /// Leave spaces alone; they are encoded as `+` in the query string
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationConfig {
    pub force_lower: bool,
    pub space_mode: SpaceMode,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            force_lower: true,
            space_mode: SpaceMode::Underscore,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergePolicy {
    /// Keep the parameters already present in the base URL's query string
    pub merge_existing: bool,
    /// Let new parameters replace existing ones with the same key
    pub override_existing: bool,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            merge_existing: true,
            override_existing: true,
        }
    }
}

/// Ordered parameter mapping with unique keys.
///
/// Inserting an existing key replaces its value in place, so the output order
/// is the order in which keys were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterSet {
    entries: IndexMap<String, String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a `key=value` pair as typed on the command line.
    pub fn parse_pair(raw: &str) -> Result<(String, String), UtmError> {
        let (key, value) = raw.split_once('=').ok_or_else(|| {
            UtmError::InvalidInput(format!("expected key=value, got '{}'", raw))
        })?;

        if key.trim().is_empty() {
            return Err(UtmError::InvalidInput(format!(
                "parameter '{}' has an empty key",
                raw
            )));
        }

        Ok((key.to_string(), value.to_string()))
    }

    /// Decode a JSON object of string values. `null` means "no value" and is skipped.
    pub fn from_json(value: &Value) -> Result<Self, UtmError> {
        let object = value.as_object().ok_or_else(|| {
            UtmError::InvalidInput(format!("expected a JSON object, got {}", value))
        })?;

        let mut set = Self::new();
        for (key, v) in object {
            match v {
                Value::String(s) => set.insert(key.as_str(), s.as_str()),
                Value::Null => continue,
                other => {
                    return Err(UtmError::InvalidInput(format!(
                        "value for '{}' must be a string, got {}",
                        key, other
                    )))
                }
            }
        }
        Ok(set)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}
