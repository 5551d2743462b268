use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::common::constants::HISTORY_LIMIT;
use crate::common::time_utils::current_timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub url: String,
    pub generated_at: String,
}

/// Most-recent-first list of generated URLs, de-duplicated by exact string.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }
}

impl History {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    pub fn push(&mut self, url: &str) {
        self.push_entry(HistoryEntry {
            url: url.to_string(),
            generated_at: current_timestamp(),
        });
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.entries.retain(|e| e.url != entry.url);
        self.entries.insert(0, entry);
        self.entries.truncate(self.limit);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.url.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Load history from a JSON file. A missing file yields an empty history.
    pub fn load(path: &Path, limit: usize) -> Result<Self> {
        let mut history = Self::with_limit(limit);
        if !path.exists() {
            debug!("No history file at {:?}, starting empty", path);
            return Ok(history);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read history file: {}", path.display()))?;
        let mut entries: Vec<HistoryEntry> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse history file: {}", path.display()))?;

        entries.truncate(limit);
        history.entries = entries;
        debug!("Loaded {} history entries", history.len());
        Ok(history)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write history file: {}", path.display()))?;
        debug!("Saved {} history entries to {:?}", self.len(), path);
        Ok(())
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        if self.is_empty() {
            return Err(anyhow::anyhow!("No history to export."));
        }

        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        writer.write_record(["url", "generated_at"])?;
        for entry in &self.entries {
            writer.write_record([entry.url.as_str(), entry.generated_at.as_str()])?;
        }
        writer.flush()?;

        info!("History exported to {}", path.display());
        Ok(())
    }
}
