use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::common::constants::PRESETS_FILE_NAME;
use crate::common::ParameterSet;

/// Named parameter sets, listed by name.
pub type Presets = BTreeMap<String, ParameterSet>;

/// Where presets live between runs.
pub trait PresetStore {
    fn load(&self) -> Result<Presets>;
    fn save(&self, presets: &Presets) -> Result<()>;
}

/// Presets persisted as one pretty-printed JSON object.
#[derive(Debug, Clone)]
pub struct JsonPresetStore {
    path: PathBuf,
}

impl JsonPresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.utm_builder_presets.json`, falling back to the current directory.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(PRESETS_FILE_NAME)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl PresetStore for JsonPresetStore {
    fn load(&self) -> Result<Presets> {
        if !self.path.exists() {
            debug!("No preset file at {:?}", self.path);
            return Ok(Presets::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read presets: {}", self.path.display()))?;
        let raw: Value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse presets: {}", self.path.display()))?;

        let object = raw.as_object().ok_or_else(|| {
            anyhow::anyhow!("Presets file {} is not a JSON object", self.path.display())
        })?;

        let mut presets = Presets::new();
        for (name, pairs) in object {
            let set = ParameterSet::from_json(pairs)
                .with_context(|| format!("Invalid preset '{}'", name))?;
            presets.insert(name.clone(), set);
        }

        info!("Loaded {} preset(s) from {}", presets.len(), self.path.display());
        Ok(presets)
    }

    fn save(&self, presets: &Presets) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(presets)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to save presets: {}", self.path.display()))?;
        debug!("Saved {} preset(s) to {:?}", presets.len(), self.path);
        Ok(())
    }
}
