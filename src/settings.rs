use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::constants::{
    APP_DIR_NAME, HISTORY_FILE_NAME, HISTORY_LIMIT, SETTINGS_FILE_NAME,
};
use crate::common::{MergePolicy, NormalizationConfig, SpaceMode};
use crate::presets::JsonPresetStore;

fn default_true() -> bool {
    true
}

fn default_history_limit() -> usize {
    HISTORY_LIMIT
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub force_lower: bool,
    #[serde(default)]
    pub space_mode: SpaceMode,
    #[serde(default = "default_true")]
    pub merge_existing: bool,
    #[serde(default = "default_true")]
    pub override_existing: bool,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default)]
    pub presets_path: Option<PathBuf>,
    #[serde(default)]
    pub history_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            force_lower: true,
            space_mode: SpaceMode::default(),
            merge_existing: true,
            override_existing: true,
            history_limit: HISTORY_LIMIT,
            presets_path: None,
            history_path: None,
        }
    }
}

impl Settings {
    pub fn load(settings_file: &Path) -> Result<Self> {
        if !settings_file.exists() {
            return Err(anyhow::anyhow!(
                "settings file not found at '{}'",
                settings_file.display()
            ));
        }

        let contents = fs::read_to_string(settings_file).with_context(|| {
            format!("Failed to read settings file: {}", settings_file.display())
        })?;

        let settings: Settings = serde_json::from_str(&contents).with_context(|| {
            format!("Failed to parse settings file: {}", settings_file.display())
        })?;

        info!("Settings loaded from '{}'.", settings_file.display());
        Ok(settings)
    }

    /// Like [`Settings::load`], but a missing file yields the defaults.
    pub fn load_or_default(settings_file: &Path) -> Result<Self> {
        if settings_file.exists() {
            Self::load(settings_file)
        } else {
            debug!(
                "No settings file at '{}', using defaults",
                settings_file.display()
            );
            Ok(Self::default())
        }
    }

    pub fn default_path() -> PathBuf {
        app_dir(dirs::config_dir()).join(SETTINGS_FILE_NAME)
    }

    pub fn normalization(&self) -> NormalizationConfig {
        NormalizationConfig {
            force_lower: self.force_lower,
            space_mode: self.space_mode,
        }
    }

    pub fn merge_policy(&self) -> MergePolicy {
        MergePolicy {
            merge_existing: self.merge_existing,
            override_existing: self.override_existing,
        }
    }

    pub fn presets_file(&self) -> PathBuf {
        self.presets_path
            .clone()
            .unwrap_or_else(JsonPresetStore::default_path)
    }

    pub fn history_file(&self) -> PathBuf {
        self.history_path
            .clone()
            .unwrap_or_else(|| app_dir(dirs::data_dir()).join(HISTORY_FILE_NAME))
    }
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
