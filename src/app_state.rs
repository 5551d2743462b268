use anyhow::Result;
use log::{debug, info, warn};

use crate::common::constants::{form_keys, REQUIRED_KEYS};
use crate::common::{MergePolicy, NormalizationConfig, ParameterSet};
use crate::history::History;
use crate::presets::{PresetStore, Presets};
use crate::settings::Settings;
use crate::utm::{build_utm_url, missing_required_keys};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub normalization: NormalizationConfig,
    pub policy: MergePolicy,
}

impl From<&Settings> for BuildOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            normalization: settings.normalization(),
            policy: settings.merge_policy(),
        }
    }
}

/// What the user has typed so far.
#[derive(Debug, Clone)]
pub struct FormState {
    pub base_url: String,
    pub options: BuildOptions,
    fields: ParameterSet,
}

impl FormState {
    pub fn new(options: BuildOptions) -> Self {
        let mut form = Self {
            base_url: String::new(),
            options,
            fields: ParameterSet::new(),
        };
        form.clear_fields();
        form
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key, value);
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key)
    }

    /// Empty every known field and drop custom ones, keeping the form order.
    pub fn clear_fields(&mut self) {
        self.fields = form_keys().map(|k| (k, "")).collect();
    }

    /// Filled-in fields with surrounding whitespace removed.
    pub fn collect_pairs(&self) -> ParameterSet {
        self.fields
            .iter()
            .map(|(k, v)| (k, v.trim()))
            .filter(|(_, v)| !v.is_empty())
            .collect()
    }
}

/// Application state owned by the front end; the URL builder itself stays stateless.
pub struct AppState<S: PresetStore> {
    pub form: FormState,
    history: History,
    presets: Presets,
    store: S,
}

impl<S: PresetStore> AppState<S> {
    pub fn new(store: S, history: History, options: BuildOptions) -> Result<Self> {
        let presets = store.load()?;
        debug!(
            "App state ready with {} preset(s) and {} history entries",
            presets.len(),
            history.len()
        );

        Ok(Self {
            form: FormState::new(options),
            history,
            presets,
            store,
        })
    }

    /// Build the URL from the current form and record it in the history.
    pub fn generate(&mut self, allow_missing: bool) -> Result<String> {
        let base = self.form.base_url.trim().to_string();
        let pairs = self.form.collect_pairs();

        let missing = missing_required_keys(&pairs);
        if !missing.is_empty() {
            if base.is_empty() {
                return Err(anyhow::anyhow!(
                    "Base URL + required fields are needed: Base URL, {}",
                    REQUIRED_KEYS.join(", ")
                ));
            }
            if !allow_missing {
                return Err(anyhow::anyhow!(
                    "Missing required fields: {}",
                    missing.join(", ")
                ));
            }
            warn!("Generating without required fields: {}", missing.join(", "));
        }

        let options = self.form.options;
        let url = build_utm_url(&base, &pairs, &options.normalization, &options.policy)?;
        self.history.push(&url);
        Ok(url)
    }

    /// Generate, then store the form as a preset only if generation succeeded.
    pub fn generate_and_save_preset(
        &mut self,
        allow_missing: bool,
        preset_name: Option<&str>,
    ) -> Result<String> {
        let url = self.generate(allow_missing)?;
        if let Some(name) = preset_name {
            self.save_preset(name)?;
        }
        Ok(url)
    }

    pub fn save_preset(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow::anyhow!("Preset name must not be empty"));
        }

        self.presets.insert(name.to_string(), self.form.collect_pairs());
        self.store.save(&self.presets)?;
        info!("Preset '{}' saved.", name);
        Ok(())
    }

    pub fn load_preset(&mut self, name: &str) -> Result<()> {
        let pairs = self
            .presets
            .get(name.trim())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Preset '{}' not found", name))?;

        self.form.clear_fields();
        for (key, value) in pairs.iter() {
            self.form.set_field(key, value);
        }
        info!("Preset '{}' loaded.", name);
        Ok(())
    }

    pub fn delete_preset(&mut self, name: &str) -> Result<()> {
        if self.presets.remove(name.trim()).is_none() {
            return Err(anyhow::anyhow!("Preset '{}' not found", name));
        }

        self.store.save(&self.presets)?;
        info!("Preset '{}' deleted.", name);
        Ok(())
    }

    pub fn preset(&self, name: &str) -> Option<&ParameterSet> {
        self.presets.get(name)
    }

    pub fn preset_names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Clear the base URL and every field; options are left alone.
    pub fn reset(&mut self) {
        self.form.base_url.clear();
        self.form.clear_fields();
    }
}
