use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::app_state::BuildOptions;
use crate::common::{ParameterSet, SpaceMode};
use crate::utm::UtmError;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineArgs {
    #[arg(long, global = true, help = "Path to the settings JSON file")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a UTM-tagged URL and print it
    Build(BuildArgs),
    /// Manage saved presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
    /// Inspect or export previously generated URLs
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PresetAction {
    /// List preset names
    List,
    /// Print the parameters of a preset
    Show { name: String },
    /// Delete a preset
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// Print history, most recent first
    List,
    /// Write history to a CSV file
    Export { path: PathBuf },
    /// Forget all history entries
    Clear,
}

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    #[arg(long, help = "Landing page URL; https:// is assumed when no scheme is given")]
    pub url: String,

    #[arg(long, help = "utm_source (required)")]
    pub source: Option<String>,
    #[arg(long, help = "utm_medium (required)")]
    pub medium: Option<String>,
    #[arg(long, help = "utm_campaign (required)")]
    pub campaign: Option<String>,
    #[arg(long, help = "utm_term")]
    pub term: Option<String>,
    #[arg(long, help = "utm_content")]
    pub content: Option<String>,

    #[arg(long, help = "utm_id (GA4)")]
    pub id: Option<String>,
    #[arg(long, help = "utm_source_platform (GA4)")]
    pub source_platform: Option<String>,
    #[arg(long, help = "utm_creative_format (GA4)")]
    pub creative_format: Option<String>,
    #[arg(long, help = "utm_marketing_tactic (GA4)")]
    pub marketing_tactic: Option<String>,

    #[arg(
        long = "param",
        value_name = "KEY=VALUE",
        help = "Extra query parameter; may be repeated"
    )]
    pub params: Vec<String>,

    #[arg(long, help = "Start from a saved preset")]
    pub preset: Option<String>,
    #[arg(long, help = "Save the resulting fields as a preset")]
    pub save_preset: Option<String>,

    #[arg(long, value_enum, help = "How spaces are rewritten")]
    pub space_mode: Option<SpaceMode>,
    #[arg(long, help = "Do not lowercase keys and values")]
    pub keep_case: bool,
    #[arg(long, help = "Drop the query string already present in --url")]
    pub no_merge: bool,
    #[arg(long, help = "Keep existing query values when keys collide")]
    pub no_override: bool,
    #[arg(long, help = "Generate even when required fields are missing")]
    pub allow_missing: bool,
    #[arg(long, help = "Do not record the URL in history")]
    pub no_history: bool,
}

impl BuildArgs {
    /// Form fields given on the command line, keyed by UTM parameter name.
    pub fn utm_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("utm_source", &self.source),
            ("utm_medium", &self.medium),
            ("utm_campaign", &self.campaign),
            ("utm_term", &self.term),
            ("utm_content", &self.content),
            ("utm_id", &self.id),
            ("utm_source_platform", &self.source_platform),
            ("utm_creative_format", &self.creative_format),
            ("utm_marketing_tactic", &self.marketing_tactic),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    pub fn extra_params(&self) -> Result<Vec<(String, String)>, UtmError> {
        self.params
            .iter()
            .map(|raw| ParameterSet::parse_pair(raw))
            .collect()
    }

    pub fn apply_overrides(&self, options: &mut BuildOptions) {
        if let Some(mode) = self.space_mode {
            options.normalization.space_mode = mode;
        }
        if self.keep_case {
            options.normalization.force_lower = false;
        }
        if self.no_merge {
            options.policy.merge_existing = false;
        }
        if self.no_override {
            options.policy.override_existing = false;
        }
    }
}

impl Command {
    /// Whether the command reads or writes the history file.
    pub fn needs_history(&self) -> bool {
        !matches!(self, Command::Preset { .. })
    }
}

impl CommandLineArgs {
    pub fn parse_args() -> Self {
        let args = CommandLineArgs::parse();

        if let Command::Build(build) = &args.command {
            info!("Parsed {} UTM field(s) from flags", build.utm_fields().len());
            info!("Parsed {} extra parameter(s) from --param", build.params.len());
        }

        args
    }
}
