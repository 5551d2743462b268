use anyhow::Result;
use log::{debug, info};
use std::path::Path;

use utm_builder::app_state::{AppState, BuildOptions};
use utm_builder::cli_args::{BuildArgs, Command, CommandLineArgs, HistoryAction, PresetAction};
use utm_builder::history::History;
use utm_builder::presets::JsonPresetStore;
use utm_builder::settings::Settings;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    debug!("UTM Builder v{} starting up...", env!("CARGO_PKG_VERSION"));

    let cli_args = CommandLineArgs::parse_args();

    let settings_path = cli_args
        .settings
        .clone()
        .unwrap_or_else(Settings::default_path);
    let settings = Settings::load_or_default(&settings_path)?;

    let history_path = settings.history_file();
    let history = if cli_args.command.needs_history() {
        History::load(&history_path, settings.history_limit)?
    } else {
        History::with_limit(settings.history_limit)
    };
    let store = JsonPresetStore::new(settings.presets_file());
    let mut app = AppState::new(store, history, BuildOptions::from(&settings))?;

    match &cli_args.command {
        Command::Build(args) => run_build(&mut app, args, &history_path),
        Command::Preset { action } => run_preset(&mut app, action),
        Command::History { action } => run_history(&mut app, action, &history_path),
    }
}

fn run_build(
    app: &mut AppState<JsonPresetStore>,
    args: &BuildArgs,
    history_path: &Path,
) -> Result<()> {
    if let Some(name) = &args.preset {
        app.load_preset(name)?;
    }

    app.form.base_url = args.url.clone();
    for (key, value) in args.utm_fields() {
        app.form.set_field(key, value);
    }
    for (key, value) in args.extra_params()? {
        app.form.set_field(key, value);
    }
    args.apply_overrides(&mut app.form.options);
    debug!("Build options: {:?}", app.form.options);

    let url = app.generate_and_save_preset(args.allow_missing, args.save_preset.as_deref())?;
    println!("{}", url);

    if args.no_history {
        debug!("Skipping history (--no-history)");
    } else {
        app.history().save(history_path)?;
    }
    Ok(())
}

fn run_preset(app: &mut AppState<JsonPresetStore>, action: &PresetAction) -> Result<()> {
    match action {
        PresetAction::List => {
            let names = app.preset_names();
            if names.is_empty() {
                info!("No presets saved yet.");
            }
            for name in names {
                println!("{}", name);
            }
        }
        PresetAction::Show { name } => {
            let pairs = app
                .preset(name)
                .ok_or_else(|| anyhow::anyhow!("Preset '{}' not found", name))?;
            for (key, value) in pairs.iter() {
                println!("{}={}", key, value);
            }
        }
        PresetAction::Delete { name } => app.delete_preset(name)?,
    }
    Ok(())
}

fn run_history(
    app: &mut AppState<JsonPresetStore>,
    action: &HistoryAction,
    history_path: &Path,
) -> Result<()> {
    match action {
        HistoryAction::List => {
            if app.history().is_empty() {
                info!("History is empty.");
            }
            for entry in app.history().entries() {
                println!("{}  {}", entry.generated_at, entry.url);
            }
        }
        HistoryAction::Export { path } => app.history().export_csv(path)?,
        HistoryAction::Clear => {
            app.history_mut().clear();
            app.history().save(history_path)?;
            info!("History cleared.");
        }
    }
    Ok(())
}
