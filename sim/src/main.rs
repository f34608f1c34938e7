//! Runs the mod lifecycle against a scenario file instead of a live game.
//!
//! Loads the world, applies settings and slider changes, clicks the requested
//! reset buttons and prints what the monitor window would show.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::Parser;
use job_cooldowns_core::orchestrator::ApplyOutcome;
use job_cooldowns_core::settings::{self, SettingsError, slider_specs};
use job_cooldowns_core::{JobCooldowns, MemoryWorld, MonitorView, Registry, StatusRecord};
use job_cooldowns_types::Settings;
use serde::Serialize;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Simulate job cooldowns against a scenario world")]
struct Args {
    /// Scenario TOML describing the host objects and FSMs
    scenario: Option<PathBuf>,

    /// Settings file to use instead of the per-user config
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Save the settings after slider changes
    #[arg(long)]
    store: bool,

    /// Enable developer mode (raw states, dev log file)
    #[arg(long)]
    dev: bool,

    /// Show reset buttons in the monitor
    #[arg(long)]
    show_reset: bool,

    /// Move a cooldown slider after load, e.g. `--set Farm=30`
    #[arg(long = "set", value_name = "JOB=MINUTES", value_parser = parse_assignment)]
    set: Vec<(String, u32)>,

    /// Click a job's Reset button after load
    #[arg(long = "reset", value_name = "JOB")]
    reset: Vec<String>,

    /// Print JSON instead of the text window
    #[arg(long)]
    json: bool,

    /// Directory for the developer log file
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,

    /// Write the resulting world back out as a scenario
    #[arg(long, value_name = "PATH")]
    save_world: Option<PathBuf>,

    /// List the settings-page sliders and exit
    #[arg(long)]
    list_jobs: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    statuses: &'a [StatusRecord],
    monitor: &'a MonitorView,
}

fn parse_assignment(raw: &str) -> Result<(String, u32), String> {
    let (job, minutes) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected JOB=MINUTES, got '{raw}'"))?;
    let minutes = minutes
        .trim()
        .parse()
        .map_err(|e| format!("invalid minutes '{minutes}': {e}"))?;
    Ok((job.trim().to_string(), minutes))
}

/// Settings from `path`, or the per-user config (defaults if unreadable)
fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => settings::load_from(path),
        None => Ok(settings::load_or_default()),
    }
}

fn store_settings(path: Option<&Path>, current: &Settings) -> Result<(), SettingsError> {
    match path {
        Some(path) => settings::store_to(path, current),
        None => {
            let path = settings::config_path()?;
            tracing::info!(path = %path.display(), "Storing settings");
            settings::store(current)
        }
    }
}

/// Initialize logging, writing to JOB_COOLDOWNS_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("JOB_COOLDOWNS_LOG_PATH") {
        if let Ok(file) = fs::OpenOptions::new().create(true).append(true).open(&path) {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn list_jobs() {
    for slider in slider_specs(&Registry::standard()) {
        println!(
            "{:<20} {:<32} default {:>3}  {}",
            slider.job_id, slider.header, slider.default, slider.help
        );
    }
}

fn main() {
    init_logging();
    let args = Args::parse();

    if args.list_jobs {
        list_jobs();
        return;
    }

    let Some(scenario) = args.scenario.as_ref() else {
        tracing::error!("No scenario given, pass a scenario file or --list-jobs");
        process::exit(2);
    };

    let mut world = match MemoryWorld::load(scenario) {
        Ok(world) => world,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load scenario");
            process::exit(1);
        }
    };

    let mut loaded = match load_settings(args.settings.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load settings");
            process::exit(1);
        }
    };
    loaded.dev_mode |= args.dev;
    loaded.show_reset_buttons |= args.show_reset;

    let mut app = JobCooldowns::new(&args.log_dir);
    app.on_settings_loaded(loaded, &mut world);
    app.on_load(&mut world);

    for (job_id, minutes) in &args.set {
        match app.on_cooldown_changed(job_id, *minutes, &mut world) {
            ApplyOutcome::Applied => tracing::info!(job_id, minutes, "Slider applied"),
            ApplyOutcome::Deferred => {}
            ApplyOutcome::UnknownJob => tracing::warn!(job_id, "No such job"),
        }
    }

    for job_id in &args.reset {
        if !app.on_reset_clicked(job_id, &mut world) {
            tracing::warn!(job_id, "Reset not performed");
        }
    }

    // One update tick with the toggle key held opens the window
    app.on_update(&world, Duration::ZERO, true);
    let statuses = app.statuses(&world);
    let Some(view) = app.on_gui(&world) else {
        tracing::error!("Monitor did not open");
        process::exit(1);
    };

    if args.json {
        let output = Output {
            statuses: &statuses,
            monitor: &view,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!(error = %e, "Failed to serialize output"),
        }
    } else {
        print!("{view}");
    }

    if let Some(path) = &args.save_world {
        let written = toml::to_string(&world)
            .map_err(|e| e.to_string())
            .and_then(|contents| fs::write(path, contents).map_err(|e| e.to_string()));
        if let Err(e) = written {
            tracing::error!(path = %path.display(), error = %e, "Failed to write world");
        }
    }

    if args.store {
        if let Err(e) = store_settings(args.settings.as_deref(), app.settings()) {
            tracing::error!(error = %e, "Failed to store settings");
        }
    }

    app.on_save();
}
