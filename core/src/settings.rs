//! Settings persistence and the settings-page slider layout.
//!
//! [`Settings`] is stored as TOML through `confy` under [`APP_NAME`]. A missing
//! file is created with defaults; a broken one is reported and replaced by
//! defaults in memory only.

use std::path::{Path, PathBuf};

use job_cooldowns_types::Settings;
use job_cooldowns_types::formatting::format_minutes_range;
use thiserror::Error;
use tracing::warn;

use crate::registry::Registry;

pub const APP_NAME: &str = "job-cooldowns";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[source] confy::ConfyError),

    #[error("failed to store settings: {0}")]
    Store(#[source] confy::ConfyError),
}

/// Load from the per-user config location
pub fn load() -> Result<Settings, SettingsError> {
    confy::load(APP_NAME, None).map_err(SettingsError::Load)
}

/// Load, falling back to defaults on any error
pub fn load_or_default() -> Settings {
    load().unwrap_or_else(|e| {
        warn!(error = %e, "Using default settings");
        Settings::default()
    })
}

pub fn store(settings: &Settings) -> Result<(), SettingsError> {
    confy::store(APP_NAME, None, settings).map_err(SettingsError::Store)
}

/// Where [`load`] and [`store`] read and write
pub fn config_path() -> Result<PathBuf, SettingsError> {
    confy::get_configuration_file_path(APP_NAME, None).map_err(SettingsError::Load)
}

pub fn load_from(path: &Path) -> Result<Settings, SettingsError> {
    confy::load_path(path).map_err(SettingsError::Load)
}

pub fn store_to(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    confy::store_path(path, settings).map_err(SettingsError::Store)
}

/// One minutes slider on the settings page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderSpec {
    pub setting_id: String,
    pub job_id: String,
    /// Section header, the job's display name
    pub header: String,
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
    pub default: u32,
    pub help: String,
}

/// Sliders in registry order
pub fn slider_specs(registry: &Registry) -> Vec<SliderSpec> {
    registry
        .iter()
        .map(|handler| SliderSpec {
            setting_id: format!("cooldown_{}", handler.job_id()),
            job_id: handler.job_id().to_string(),
            header: handler.display_name().to_string(),
            label: "Cooldown (minutes)",
            min: handler.min_minutes(),
            max: handler.max_minutes(),
            default: handler.default_minutes(),
            help: format_minutes_range(handler.min_minutes(), handler.max_minutes()),
        })
        .collect()
}
