//! Pushes configured durations into the host.
//!
//! Runs once when the world finishes loading, whenever settings are loaded
//! from storage, and for a single job when its slider changes in game.

use job_cooldowns_types::Settings;
use job_cooldowns_types::formatting::format_configured;
use tracing::{debug, info};

use crate::host::Host;
use crate::registry::Registry;

/// Which jobs an [`apply_all`] pass touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: Vec<String>,
    /// Not loaded right now; applied on the next load
    pub skipped: Vec<String>,
}

/// Outcome of re-applying one job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Job not in the world; the value is kept for the next load
    Deferred,
    UnknownJob,
}

/// Apply every available handler, in registry order
pub fn apply_all(registry: &Registry, host: &mut dyn Host) -> ApplyReport {
    let mut report = ApplyReport::default();

    for handler in registry.iter() {
        if handler.is_available(host) {
            handler.apply_cooldown(host);
            report.applied.push(handler.job_id().to_string());
        } else {
            debug!(job_id = handler.job_id(), "Not available, cooldown not applied");
            report.skipped.push(handler.job_id().to_string());
        }
    }

    report
}

/// Apply a single job after its configured duration changed
pub fn apply_one(registry: &Registry, job_id: &str, host: &mut dyn Host) -> ApplyOutcome {
    let Some(handler) = registry.get(job_id) else {
        return ApplyOutcome::UnknownJob;
    };

    if handler.is_available(host) {
        handler.apply_cooldown(host);
        ApplyOutcome::Applied
    } else {
        info!(
            job_id,
            "{} will be set to {} when you start/load the game",
            handler.display_name(),
            format_configured(handler.current_minutes())
        );
        ApplyOutcome::Deferred
    }
}

/// Copy stored slider values into the handlers.
///
/// Stored values are clamped to each job's bounds; jobs with no stored value
/// fall back to their default. Nothing is pushed to the host here.
pub fn apply_settings(registry: &mut Registry, settings: &Settings) {
    for handler in registry.iter_mut() {
        let minutes = match settings.minutes_for(handler.job_id()) {
            Some(stored) => handler.descriptor().clamp(stored),
            None => handler.default_minutes(),
        };
        handler.set_current_minutes(minutes);
    }
}
