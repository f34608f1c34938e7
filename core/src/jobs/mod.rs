//! Job cooldown handlers.
//!
//! Every job the mod manages is a [`CooldownHandler`]. The variants differ in
//! where their FSM lives, which variables it exposes and, most importantly,
//! in which direction its timer runs:
//!
//! ```text
//!   Firewood        WaitTime  0 ──────────────▶ CoolDownTime   (counts up)
//!   Sewage, Mummola,
//!   Farm, Jokke     Wait(Time) ────────────────▶ 0             (counts down)
//! ```
//!
//! The direction is carried by the [`UpCounter`] / [`DownCounter`] each
//! variant owns, never by a flag on a shared base.

mod countdown;
mod farm;
mod firewood;
mod jokke;
mod mummola;
mod sewage;


pub use countdown::{DownCounter, SHRINK_MARGIN_SECS, UpCounter};
pub use farm::FarmJob;
pub use firewood::{FirewoodJob, JOB_ID as FIREWOOD_JOB_ID};
pub use jokke::JokkeMovingJob;
pub use mummola::MummolaJob;
pub use sewage::SewageJob;

use std::fmt;

use tracing::debug;

use crate::host::{Host, LookupError};

/// Returned by [`CooldownHandler::remaining_seconds`] when the job cannot be
/// queried. Distinct from every real remaining time, which is always >= 0.
pub const UNAVAILABLE_SECS: f32 = -1.0;

/// Default upper bound for every job slider (8 real-time hours)
pub const MAX_COOLDOWN_MINUTES: u32 = 480;

/// Static identity and slider bounds of a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    /// Stable key, unique across the registry
    pub job_id: String,
    /// Human-readable label
    pub display_name: String,
    pub default_minutes: u32,
    pub min_minutes: u32,
    pub max_minutes: u32,
}

impl JobDescriptor {
    pub fn new(
        job_id: impl Into<String>,
        display_name: impl Into<String>,
        default_minutes: u32,
        min_minutes: u32,
        max_minutes: u32,
    ) -> Self {
        debug_assert!(min_minutes <= default_minutes && default_minutes <= max_minutes);
        Self {
            job_id: job_id.into(),
            display_name: display_name.into(),
            default_minutes,
            min_minutes,
            max_minutes,
        }
    }

    /// Clamp a slider value into this job's bounds
    pub fn clamp(&self, minutes: u32) -> u32 {
        minutes.clamp(self.min_minutes, self.max_minutes)
    }
}

/// Configured minutes converted to host seconds
pub(crate) fn minutes_to_secs(minutes: u32) -> f32 {
    minutes as f32 * 60.0
}

/// Result of a per-frame query. A miss is only worth a debug line: these run
/// every frame while the game is on the menu.
pub(crate) fn queried<T>(job_id: &str, result: Result<T, LookupError>) -> Option<T> {
    result
        .map_err(|e| debug!(job_id, error = %e, "Job query missed"))
        .ok()
}

/// Capability set shared by every job.
///
/// Queries take `&dyn Host` and look everything up again on each call. None of
/// the operations fail: a missing object, FSM or variable degrades to the
/// documented neutral value.
pub trait CooldownHandler: fmt::Debug {
    fn descriptor(&self) -> &JobDescriptor;

    fn job_id(&self) -> &str {
        &self.descriptor().job_id
    }

    fn display_name(&self) -> &str {
        &self.descriptor().display_name
    }

    fn default_minutes(&self) -> u32 {
        self.descriptor().default_minutes
    }

    fn min_minutes(&self) -> u32 {
        self.descriptor().min_minutes
    }

    fn max_minutes(&self) -> u32 {
        self.descriptor().max_minutes
    }

    /// Configured duration. Not bounds-checked here.
    fn current_minutes(&self) -> u32;

    /// Takes effect on the next [`apply_cooldown`](Self::apply_cooldown)
    fn set_current_minutes(&mut self, minutes: u32);

    /// The job's object, FSM and required variables all exist right now
    fn is_available(&self, host: &dyn Host) -> bool;

    /// The job's own "ready to be offered" predicate
    fn is_ready(&self, host: &dyn Host) -> bool;

    /// Push the configured duration into the host. No-op when unavailable.
    fn apply_cooldown(&self, host: &mut dyn Host);

    /// Seconds left, clamped to >= 0, or [`UNAVAILABLE_SECS`]
    fn remaining_seconds(&self, host: &dyn Host) -> f32;

    /// Complete the countdown now. Idempotent.
    fn reset_cooldown(&self, host: &mut dyn Host);

    /// Raw FSM active state name
    fn current_state(&self, host: &dyn Host) -> Option<String>;
}
