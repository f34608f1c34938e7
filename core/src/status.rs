//! Status aggregation.
//!
//! Turns each handler's raw host state into a [`StatusRecord`], the single
//! feed used by the monitor window and the developer log. Records are
//! rebuilt on every query.

use job_cooldowns_types::{DisplayMode, Urgency};
use serde::Serialize;

use crate::host::Host;
use crate::jobs::{CooldownHandler, FIREWOOD_JOB_ID, UNAVAILABLE_SECS};
use crate::registry::Registry;

/// The job whose FSM state is translated for players in normal mode
pub const PRIMARY_JOB_ID: &str = FIREWOOD_JOB_ID;

/// Normalized view of one job at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusRecord {
    pub job_id: String,
    pub display_name: String,
    pub available: bool,
    /// >= 0, or [`UNAVAILABLE_SECS`] when unavailable
    pub remaining_seconds: f32,
    pub phase_label: Option<String>,
    pub reset_eligible: bool,
}

impl StatusRecord {
    fn unavailable(handler: &dyn CooldownHandler) -> Self {
        Self {
            job_id: handler.job_id().to_string(),
            display_name: handler.display_name().to_string(),
            available: false,
            remaining_seconds: UNAVAILABLE_SECS,
            phase_label: None,
            reset_eligible: false,
        }
    }

    /// Time-column severity, `None` for an unavailable job
    pub fn urgency(&self) -> Option<Urgency> {
        self.available.then(|| Urgency::classify(self.remaining_seconds))
    }
}

/// Build the record for one handler
pub fn status_of(handler: &dyn CooldownHandler, host: &dyn Host, mode: DisplayMode) -> StatusRecord {
    if !handler.is_available(host) {
        return StatusRecord::unavailable(handler);
    }

    let remaining_seconds = handler.remaining_seconds(host);
    let raw_state = handler.current_state(host);
    let is_primary = handler.job_id() == PRIMARY_JOB_ID;

    let phase_label = match mode {
        DisplayMode::Developer => raw_state.clone(),
        DisplayMode::Normal if is_primary => raw_state.as_deref().map(friendly_state_name),
        DisplayMode::Normal => None,
    };

    let mut reset_eligible = remaining_seconds > 0.0;
    if is_primary {
        // Only meaningful in the passive cooldown, not mid-call or mid-delivery
        reset_eligible = reset_eligible && raw_state.as_deref().is_some_and(is_random_wait);
    }

    StatusRecord {
        job_id: handler.job_id().to_string(),
        display_name: handler.display_name().to_string(),
        available: true,
        remaining_seconds,
        phase_label,
        reset_eligible,
    }
}

/// Records for the whole registry, in registry order
pub fn collect(registry: &Registry, host: &dyn Host, mode: DisplayMode) -> Vec<StatusRecord> {
    registry
        .iter()
        .map(|handler| status_of(handler, host, mode))
        .collect()
}

fn is_random_wait(state: &str) -> bool {
    let lower = state.to_lowercase();
    lower.contains("random") && lower.contains("wait")
}

/// Translate a raw FSM state name into a player-facing label.
///
/// Matching is case-insensitive and the first rule that matches wins.
///
/// # Examples
/// ```
/// use job_cooldowns_core::status::friendly_state_name;
/// assert_eq!(friendly_state_name("Random Wait"), "Cooldown");
/// assert_eq!(friendly_state_name("State 0"), "Idle");
/// assert_eq!(friendly_state_name("foobar"), "Foobar");
/// ```
pub fn friendly_state_name(state: &str) -> String {
    if state.is_empty() {
        return String::new();
    }

    let lower = state.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    let label = if has("state 0") || lower == "state0" {
        "Idle"
    } else if has("random") && has("wait") {
        "Cooldown"
    } else if lower == "call" || has("calling") {
        "Will call"
    } else if has("wait") && has("call") {
        "Waiting Call"
    } else if has("ring") {
        "Ringing..."
    } else if has("work") || has("job") || has("active") {
        "In Progress"
    } else if has("done") || has("complete") || has("finish") {
        "Completed"
    } else if has("available") || has("ready") {
        "Ready"
    } else if has("wait") {
        "Waiting"
    } else {
        return capitalize_first(state);
    };

    label.to_string()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryFsm, MemoryWorld};

    fn firewood_world(state: &str, cooldown: f32, wait: f32) -> MemoryWorld {
        let mut world = MemoryWorld::new();
        world.insert(
            "JOBS/HouseWood1",
            MemoryFsm::new("Logic")
                .state(state)
                .float("CoolDownTime", cooldown)
                .float("WaitTime", wait),
        );
        world
    }

    fn add_farm(world: &mut MemoryWorld, state: &str, wait: f32) {
        world.insert(
            "JOBS/Farm/Job",
            MemoryFsm::new("Data").state(state).float("WaitTime", wait),
        );
    }

    fn record<'a>(records: &'a [StatusRecord], job_id: &str) -> &'a StatusRecord {
        records.iter().find(|r| r.job_id == job_id).unwrap()
    }

    #[test]
    fn test_friendly_state_table() {
        assert_eq!(friendly_state_name("State 0"), "Idle");
        assert_eq!(friendly_state_name("state0"), "Idle");
        assert_eq!(friendly_state_name("Random Wait"), "Cooldown");
        assert_eq!(friendly_state_name("random wait 2"), "Cooldown");
        assert_eq!(friendly_state_name("Call"), "Will call");
        assert_eq!(friendly_state_name("Calling player"), "Will call");
        assert_eq!(friendly_state_name("Wait call"), "Waiting Call");
        assert_eq!(friendly_state_name("Ring"), "Ringing...");
        assert_eq!(friendly_state_name("Working"), "In Progress");
        assert_eq!(friendly_state_name("Start job"), "In Progress");
        assert_eq!(friendly_state_name("Active"), "In Progress");
        assert_eq!(friendly_state_name("Done"), "Completed");
        assert_eq!(friendly_state_name("Finished"), "Completed");
        assert_eq!(friendly_state_name("Available"), "Ready");
        assert_eq!(friendly_state_name("Waiting"), "Waiting");
        assert_eq!(friendly_state_name("Foobar"), "Foobar");
        assert_eq!(friendly_state_name("foobar"), "Foobar");
        assert_eq!(friendly_state_name(""), "");
    }

    #[test]
    fn test_friendly_state_priority() {
        // "random"+"wait" outranks "wait"+"call"
        assert_eq!(friendly_state_name("Random wait call"), "Cooldown");
        assert_eq!(friendly_state_name("Calling ring"), "Will call");
        // "ring" outranks "work"
        assert_eq!(friendly_state_name("Ring work"), "Ringing...");
    }

    #[test]
    fn test_unavailable_record() {
        let world = MemoryWorld::new();
        let records = collect(&Registry::standard(), &world, DisplayMode::Developer);
        assert_eq!(records.len(), 9);
        for r in &records {
            assert!(!r.available);
            assert_eq!(r.remaining_seconds, UNAVAILABLE_SECS);
            assert_eq!(r.phase_label, None);
            assert!(!r.reset_eligible);
            assert_eq!(r.urgency(), None);
        }
    }

    #[test]
    fn test_normal_mode_labels_primary_only() {
        let mut world = firewood_world("Random wait", 28_800.0, 800.0);
        add_farm(&mut world, "Wait", 120.0);
        let records = collect(&Registry::standard(), &world, DisplayMode::Normal);

        let firewood = record(&records, "firewood_delivery");
        assert_eq!(firewood.phase_label.as_deref(), Some("Cooldown"));
        assert_eq!(firewood.remaining_seconds, 28_000.0);
        assert_eq!(firewood.urgency(), Some(Urgency::LongWait));

        let farm = record(&records, "Farm");
        assert!(farm.available);
        assert_eq!(farm.phase_label, None);
        assert_eq!(farm.urgency(), Some(Urgency::Soon));
    }

    #[test]
    fn test_developer_mode_shows_raw_labels() {
        let mut world = firewood_world("Random wait", 28_800.0, 800.0);
        add_farm(&mut world, "Wait", 120.0);
        let records = collect(&Registry::standard(), &world, DisplayMode::Developer);

        assert_eq!(
            record(&records, "firewood_delivery").phase_label.as_deref(),
            Some("Random wait")
        );
        assert_eq!(record(&records, "Farm").phase_label.as_deref(), Some("Wait"));
    }

    #[test]
    fn test_primary_reset_only_during_random_wait() {
        let registry = Registry::standard();
        let firewood = registry.get(PRIMARY_JOB_ID).unwrap();

        let world = firewood_world("Random wait", 28_800.0, 800.0);
        assert!(status_of(firewood, &world, DisplayMode::Normal).reset_eligible);

        let world = firewood_world("Call", 28_800.0, 800.0);
        assert!(!status_of(firewood, &world, DisplayMode::Normal).reset_eligible);

        // Already elapsed
        let world = firewood_world("Random wait", 28_800.0, 28_800.0);
        assert!(!status_of(firewood, &world, DisplayMode::Normal).reset_eligible);
    }

    #[test]
    fn test_other_jobs_reset_when_time_remains() {
        let registry = Registry::standard();
        let farm = registry.get("Farm").unwrap();

        let mut world = MemoryWorld::new();
        add_farm(&mut world, "Anything", 10.0);
        assert!(status_of(farm, &world, DisplayMode::Normal).reset_eligible);

        add_farm(&mut world, "Anything", 0.0);
        let status = status_of(farm, &world, DisplayMode::Normal);
        assert!(!status.reset_eligible);
        assert_eq!(status.urgency(), Some(Urgency::Ready));
    }
}
