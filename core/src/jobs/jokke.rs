//! Jokke's moving job.

use tracing::{info, warn};

use super::{
    CooldownHandler, DownCounter, JobDescriptor, MAX_COOLDOWN_MINUTES, UNAVAILABLE_SECS, minutes_to_secs, queried,
};
use crate::host::{FsmId, FsmTarget, Host, LookupError};

pub const JOB_ID: &str = "JokkeMoving";
const OBJECT_PATH: &str = "JOBS/HouseDrunk/Moving";
const FSM_NAME: &str = "Data";

// Game default is 10000s, rounded to whole minutes
const DEFAULT_MINUTES: u32 = 167;

const COUNTER: DownCounter = DownCounter {
    progress: "WaitTime",
};

#[derive(Debug)]
pub struct JokkeMovingJob {
    descriptor: JobDescriptor,
    target: FsmTarget,
    current_minutes: u32,
}

impl Default for JokkeMovingJob {
    fn default() -> Self {
        Self::new()
    }
}

impl JokkeMovingJob {
    pub fn new() -> Self {
        let descriptor =
            JobDescriptor::new(JOB_ID, "Jokke Moving", DEFAULT_MINUTES, 1, MAX_COOLDOWN_MINUTES);
        Self {
            current_minutes: descriptor.default_minutes,
            descriptor,
            target: FsmTarget::new(OBJECT_PATH, FSM_NAME),
        }
    }

    fn timer_fsm(&self, host: &dyn Host) -> Result<FsmId, LookupError> {
        let fsm = self.target.locate(host)?;
        self.target.float(host, fsm, COUNTER.progress)?;
        Ok(fsm)
    }
}

impl CooldownHandler for JokkeMovingJob {
    fn descriptor(&self) -> &JobDescriptor {
        &self.descriptor
    }

    fn current_minutes(&self) -> u32 {
        self.current_minutes
    }

    fn set_current_minutes(&mut self, minutes: u32) {
        self.current_minutes = minutes;
    }

    fn is_available(&self, host: &dyn Host) -> bool {
        queried(JOB_ID, self.timer_fsm(host)).is_some()
    }

    fn is_ready(&self, host: &dyn Host) -> bool {
        self.timer_fsm(host)
            .and_then(|fsm| COUNTER.is_elapsed(&self.target, host, fsm))
            .unwrap_or(false)
    }

    fn apply_cooldown(&self, host: &mut dyn Host) {
        let secs = minutes_to_secs(self.current_minutes);
        let applied = self
            .timer_fsm(host)
            .and_then(|fsm| COUNTER.cap(&self.target, host, fsm, secs));
        match applied {
            Ok(_) => info!(
                job_id = JOB_ID,
                minutes = self.current_minutes,
                secs,
                "Jokke Moving cooldown set"
            ),
            Err(e) => warn!(job_id = JOB_ID, error = %e, "Cooldown not applied"),
        }
    }

    fn remaining_seconds(&self, host: &dyn Host) -> f32 {
        let remaining = self
            .timer_fsm(host)
            .and_then(|fsm| COUNTER.remaining(&self.target, host, fsm));
        queried(JOB_ID, remaining).unwrap_or(UNAVAILABLE_SECS)
    }

    fn reset_cooldown(&self, host: &mut dyn Host) {
        let reset = self
            .timer_fsm(host)
            .and_then(|fsm| COUNTER.complete(&self.target, host, fsm));
        match reset {
            Ok(()) => info!(job_id = JOB_ID, "Jokke Moving cooldown reset"),
            Err(e) => warn!(job_id = JOB_ID, error = %e, "Cannot reset cooldown"),
        }
    }

    fn current_state(&self, host: &dyn Host) -> Option<String> {
        queried(JOB_ID, self.timer_fsm(host)).and_then(|fsm| host.active_state(fsm))
    }
}
