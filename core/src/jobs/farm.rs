//! Farm jobs (haybale and combine).
//!
//! Both jobs share one running `WaitTime`, but the game restarts it from a
//! separate per-job default (`WaitHaybale` / `WaitCombine`) after each job.

use tracing::{info, warn};

use super::{
    CooldownHandler, DownCounter, JobDescriptor, MAX_COOLDOWN_MINUTES, UNAVAILABLE_SECS, minutes_to_secs, queried,
};
use crate::host::{FsmId, FsmTarget, Host, LookupError};

pub const JOB_ID: &str = "Farm";
const OBJECT_PATH: &str = "JOBS/Farm/Job";
const FSM_NAME: &str = "Data";

/// Per-job restart values, written whenever present
const SUB_THRESHOLD_VARS: [&str; 2] = ["WaitHaybale", "WaitCombine"];

const COUNTER: DownCounter = DownCounter {
    progress: "WaitTime",
};

#[derive(Debug)]
pub struct FarmJob {
    descriptor: JobDescriptor,
    target: FsmTarget,
    current_minutes: u32,
}

impl Default for FarmJob {
    fn default() -> Self {
        Self::new()
    }
}

impl FarmJob {
    pub fn new() -> Self {
        let descriptor =
            JobDescriptor::new(JOB_ID, "Farm (Haybale/Combine)", 100, 1, MAX_COOLDOWN_MINUTES);
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

    fn try_apply(&self, host: &mut dyn Host) -> Result<(), LookupError> {
        let fsm = self.timer_fsm(host)?;
        let secs = minutes_to_secs(self.current_minutes);
        COUNTER.cap(&self.target, host, fsm, secs)?;

        for var in SUB_THRESHOLD_VARS {
            if let Err(e) = self.target.set_float(host, fsm, var, secs) {
                warn!(job_id = JOB_ID, error = %e, "Farm sub-job cooldown not set");
            }
        }

        info!(job_id = JOB_ID, minutes = self.current_minutes, secs, "Farm job cooldown set");
        Ok(())
    }

    fn try_reset(&self, host: &mut dyn Host) -> Result<(), LookupError> {
        let fsm = self.timer_fsm(host)?;
        COUNTER.complete(&self.target, host, fsm)?;
        info!(job_id = JOB_ID, "Farm job cooldown reset");
        Ok(())
    }
}

impl CooldownHandler for FarmJob {
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
        if let Err(e) = self.try_apply(host) {
            warn!(job_id = JOB_ID, error = %e, "Cooldown not applied");
        }
    }

    fn remaining_seconds(&self, host: &dyn Host) -> f32 {
        let remaining = self
            .timer_fsm(host)
            .and_then(|fsm| COUNTER.remaining(&self.target, host, fsm));
        queried(JOB_ID, remaining).unwrap_or(UNAVAILABLE_SECS)
    }

    fn reset_cooldown(&self, host: &mut dyn Host) {
        if let Err(e) = self.try_reset(host) {
            warn!(job_id = JOB_ID, error = %e, "Cannot reset cooldown");
        }
    }

    fn current_state(&self, host: &dyn Host) -> Option<String> {
        queried(JOB_ID, self.timer_fsm(host)).and_then(|fsm| host.active_state(fsm))
    }
}
