//! Firewood delivery job (Livaloinen).
//!
//! The only job whose timer counts up: `WaitTime` climbs from 0 to
//! `CoolDownTime`, after which the job phones the player. The game ships with
//! an 8 hour cooldown.

use tracing::{info, warn};

use super::{
    CooldownHandler, JobDescriptor, MAX_COOLDOWN_MINUTES, UNAVAILABLE_SECS, UpCounter, minutes_to_secs, queried,
};
use crate::host::{FsmId, FsmTarget, Host, LookupError};

pub const JOB_ID: &str = "firewood_delivery";
const OBJECT_PATH: &str = "JOBS/HouseWood1";
const FSM_NAME: &str = "Logic";

const COUNTER: UpCounter = UpCounter {
    threshold: "CoolDownTime",
    progress: "WaitTime",
};

#[derive(Debug)]
pub struct FirewoodJob {
    descriptor: JobDescriptor,
    target: FsmTarget,
    current_minutes: u32,
}

impl Default for FirewoodJob {
    fn default() -> Self {
        Self::new()
    }
}

impl FirewoodJob {
    pub fn new() -> Self {
        let descriptor = JobDescriptor::new(
            JOB_ID,
            "Firewood Delivery (Livaloinen)",
            MAX_COOLDOWN_MINUTES,
            1,
            MAX_COOLDOWN_MINUTES,
        );
        Self {
            current_minutes: descriptor.default_minutes,
            descriptor,
            target: FsmTarget::new(OBJECT_PATH, FSM_NAME),
        }
    }

    /// Locate the FSM and check both timer variables are declared
    fn timer_fsm(&self, host: &dyn Host) -> Result<FsmId, LookupError> {
        let fsm = self.target.locate(host)?;
        self.target.float(host, fsm, COUNTER.threshold)?;
        self.target.float(host, fsm, COUNTER.progress)?;
        Ok(fsm)
    }

    fn try_apply(&self, host: &mut dyn Host) -> Result<(), LookupError> {
        let fsm = self.timer_fsm(host)?;
        let secs = minutes_to_secs(self.current_minutes);
        COUNTER.retarget(&self.target, host, fsm, secs)?;
        info!(
            job_id = JOB_ID,
            minutes = self.current_minutes,
            secs,
            "{} cooldown set",
            self.descriptor.display_name
        );
        Ok(())
    }

    fn try_reset(&self, host: &mut dyn Host) -> Result<(), LookupError> {
        let fsm = self.timer_fsm(host)?;
        let before = self.target.float(host, fsm, COUNTER.progress)?;
        COUNTER.complete(&self.target, host, fsm)?;
        let after = self.target.float(host, fsm, COUNTER.progress)?;
        let state = host.active_state(fsm).unwrap_or_default();
        info!(
            job_id = JOB_ID,
            wait_before = before,
            wait_after = after,
            state = %state,
            "{} cooldown reset, job triggers on the game's next check",
            self.descriptor.display_name
        );
        Ok(())
    }
}

impl CooldownHandler for FirewoodJob {
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
            .and_then(|fsm| COUNTER.remaining(&self.target, host, fsm))
            .is_ok_and(|remaining| remaining <= 0.0)
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
            warn!(job_id = JOB_ID, error = %e, "Cannot reset cooldown. Are you in the game?");
        }
    }

    fn current_state(&self, host: &dyn Host) -> Option<String> {
        queried(JOB_ID, self.timer_fsm(host)).and_then(|fsm| host.active_state(fsm))
    }
}
