//! Sewage well jobs (HouseShit1-5).
//!
//! Five identical wells, each with its own `Level` FSM. `Wait` counts down as
//! the well fills; the well is only ready once it is empty *and* its owner has
//! not already called.

use tracing::{info, warn};

use super::{
    CooldownHandler, DownCounter, JobDescriptor, MAX_COOLDOWN_MINUTES, UNAVAILABLE_SECS, minutes_to_secs, queried,
};
use crate::host::{FsmId, FsmTarget, Host, LookupError};

/// Wells are numbered 1 through `WELL_COUNT`
pub const WELL_COUNT: u8 = 5;

const FSM_NAME: &str = "Level";
const CALLED_VAR: &str = "Called";
const DEFAULT_MINUTES: u32 = 50;

const COUNTER: DownCounter = DownCounter { progress: "Wait" };

#[derive(Debug)]
pub struct SewageJob {
    well: u8,
    descriptor: JobDescriptor,
    target: FsmTarget,
    current_minutes: u32,
}

impl SewageJob {
    pub fn new(well: u8) -> Self {
        debug_assert!((1..=WELL_COUNT).contains(&well));
        let descriptor = JobDescriptor::new(
            format!("Sewage{well}"),
            format!("Sewage Well {well}"),
            DEFAULT_MINUTES,
            1,
            MAX_COOLDOWN_MINUTES,
        );
        let path = format!(
            "JOBS/HouseShit{well}/WasteWell_2000litre/Shit/Level{well}/ShitLevelTrigger"
        );
        Self {
            well,
            current_minutes: descriptor.default_minutes,
            descriptor,
            target: FsmTarget::new(path, FSM_NAME),
        }
    }

    /// One handler per well, in well order
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=WELL_COUNT).map(Self::new)
    }

    pub fn well(&self) -> u8 {
        self.well
    }

    fn timer_fsm(&self, host: &dyn Host) -> Result<FsmId, LookupError> {
        let fsm = self.target.locate(host)?;
        self.target.float(host, fsm, COUNTER.progress)?;
        Ok(fsm)
    }

    fn try_ready(&self, host: &dyn Host) -> Result<bool, LookupError> {
        let fsm = self.timer_fsm(host)?;
        let empty = COUNTER.is_elapsed(&self.target, host, fsm)?;
        let called = self.target.flag(host, fsm, CALLED_VAR)?;
        Ok(empty && !called)
    }

    fn try_apply(&self, host: &mut dyn Host) -> Result<(), LookupError> {
        let fsm = self.timer_fsm(host)?;
        let secs = minutes_to_secs(self.current_minutes);
        COUNTER.cap(&self.target, host, fsm, secs)?;
        info!(
            job_id = %self.descriptor.job_id,
            minutes = self.current_minutes,
            secs,
            "Sewage Well {} cooldown set",
            self.well
        );
        Ok(())
    }

    fn try_reset(&self, host: &mut dyn Host) -> Result<(), LookupError> {
        let fsm = self.timer_fsm(host)?;
        COUNTER.complete(&self.target, host, fsm)?;
        info!(job_id = %self.descriptor.job_id, "Sewage Well {} cooldown reset", self.well);
        Ok(())
    }
}

impl CooldownHandler for SewageJob {
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
        queried(&self.descriptor.job_id, self.timer_fsm(host)).is_some()
    }

    /// A missing `Called` flag counts as "already called"
    fn is_ready(&self, host: &dyn Host) -> bool {
        self.try_ready(host).unwrap_or(false)
    }

    fn apply_cooldown(&self, host: &mut dyn Host) {
        if let Err(e) = self.try_apply(host) {
            warn!(job_id = %self.descriptor.job_id, error = %e, "Cooldown not applied");
        }
    }

    fn remaining_seconds(&self, host: &dyn Host) -> f32 {
        let remaining = self
            .timer_fsm(host)
            .and_then(|fsm| COUNTER.remaining(&self.target, host, fsm));
        queried(&self.descriptor.job_id, remaining).unwrap_or(UNAVAILABLE_SECS)
    }

    fn reset_cooldown(&self, host: &mut dyn Host) {
        if let Err(e) = self.try_reset(host) {
            warn!(job_id = %self.descriptor.job_id, error = %e, "Cannot reset cooldown");
        }
    }

    fn current_state(&self, host: &dyn Host) -> Option<String> {
        queried(&self.descriptor.job_id, self.timer_fsm(host)).and_then(|fsm| host.active_state(fsm))
    }
}
