//! Timer direction strategies.

use crate::host::{FsmId, FsmTarget, Host, LookupError};

/// How far below a shrunk threshold an up-counter's progress is placed, so the
/// job does not fire the instant the new cooldown is applied.
pub const SHRINK_MARGIN_SECS: f32 = 60.0;

/// Progress counts up from zero until it reaches a threshold variable.
#[derive(Debug, Clone, Copy)]
pub struct UpCounter {
    pub threshold: &'static str,
    pub progress: &'static str,
}

impl UpCounter {
    pub fn remaining(&self, target: &FsmTarget, host: &dyn Host, fsm: FsmId) -> Result<f32, LookupError> {
        let threshold = target.float(host, fsm, self.threshold)?;
        let progress = target.float(host, fsm, self.progress)?;
        Ok((threshold - progress).max(0.0))
    }

    /// Set a new threshold. If progress has already reached it, pull progress
    /// back to `threshold - SHRINK_MARGIN_SECS`.
    pub fn retarget(
        &self,
        target: &FsmTarget,
        host: &mut dyn Host,
        fsm: FsmId,
        threshold: f32,
    ) -> Result<(), LookupError> {
        let progress = target.float(host, fsm, self.progress)?;
        if threshold <= progress {
            target.set_float(host, fsm, self.progress, threshold - SHRINK_MARGIN_SECS)?;
        }
        target.set_float(host, fsm, self.threshold, threshold)
    }

    /// Progress = threshold
    pub fn complete(&self, target: &FsmTarget, host: &mut dyn Host, fsm: FsmId) -> Result<(), LookupError> {
        let threshold = target.float(host, fsm, self.threshold)?;
        target.set_float(host, fsm, self.progress, threshold)
    }
}

/// Progress counts down to zero; the value itself is the time left.
#[derive(Debug, Clone, Copy)]
pub struct DownCounter {
    pub progress: &'static str,
}

impl DownCounter {
    pub fn remaining(&self, target: &FsmTarget, host: &dyn Host, fsm: FsmId) -> Result<f32, LookupError> {
        Ok(target.float(host, fsm, self.progress)?.max(0.0))
    }

    pub fn is_elapsed(&self, target: &FsmTarget, host: &dyn Host, fsm: FsmId) -> Result<bool, LookupError> {
        Ok(target.float(host, fsm, self.progress)? <= 0.0)
    }

    /// Lower progress to `limit` if it is above it. Never raises a running
    /// countdown. Returns whether progress changed.
    pub fn cap(
        &self,
        target: &FsmTarget,
        host: &mut dyn Host,
        fsm: FsmId,
        limit: f32,
    ) -> Result<bool, LookupError> {
        let progress = target.float(host, fsm, self.progress)?;
        if progress > limit {
            target.set_float(host, fsm, self.progress, limit)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Progress = 0
    pub fn complete(&self, target: &FsmTarget, host: &mut dyn Host, fsm: FsmId) -> Result<(), LookupError> {
        target.set_float(host, fsm, self.progress, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryFsm, MemoryWorld};

    const PATH: &str = "JOBS/Test";

    fn setup(floats: &[(&str, f32)]) -> (MemoryWorld, FsmTarget, FsmId) {
        let mut fsm = MemoryFsm::new("Logic");
        for (name, value) in floats {
            fsm = fsm.float(*name, *value);
        }
        let mut world = MemoryWorld::new();
        world.insert(PATH, fsm);
        let target = FsmTarget::new(PATH, "Logic");
        let id = target.locate(&world).unwrap();
        (world, target, id)
    }

    const UP: UpCounter = UpCounter {
        threshold: "CoolDownTime",
        progress: "WaitTime",
    };
    const DOWN: DownCounter = DownCounter { progress: "WaitTime" };

    #[test]
    fn test_up_remaining_is_threshold_minus_progress() {
        let (world, target, fsm) = setup(&[("CoolDownTime", 600.0), ("WaitTime", 150.0)]);
        assert_eq!(UP.remaining(&target, &world, fsm), Ok(450.0));
    }

    #[test]
    fn test_up_remaining_floors_at_zero() {
        let (world, target, fsm) = setup(&[("CoolDownTime", 600.0), ("WaitTime", 700.0)]);
        assert_eq!(UP.remaining(&target, &world, fsm), Ok(0.0));
    }

    #[test]
    fn test_up_retarget_keeps_progress_below_new_threshold() {
        let (mut world, target, fsm) = setup(&[("CoolDownTime", 30_000.0), ("WaitTime", 100.0)]);
        UP.retarget(&target, &mut world, fsm, 600.0).unwrap();
        assert_eq!(world.float(PATH, "Logic", "CoolDownTime"), Some(600.0));
        assert_eq!(world.float(PATH, "Logic", "WaitTime"), Some(100.0));
    }

    #[test]
    fn test_up_retarget_pulls_back_exhausted_progress() {
        let (mut world, target, fsm) = setup(&[("CoolDownTime", 30_000.0), ("WaitTime", 600.0)]);
        UP.retarget(&target, &mut world, fsm, 600.0).unwrap();
        assert_eq!(world.float(PATH, "Logic", "WaitTime"), Some(540.0));
        assert_eq!(UP.remaining(&target, &world, fsm), Ok(SHRINK_MARGIN_SECS));
    }

    #[test]
    fn test_up_complete() {
        let (mut world, target, fsm) = setup(&[("CoolDownTime", 600.0), ("WaitTime", 10.0)]);
        UP.complete(&target, &mut world, fsm).unwrap();
        assert_eq!(UP.remaining(&target, &world, fsm), Ok(0.0));
    }

    #[test]
    fn test_up_missing_progress_variable() {
        let (mut world, target, fsm) = setup(&[("CoolDownTime", 600.0)]);
        assert!(UP.remaining(&target, &world, fsm).is_err());
        assert!(UP.retarget(&target, &mut world, fsm, 60.0).is_err());
        assert_eq!(world.float(PATH, "Logic", "CoolDownTime"), Some(600.0));
    }

    #[test]
    fn test_down_cap_never_raises() {
        let (mut world, target, fsm) = setup(&[("WaitTime", 120.0)]);
        assert_eq!(DOWN.cap(&target, &mut world, fsm, 600.0), Ok(false));
        assert_eq!(world.float(PATH, "Logic", "WaitTime"), Some(120.0));

        assert_eq!(DOWN.cap(&target, &mut world, fsm, 60.0), Ok(true));
        assert_eq!(world.float(PATH, "Logic", "WaitTime"), Some(60.0));
    }

    #[test]
    fn test_down_remaining_and_complete() {
        let (mut world, target, fsm) = setup(&[("WaitTime", -3.0)]);
        assert_eq!(DOWN.remaining(&target, &world, fsm), Ok(0.0));
        assert_eq!(DOWN.is_elapsed(&target, &world, fsm), Ok(true));

        world.fsm_mut(PATH, "Logic").unwrap().floats.insert("WaitTime".into(), 90.0);
        assert_eq!(DOWN.is_elapsed(&target, &world, fsm), Ok(false));
        DOWN.complete(&target, &mut world, fsm).unwrap();
        assert_eq!(DOWN.remaining(&target, &world, fsm), Ok(0.0));
    }
}
