//! FSM state transition tracking for the developer log.

use std::collections::HashMap;

use crate::devlog::DevLog;
use crate::host::Host;
use crate::registry::Registry;

/// Remembers the last raw state seen per job
#[derive(Debug, Default)]
pub struct StateWatcher {
    last: HashMap<String, Option<String>>,
}

impl StateWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare every job's state with the previous poll and log transitions.
    ///
    /// Does nothing while the developer log is off, and forgets what it saw so
    /// that re-enabling starts from a fresh baseline. The first observation of
    /// a job is recorded without logging. Returns the number of transitions.
    pub fn poll(&mut self, registry: &Registry, host: &dyn Host, devlog: &DevLog) -> usize {
        if !devlog.is_enabled() {
            self.last.clear();
            return 0;
        }

        let mut changes = 0;
        for handler in registry.iter() {
            let state = handler.current_state(host);
            match self.last.get_mut(handler.job_id()) {
                Some(previous) if *previous != state => {
                    devlog.log_state_change(
                        handler.display_name(),
                        previous.as_deref().unwrap_or("null"),
                        state.as_deref().unwrap_or("null"),
                    );
                    *previous = state;
                    changes += 1;
                }
                Some(_) => {}
                None => {
                    self.last.insert(handler.job_id().to_string(), state);
                }
            }
        }
        changes
    }

    pub fn clear(&mut self) {
        self.last.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryFsm, MemoryWorld};

    const FARM: &str = "JOBS/Farm/Job";

    fn farm(state: &str) -> MemoryFsm {
        MemoryFsm::new("Data").state(state).float("WaitTime", 10.0)
    }

    #[test]
    fn test_logs_transitions_only() {
        let dir = tempfile::tempdir().unwrap();
        let devlog = DevLog::new(dir.path());
        devlog.set_enabled(true);

        let registry = Registry::standard();
        let mut world = MemoryWorld::new();
        world.insert(FARM, farm("Wait"));

        let mut watcher = StateWatcher::new();
        assert_eq!(watcher.poll(&registry, &world, &devlog), 0);
        assert_eq!(watcher.poll(&registry, &world, &devlog), 0);

        world.insert(FARM, farm("Call"));
        assert_eq!(watcher.poll(&registry, &world, &devlog), 1);

        world.remove(FARM);
        assert_eq!(watcher.poll(&registry, &world, &devlog), 1);

        devlog.flush();
        let contents = std::fs::read_to_string(devlog.path()).unwrap();
        assert!(contents.contains("STATE CHANGE: Farm (Haybale/Combine) - 'Wait' -> 'Call'"));
        assert!(contents.contains("STATE CHANGE: Farm (Haybale/Combine) - 'Call' -> 'null'"));
    }

    #[test]
    fn test_inactive_without_dev_log() {
        let dir = tempfile::tempdir().unwrap();
        let devlog = DevLog::new(dir.path());

        let registry = Registry::standard();
        let mut world = MemoryWorld::new();
        world.insert(FARM, farm("Wait"));

        let mut watcher = StateWatcher::new();
        watcher.poll(&registry, &world, &devlog);
        world.insert(FARM, farm("Call"));
        assert_eq!(watcher.poll(&registry, &world, &devlog), 0);

        // Baseline taken when the log comes on, no stale transition
        devlog.set_enabled(true);
        assert_eq!(watcher.poll(&registry, &world, &devlog), 0);
    }
}
