//! Ordered collection of job handlers.
//!
//! Built once when the settings page is constructed and then borrowed by the
//! aggregator, the orchestrator and the monitor. Order is display order only.

use tracing::warn;

use crate::host::Host;
use crate::jobs::{CooldownHandler, FarmJob, FirewoodJob, JokkeMovingJob, MummolaJob, SewageJob};

#[derive(Debug, Default)]
pub struct Registry {
    handlers: Vec<Box<dyn CooldownHandler>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every job the mod ships with, in settings-page order
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(FirewoodJob::new());
        for well in SewageJob::all() {
            registry.register(well);
        }
        registry.register(MummolaJob::new());
        registry.register(FarmJob::new());
        registry.register(JokkeMovingJob::new());
        registry
    }

    /// Append a handler. A handler whose job ID is already registered is
    /// dropped and `false` returned.
    pub fn register(&mut self, handler: impl CooldownHandler + 'static) -> bool {
        if self.get(handler.job_id()).is_some() {
            warn!(job_id = handler.job_id(), "Duplicate job ID, handler not registered");
            return false;
        }
        self.handlers.push(Box::new(handler));
        true
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn CooldownHandler + 'static)> {
        self.handlers.iter().map(|h| h.as_ref())
    }

    pub fn get(&self, job_id: &str) -> Option<&(dyn CooldownHandler + 'static)> {
        self.iter().find(|h| h.job_id() == job_id)
    }

    pub fn get_mut(&mut self, job_id: &str) -> Option<&mut (dyn CooldownHandler + 'static)> {
        self.handlers
            .iter_mut()
            .find(|h| h.job_id() == job_id)
            .map(|h| h.as_mut())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn CooldownHandler + 'static)> {
        self.handlers.iter_mut().map(|h| h.as_mut())
    }

    /// Forward a reset command to one job. Returns false for an unknown ID.
    pub fn reset(&self, job_id: &str, host: &mut dyn Host) -> bool {
        match self.get(job_id) {
            Some(handler) => {
                handler.reset_cooldown(host);
                true
            }
            None => {
                warn!(job_id, "Reset requested for unknown job");
                false
            }
        }
    }
}
