//! Boundary with the host game engine and its FSM plugin.
//!
//! The host owns every object and variable; this crate only looks them up by
//! name and reads or writes them. Every lookup can miss (world not loaded,
//! different scene, renamed object), so the trait returns `Option` and the
//! helpers on [`FsmTarget`] turn a miss into a typed [`LookupError`].

mod memory;

pub use memory::{MemoryFsm, MemoryObject, MemoryWorld, ScenarioError};

use thiserror::Error;

/// Opaque handle to a host object, valid until the host world changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// Opaque handle to one FSM component on a host object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FsmId {
    pub object: ObjectId,
    pub slot: usize,
}

/// Host object graph and FSM variable store.
///
/// Handles are never cached by callers: each operation looks its target up
/// again so the answer always reflects the live world.
pub trait Host {
    /// Find an object by its full scene path (e.g. `JOBS/HouseWood1`)
    fn find_object(&self, path: &str) -> Option<ObjectId>;

    /// Find a direct child of an object by name
    fn find_child(&self, parent: ObjectId, name: &str) -> Option<ObjectId>;

    /// Find an FSM component on an object by its FSM name
    fn find_fsm(&self, object: ObjectId, fsm_name: &str) -> Option<FsmId>;

    /// First FSM component on an object, whatever its name
    fn first_fsm(&self, object: ObjectId) -> Option<FsmId>;

    /// Name of the FSM's active state
    fn active_state(&self, fsm: FsmId) -> Option<String>;

    fn float_var(&self, fsm: FsmId, name: &str) -> Option<f32>;

    /// Write an existing float variable. Returns false if it does not exist.
    fn set_float_var(&mut self, fsm: FsmId, name: &str, value: f32) -> bool;

    fn bool_var(&self, fsm: FsmId, name: &str) -> Option<bool>;
}

/// Why a host lookup came back empty
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("GameObject '{0}' not found")]
    ObjectNotFound(String),

    #[error("FSM '{fsm}' not found on '{path}'")]
    FsmNotFound { path: String, fsm: &'static str },

    #[error("FSM variable '{var}' not found on '{path}'")]
    VariableNotFound { path: String, var: &'static str },
}

/// A named FSM on an object at a fixed scene path.
#[derive(Debug, Clone)]
pub struct FsmTarget {
    path: String,
    fsm_name: &'static str,
}

impl FsmTarget {
    pub fn new(path: impl Into<String>, fsm_name: &'static str) -> Self {
        Self {
            path: path.into(),
            fsm_name,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn fsm_name(&self) -> &'static str {
        self.fsm_name
    }

    /// Resolve object path then FSM name
    pub fn locate(&self, host: &dyn Host) -> Result<FsmId, LookupError> {
        let object = host
            .find_object(&self.path)
            .ok_or_else(|| LookupError::ObjectNotFound(self.path.clone()))?;
        host.find_fsm(object, self.fsm_name)
            .ok_or_else(|| LookupError::FsmNotFound {
                path: self.path.clone(),
                fsm: self.fsm_name,
            })
    }

    pub fn float(&self, host: &dyn Host, fsm: FsmId, var: &'static str) -> Result<f32, LookupError> {
        host.float_var(fsm, var)
            .ok_or_else(|| self.missing_var(var))
    }

    pub fn set_float(
        &self,
        host: &mut dyn Host,
        fsm: FsmId,
        var: &'static str,
        value: f32,
    ) -> Result<(), LookupError> {
        if host.set_float_var(fsm, var, value) {
            Ok(())
        } else {
            Err(self.missing_var(var))
        }
    }

    pub fn flag(&self, host: &dyn Host, fsm: FsmId, var: &'static str) -> Result<bool, LookupError> {
        host.bool_var(fsm, var).ok_or_else(|| self.missing_var(var))
    }

    fn missing_var(&self, var: &'static str) -> LookupError {
        LookupError::VariableNotFound {
            path: self.path.clone(),
            var,
        }
    }
}
