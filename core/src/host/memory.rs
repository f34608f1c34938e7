//! In-memory host world.
//!
//! Used by the tests and the simulator in place of a live game. A world can be
//! built in code or loaded from a TOML scenario:
//!
//! ```toml
//! [[object]]
//! path = "JOBS/HouseWood1"
//!
//! [[object.fsm]]
//! name = "Logic"
//! state = "Random wait"
//! floats = { CoolDownTime = 28800.0, WaitTime = 1200.0 }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{FsmId, Host, ObjectId};

/// One FSM component with its variable store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryFsm {
    pub name: String,

    /// Active state name
    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub floats: BTreeMap<String, f32>,

    #[serde(default)]
    pub bools: BTreeMap<String, bool>,
}

impl MemoryFsm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn float(mut self, name: impl Into<String>, value: f32) -> Self {
        self.floats.insert(name.into(), value);
        self
    }

    pub fn flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.bools.insert(name.into(), value);
        self
    }
}

/// A scene object, addressed by its full path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryObject {
    pub path: String,

    #[serde(default, rename = "fsm")]
    pub fsms: Vec<MemoryFsm>,
}

/// Object graph held in memory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryWorld {
    #[serde(default, rename = "object")]
    objects: Vec<MemoryObject>,
}

/// Errors that can occur while loading a scenario file
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load a scenario file
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(path).map_err(|e| ScenarioError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&contents).map_err(|e| ScenarioError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Add an object with no FSMs, or return the existing one
    pub fn insert_object(&mut self, path: &str) -> ObjectId {
        if let Some(idx) = self.index_of(path) {
            return ObjectId(idx);
        }
        self.objects.push(MemoryObject {
            path: path.to_string(),
            fsms: Vec::new(),
        });
        ObjectId(self.objects.len() - 1)
    }

    /// Attach an FSM to the object at `path`, creating the object if needed.
    /// An FSM with the same name is replaced.
    pub fn insert(&mut self, path: &str, fsm: MemoryFsm) {
        let ObjectId(idx) = self.insert_object(path);
        let fsms = &mut self.objects[idx].fsms;
        match fsms.iter_mut().find(|f| f.name == fsm.name) {
            Some(existing) => *existing = fsm,
            None => fsms.push(fsm),
        }
    }

    /// Remove an object (scene unload). Returns whether it existed.
    pub fn remove(&mut self, path: &str) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.path != path);
        self.objects.len() != before
    }

    /// Drop every object, as when returning to the main menu
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[MemoryObject] {
        &self.objects
    }

    pub fn fsm(&self, path: &str, fsm_name: &str) -> Option<&MemoryFsm> {
        self.objects
            .iter()
            .find(|o| o.path == path)?
            .fsms
            .iter()
            .find(|f| f.name == fsm_name)
    }

    pub fn fsm_mut(&mut self, path: &str, fsm_name: &str) -> Option<&mut MemoryFsm> {
        self.objects
            .iter_mut()
            .find(|o| o.path == path)?
            .fsms
            .iter_mut()
            .find(|f| f.name == fsm_name)
    }

    /// Read a float variable by path, for assertions and printing
    pub fn float(&self, path: &str, fsm_name: &str, var: &str) -> Option<f32> {
        self.fsm(path, fsm_name)?.floats.get(var).copied()
    }

    fn index_of(&self, path: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.path == path)
    }

    fn fsm_at(&self, id: FsmId) -> Option<&MemoryFsm> {
        self.objects.get(id.object.0)?.fsms.get(id.slot)
    }

    fn fsm_at_mut(&mut self, id: FsmId) -> Option<&mut MemoryFsm> {
        self.objects.get_mut(id.object.0)?.fsms.get_mut(id.slot)
    }
}

impl Host for MemoryWorld {
    fn find_object(&self, path: &str) -> Option<ObjectId> {
        self.index_of(path).map(ObjectId)
    }

    fn find_child(&self, parent: ObjectId, name: &str) -> Option<ObjectId> {
        let parent = self.objects.get(parent.0)?;
        let child_path = format!("{}/{}", parent.path, name);
        self.index_of(&child_path).map(ObjectId)
    }

    fn find_fsm(&self, object: ObjectId, fsm_name: &str) -> Option<FsmId> {
        let slot = self
            .objects
            .get(object.0)?
            .fsms
            .iter()
            .position(|f| f.name == fsm_name)?;
        Some(FsmId { object, slot })
    }

    fn first_fsm(&self, object: ObjectId) -> Option<FsmId> {
        let obj = self.objects.get(object.0)?;
        if obj.fsms.is_empty() {
            return None;
        }
        Some(FsmId { object, slot: 0 })
    }

    fn active_state(&self, fsm: FsmId) -> Option<String> {
        self.fsm_at(fsm).map(|f| f.state.clone())
    }

    fn float_var(&self, fsm: FsmId, name: &str) -> Option<f32> {
        self.fsm_at(fsm)?.floats.get(name).copied()
    }

    fn set_float_var(&mut self, fsm: FsmId, name: &str, value: f32) -> bool {
        match self
            .fsm_at_mut(fsm)
            .and_then(|f| f.floats.get_mut(name))
        {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn bool_var(&self, fsm: FsmId, name: &str) -> Option<bool> {
        self.fsm_at(fsm)?.bools.get(name).copied()
    }
}
