pub mod app;
pub mod billing;
pub mod devlog;
pub mod host;
pub mod jobs;
pub mod monitor;
pub mod orchestrator;
pub mod registry;
pub mod settings;
pub mod status;
pub mod watcher;

// Re-exports for convenience
pub use app::JobCooldowns;
pub use devlog::DevLog;
pub use host::{FsmId, Host, LookupError, MemoryWorld, ObjectId};
pub use jobs::{CooldownHandler, JobDescriptor, UNAVAILABLE_SECS};
pub use monitor::{Monitor, MonitorView};
pub use registry::Registry;
pub use status::StatusRecord;
