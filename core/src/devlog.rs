//! Developer log: console echo plus an append-only text file.
//!
//! Only active in developer mode. Lines are buffered and written out once the
//! buffer passes [`FLUSH_THRESHOLD`] bytes, when developer mode is switched
//! off, or on shutdown. Write failures are reported and otherwise ignored.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Local;
use tracing::{error, info};

use crate::host::Host;
use crate::jobs::CooldownHandler;

pub const LOG_FILE_NAME: &str = "JobCooldowns_DevLog.txt";

/// Buffered bytes that trigger a write to disk
pub const FLUSH_THRESHOLD: usize = 1000;

#[derive(Debug, Default)]
struct Buffer {
    enabled: bool,
    pending: String,
}

#[derive(Debug)]
pub struct DevLog {
    path: PathBuf,
    buffer: Mutex<Buffer>,
}

impl DevLog {
    /// Log into `dir`/[`LOG_FILE_NAME`]. Starts disabled.
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(LOG_FILE_NAME),
            buffer: Mutex::new(Buffer::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        self.lock().enabled
    }

    /// Enabling starts a fresh session file; disabling flushes what is left.
    pub fn set_enabled(&self, enabled: bool) {
        let mut buffer = self.lock();
        if enabled {
            buffer.enabled = true;
            buffer.pending.clear();
            self.start_session();
        } else if buffer.enabled {
            self.write_pending(&mut buffer);
            buffer.enabled = false;
        }
    }

    pub fn log(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        let mut buffer = self.lock();
        if !buffer.enabled {
            return;
        }

        info!(target: "job_cooldowns::dev", "{message}");
        buffer.pending.push_str(&format!("[{}] {}\n", Local::now().format("%H:%M:%S"), message));

        if buffer.pending.len() > FLUSH_THRESHOLD {
            self.write_pending(&mut buffer);
        }
    }

    /// Dump everything known about one job
    pub fn log_job_info(&self, handler: &dyn CooldownHandler, host: &dyn Host) {
        if !self.is_enabled() {
            return;
        }

        self.log(format!("--- Job Info: {} ---", handler.display_name()));
        self.log(format!("  Job ID: {}", handler.job_id()));
        self.log(format!("  Available: {}", handler.is_available(host)));
        self.log(format!("  Ready: {}", handler.is_ready(host)));
        self.log(format!(
            "  Current State: {}",
            handler.current_state(host).as_deref().unwrap_or("null")
        ));
        self.log(format!("  Remaining Cooldown: {}s", handler.remaining_seconds(host)));
        self.log(format!("  Configured Cooldown: {} minutes", handler.current_minutes()));
    }

    pub fn log_state_change(&self, job: &str, old_state: &str, new_state: &str) {
        self.log(format!("STATE CHANGE: {job} - '{old_state}' -> '{new_state}'"));
    }

    pub fn flush(&self) {
        let mut buffer = self.lock();
        if buffer.enabled {
            self.write_pending(&mut buffer);
        }
    }

    /// Close the session; called when the game saves or quits
    pub fn shutdown(&self) {
        if self.is_enabled() {
            self.log("=== Session ended ===");
            self.flush();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Buffer> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_session(&self) {
        let header = format!(
            "=== JobCooldowns Dev Log ===\nSession started: {}\n\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        match fs::write(&self.path, header) {
            Ok(()) => info!(path = %self.path.display(), "Dev mode enabled, logging to file"),
            Err(e) => error!(path = %self.path.display(), error = %e, "Failed to initialize dev log file"),
        }
    }

    fn write_pending(&self, buffer: &mut Buffer) {
        if buffer.pending.is_empty() {
            return;
        }

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(buffer.pending.as_bytes()));

        if let Err(e) = result {
            error!(path = %self.path.display(), error = %e, "Failed to write to dev log");
        }
        // Best effort: a failed batch is dropped rather than retried forever
        buffer.pending.clear();
    }
}
