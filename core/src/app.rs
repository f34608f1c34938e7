//! Mod lifecycle.
//!
//! [`JobCooldowns`] owns the registry, the settings, the developer log and the
//! monitor, and exposes one method per host callback: settings loaded, world
//! load, update tick, GUI pass, settings-page changes and save/unload.

use std::path::Path;
use std::time::Duration;

use job_cooldowns_types::{DisplayMode, Settings};
use tracing::{debug, info};

use crate::devlog::DevLog;
use crate::host::Host;
use crate::monitor::{Monitor, MonitorView};
use crate::orchestrator::{self, ApplyOutcome, ApplyReport};
use crate::registry::Registry;
use crate::status::{self, StatusRecord};
use crate::watcher::StateWatcher;

#[derive(Debug)]
pub struct JobCooldowns {
    registry: Registry,
    settings: Settings,
    devlog: DevLog,
    /// Created on world load
    monitor: Option<Monitor>,
    watcher: StateWatcher,
}

impl JobCooldowns {
    /// Standard job set with default settings. The developer log file goes
    /// into `log_dir`.
    pub fn new(log_dir: &Path) -> Self {
        Self::with_registry(Registry::standard(), log_dir)
    }

    pub fn with_registry(registry: Registry, log_dir: &Path) -> Self {
        Self {
            registry,
            settings: Settings::default(),
            devlog: DevLog::new(log_dir),
            monitor: None,
            watcher: StateWatcher::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn devlog(&self) -> &DevLog {
        &self.devlog
    }

    pub fn monitor(&self) -> Option<&Monitor> {
        self.monitor.as_ref()
    }

    pub fn monitor_mut(&mut self) -> Option<&mut Monitor> {
        self.monitor.as_mut()
    }

    fn mode(&self) -> DisplayMode {
        DisplayMode::from_dev_mode(self.settings.dev_mode)
    }

    /// Persisted settings became available
    pub fn on_settings_loaded(&mut self, settings: Settings, host: &mut dyn Host) -> ApplyReport {
        self.settings = settings;
        orchestrator::apply_settings(&mut self.registry, &self.settings);
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.set_mode(DisplayMode::from_dev_mode(self.settings.dev_mode));
            monitor.set_show_reset_buttons(self.settings.show_reset_buttons);
            monitor.set_toggle_label(self.settings.toggle_monitor.label());
        }
        self.apply_all(host)
    }

    /// The game world finished loading
    pub fn on_load(&mut self, host: &mut dyn Host) -> ApplyReport {
        self.devlog.set_enabled(self.settings.dev_mode);
        self.devlog.log("Mod loaded - initializing...");

        self.monitor = Some(Monitor::new(
            self.mode(),
            self.settings.show_reset_buttons,
            self.settings.toggle_monitor.label(),
        ));
        self.watcher.clear();

        self.devlog.log("Applying all cooldowns...");
        let report = self.apply_all(host);
        self.devlog.log("Mod initialization complete");
        report
    }

    /// Per-frame tick. `now` is the host clock, `toggle_pressed` whether the
    /// toggle keybind fired this frame.
    pub fn on_update(&mut self, host: &dyn Host, now: Duration, toggle_pressed: bool) {
        if let Some(monitor) = self.monitor.as_mut().filter(|_| toggle_pressed) {
            if monitor.request_toggle(now) {
                debug!(visible = monitor.is_visible(), "Monitor toggled");
            }
        }
        self.watcher.poll(&self.registry, host, &self.devlog);
    }

    /// Contents of the monitor window for this frame, `None` while hidden
    pub fn on_gui(&self, host: &dyn Host) -> Option<MonitorView> {
        self.monitor.as_ref()?.view(&self.registry, host)
    }

    /// Status of every job, independent of the monitor
    pub fn statuses(&self, host: &dyn Host) -> Vec<StatusRecord> {
        status::collect(&self.registry, host, self.mode())
    }

    /// A row's Reset button was clicked. Ignored unless reset buttons are on
    /// and the job is currently eligible.
    pub fn on_reset_clicked(&mut self, job_id: &str, host: &mut dyn Host) -> bool {
        if !self.settings.show_reset_buttons {
            debug!(job_id, "Reset ignored, reset buttons are disabled");
            return false;
        }

        let Some(handler) = self.registry.get(job_id) else {
            return false;
        };
        if !status::status_of(handler, host, self.mode()).reset_eligible {
            debug!(job_id, "Reset ignored, job not eligible");
            return false;
        }

        self.devlog.log(format!("Resetting cooldown for {}", handler.display_name()));
        self.devlog.log_job_info(handler, host);
        handler.reset_cooldown(host);
        self.devlog.log_job_info(handler, host);
        true
    }

    /// A cooldown slider moved
    pub fn on_cooldown_changed(&mut self, job_id: &str, minutes: u32, host: &mut dyn Host) -> ApplyOutcome {
        let Some(handler) = self.registry.get_mut(job_id) else {
            return ApplyOutcome::UnknownJob;
        };
        handler.set_current_minutes(minutes);
        self.settings.set_minutes(job_id, minutes);
        orchestrator::apply_one(&self.registry, job_id, host)
    }

    pub fn on_show_reset_buttons_changed(&mut self, show: bool) {
        self.settings.show_reset_buttons = show;
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.set_show_reset_buttons(show);
        }
    }

    pub fn on_dev_mode_changed(&mut self, dev_mode: bool, host: &dyn Host) {
        self.settings.dev_mode = dev_mode;
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.set_mode(DisplayMode::from_dev_mode(dev_mode));
        }

        if dev_mode {
            self.devlog.set_enabled(true);
            self.devlog.log("Developer mode enabled!");
            self.devlog.log("Logging all job information...");
            for handler in self.registry.iter() {
                self.devlog.log_job_info(handler, host);
            }
        } else {
            self.devlog.log("Developer mode disabled");
            self.devlog.set_enabled(false);
        }
    }

    /// Game saving or quitting
    pub fn on_save(&mut self) {
        self.devlog.shutdown();
    }

    fn apply_all(&self, host: &mut dyn Host) -> ApplyReport {
        self.devlog.log("Applying cooldowns to all available jobs...");
        let report = orchestrator::apply_all(&self.registry, host);

        for job_id in &report.applied {
            if let Some(handler) = self.registry.get(job_id) {
                self.devlog.log(format!("Applied cooldown for {}", handler.display_name()));
                self.devlog.log_job_info(handler, host);
            }
        }
        for job_id in &report.skipped {
            if let Some(handler) = self.registry.get(job_id) {
                self.devlog.log(format!("{} not available (not in game)", handler.display_name()));
            }
        }

        info!(
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            "Cooldowns applied"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::host::{MemoryFsm, MemoryWorld};
    use crate::monitor::ResetButton;

    const FIREWOOD: &str = "JOBS/HouseWood1";
    const FARM: &str = "JOBS/Farm/Job";

    fn world() -> MemoryWorld {
        let mut world = MemoryWorld::new();
        world.insert(
            FIREWOOD,
            MemoryFsm::new("Logic")
                .state("Random wait")
                .float("CoolDownTime", 30_000.0)
                .float("WaitTime", 100.0),
        );
        world.insert(
            FARM,
            MemoryFsm::new("Data").state("Wait").float("WaitTime", 9_000.0),
        );
        world
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_settings_loaded_applies_clamped_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = JobCooldowns::new(dir.path());
        let mut world = world();

        let mut settings = Settings::default();
        settings.set_minutes("Farm", 30);
        settings.set_minutes("firewood_delivery", 1_000);
        let report = app.on_settings_loaded(settings, &mut world);

        assert_eq!(report.applied, vec!["firewood_delivery", "Farm"]);
        assert_eq!(world.float(FARM, "Data", "WaitTime"), Some(1_800.0));
        assert_eq!(world.float(FIREWOOD, "Logic", "CoolDownTime"), Some(28_800.0));
        assert_eq!(app.registry().get("firewood_delivery").unwrap().current_minutes(), 480);
    }

    #[test]
    fn test_gui_only_after_load_and_toggle() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = JobCooldowns::new(dir.path());
        let mut world = world();

        app.on_update(&world, ms(0), true);
        assert!(app.on_gui(&world).is_none());

        app.on_load(&mut world);
        assert!(app.on_gui(&world).is_none());

        app.on_update(&world, ms(1_000), true);
        app.on_update(&world, ms(1_050), true);
        let view = app.on_gui(&world).unwrap();
        assert_eq!(view.footer[1], "Press Right Ctrl + J to toggle this window");
        assert_eq!(view.rows.len(), 9);
    }

    #[test]
    fn test_reset_click_gating() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = JobCooldowns::new(dir.path());
        let mut world = world();
        app.on_load(&mut world);

        // Buttons switched off
        assert!(!app.on_reset_clicked("Farm", &mut world));

        app.on_show_reset_buttons_changed(true);
        assert_eq!(
            app.monitor().unwrap().build_view(app.registry(), &world).rows[7].reset,
            ResetButton::Enabled
        );
        assert!(app.on_reset_clicked("Farm", &mut world));
        assert_eq!(world.float(FARM, "Data", "WaitTime"), Some(0.0));

        // Already elapsed, no longer eligible
        assert!(!app.on_reset_clicked("Farm", &mut world));
        assert!(!app.on_reset_clicked("Mummola", &mut world));
        assert!(!app.on_reset_clicked("Nope", &mut world));
    }

    #[test]
    fn test_primary_reset_requires_cooldown_phase() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = JobCooldowns::new(dir.path());
        let mut world = world();
        app.on_show_reset_buttons_changed(true);
        app.on_load(&mut world);

        world.fsm_mut(FIREWOOD, "Logic").unwrap().state = "Call".to_string();
        assert!(!app.on_reset_clicked("firewood_delivery", &mut world));

        world.fsm_mut(FIREWOOD, "Logic").unwrap().state = "Random wait".to_string();
        assert!(app.on_reset_clicked("firewood_delivery", &mut world));
        let statuses = app.statuses(&world);
        assert_eq!(statuses[0].remaining_seconds, 0.0);
    }

    #[test]
    fn test_cooldown_changed_applies_or_defers() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = JobCooldowns::new(dir.path());
        let mut world = world();

        assert_eq!(app.on_cooldown_changed("Farm", 20, &mut world), ApplyOutcome::Applied);
        assert_eq!(world.float(FARM, "Data", "WaitTime"), Some(1_200.0));
        assert_eq!(app.settings().minutes_for("Farm"), Some(20));

        assert_eq!(app.on_cooldown_changed("Mummola", 20, &mut world), ApplyOutcome::Deferred);
        assert_eq!(app.registry().get("Mummola").unwrap().current_minutes(), 20);
        assert_eq!(app.on_cooldown_changed("Nope", 20, &mut world), ApplyOutcome::UnknownJob);
        assert_eq!(app.settings().minutes_for("Nope"), None);
    }

    #[test]
    fn test_dev_mode_lifecycle_writes_log() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = JobCooldowns::new(dir.path());
        let mut world = world();
        app.on_load(&mut world);
        assert!(!app.devlog().is_enabled());

        app.on_dev_mode_changed(true, &world);
        assert_eq!(app.monitor().unwrap().mode(), DisplayMode::Developer);

        world.fsm_mut(FARM, "Data").unwrap().state = "Call".to_string();
        app.on_update(&world, ms(0), false);
        app.on_update(&world, ms(16), false);
        world.fsm_mut(FARM, "Data").unwrap().state = "Wait".to_string();
        app.on_update(&world, ms(32), false);

        app.on_dev_mode_changed(false, &world);
        let contents = fs::read_to_string(app.devlog().path()).unwrap();
        assert!(contents.contains("Developer mode enabled!"));
        assert!(contents.contains("--- Job Info: Firewood Delivery (Livaloinen) ---"));
        assert!(contents.contains("STATE CHANGE: Farm (Haybale/Combine) - 'Call' -> 'Wait'"));
        assert!(contents.contains("Developer mode disabled"));
    }

    #[test]
    fn test_dev_mode_from_settings_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = JobCooldowns::new(dir.path());
        let mut world = world();

        let settings = Settings {
            dev_mode: true,
            ..Default::default()
        };
        app.on_settings_loaded(settings, &mut world);
        app.on_load(&mut world);
        app.on_save();

        let contents = fs::read_to_string(app.devlog().path()).unwrap();
        assert!(contents.contains("Mod loaded - initializing..."));
        assert!(contents.contains("Applied cooldown for Farm (Haybale/Combine)"));
        assert!(contents.contains("Sewage Well 1 not available (not in game)"));
        assert!(contents.contains("Mod initialization complete"));
        assert!(contents.contains("=== Session ended ==="));
    }
}
