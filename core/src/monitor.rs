//! Monitor window view-model.
//!
//! The host draws the window; this module decides what goes in it. A
//! [`MonitorView`] is rebuilt from live status records every GUI pass and
//! carries no host handles, so the host can render it however it likes.

use std::fmt;
use std::time::Duration;

use job_cooldowns_types::formatting::format_remaining;
use job_cooldowns_types::{DisplayMode, Urgency};
use serde::Serialize;

use crate::billing::show_unpaid_warning;
use crate::host::Host;
use crate::registry::Registry;
use crate::status::{StatusRecord, collect};

pub const WINDOW_TITLE: &str = "Job Cooldowns Monitor";
pub const HEADER: &str = "Active Job Cooldowns";
pub const UNAVAILABLE_LABEL: &str = "Unavailable";
pub const EMPTY_HINT: &str = "Start or load a game to monitor cooldowns.";
pub const CURSOR_HINT: &str = "Press ESC to show cursor and interact with buttons";
pub const PHONE_CALL_NOTE: &str = "Note: Jobs require a phone call to activate even after cooldown ends";
pub const UNPAID_BILL_WARNING: &str = "⚠ UNPAID PHONE BILL! Jobs won't call until you pay ⚠";

/// Minimum gap between two accepted visibility toggles
pub const TOGGLE_DEBOUNCE: Duration = Duration::from_millis(300);

/// Rejects key repeats that arrive inside the debounce window.
#[derive(Debug, Clone)]
pub struct ToggleDebounce {
    window: Duration,
    last: Option<Duration>,
}

impl Default for ToggleDebounce {
    fn default() -> Self {
        Self::new(TOGGLE_DEBOUNCE)
    }
}

impl ToggleDebounce {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// `now` is the host clock. The first press is always accepted.
    pub fn accept(&mut self, now: Duration) -> bool {
        let accepted = match self.last {
            Some(last) => now.saturating_sub(last) >= self.window,
            None => true,
        };
        if accepted {
            self.last = Some(now);
        }
        accepted
    }
}

/// Window position and size in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 20.0,
            y: 20.0,
            width: 400.0,
            height: 300.0,
        }
    }
}

/// State of a row's reset button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResetButton {
    /// Reset buttons are switched off in settings, or the job is unavailable
    Hidden,
    Disabled,
    Enabled,
}

/// One job line in the window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorRow {
    pub job_id: String,
    pub name: String,
    pub phase: Option<String>,
    /// Formatted remaining time; `None` renders [`UNAVAILABLE_LABEL`]
    pub time_text: Option<String>,
    pub urgency: Option<Urgency>,
    pub reset: ResetButton,
}

impl MonitorRow {
    fn from_status(record: &StatusRecord, show_reset_buttons: bool) -> Self {
        let reset = match (record.available, show_reset_buttons, record.reset_eligible) {
            (true, true, true) => ResetButton::Enabled,
            (true, true, false) => ResetButton::Disabled,
            _ => ResetButton::Hidden,
        };

        Self {
            job_id: record.job_id.clone(),
            name: record.display_name.clone(),
            phase: record.phase_label.clone().filter(|p| !p.is_empty()),
            time_text: record
                .available
                .then(|| format_remaining(record.remaining_seconds)),
            urgency: record.urgency(),
            reset,
        }
    }

    /// RGBA for the time column, `None` for the greyed-out unavailable style
    pub fn time_color(&self) -> Option<[u8; 4]> {
        self.urgency.map(|u| u.color())
    }
}

/// Everything the window shows for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorView {
    pub title: &'static str,
    pub header: &'static str,
    pub rect: WindowRect,
    pub rows: Vec<MonitorRow>,
    /// Set when no job is available
    pub empty_hint: Option<&'static str>,
    pub footer: Vec<String>,
    pub warning: Option<&'static str>,
}

impl fmt::Display for MonitorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        writeln!(f, "{}", self.header)?;
        writeln!(f)?;

        for row in &self.rows {
            let phase = row.phase.as_ref().map(|p| format!("[{p}]")).unwrap_or_default();
            let time = row.time_text.as_deref().unwrap_or(UNAVAILABLE_LABEL);
            let reset = match row.reset {
                ResetButton::Hidden => "",
                ResetButton::Disabled => "(Reset)",
                ResetButton::Enabled => "[Reset]",
            };
            writeln!(f, "{:<28} {:<16} {:>10} {}", row.name, phase, time, reset)?;
        }

        if let Some(hint) = self.empty_hint {
            writeln!(f)?;
            writeln!(f, "{hint}")?;
        }

        writeln!(f)?;
        for line in &self.footer {
            writeln!(f, "{line}")?;
        }
        if let Some(warning) = self.warning {
            writeln!(f, "{warning}")?;
        }
        Ok(())
    }
}

/// Window state that survives between frames
#[derive(Debug, Clone)]
pub struct Monitor {
    visible: bool,
    show_reset_buttons: bool,
    mode: DisplayMode,
    rect: WindowRect,
    debounce: ToggleDebounce,
    toggle_label: String,
}

impl Monitor {
    /// Hidden until the first toggle
    pub fn new(mode: DisplayMode, show_reset_buttons: bool, toggle_label: impl Into<String>) -> Self {
        Self {
            visible: false,
            show_reset_buttons,
            mode,
            rect: WindowRect::default(),
            debounce: ToggleDebounce::default(),
            toggle_label: toggle_label.into(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    /// Toggle from a key press, subject to the debounce window.
    /// Returns whether the press was accepted.
    pub fn request_toggle(&mut self, now: Duration) -> bool {
        let accepted = self.debounce.accept(now);
        if accepted {
            self.toggle_visibility();
        }
        accepted
    }

    pub fn show_reset_buttons(&self) -> bool {
        self.show_reset_buttons
    }

    pub fn set_show_reset_buttons(&mut self, show: bool) {
        self.show_reset_buttons = show;
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub fn set_toggle_label(&mut self, label: impl Into<String>) {
        self.toggle_label = label.into();
    }

    pub fn rect(&self) -> WindowRect {
        self.rect
    }

    /// The host reports where the player dragged the window
    pub fn move_to(&mut self, rect: WindowRect) {
        self.rect = rect;
    }

    /// Build this frame's contents, `None` while hidden
    pub fn view(&self, registry: &Registry, host: &dyn Host) -> Option<MonitorView> {
        if !self.visible {
            return None;
        }
        Some(self.build_view(registry, host))
    }

    /// Contents regardless of visibility
    pub fn build_view(&self, registry: &Registry, host: &dyn Host) -> MonitorView {
        let records = collect(registry, host, self.mode);
        let any_available = records.iter().any(|r| r.available);

        let rows = records
            .iter()
            .map(|r| MonitorRow::from_status(r, self.show_reset_buttons))
            .collect();

        MonitorView {
            title: WINDOW_TITLE,
            header: HEADER,
            rect: self.rect,
            rows,
            empty_hint: (!any_available).then_some(EMPTY_HINT),
            footer: vec![
                CURSOR_HINT.to_string(),
                format!("Press {} to toggle this window", self.toggle_label),
                PHONE_CALL_NOTE.to_string(),
            ],
            warning: show_unpaid_warning(host).then_some(UNPAID_BILL_WARNING),
        }
    }
}
