//! Persisted mod settings.
//!
//! Mirrors what the mod-loader's settings page exposes: one minutes slider per
//! job, two checkboxes and the monitor toggle keybind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key combination that toggles the monitor window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybind {
    /// Main key name, as the host names it (e.g. "J")
    pub key: String,
    /// Optional held modifier (e.g. "RightControl")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
}

impl Default for Keybind {
    fn default() -> Self {
        Self {
            key: "J".to_string(),
            modifier: Some("RightControl".to_string()),
        }
    }
}

impl Keybind {
    /// Human-readable label, e.g. `Right Ctrl + J`
    pub fn label(&self) -> String {
        match &self.modifier {
            Some(modifier) => format!("{} + {}", modifier_label(modifier), self.key),
            None => self.key.clone(),
        }
    }
}

fn modifier_label(modifier: &str) -> &str {
    match modifier {
        "RightControl" => "Right Ctrl",
        "LeftControl" => "Left Ctrl",
        "RightShift" => "Right Shift",
        "LeftShift" => "Left Shift",
        "RightAlt" => "Right Alt",
        "LeftAlt" => "Left Alt",
        other => other,
    }
}

/// Settings persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show the "Reset" buttons in the monitor window
    pub show_reset_buttons: bool,

    /// Raw FSM state names, verbose logs and the developer log file
    pub dev_mode: bool,

    /// Monitor window toggle
    pub toggle_monitor: Keybind,

    /// Configured cooldown per job, in minutes, keyed by job ID
    pub cooldowns: BTreeMap<String, u32>,
}

impl Settings {
    /// Slider value stored for a job, if any
    pub fn minutes_for(&self, job_id: &str) -> Option<u32> {
        self.cooldowns.get(job_id).copied()
    }

    /// Record a slider value for a job
    pub fn set_minutes(&mut self, job_id: impl Into<String>, minutes: u32) {
        self.cooldowns.insert(job_id.into(), minutes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!settings.show_reset_buttons);
        assert!(!settings.dev_mode);
        assert_eq!(settings.toggle_monitor.label(), "Right Ctrl + J");
    }

    #[test]
    fn test_parse_settings_toml() {
        let toml = r#"
show_reset_buttons = true

[toggle_monitor]
key = "K"

[cooldowns]
firewood_delivery = 120
Sewage3 = 15
"#;

        let settings: Settings = toml::from_str(toml).unwrap();
        assert!(settings.show_reset_buttons);
        assert!(!settings.dev_mode);
        assert_eq!(settings.toggle_monitor.label(), "K");
        assert_eq!(settings.minutes_for("firewood_delivery"), Some(120));
        assert_eq!(settings.minutes_for("Sewage3"), Some(15));
        assert_eq!(settings.minutes_for("Farm"), None);
    }

    #[test]
    fn test_set_minutes_overwrites() {
        let mut settings = Settings::default();
        settings.set_minutes("Farm", 100);
        settings.set_minutes("Farm", 30);
        assert_eq!(settings.minutes_for("Farm"), Some(30));
        assert_eq!(settings.cooldowns.len(), 1);
    }

    #[test]
    fn test_settings_serialize_round_trip_keeps_cooldowns() {
        let mut settings = Settings::default();
        settings.dev_mode = true;
        settings.set_minutes("JokkeMoving", 167);

        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
