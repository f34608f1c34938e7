//! Shared types for Job Cooldowns.
//!
//! Kept free of host and logging dependencies so the settings file format and
//! the display helpers can be used by any front end.

pub mod formatting;
pub mod settings;

pub use settings::{Keybind, Settings};

use serde::{Deserialize, Serialize};

/// How much FSM detail the monitor shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Friendly label for the primary job only
    #[default]
    Normal,
    /// Raw FSM state names for every job
    Developer,
}

impl DisplayMode {
    pub fn from_dev_mode(dev_mode: bool) -> Self {
        if dev_mode {
            Self::Developer
        } else {
            Self::Normal
        }
    }

    pub fn is_developer(self) -> bool {
        self == Self::Developer
    }
}

/// Remaining-time below which a cooldown counts as "soon"
pub const SOON_THRESHOLD_SECS: f32 = 300.0;
/// Remaining-time below which a cooldown counts as "moderate"
pub const MODERATE_THRESHOLD_SECS: f32 = 1800.0;

/// Severity of a remaining cooldown, used to color the time column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Ready,
    Soon,
    Moderate,
    LongWait,
}

impl Urgency {
    /// Classify a remaining time in seconds.
    ///
    /// # Examples
    /// ```
    /// use job_cooldowns_types::Urgency;
    /// assert_eq!(Urgency::classify(0.0), Urgency::Ready);
    /// assert_eq!(Urgency::classify(299.0), Urgency::Soon);
    /// assert_eq!(Urgency::classify(300.0), Urgency::Moderate);
    /// assert_eq!(Urgency::classify(1800.0), Urgency::LongWait);
    /// ```
    pub fn classify(remaining_secs: f32) -> Self {
        if remaining_secs <= 0.0 {
            Self::Ready
        } else if remaining_secs < SOON_THRESHOLD_SECS {
            Self::Soon
        } else if remaining_secs < MODERATE_THRESHOLD_SECS {
            Self::Moderate
        } else {
            Self::LongWait
        }
    }

    /// RGBA color for the time column
    pub fn color(&self) -> [u8; 4] {
        match self {
            Self::Ready => [77, 255, 77, 255],     // Green
            Self::Soon => [255, 255, 77, 255],     // Yellow
            Self::Moderate => [255, 179, 77, 255], // Orange
            Self::LongWait => [255, 77, 77, 255],  // Red
        }
    }
}
