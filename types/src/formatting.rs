//! Centralized time formatting utilities.
//!
//! All cooldown display formatting goes through this module so the monitor
//! window, the developer log and the simulator print times the same way.

/// Label shown when a cooldown has fully elapsed.
pub const AVAILABLE_LABEL: &str = "Available!";

/// Format a remaining cooldown for the monitor window.
///
/// - Values <= 0: `Available!`
/// - Values < 60s: whole seconds, `Xs`
/// - Values < 1h: `Xm Ys`
/// - Longer: `Xh Ym` (seconds dropped)
///
/// # Examples
/// ```
/// use job_cooldowns_types::formatting::format_remaining;
/// assert_eq!(format_remaining(0.0), "Available!");
/// assert_eq!(format_remaining(45.0), "45s");
/// assert_eq!(format_remaining(125.0), "2m 5s");
/// assert_eq!(format_remaining(7384.0), "2h 3m");
/// ```
pub fn format_remaining(secs: f32) -> String {
    if secs <= 0.0 {
        return AVAILABLE_LABEL.to_string();
    }
    if secs < 60.0 {
        return format!("{:.0}s", secs);
    }

    let total_mins = (secs / 60.0).floor() as u32;
    let remaining_secs = (secs % 60.0).floor() as u32;
    if total_mins < 60 {
        return format!("{}m {}s", total_mins, remaining_secs);
    }

    format!("{}h {}m", total_mins / 60, total_mins % 60)
}

/// Helper line shown under each cooldown slider.
///
/// # Examples
/// ```
/// use job_cooldowns_types::formatting::format_minutes_range;
/// assert_eq!(format_minutes_range(1, 480), "Range: 1 min to 480 min (8h)");
/// ```
pub fn format_minutes_range(min_minutes: u32, max_minutes: u32) -> String {
    format!(
        "Range: {} min to {} min ({}h)",
        min_minutes,
        max_minutes,
        max_minutes / 60
    )
}

/// Format a configured duration as `N minutes (Ms)` for log lines.
pub fn format_configured(minutes: u32) -> String {
    format!("{} minutes ({}s)", minutes, minutes as u64 * 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_remaining_available() {
        assert_eq!(format_remaining(0.0), "Available!");
        assert_eq!(format_remaining(-5.0), "Available!");
        assert_eq!(format_remaining(-1.0), "Available!");
    }

    #[test]
    fn test_format_remaining_seconds() {
        assert_eq!(format_remaining(1.0), "1s");
        assert_eq!(format_remaining(45.0), "45s");
        assert_eq!(format_remaining(45.4), "45s");
    }

    #[test]
    fn test_format_remaining_minutes() {
        assert_eq!(format_remaining(60.0), "1m 0s");
        assert_eq!(format_remaining(125.0), "2m 5s");
        assert_eq!(format_remaining(125.9), "2m 5s");
        assert_eq!(format_remaining(3599.0), "59m 59s");
    }

    #[test]
    fn test_format_remaining_hours() {
        assert_eq!(format_remaining(3600.0), "1h 0m");
        assert_eq!(format_remaining(7384.0), "2h 3m");
        assert_eq!(format_remaining(28_800.0), "8h 0m");
    }

    #[test]
    fn test_format_minutes_range() {
        assert_eq!(format_minutes_range(1, 480), "Range: 1 min to 480 min (8h)");
        assert_eq!(format_minutes_range(5, 90), "Range: 5 min to 90 min (1h)");
    }

    #[test]
    fn test_format_configured() {
        assert_eq!(format_configured(50), "50 minutes (3000s)");
        assert_eq!(format_configured(0), "0 minutes (0s)");
    }
}
