///! Visibility classification
///!
///! Priority-ordered rules, first match wins: a body above the horizon at
///! night is visible; one about to rise is flagged as rising even while it
///! is still below; anything else below the horizon is simply down; the
///! remainder is washed out by daylight.

use chrono::{DateTime, Duration, FixedOffset, Timelike};
use skygaze_common::{TimingRecord, VisibilityStatus};

/// How far ahead of a rise the "rising" status is announced
fn rising_soon_window() -> Duration {
    Duration::hours(2)
}

/// True for local hours counted as night-time (before 06:00 or from 18:00)
fn is_night_hour(hour: u32) -> bool {
    hour < 6 || hour >= 18
}

/// Classify a body and build its status message
pub fn classify_visibility(
    body_name: &str,
    altitude_degrees: f64,
    timing: &TimingRecord,
    now_local: DateTime<FixedOffset>,
) -> (VisibilityStatus, String) {
    if altitude_degrees > 0.0 && is_night_hour(now_local.hour()) {
        return (
            VisibilityStatus::Visible,
            format!("{} is above the horizon now", body_name),
        );
    }

    if let Some(rise) = timing.rise_time {
        if now_local < rise && rise - now_local <= rising_soon_window() {
            return (
                VisibilityStatus::Rising,
                format!("{} rises at {}", body_name, rise.format("%H:%M")),
            );
        }
    }

    if altitude_degrees <= 0.0 {
        let message = match timing.rise_time {
            Some(rise) => format!(
                "{} is below the horizon, rises at {}",
                body_name,
                rise.format("%H:%M")
            ),
            None => format!("{} is below the horizon", body_name),
        };
        return (VisibilityStatus::Below, message);
    }

    (
        VisibilityStatus::Daylight,
        format!("{} is up during daylight, try again after sunset", body_name),
    )
}
