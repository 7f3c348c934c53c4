///! Moon illumination from the mean synodic cycle

use chrono::{DateTime, Utc};

/// Mean length of the synodic month in days
const SYNODIC_MONTH_DAYS: f64 = 29.53058867;

/// Julian Day of a reference new moon (2000-01-06 18:14 UTC)
const REFERENCE_NEW_MOON_JD: f64 = 2451550.1;

/// Julian Day number for a UTC instant
pub fn julian_day(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / 86_400_000.0 + 2_440_587.5
}

/// Illuminated fraction of the Moon's disk in percent [0, 100]
///
/// Phase runs 0 -> 1 from new moon to new moon; the illuminated fraction is
/// the cosine-shaped swing between them, full at phase 0.5.
pub fn moon_illumination_percent(instant: DateTime<Utc>) -> u8 {
    let phase = ((julian_day(instant) - REFERENCE_NEW_MOON_JD).rem_euclid(SYNODIC_MONTH_DAYS))
        / SYNODIC_MONTH_DAYS;

    let illumination = 100.0 * (1.0 + (2.0 * std::f64::consts::PI * phase - std::f64::consts::PI).cos()) / 2.0;
    illumination.round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn reference_new_moon() -> DateTime<Utc> {
        // JD 2451550.1
        Utc.with_ymd_and_hms(2000, 1, 6, 14, 24, 0).unwrap()
    }

    #[test]
    fn test_julian_day_at_unix_epoch() {
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert!((julian_day(epoch) - 2_440_587.5).abs() < 1e-9);
    }

    #[test]
    fn test_new_moon_is_dark() {
        assert_eq!(moon_illumination_percent(reference_new_moon()), 0);
    }

    #[test]
    fn test_full_moon_half_cycle_later() {
        let full = reference_new_moon() + Duration::minutes((29.53058867 / 2.0 * 1440.0) as i64);
        assert_eq!(moon_illumination_percent(full), 100);
    }

    #[test]
    fn test_illumination_bounded() {
        let mut t = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        for _ in 0..60 {
            let percent = moon_illumination_percent(t);
            assert!(percent <= 100);
            t += Duration::hours(13);
        }
    }

    #[test]
    fn test_quarter_moon_half_lit() {
        let quarter = reference_new_moon() + Duration::minutes((29.53058867 / 4.0 * 1440.0) as i64);
        let percent = moon_illumination_percent(quarter);
        assert!((48..=52).contains(&percent), "quarter moon was {}%", percent);
    }
}
