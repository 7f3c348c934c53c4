///! Local Sidereal Time
///!
///! The sky's own clock: the right ascension currently crossing the
///! observer's meridian. Computed with the compact J2000-referenced
///! approximation, good to a few seconds of time over the supported
///! date span.

use chrono::{DateTime, TimeZone, Timelike, Utc};

/// Fractional days elapsed since the J2000.0 epoch (2000-01-01 12:00 UTC)
pub fn days_since_j2000(instant: DateTime<Utc>) -> f64 {
    let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    (instant - epoch).num_milliseconds() as f64 / 86_400_000.0
}

/// Local Sidereal Time in hours [0, 24)
///
/// `timezone_offset_hours` is only meaningful for display-oriented call
/// sites; the rise/set solver always passes `None` and works UTC-referenced.
pub fn local_sidereal_hours(
    longitude_degrees: f64,
    instant: DateTime<Utc>,
    timezone_offset_hours: Option<i32>,
) -> f64 {
    let d = days_since_j2000(instant);

    let utc_decimal_hours = instant.hour() as f64
        + instant.minute() as f64 / 60.0
        + instant.second() as f64 / 3600.0
        + instant.nanosecond() as f64 / 3.6e12;

    let lst_degrees =
        (100.46 + 0.985647 * d + longitude_degrees + 15.0 * utc_decimal_hours).rem_euclid(360.0);

    let mut lst_hours = lst_degrees / 15.0;
    if let Some(offset) = timezone_offset_hours {
        lst_hours += offset as f64;
    }

    lst_hours.rem_euclid(24.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_days_since_j2000_at_epoch() {
        let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(days_since_j2000(epoch), 0.0);

        let one_day_later = Utc.with_ymd_and_hms(2000, 1, 2, 12, 0, 0).unwrap();
        assert!((days_since_j2000(one_day_later) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_lst_in_range() {
        let longitudes = [-180.0, -74.0, 0.0, 139.7, 179.9];
        let instants = [
            Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 7, 4, 3, 30, 15).unwrap(),
        ];

        for lon in longitudes {
            for instant in instants {
                let lst = local_sidereal_hours(lon, instant, None);
                assert!((0.0..24.0).contains(&lst), "LST {} out of range", lst);
            }
        }
    }

    #[test]
    fn test_lst_daily_drift() {
        // A solar day advances sidereal time by about 3.94 minutes
        let t = Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap();
        let lst_now = local_sidereal_hours(-74.0, t, None);
        let lst_next = local_sidereal_hours(-74.0, t + Duration::hours(24), None);

        let drift = (lst_next - lst_now).rem_euclid(24.0);
        assert!(
            (drift - 0.0657).abs() < 0.005,
            "daily sidereal drift was {} h",
            drift
        );
    }

    #[test]
    fn test_lst_deterministic() {
        let t = Utc.with_ymd_and_hms(2026, 3, 20, 22, 15, 0).unwrap();
        let a = local_sidereal_hours(12.5, t, None);
        let b = local_sidereal_hours(12.5, t, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_lst_display_offset_applied() {
        let t = Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap();
        let plain = local_sidereal_hours(-74.0, t, None);
        let shifted = local_sidereal_hours(-74.0, t, Some(-5));
        assert!(((plain - 5.0).rem_euclid(24.0) - shifted).abs() < 1e-9);
    }
}
