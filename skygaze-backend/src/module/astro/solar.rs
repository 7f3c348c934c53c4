///! Simplified solar position model
///!
///! A coarse day-of-year approximation of the Sun's declination and right
///! ascension, used only to bracket the night with sunset and sunrise for
///! the viewing-window planner.

use chrono::{Datelike, NaiveDate};
use skygaze_common::{ObserverContext, TimingRecord};

use super::rise_set;

/// Solar declination in degrees for day-of-year `day`
pub fn solar_declination_degrees(day: f64) -> f64 {
    23.45 * (360.0 * (day + 284.0) / 365.25).to_radians().sin()
}

/// Approximate solar right ascension in hours [0, 24) for day-of-year `day`
pub fn solar_right_ascension_hours(day: f64) -> f64 {
    (day.rem_euclid(365.25) / 365.25 * 24.0 + 12.0).rem_euclid(24.0)
}

/// Sunrise / solar transit / sunset for one local day
///
/// Runs the Sun's approximate coordinates through the same machinery as any
/// other body. Inside polar circles the record can come back without rise
/// and set.
pub fn sun_timings(observer: &ObserverContext, date: NaiveDate) -> TimingRecord {
    let day = date.ordinal() as f64;
    rise_set::compute_timings(
        solar_right_ascension_hours(day),
        solar_declination_degrees(day),
        observer,
        date,
    )
}
