///! Deterministic rise / transit / set calculator
///!
///! The reference point is local civil noon rather than "now": anchoring the
///! solution to noon keeps the crossings on the requested local day instead
///! of sliding into tomorrow whenever the current instant has passed an
///! event.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use skygaze_common::{ObserverContext, TimingRecord};

use super::horizon::{self, HorizonCrossing};
use super::sidereal;

/// Convert fractional hours into a chrono duration
fn hours_to_duration(hours: f64) -> Duration {
    Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

/// UTC instant of civil noon on `date` at the observer's approximate timezone
fn noon_utc(observer: &ObserverContext, date: NaiveDate) -> DateTime<Utc> {
    let noon_local = date.and_hms_opt(12, 0, 0).unwrap();
    Utc.from_utc_datetime(&(noon_local - Duration::hours(observer.timezone_offset_hours as i64)))
}

/// Rise, transit and set for one body on one local day
///
/// Interior math is UTC-referenced; the returned record carries
/// offset-applied local times. A circumpolar body keeps its transit at local
/// noon with rise and set absent.
pub fn compute_timings(
    right_ascension_hours: f64,
    declination_degrees: f64,
    observer: &ObserverContext,
    date: NaiveDate,
) -> TimingRecord {
    let noon = noon_utc(observer, date);
    let lst_noon = sidereal::local_sidereal_hours(observer.longitude, noon, None);

    // Offset from noon to the meridian crossing, wrapped into (-12, 12]
    let mut transit_offset_hours = (right_ascension_hours - lst_noon + 12.0).rem_euclid(24.0) - 12.0;
    if transit_offset_hours <= -12.0 {
        transit_offset_hours += 24.0;
    }
    let transit = noon + hours_to_duration(transit_offset_hours);

    match horizon::horizon_hour_angle(declination_degrees, observer.latitude) {
        HorizonCrossing::Circumpolar => TimingRecord {
            rise_time: None,
            set_time: None,
            transit_time: Some(observer.to_local(noon)),
        },
        HorizonCrossing::Crosses { hour_angle_degrees } => {
            let half_arc = hours_to_duration(hour_angle_degrees / 15.0);
            TimingRecord {
                rise_time: Some(observer.to_local(transit - half_arc)),
                set_time: Some(observer.to_local(transit + half_arc)),
                transit_time: Some(observer.to_local(transit)),
            }
        }
    }
}
