///! Prime viewing window planner
///!
///! Picks the best observing interval around a body's transit and clips it
///! into the night between sunset and the following sunrise.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike};
use skygaze_common::{ObserverContext, ViewingWindow};

use super::{rise_set, solar};

/// Fractional local hour of an instant
fn fractional_hour(t: DateTime<FixedOffset>) -> f64 {
    t.hour() as f64 + t.minute() as f64 / 60.0 + t.second() as f64 / 3600.0
}

/// Window selection from a known transit and night bracket
///
/// Evening transits get a window leaning past culmination, early-morning
/// transits one leaning before it, and daytime transits fall back to the
/// first hours after sunset. Clipping that would invert the interval yields
/// no window.
pub fn select_window(
    transit: DateTime<FixedOffset>,
    sunset: DateTime<FixedOffset>,
    next_sunrise: DateTime<FixedOffset>,
) -> Option<ViewingWindow> {
    let transit_hour = fractional_hour(transit);

    let (mut start, mut end) = if transit_hour >= 18.0 {
        (transit - Duration::hours(1), transit + Duration::minutes(90))
    } else if transit_hour <= 6.0 {
        (transit - Duration::minutes(90), transit + Duration::hours(1))
    } else {
        (sunset - Duration::minutes(30), sunset + Duration::hours(2))
    };

    start = start.max(sunset);
    end = end.min(next_sunrise);

    if start >= end {
        return None;
    }

    Some(ViewingWindow {
        start_time: start,
        end_time: end,
        peak_time: transit,
    })
}

/// Best viewing window for a body on one local day
///
/// An externally supplied transit time is preferred over recomputing one;
/// the night bracket always comes from the local solar model. No window is
/// recommended when the model sun never crosses the horizon (polar day or
/// night).
pub fn best_viewing_window(
    right_ascension_hours: f64,
    declination_degrees: f64,
    observer: &ObserverContext,
    date: NaiveDate,
    external_transit: Option<DateTime<FixedOffset>>,
) -> Option<ViewingWindow> {
    let transit = match external_transit {
        Some(t) => t,
        None => {
            rise_set::compute_timings(right_ascension_hours, declination_degrees, observer, date)
                .transit_time?
        }
    };

    let sunset = solar::sun_timings(observer, date).set_time?;
    let next_sunrise = solar::sun_timings(observer, date.succ_opt()?).rise_time?;

    select_window(transit, sunset, next_sunrise)
}
