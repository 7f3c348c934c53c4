///! Positional-astronomy math
///!
///! All functions here are pure and synchronous: given an observer, a body's
///! catalog coordinates and an instant, they derive sidereal time, apparent
///! position, horizon crossings, observing windows and visibility status.
///! Network providers never enter this module.

// ============ Time and Angles ============
mod sidereal;
pub use sidereal::{days_since_j2000, local_sidereal_hours};

// ============ Coordinate Transformation ============
mod transform;
pub use transform::altaz;

// ============ Horizon Geometry ============
mod horizon;
pub use horizon::{HorizonCrossing, horizon_hour_angle, is_always_above_horizon};

// ============ Rise / Transit / Set ============
mod rise_set;
pub use rise_set::compute_timings;

// ============ Solar Approximation ============
mod solar;
pub use solar::{solar_declination_degrees, solar_right_ascension_hours, sun_timings};

// ============ Viewing Window ============
mod window;
pub use window::{best_viewing_window, select_window};

// ============ Visibility Classification ============
mod visibility;
pub use visibility::classify_visibility;

// ============ Moon Phase ============
mod moon;
pub use moon::{julian_day, moon_illumination_percent};
