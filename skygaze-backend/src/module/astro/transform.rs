///! Equatorial to horizontal coordinate transformation

use skygaze_common::SkyPosition;

/// Clamp an inverse-trig argument that floating rounding may have pushed
/// just outside [-1, 1]
fn clamp_unit(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}

/// Apparent altitude/azimuth for a body at hour angle `hour_angle_degrees`
///
/// Azimuth is measured from North through East. The arccos east/west
/// ambiguity is resolved by the sign of sin(H): a positive hour angle means
/// the body is west of the meridian.
pub fn altaz(
    declination_degrees: f64,
    latitude_degrees: f64,
    hour_angle_degrees: f64,
) -> SkyPosition {
    let dec = declination_degrees.to_radians();
    let lat = latitude_degrees.to_radians();
    let ha = hour_angle_degrees.to_radians();

    let sin_alt = clamp_unit(dec.sin() * lat.sin() + dec.cos() * lat.cos() * ha.cos());
    let alt = sin_alt.asin();

    let denominator = lat.cos() * alt.cos();
    let mut azimuth_degrees = if denominator.abs() < 1e-12 {
        // Zenith/nadir (or pole): azimuth is degenerate, report North
        0.0
    } else {
        let cos_az = clamp_unit((dec.sin() - lat.sin() * sin_alt) / denominator);
        cos_az.acos().to_degrees()
    };

    if ha.sin() > 0.0 {
        azimuth_degrees = 360.0 - azimuth_degrees;
    }

    SkyPosition {
        altitude_degrees: alt.to_degrees(),
        azimuth_degrees: azimuth_degrees.rem_euclid(360.0),
    }
}
