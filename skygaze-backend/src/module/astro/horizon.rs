///! Horizon-crossing hour angle

/// Result of solving for the hour angle at which a body reaches the horizon
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizonCrossing {
    /// The body crosses the horizon at +/- this hour angle (degrees, [0, 180])
    Crosses { hour_angle_degrees: f64 },

    /// The body never reaches the horizon at this latitude; whether it is
    /// permanently up or permanently down depends on the sign of the
    /// declination relative to the latitude
    Circumpolar,
}

/// Hour angle of horizon crossing for a body of declination `declination_degrees`
/// seen from latitude `latitude_degrees`
pub fn horizon_hour_angle(declination_degrees: f64, latitude_degrees: f64) -> HorizonCrossing {
    let cos_ha = -latitude_degrees.to_radians().tan() * declination_degrees.to_radians().tan();

    if cos_ha.abs() > 1.0 {
        HorizonCrossing::Circumpolar
    } else {
        HorizonCrossing::Crosses {
            hour_angle_degrees: cos_ha.acos().to_degrees(),
        }
    }
}

/// For a circumpolar body: true when it is permanently above the horizon
///
/// Declination and latitude of the same sign keep the body up; opposite
/// signs keep it down.
pub fn is_always_above_horizon(declination_degrees: f64, latitude_degrees: f64) -> bool {
    declination_degrees.signum() == latitude_degrees.signum()
}
