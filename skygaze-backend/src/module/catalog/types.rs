///! Catalog entry types and the fixed star catalog

use chrono::NaiveDate;
use skygaze_common::BodyKind;

/// Catalog coordinates and ancillary data for one body on one date
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub kind: BodyKind,

    /// Right ascension in hours [0, 24)
    pub right_ascension_hours: f64,

    /// Declination in degrees [-90, 90]
    pub declination_degrees: f64,

    /// Apparent visual magnitude
    pub magnitude: f64,

    /// Distance in `distance_unit`
    pub distance: f64,
    pub distance_unit: &'static str,
}

/// Anything that can supply catalog coordinates for a body on a date
pub trait PositionSource {
    fn lookup(&self, body_name: &str, date: NaiveDate) -> Option<CatalogEntry>;

    /// Names of all bodies this source can answer for
    fn body_names(&self) -> Vec<String>;
}

/// Bright-star catalog with fixed J2000 coordinates
///
/// Distances are in light-years.
pub struct StarCatalog {
    stars: Vec<CatalogEntry>,
}

impl StarCatalog {
    pub fn new() -> Self {
        let stars = [
            ("Sirius", 6.752, -16.716, -1.46, 8.6),
            ("Canopus", 6.399, -52.696, -0.74, 310.0),
            ("Arcturus", 14.261, 19.182, -0.05, 37.0),
            ("Vega", 18.616, 38.784, 0.03, 25.0),
            ("Capella", 5.278, 45.998, 0.08, 43.0),
            ("Rigel", 5.242, -8.202, 0.13, 863.0),
            ("Betelgeuse", 5.919, 7.407, 0.50, 548.0),
            ("Altair", 19.846, 8.868, 0.77, 17.0),
            ("Antares", 16.490, -26.432, 1.09, 550.0),
            ("Spica", 13.420, -11.161, 0.97, 250.0),
            ("Polaris", 2.530, 89.264, 1.98, 433.0),
        ]
        .into_iter()
        .map(|(name, ra, dec, magnitude, distance)| CatalogEntry {
            name: name.to_string(),
            kind: BodyKind::Star,
            right_ascension_hours: ra,
            declination_degrees: dec,
            magnitude,
            distance,
            distance_unit: "ly",
        })
        .collect();

        Self { stars }
    }
}

impl Default for StarCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionSource for StarCatalog {
    fn lookup(&self, body_name: &str, _date: NaiveDate) -> Option<CatalogEntry> {
        self.stars
            .iter()
            .find(|star| star.name.eq_ignore_ascii_case(body_name))
            .cloned()
    }

    fn body_names(&self) -> Vec<String> {
        self.stars.iter().map(|star| star.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn any_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = StarCatalog::new();
        let entry = catalog.lookup("sirius", any_date()).unwrap();
        assert_eq!(entry.name, "Sirius");
        assert_eq!(entry.kind, BodyKind::Star);
    }

    #[test]
    fn test_lookup_unknown_body() {
        let catalog = StarCatalog::new();
        assert!(catalog.lookup("Krypton", any_date()).is_none());
    }

    #[test]
    fn test_coordinates_in_range() {
        let catalog = StarCatalog::new();
        for name in catalog.body_names() {
            let entry = catalog.lookup(&name, any_date()).unwrap();
            assert!((0.0..24.0).contains(&entry.right_ascension_hours));
            assert!((-90.0..=90.0).contains(&entry.declination_degrees));
        }
    }

    #[test]
    fn test_lookup_ignores_date() {
        let catalog = StarCatalog::new();
        let a = catalog.lookup("Vega", any_date()).unwrap();
        let b = catalog
            .lookup("Vega", NaiveDate::from_ymd_opt(2030, 12, 31).unwrap())
            .unwrap();
        assert_eq!(a, b);
    }
}
