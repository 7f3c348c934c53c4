///! Date-ranged planet position table
///!
///! Planets have no fixed catalog coordinates, so the engine ships a table
///! of date ranges, each mapping body names to coordinates valid at the
///! range start. Lookups inside a range interpolate toward the following
///! range; right ascension interpolates circularly so a wrap through 0h
///! takes the short way around the clock.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use skygaze_common::BodyKind;

use super::types::{CatalogEntry, PositionSource};

const BUNDLED_POSITIONS: &str = include_str!("../../../data/positions.toml");

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read position table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse position table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("position table has no ranges")]
    Empty,

    #[error("position table ranges out of order at index {index}")]
    Unordered { index: usize },
}

/// Raw TOML document shape
#[derive(Debug, Deserialize)]
struct RawTable {
    #[allow(dead_code)]
    version: u32,

    #[serde(rename = "range", default)]
    ranges: Vec<RawRange>,
}

#[derive(Debug, Deserialize)]
struct RawRange {
    start: NaiveDate,
    end: NaiveDate,

    #[serde(rename = "body", default)]
    bodies: Vec<RawBody>,
}

#[derive(Debug, Deserialize)]
struct RawBody {
    name: String,
    ra_hours: f64,
    dec_degrees: f64,
    magnitude: f64,
    distance_au: f64,
}

/// Coordinates for one body at one range boundary
#[derive(Debug, Clone, Copy, PartialEq)]
struct BodyPosition {
    ra_hours: f64,
    dec_degrees: f64,
    magnitude: f64,
    distance_au: f64,
}

/// One contiguous date range of the table, [start, end)
#[derive(Debug, Clone)]
struct PositionRange {
    start: NaiveDate,
    end: NaiveDate,
    positions: HashMap<String, BodyPosition>,
}

impl PositionRange {
    fn position(&self, body_name: &str) -> Option<(&str, &BodyPosition)> {
        self.positions
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(body_name))
            .map(|(name, position)| (name.as_str(), position))
    }
}

/// Interpolate right ascension circularly, taking the path shorter than 12 h
pub fn interpolate_right_ascension(from_hours: f64, to_hours: f64, factor: f64) -> f64 {
    let mut delta = to_hours - from_hours;
    if delta > 12.0 {
        delta -= 24.0;
    } else if delta < -12.0 {
        delta += 24.0;
    }
    (from_hours + delta * factor).rem_euclid(24.0)
}

fn lerp(from: f64, to: f64, factor: f64) -> f64 {
    from + (to - from) * factor
}

/// The loaded, immutable position table
///
/// Loaded once per process; never mutated at runtime.
pub struct PositionTable {
    ranges: Vec<PositionRange>,
}

impl PositionTable {
    /// Parse a table from TOML text and validate range ordering
    pub fn from_toml_str(content: &str) -> Result<Self, TableError> {
        let raw: RawTable = toml::from_str(content)?;

        if raw.ranges.is_empty() {
            return Err(TableError::Empty);
        }

        let ranges: Vec<PositionRange> = raw
            .ranges
            .into_iter()
            .map(|range| PositionRange {
                start: range.start,
                end: range.end,
                positions: range
                    .bodies
                    .into_iter()
                    .map(|body| {
                        (
                            body.name,
                            BodyPosition {
                                ra_hours: body.ra_hours,
                                dec_degrees: body.dec_degrees,
                                magnitude: body.magnitude,
                                distance_au: body.distance_au,
                            },
                        )
                    })
                    .collect(),
            })
            .collect();

        for (index, range) in ranges.iter().enumerate() {
            if range.end < range.start {
                return Err(TableError::Unordered { index });
            }
            if index + 1 < ranges.len() && ranges[index + 1].start < range.end {
                return Err(TableError::Unordered { index: index + 1 });
            }
        }

        tracing::debug!(
            "Loaded position table with {} ranges ({} to {})",
            ranges.len(),
            ranges[0].start,
            ranges[ranges.len() - 1].end
        );

        Ok(Self { ranges })
    }

    /// The table bundled into the binary
    pub fn bundled() -> Result<Self, TableError> {
        Self::from_toml_str(BUNDLED_POSITIONS)
    }

    /// Load a table from an external TOML file
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        let table = Self::from_toml_str(&content)?;
        tracing::info!(
            "Loaded position table from {}",
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Interpolated entry for `body_name` on `date`
    ///
    /// Dates before the first or after the last range clamp to the nearest
    /// boundary value without interpolation.
    fn entry(&self, body_name: &str, date: NaiveDate) -> Option<CatalogEntry> {
        if self.ranges.is_empty() {
            return None;
        }

        let index = self.ranges.partition_point(|range| range.end <= date);

        // Past the last range: clamp to the last known value
        if index == self.ranges.len() {
            let (name, position) = self.ranges[self.ranges.len() - 1].position(body_name)?;
            return Some(to_entry(name, *position));
        }

        let range = &self.ranges[index];

        // Before the first range (or inside a gap): clamp, no interpolation
        if date < range.start {
            let (name, position) = range.position(body_name)?;
            return Some(to_entry(name, *position));
        }

        let (name, position) = range.position(body_name)?;

        let next_position = self
            .ranges
            .get(index + 1)
            .and_then(|next| next.position(body_name))
            .map(|(_, position)| *position);

        let interpolated = match next_position {
            Some(next) => {
                let range_length_days = (range.end - range.start).num_days();
                let factor = if range_length_days == 0 {
                    0.0
                } else {
                    (date - range.start).num_days() as f64 / range_length_days as f64
                };

                BodyPosition {
                    ra_hours: interpolate_right_ascension(position.ra_hours, next.ra_hours, factor),
                    dec_degrees: lerp(position.dec_degrees, next.dec_degrees, factor),
                    magnitude: lerp(position.magnitude, next.magnitude, factor),
                    distance_au: lerp(position.distance_au, next.distance_au, factor),
                }
            }
            None => *position,
        };

        Some(to_entry(name, interpolated))
    }
}

fn to_entry(name: &str, position: BodyPosition) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        kind: BodyKind::Planet,
        right_ascension_hours: position.ra_hours,
        declination_degrees: position.dec_degrees,
        magnitude: position.magnitude,
        distance: position.distance_au,
        distance_unit: "AU",
    }
}

impl PositionSource for PositionTable {
    fn lookup(&self, body_name: &str, date: NaiveDate) -> Option<CatalogEntry> {
        self.entry(body_name, date)
    }

    fn body_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .ranges
            .iter()
            .flat_map(|range| range.positions.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
