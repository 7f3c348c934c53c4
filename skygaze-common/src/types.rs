///! Shared data types for the sky report pipeline
///!
///! These types cross the boundary between the computation engine and the
///! presentation layer: observer input, per-body timing/position output,
///! and the visibility status taxonomy.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Observer position on Earth
///
/// The timezone offset is approximated from longitude (15 degrees per hour);
/// no timezone database is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverContext {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,

    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,

    /// Approximate UTC offset in whole hours, derived as round(longitude / 15)
    pub timezone_offset_hours: i32,
}

impl ObserverContext {
    /// Create an observer context, deriving the timezone offset from longitude
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            timezone_offset_hours: (longitude / 15.0).round() as i32,
        }
    }

    /// The observer's approximate fixed UTC offset
    pub fn fixed_offset(&self) -> FixedOffset {
        // Offsets derived from a valid longitude are within +/-12 h
        FixedOffset::east_opt(self.timezone_offset_hours * 3600).unwrap()
    }

    /// Convert a UTC instant into the observer's approximate local time
    pub fn to_local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.fixed_offset())
    }
}

/// Body category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    #[serde(rename = "star")]
    Star,
    #[serde(rename = "planet")]
    Planet,
    #[serde(rename = "moon")]
    Moon,
}

impl BodyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
            BodyKind::Moon => "moon",
        }
    }
}

impl std::fmt::Display for BodyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BodyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "star" => Ok(BodyKind::Star),
            "planet" => Ok(BodyKind::Planet),
            "moon" => Ok(BodyKind::Moon),
            _ => Err(format!("Unknown body kind: {}", s)),
        }
    }
}

/// Apparent position in the observer's sky
///
/// Derived on demand; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyPosition {
    /// Altitude above the horizon in degrees (-90 to 90)
    pub altitude_degrees: f64,

    /// Azimuth in degrees (0 = North, 90 = East), normalized to [0, 360)
    pub azimuth_degrees: f64,
}

/// Rise, transit and set instants for one body on one local day
///
/// All times are offset-applied local times. A circumpolar body that never
/// sets (or never rises) has `rise_time` and `set_time` absent while
/// `transit_time` stays defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rise_time: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_time: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_time: Option<DateTime<FixedOffset>>,
}

impl TimingRecord {
    /// Record with no timing data at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when all three instants are present
    pub fn is_complete(&self) -> bool {
        self.rise_time.is_some() && self.set_time.is_some() && self.transit_time.is_some()
    }

    /// True when no instant is present
    pub fn is_empty(&self) -> bool {
        self.rise_time.is_none() && self.set_time.is_none() && self.transit_time.is_none()
    }

    /// Fill absent fields from a lower-priority record
    ///
    /// Fields already present are never overwritten.
    pub fn merge_missing(&mut self, other: &TimingRecord) {
        if self.rise_time.is_none() {
            self.rise_time = other.rise_time;
        }
        if self.set_time.is_none() {
            self.set_time = other.set_time;
        }
        if self.transit_time.is_none() {
            self.transit_time = other.transit_time;
        }
    }
}

/// Recommended observing window for one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewingWindow {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,

    /// Instant of highest altitude (the transit time)
    pub peak_time: DateTime<FixedOffset>,
}

/// Coarse visibility classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisibilityStatus {
    #[serde(rename = "visible")]
    Visible,
    #[serde(rename = "rising")]
    Rising,
    #[serde(rename = "below")]
    Below,
    #[serde(rename = "daylight")]
    Daylight,
}

impl VisibilityStatus {
    /// Short badge label for card headers
    pub fn badge(&self) -> &'static str {
        match self {
            VisibilityStatus::Visible => "Visible now",
            VisibilityStatus::Rising => "Rising soon",
            VisibilityStatus::Below => "Below horizon",
            VisibilityStatus::Daylight => "Daytime",
        }
    }

    /// Foreground hex color for rendering
    pub fn to_color_hex(&self) -> &'static str {
        match self {
            VisibilityStatus::Visible => "#22c55e",
            VisibilityStatus::Rising => "#facc15",
            VisibilityStatus::Below => "#94a3b8",
            VisibilityStatus::Daylight => "#38bdf8",
        }
    }

    /// Background hex color for rendering
    pub fn to_background_hex(&self) -> &'static str {
        match self {
            VisibilityStatus::Visible => "#14532d",
            VisibilityStatus::Rising => "#713f12",
            VisibilityStatus::Below => "#1e293b",
            VisibilityStatus::Daylight => "#0c4a6e",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VisibilityStatus::Visible => "visible",
            VisibilityStatus::Rising => "rising",
            VisibilityStatus::Below => "below",
            VisibilityStatus::Daylight => "daylight",
        }
    }
}

impl std::fmt::Display for VisibilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VisibilityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "visible" => Ok(VisibilityStatus::Visible),
            "rising" => Ok(VisibilityStatus::Rising),
            "below" => Ok(VisibilityStatus::Below),
            "daylight" => Ok(VisibilityStatus::Daylight),
            _ => Err(format!("Unknown visibility status: {}", s)),
        }
    }
}

/// Merged per-body output record
///
/// One entry per catalog body, assembled fresh for every
/// (observer, timestamp) request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyReport {
    pub name: String,
    pub kind: BodyKind,

    /// Catalog right ascension in hours [0, 24)
    pub right_ascension_hours: f64,

    /// Catalog declination in degrees
    pub declination_degrees: f64,

    /// Current altitude in degrees
    pub altitude_degrees: f64,

    /// Current azimuth in degrees [0, 360)
    pub azimuth_degrees: f64,

    /// Apparent visual magnitude
    pub magnitude: f64,

    /// Distance from the observer in `distance_unit`
    pub distance: f64,
    pub distance_unit: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rise_time: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_time: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_time: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_viewing_start: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_viewing_end: Option<DateTime<FixedOffset>>,

    pub status: VisibilityStatus,
    pub status_message: String,
}

/// Complete sky report for one observer at one instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkyReport {
    pub generated_at: DateTime<Utc>,
    pub observer: ObserverContext,
    pub bodies: Vec<BodyReport>,

    /// Illuminated fraction of the Moon's disk, percent
    pub moon_illumination_percent: u8,
}
