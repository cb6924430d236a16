//! Risk Types
//!
//! Core types for severity labeling.
//! No scoring logic here - only data structures.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// ATTRIBUTE RECORD
// ============================================================================

/// One accident situation, either synthesized or received from a caller.
///
/// Defaults mirror the documented defaults of the prediction request, so a
/// partially filled JSON object deserializes into a complete record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeRecord {
    pub state_name: String,
    pub city_name: String,
    pub year: i64,
    pub month: String,
    pub day_of_week: String,
    /// "H:MM" or "HH:MM", parsed leniently
    pub time_of_day: String,
    pub num_vehicles: i64,
    pub vehicle_type: String,
    pub weather: String,
    pub road_type: String,
    pub road_condition: String,
    pub lighting: String,
    pub traffic_control: String,
    pub speed_limit: i64,
    pub driver_age: i64,
    pub driver_gender: String,
    pub license_status: String,
    pub alcohol: String,
    pub location_detail: String,
}

impl Default for AttributeRecord {
    fn default() -> Self {
        Self {
            state_name: "Unknown".to_string(),
            city_name: "Unknown".to_string(),
            year: 2024,
            month: "January".to_string(),
            day_of_week: "Monday".to_string(),
            time_of_day: "12:00".to_string(),
            num_vehicles: 1,
            vehicle_type: "Car".to_string(),
            weather: "Clear".to_string(),
            road_type: "Urban Road".to_string(),
            road_condition: "Dry".to_string(),
            lighting: "Daylight".to_string(),
            traffic_control: "Signs".to_string(),
            speed_limit: 50,
            driver_age: 35,
            driver_gender: "Male".to_string(),
            license_status: "Valid".to_string(),
            alcohol: "No".to_string(),
            location_detail: "Straight Road".to_string(),
        }
    }
}

// ============================================================================
// SEVERITY LABEL
// ============================================================================

/// Severity classes, closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeverityLabel {
    Minor,
    Serious,
    Fatal,
}

impl SeverityLabel {
    pub const ALL: [SeverityLabel; 3] = [
        SeverityLabel::Minor,
        SeverityLabel::Serious,
        SeverityLabel::Fatal,
    ];

    /// Label as written to the corpus file
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLabel::Minor => "Minor",
            SeverityLabel::Serious => "Serious",
            SeverityLabel::Fatal => "Fatal",
        }
    }
}

impl std::fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unrecognized severity label text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl std::fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown severity label: {:?}", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

impl FromStr for SeverityLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minor" => Ok(SeverityLabel::Minor),
            "serious" => Ok(SeverityLabel::Serious),
            "fatal" => Ok(SeverityLabel::Fatal),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

// ============================================================================
// VERDICT
// ============================================================================

/// Outcome of classifying a risk value.
///
/// `Rejected` means the risk fell in a dead zone; the caller discards the
/// record and synthesizes a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted(SeverityLabel),
    Rejected,
}

impl Verdict {
    pub fn label(&self) -> Option<SeverityLabel> {
        match self {
            Verdict::Accepted(label) => Some(*label),
            Verdict::Rejected => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Verdict::Rejected)
    }
}

// ============================================================================
// SCORE BREAKDOWN
// ============================================================================

/// Per-factor contributions that make up a risk score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub weather: f64,
    pub road_condition: f64,
    pub lighting: f64,
    pub road_type: f64,
    pub vehicle: f64,
    pub location: f64,
    pub speed: f64,
    pub age: f64,
    pub alcohol: f64,
    pub license: f64,
    pub vehicles: f64,
    pub night: f64,
}

impl ScoreBreakdown {
    /// Sum of all contributions.
    ///
    /// Summation order is fixed; changing it can move a boundary value across
    /// a threshold by one ulp.
    pub fn total(&self) -> f64 {
        let mut risk = 0.0;
        risk += self.weather;
        risk += self.road_condition;
        risk += self.lighting;
        risk += self.road_type;
        risk += self.vehicle;
        risk += self.location;
        risk += self.speed;
        risk += self.age;
        risk += self.alcohol;
        risk += self.license;
        risk += self.vehicles;
        risk += self.night;
        risk
    }
}
