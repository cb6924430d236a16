use serde::{Deserialize, Serialize};

use crate::logic::generator::CorpusEntry;
use crate::logic::risk::AttributeRecord;

/// Column order of the corpus CSV
pub const CORPUS_HEADERS: [&str; 22] = [
    "State Name",
    "City Name",
    "Year",
    "Month",
    "Day of Week",
    "Time of Day",
    "Accident Severity",
    "Number of Vehicles Involved",
    "Vehicle Type Involved",
    "Number of Casualties",
    "Number of Fatalities",
    "Weather Conditions",
    "Road Type",
    "Road Condition",
    "Lighting Conditions",
    "Traffic Control Presence",
    "Speed Limit (km/h)",
    "Driver Age",
    "Driver Gender",
    "Driver License Status",
    "Alcohol Involvement",
    "Accident Location Details",
];

// Fallbacks for missing or non-numeric corpus cells
pub const FALLBACK_SPEED_LIMIT: i64 = 50;
pub const FALLBACK_DRIVER_AGE: i64 = 35;
pub const FALLBACK_NUM_VEHICLES: i64 = 1;
pub const FALLBACK_YEAR: i64 = 2024;

/// One written corpus row. Field order matches `CORPUS_HEADERS`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CorpusRow {
    #[serde(rename = "State Name")]
    pub state_name: String,
    #[serde(rename = "City Name")]
    pub city_name: String,
    #[serde(rename = "Year")]
    pub year: i64,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Day of Week")]
    pub day_of_week: String,
    #[serde(rename = "Time of Day")]
    pub time_of_day: String,
    #[serde(rename = "Accident Severity")]
    pub severity: String,
    #[serde(rename = "Number of Vehicles Involved")]
    pub num_vehicles: i64,
    #[serde(rename = "Vehicle Type Involved")]
    pub vehicle_type: String,
    #[serde(rename = "Number of Casualties")]
    pub casualties: u32,
    #[serde(rename = "Number of Fatalities")]
    pub fatalities: u32,
    #[serde(rename = "Weather Conditions")]
    pub weather: String,
    #[serde(rename = "Road Type")]
    pub road_type: String,
    #[serde(rename = "Road Condition")]
    pub road_condition: String,
    #[serde(rename = "Lighting Conditions")]
    pub lighting: String,
    #[serde(rename = "Traffic Control Presence")]
    pub traffic_control: String,
    #[serde(rename = "Speed Limit (km/h)")]
    pub speed_limit: i64,
    #[serde(rename = "Driver Age")]
    pub driver_age: i64,
    #[serde(rename = "Driver Gender")]
    pub driver_gender: String,
    #[serde(rename = "Driver License Status")]
    pub license_status: String,
    #[serde(rename = "Alcohol Involvement")]
    pub alcohol: String,
    #[serde(rename = "Accident Location Details")]
    pub location_detail: String,
}

impl From<&CorpusEntry> for CorpusRow {
    fn from(entry: &CorpusEntry) -> Self {
        let r = &entry.record;
        Self {
            state_name: r.state_name.clone(),
            city_name: r.city_name.clone(),
            year: r.year,
            month: r.month.clone(),
            day_of_week: r.day_of_week.clone(),
            time_of_day: r.time_of_day.clone(),
            severity: entry.label.to_string(),
            num_vehicles: r.num_vehicles,
            vehicle_type: r.vehicle_type.clone(),
            casualties: entry.counts.casualties,
            fatalities: entry.counts.fatalities,
            weather: r.weather.clone(),
            road_type: r.road_type.clone(),
            road_condition: r.road_condition.clone(),
            lighting: r.lighting.clone(),
            traffic_control: r.traffic_control.clone(),
            speed_limit: r.speed_limit,
            driver_age: r.driver_age,
            driver_gender: r.driver_gender.clone(),
            license_status: r.license_status.clone(),
            alcohol: r.alcohol.clone(),
            location_detail: r.location_detail.clone(),
        }
    }
}

/// Lenient view of a corpus row: every cell is optional text.
///
/// Hand-edited or externally produced corpora may have blanks or
/// non-numeric cells; `into_record` applies the training-path fallbacks.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawCorpusRow {
    #[serde(rename = "State Name")]
    pub state_name: Option<String>,
    #[serde(rename = "City Name")]
    pub city_name: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Month")]
    pub month: Option<String>,
    #[serde(rename = "Day of Week")]
    pub day_of_week: Option<String>,
    #[serde(rename = "Time of Day")]
    pub time_of_day: Option<String>,
    #[serde(rename = "Accident Severity")]
    pub severity: Option<String>,
    #[serde(rename = "Number of Vehicles Involved")]
    pub num_vehicles: Option<String>,
    #[serde(rename = "Vehicle Type Involved")]
    pub vehicle_type: Option<String>,
    #[serde(rename = "Number of Casualties")]
    pub casualties: Option<String>,
    #[serde(rename = "Number of Fatalities")]
    pub fatalities: Option<String>,
    #[serde(rename = "Weather Conditions")]
    pub weather: Option<String>,
    #[serde(rename = "Road Type")]
    pub road_type: Option<String>,
    #[serde(rename = "Road Condition")]
    pub road_condition: Option<String>,
    #[serde(rename = "Lighting Conditions")]
    pub lighting: Option<String>,
    #[serde(rename = "Traffic Control Presence")]
    pub traffic_control: Option<String>,
    #[serde(rename = "Speed Limit (km/h)")]
    pub speed_limit: Option<String>,
    #[serde(rename = "Driver Age")]
    pub driver_age: Option<String>,
    #[serde(rename = "Driver Gender")]
    pub driver_gender: Option<String>,
    #[serde(rename = "Driver License Status")]
    pub license_status: Option<String>,
    #[serde(rename = "Alcohol Involvement")]
    pub alcohol: Option<String>,
    #[serde(rename = "Accident Location Details")]
    pub location_detail: Option<String>,
}

impl RawCorpusRow {
    /// Severity text, if the row has one
    pub fn label(&self) -> Option<&str> {
        self.severity
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Build the attribute record, coercing numerics with fallbacks.
    /// Missing categorical cells become empty strings (zero risk).
    pub fn into_record(self) -> AttributeRecord {
        AttributeRecord {
            state_name: self.state_name.unwrap_or_default(),
            city_name: self.city_name.unwrap_or_default(),
            year: coerce_int(self.year.as_deref(), FALLBACK_YEAR),
            month: self.month.unwrap_or_default(),
            day_of_week: self.day_of_week.unwrap_or_default(),
            time_of_day: self.time_of_day.unwrap_or_default(),
            num_vehicles: coerce_int(self.num_vehicles.as_deref(), FALLBACK_NUM_VEHICLES),
            vehicle_type: self.vehicle_type.unwrap_or_default(),
            weather: self.weather.unwrap_or_default(),
            road_type: self.road_type.unwrap_or_default(),
            road_condition: self.road_condition.unwrap_or_default(),
            lighting: self.lighting.unwrap_or_default(),
            traffic_control: self.traffic_control.unwrap_or_default(),
            speed_limit: coerce_int(self.speed_limit.as_deref(), FALLBACK_SPEED_LIMIT),
            driver_age: coerce_int(self.driver_age.as_deref(), FALLBACK_DRIVER_AGE),
            driver_gender: self.driver_gender.unwrap_or_default(),
            license_status: self.license_status.unwrap_or_default(),
            alcohol: self.alcohol.unwrap_or_default(),
            location_detail: self.location_detail.unwrap_or_default(),
        }
    }
}

/// Numeric cell to integer: parsed as a float and truncated, fallback when
/// missing, non-numeric or non-finite.
pub fn coerce_int(cell: Option<&str>, fallback: i64) -> i64 {
    cell.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_int() {
        assert_eq!(coerce_int(Some("80"), 50), 80);
        assert_eq!(coerce_int(Some(" 80 "), 50), 80);
        assert_eq!(coerce_int(Some("80.9"), 50), 80);
        assert_eq!(coerce_int(Some("-3.7"), 50), -3);
        assert_eq!(coerce_int(Some("fast"), 50), 50);
        assert_eq!(coerce_int(Some(""), 50), 50);
        assert_eq!(coerce_int(Some("NaN"), 50), 50);
        assert_eq!(coerce_int(None, 35), 35);
    }

    #[test]
    fn test_blank_raw_row_uses_fallbacks() {
        let record = RawCorpusRow::default().into_record();
        assert_eq!(record.speed_limit, FALLBACK_SPEED_LIMIT);
        assert_eq!(record.driver_age, FALLBACK_DRIVER_AGE);
        assert_eq!(record.num_vehicles, FALLBACK_NUM_VEHICLES);
        assert_eq!(record.weather, "");
    }

    #[test]
    fn test_label_requires_text() {
        let mut row = RawCorpusRow::default();
        assert_eq!(row.label(), None);
        row.severity = Some("  ".to_string());
        assert_eq!(row.label(), None);
        row.severity = Some("Fatal".to_string());
        assert_eq!(row.label(), Some("Fatal"));
    }
}
