//! Prediction request model

use serde::{Deserialize, Serialize};
use severity_core::logic::risk::AttributeRecord;

/// Prediction request. Every field is optional on the wire; omitted fields
/// take the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionRequest {
    pub state_name: String,
    pub city_name: String,
    pub year: i64,
    pub month: String,
    pub day_of_week: String,
    pub time_of_day: String,
    pub num_vehicles: i64,
    pub vehicle_type: String,
    /// Accepted for compatibility, not a model input
    pub num_casualties: i64,
    /// Accepted for compatibility, not a model input
    pub num_fatalities: i64,
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

impl Default for PredictionRequest {
    fn default() -> Self {
        let record = AttributeRecord::default();
        Self {
            state_name: record.state_name,
            city_name: record.city_name,
            year: record.year,
            month: record.month,
            day_of_week: record.day_of_week,
            time_of_day: record.time_of_day,
            num_vehicles: record.num_vehicles,
            vehicle_type: record.vehicle_type,
            num_casualties: 0,
            num_fatalities: 0,
            weather: record.weather,
            road_type: record.road_type,
            road_condition: record.road_condition,
            lighting: record.lighting,
            traffic_control: record.traffic_control,
            speed_limit: record.speed_limit,
            driver_age: record.driver_age,
            driver_gender: record.driver_gender,
            license_status: record.license_status,
            alcohol: record.alcohol,
            location_detail: record.location_detail,
        }
    }
}

impl From<PredictionRequest> for AttributeRecord {
    fn from(req: PredictionRequest) -> Self {
        Self {
            state_name: req.state_name,
            city_name: req.city_name,
            year: req.year,
            month: req.month,
            day_of_week: req.day_of_week,
            time_of_day: req.time_of_day,
            num_vehicles: req.num_vehicles,
            vehicle_type: req.vehicle_type,
            weather: req.weather,
            road_type: req.road_type,
            road_condition: req.road_condition,
            lighting: req.lighting,
            traffic_control: req.traffic_control,
            speed_limit: req.speed_limit,
            driver_age: req.driver_age,
            driver_gender: req.driver_gender,
            license_status: req.license_status,
            alcohol: req.alcohol,
            location_detail: req.location_detail,
        }
    }
}
