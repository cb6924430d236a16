//! Risk Scorer
//!
//! Pure, deterministic risk score for an attribute record.
//! Input: AttributeRecord (+ RiskTables)
//! Output: unclamped non-negative f64

use crate::logic::features::time::parse_hour;

use super::rules::{
    is_night_hour, MULTI_VEHICLES, MULTI_VEHICLE_BONUS, NIGHT_BONUS, PILEUP_BONUS,
    PILEUP_VEHICLES, SENIOR_DRIVER_AGE, SENIOR_DRIVER_BONUS, SPEED_BANDS, YOUNG_DRIVER_AGE,
    YOUNG_DRIVER_BONUS,
};
use super::tables::RiskTables;
use super::types::{AttributeRecord, ScoreBreakdown};

/// Risk score against the standard tables
pub fn score(record: &AttributeRecord) -> f64 {
    score_with_tables(record, RiskTables::standard())
}

pub fn score_with_tables(record: &AttributeRecord, tables: &RiskTables) -> f64 {
    breakdown(record, tables).total()
}

/// Every contribution of the score, separately
pub fn breakdown(record: &AttributeRecord, tables: &RiskTables) -> ScoreBreakdown {
    ScoreBreakdown {
        weather: tables.weather.lookup(&record.weather),
        road_condition: tables.road_condition.lookup(&record.road_condition),
        lighting: tables.lighting.lookup(&record.lighting),
        road_type: tables.road_type.lookup(&record.road_type),
        vehicle: tables.vehicle.lookup(&record.vehicle_type),
        location: tables.location.lookup(&record.location_detail),
        speed: speed_bonus(record.speed_limit),
        age: age_bonus(record.driver_age),
        alcohol: tables.alcohol(&record.alcohol),
        license: tables.license.lookup(&record.license_status),
        vehicles: vehicle_count_bonus(record.num_vehicles),
        night: night_bonus(parse_hour(&record.time_of_day)),
    }
}

pub fn speed_bonus(speed: i64) -> f64 {
    SPEED_BANDS
        .iter()
        .find(|(floor, _)| speed > *floor)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0.0)
}

pub fn age_bonus(age: i64) -> f64 {
    if age < YOUNG_DRIVER_AGE {
        YOUNG_DRIVER_BONUS
    } else if age > SENIOR_DRIVER_AGE {
        SENIOR_DRIVER_BONUS
    } else {
        0.0
    }
}

pub fn vehicle_count_bonus(count: i64) -> f64 {
    if count >= PILEUP_VEHICLES {
        PILEUP_BONUS
    } else if count >= MULTI_VEHICLES {
        MULTI_VEHICLE_BONUS
    } else {
        0.0
    }
}

pub fn night_bonus(hour: u32) -> f64 {
    if is_night_hour(hour) {
        NIGHT_BONUS
    } else {
        0.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
