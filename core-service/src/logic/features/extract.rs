//! Feature extraction
//!
//! The one function that turns an AttributeRecord into classifier input.
//! Training (corpus -> matrix) and serving (request -> input row) both call
//! `build_features`; nothing else may assemble a vector by hand.

use ndarray::Array2;

use crate::logic::risk::{AttributeRecord, RiskTables};

use super::layout::FEATURE_COUNT;
use super::time::parse_hour;
use super::vector::{FeatureVector, FeatureVectorBuilder};

/// Build the feature vector against the standard risk tables
pub fn build_features(record: &AttributeRecord) -> FeatureVector {
    build_features_with_tables(record, RiskTables::standard())
}

pub fn build_features_with_tables(record: &AttributeRecord, tables: &RiskTables) -> FeatureVector {
    FeatureVectorBuilder::new()
        .weather_risk(tables.weather.lookup(&record.weather))
        .road_cond_risk(tables.road_condition.lookup(&record.road_condition))
        .lighting_risk(tables.lighting.lookup(&record.lighting))
        .road_type_risk(tables.road_type.lookup(&record.road_type))
        .vehicle_risk(tables.vehicle.lookup(&record.vehicle_type))
        .location_risk(tables.location.lookup(&record.location_detail))
        .alcohol_risk(tables.alcohol(&record.alcohol))
        .license_risk(tables.license.lookup(&record.license_status))
        .hour(parse_hour(&record.time_of_day))
        .speed_limit(record.speed_limit)
        .driver_age(record.driver_age)
        .num_vehicles(record.num_vehicles)
        .build()
}

/// Stack feature vectors into an (n, FEATURE_COUNT) matrix, row per record
pub fn build_matrix<'a, I>(records: I) -> Array2<f64>
where
    I: IntoIterator<Item = &'a AttributeRecord>,
{
    let mut data = Vec::new();
    let mut rows = 0;
    for record in records {
        data.extend_from_slice(build_features(record).as_slice());
        rows += 1;
    }

    let mut matrix = Array2::<f64>::zeros((rows, FEATURE_COUNT));
    for (cell, value) in matrix.iter_mut().zip(data) {
        *cell = value;
    }
    matrix
}

/// Single-row matrix for one vector
pub fn to_row(vector: &FeatureVector) -> Array2<f64> {
    let mut row = Array2::<f64>::zeros((1, FEATURE_COUNT));
    for (cell, value) in row.iter_mut().zip(vector.as_slice()) {
        *cell = *value;
    }
    row
}
