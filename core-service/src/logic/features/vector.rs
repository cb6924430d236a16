//! Feature Vector - Core data structure for classifier input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks

use serde::{Deserialize, Serialize};

use super::layout::{
    feature_index, layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT,
    FEATURE_LAYOUT, FEATURE_VERSION,
};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Zeroed vector with current version
    pub fn new() -> Self {
        Self::from_values([0.0; FEATURE_COUNT])
    }

    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    pub fn set(&mut self, index: usize, value: f64) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    pub fn set_by_name(&mut self, name: &str, value: f64) -> bool {
        if let Some(index) = feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    pub fn is_compatible(&self) -> bool {
        self.validate().is_ok()
    }

    /// JSON form for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self { vector: FeatureVector::new() }
    }

    // Categorical risk
    pub fn weather_risk(mut self, value: f64) -> Self {
        self.vector.set_by_name("weather_risk", value);
        self
    }

    pub fn road_cond_risk(mut self, value: f64) -> Self {
        self.vector.set_by_name("road_cond_risk", value);
        self
    }

    pub fn lighting_risk(mut self, value: f64) -> Self {
        self.vector.set_by_name("lighting_risk", value);
        self
    }

    pub fn road_type_risk(mut self, value: f64) -> Self {
        self.vector.set_by_name("road_type_risk", value);
        self
    }

    pub fn vehicle_risk(mut self, value: f64) -> Self {
        self.vector.set_by_name("vehicle_risk", value);
        self
    }

    pub fn location_risk(mut self, value: f64) -> Self {
        self.vector.set_by_name("location_risk", value);
        self
    }

    // Driver risk
    pub fn alcohol_risk(mut self, value: f64) -> Self {
        self.vector.set_by_name("alcohol_risk", value);
        self
    }

    pub fn license_risk(mut self, value: f64) -> Self {
        self.vector.set_by_name("license_risk", value);
        self
    }

    // Raw numerics
    pub fn hour(mut self, value: u32) -> Self {
        self.vector.set_by_name("hour", f64::from(value));
        self
    }

    pub fn speed_limit(mut self, value: i64) -> Self {
        self.vector.set_by_name("speed_limit", value as f64);
        self
    }

    pub fn driver_age(mut self, value: i64) -> Self {
        self.vector.set_by_name("driver_age", value as f64);
        self
    }

    pub fn num_vehicles(mut self, value: i64) -> Self {
        self.vector.set_by_name("num_vehicles", value as f64);
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
