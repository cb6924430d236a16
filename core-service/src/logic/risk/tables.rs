//! Risk Tables - Categorical risk contributions
//!
//! **This file is the only place the risk values are written down.**
//!
//! Both the severity scorer (corpus labels) and the feature builder (model
//! inputs) read from here. A second copy of any table would let labels and
//! features drift apart without any error being raised.
//!
//! Unknown values contribute `0`.

use std::collections::BTreeMap;

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// STANDARD VALUES
// ============================================================================

pub const WEATHER_RISK: &[(&str, f64)] = &[
    ("Clear", 0.0),
    ("Cloudy", 0.02),
    ("Hazy", 0.06),
    ("Rainy", 0.12),
    ("Foggy", 0.15),
    ("Stormy", 0.22),
];

pub const ROAD_CONDITION_RISK: &[(&str, f64)] = &[
    ("Dry", 0.0),
    ("Wet", 0.06),
    ("Damaged", 0.12),
    ("Under Construction", 0.10),
];

pub const LIGHTING_RISK: &[(&str, f64)] = &[
    ("Daylight", 0.0),
    ("Dusk", 0.04),
    ("Dawn", 0.05),
    ("Dark", 0.12),
];

pub const ROAD_TYPE_RISK: &[(&str, f64)] = &[
    ("Urban Road", 0.02),
    ("Village Road", 0.04),
    ("State Highway", 0.08),
    ("National Highway", 0.10),
    ("Expressway", 0.06),
];

pub const VEHICLE_RISK: &[(&str, f64)] = &[
    ("Cycle", 0.10),
    ("Pedestrian", 0.12),
    ("Two-Wheeler", 0.10),
    ("Auto-Rickshaw", 0.06),
    ("Car", 0.02),
    ("Bus", 0.04),
    ("Truck", 0.06),
];

pub const LOCATION_RISK: &[(&str, f64)] = &[
    ("Straight Road", 0.0),
    ("Curve", 0.06),
    ("Intersection", 0.08),
    ("T-Junction", 0.06),
    ("Bridge", 0.04),
    ("Flyover", 0.02),
];

pub const LICENSE_RISK: &[(&str, f64)] = &[
    ("Valid", 0.0),
    ("Expired", 0.03),
    ("None", 0.06),
];

/// Contribution when alcohol is involved
pub const ALCOHOL_RISK: f64 = 0.14;

/// Value of the alcohol field that counts as involvement
pub const ALCOHOL_INVOLVED: &str = "Yes";

static STANDARD: Lazy<RiskTables> = Lazy::new(RiskTables::build_standard);

// ============================================================================
// RISK TABLE
// ============================================================================

/// One categorical mapping, value -> contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskTable {
    entries: BTreeMap<String, f64>,
}

impl RiskTable {
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(name, risk)| (name.to_string(), *risk))
                .collect(),
        }
    }

    /// Contribution for `value`; exact, case-sensitive match, `0` if absent
    pub fn lookup(&self, value: &str) -> f64 {
        self.entries.get(value).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains_key(value)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn hash_into(&self, hasher: &mut Hasher) {
        for (name, risk) in &self.entries {
            hasher.update(name.as_bytes());
            hasher.update(&[0]);
            hasher.update(&risk.to_bits().to_le_bytes());
        }
    }
}

// ============================================================================
// RISK TABLES
// ============================================================================

/// Every categorical risk mapping used by scorer and feature builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskTables {
    pub weather: RiskTable,
    pub road_condition: RiskTable,
    pub lighting: RiskTable,
    pub road_type: RiskTable,
    pub vehicle: RiskTable,
    pub location: RiskTable,
    pub license: RiskTable,
    pub alcohol_risk: f64,
}

impl RiskTables {
    /// Process-wide standard tables
    pub fn standard() -> &'static RiskTables {
        &STANDARD
    }

    fn build_standard() -> Self {
        Self {
            weather: RiskTable::from_pairs(WEATHER_RISK),
            road_condition: RiskTable::from_pairs(ROAD_CONDITION_RISK),
            lighting: RiskTable::from_pairs(LIGHTING_RISK),
            road_type: RiskTable::from_pairs(ROAD_TYPE_RISK),
            vehicle: RiskTable::from_pairs(VEHICLE_RISK),
            location: RiskTable::from_pairs(LOCATION_RISK),
            license: RiskTable::from_pairs(LICENSE_RISK),
            alcohol_risk: ALCOHOL_RISK,
        }
    }

    /// Binary alcohol contribution
    pub fn alcohol(&self, value: &str) -> f64 {
        if value == ALCOHOL_INVOLVED {
            self.alcohol_risk
        } else {
            0.0
        }
    }

    /// CRC32 over every entry, in a fixed table order.
    ///
    /// Stored in model artifacts; a mismatch at load time means the model was
    /// trained against different tables than the ones serving it.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = Hasher::new();
        for (name, table) in self.named_tables() {
            hasher.update(name.as_bytes());
            hasher.update(&[0xff]);
            table.hash_into(&mut hasher);
        }
        hasher.update(&self.alcohol_risk.to_bits().to_le_bytes());
        hasher.finalize()
    }

    fn named_tables(&self) -> [(&'static str, &RiskTable); 7] {
        [
            ("weather", &self.weather),
            ("road_condition", &self.road_condition),
            ("lighting", &self.lighting),
            ("road_type", &self.road_type),
            ("vehicle", &self.vehicle),
            ("location", &self.location),
            ("license", &self.license),
        ]
    }
}

impl Default for RiskTables {
    fn default() -> Self {
        Self::standard().clone()
    }
}

// ============================================================================
// TESTS
// ============================================================================
