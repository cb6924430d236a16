//! Severity Rules & Thresholds
//!
//! Numeric bonuses and label thresholds.
//! No scoring logic here - only constants and config.

use serde::{Deserialize, Serialize};

// ============================================================================
// SPEED
// ============================================================================

/// Speed bands as (exclusive lower bound km/h, bonus), highest first.
/// First matching band wins; bands never stack.
pub const SPEED_BANDS: &[(i64, f64)] = &[(100, 0.14), (80, 0.08), (60, 0.04)];

// ============================================================================
// DRIVER AGE
// ============================================================================

/// Drivers younger than this get `YOUNG_DRIVER_BONUS`
pub const YOUNG_DRIVER_AGE: i64 = 22;
pub const YOUNG_DRIVER_BONUS: f64 = 0.06;

/// Drivers older than this get `SENIOR_DRIVER_BONUS`
pub const SENIOR_DRIVER_AGE: i64 = 60;
pub const SENIOR_DRIVER_BONUS: f64 = 0.05;

// ============================================================================
// VEHICLE COUNT
// ============================================================================

pub const PILEUP_VEHICLES: i64 = 4;
pub const PILEUP_BONUS: f64 = 0.06;

pub const MULTI_VEHICLES: i64 = 3;
pub const MULTI_VEHICLE_BONUS: f64 = 0.03;

// ============================================================================
// NIGHT HOURS
// ============================================================================

/// Last hour of the early-morning window (0..=4)
pub const NIGHT_END_HOUR: u32 = 4;

/// First hour of the late-evening window (22..=23)
pub const NIGHT_START_HOUR: u32 = 22;

pub const NIGHT_BONUS: f64 = 0.04;

pub fn is_night_hour(hour: u32) -> bool {
    hour <= NIGHT_END_HOUR || hour >= NIGHT_START_HOUR
}

// ============================================================================
// LABEL THRESHOLDS
// ============================================================================

/// Below this = Minor
pub const MINOR_MAX: f64 = 0.28;

/// Serious band is [SERIOUS_MIN, SERIOUS_MAX)
pub const SERIOUS_MIN: f64 = 0.40;
pub const SERIOUS_MAX: f64 = 0.56;

/// At or above this = Fatal
pub const FATAL_MIN: f64 = 0.68;

/// Label thresholds.
///
/// `[minor_max, serious_min)` and `[serious_max, fatal_min)` are dead zones:
/// no label is ever assigned there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    pub minor_max: f64,
    pub serious_min: f64,
    pub serious_max: f64,
    pub fatal_min: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            minor_max: MINOR_MAX,
            serious_min: SERIOUS_MIN,
            serious_max: SERIOUS_MAX,
            fatal_min: FATAL_MIN,
        }
    }
}

impl SeverityThresholds {
    pub fn in_dead_zone(&self, risk: f64) -> bool {
        (risk >= self.minor_max && risk < self.serious_min)
            || (risk >= self.serious_max && risk < self.fatal_min)
    }
}
