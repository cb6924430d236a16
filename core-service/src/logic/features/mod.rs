//! Features Module - Feature Vector Construction
//!
//! Turns attribute records into the fixed-order numeric vector the classifier
//! consumes. Shared verbatim by training and serving.

pub mod layout;
pub mod time;
pub mod vector;
pub mod extract;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{LayoutInfo, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::{FeatureVector, FeatureVectorBuilder};
pub use extract::{build_features, build_features_with_tables, build_matrix, to_row};
pub use time::{parse_hour, parse_minute, TimeOfDay};
