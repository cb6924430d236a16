//! Accident severity core: rule-based labeling, corpus synthesis, the shared
//! feature builder, training and the prediction service.

pub mod constants;
pub mod logic;

pub use logic::features::{build_features, FeatureVector};
pub use logic::model::{ModelMeta, Prediction, PredictionService};
pub use logic::risk::{AttributeRecord, SeverityLabel};
