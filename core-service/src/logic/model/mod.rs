//! Model Module - Classifier, Artifact & Serving
//!
//! The classifier contract and its default implementation, plus everything
//! around it: preprocessing, label encoding, persistence, prediction.
//!
//! ## Structure
//! - `classifier`: `Classifier` trait, `ModelError`, accuracy helpers
//! - `scaler`: Standard scaler
//! - `encoder`: Label encoder
//! - `gbm`: Softmax gradient boosted trees
//! - `pipeline`: Scaler + trees as one `Classifier`
//! - `artifact`: Bundle save/load with checksum, layout and table checks
//! - `meta`: Training metadata
//! - `predictor`: Immutable prediction service

pub mod classifier;
pub mod scaler;
pub mod encoder;
pub mod gbm;
pub mod pipeline;
pub mod artifact;
pub mod meta;
pub mod predictor;

#[cfg(test)]
mod tests;

pub use artifact::{ArtifactError, ModelBundle};
pub use classifier::{accuracy, argmax, Classifier, ModelError};
pub use encoder::LabelEncoder;
pub use gbm::{GbmParams, GradientBoostedTrees};
pub use meta::{round4, ModelMeta};
pub use pipeline::Pipeline;
pub use predictor::{Prediction, PredictionService};
pub use scaler::StandardScaler;
