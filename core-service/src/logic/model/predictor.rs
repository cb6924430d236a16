//! Prediction Service
//!
//! Loaded once, immutable afterwards. Request record -> shared feature
//! builder -> classifier -> lowercased label with rounded probabilities.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logic::features::{build_features, to_row};
use crate::logic::risk::AttributeRecord;

use super::artifact::{ArtifactError, ModelBundle};
use super::classifier::{argmax, Classifier, ModelError};
use super::encoder::LabelEncoder;
use super::meta::round4;

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Lowercased label
    pub prediction: String,
    /// Probability of the predicted label, 4 dp
    pub confidence: f64,
    /// Every class, lowercased, 4 dp
    pub probabilities: BTreeMap<String, f64>,
}

pub struct PredictionService {
    model: Box<dyn Classifier + Send + Sync>,
    encoder: LabelEncoder,
}

impl PredictionService {
    pub fn new(model: Box<dyn Classifier + Send + Sync>, encoder: LabelEncoder) -> Self {
        Self { model, encoder }
    }

    pub fn from_bundle(bundle: ModelBundle) -> Self {
        Self::new(Box::new(bundle.pipeline), bundle.label_encoder)
    }

    /// Fails if the artifact is missing, tampered with or stale
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        Ok(Self::from_bundle(ModelBundle::load(path)?))
    }

    pub fn classes(&self) -> &[String] {
        self.encoder.classes()
    }

    pub fn predict(&self, record: &AttributeRecord) -> Result<Prediction, ModelError> {
        let features = build_features(record);
        log::debug!("Prediction input: {}", features.to_log_entry());

        let proba = self.model.predict_proba(&to_row(&features))?;
        let row = proba.row(0);
        if row.len() != self.encoder.len() {
            return Err(ModelError::ShapeMismatch {
                expected: self.encoder.len(),
                actual: row.len(),
            });
        }

        let best = argmax(row);
        let mut probabilities = BTreeMap::new();
        for (index, p) in row.iter().enumerate() {
            probabilities.insert(self.encoder.decode(index)?.to_lowercase(), round4(*p));
        }

        Ok(Prediction {
            prediction: self.encoder.decode(best)?.to_lowercase(),
            confidence: round4(row[best]),
            probabilities,
        })
    }
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("classes", &self.encoder.classes())
            .finish_non_exhaustive()
    }
}
