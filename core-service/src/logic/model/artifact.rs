//! Model artifact - fitted pipeline bundle on disk
//!
//! JSON body plus a `<path>.sha256` sidecar holding the hex digest of the
//! body. Loading verifies the digest, the feature layout and the risk table
//! fingerprint before anything else sees the model.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::logic::features::layout::{feature_names, layout_hash, validate_layout};
use crate::logic::features::{LayoutMismatchError, FEATURE_VERSION};
use crate::logic::risk::RiskTables;

use super::encoder::LabelEncoder;
use super::pipeline::Pipeline;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Model not trained: no artifact at {0}")]
    NotTrained(PathBuf),

    #[error("Missing checksum file {0}")]
    MissingChecksum(PathBuf),

    #[error("Artifact checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error("Feature names differ from the running layout")]
    FeatureNames,

    #[error("Risk tables changed since training: artifact {artifact:08x}, running {running:08x}")]
    RiskTableDrift { artifact: u32, running: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything needed to serve predictions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub pipeline: Pipeline,
    pub label_encoder: LabelEncoder,
    /// Always empty: categoricals enter the model as risk values
    pub categorical_cols: Vec<String>,
    pub numeric_cols: Vec<String>,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub risk_table_fingerprint: u32,
}

impl ModelBundle {
    /// Stamp a fitted pipeline with the running layout and tables
    pub fn new(pipeline: Pipeline, label_encoder: LabelEncoder) -> Self {
        Self {
            pipeline,
            label_encoder,
            categorical_cols: Vec::new(),
            numeric_cols: feature_names(),
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            risk_table_fingerprint: RiskTables::standard().fingerprint(),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let body = serde_json::to_vec(self)?;
        fs::write(path, &body)?;
        fs::write(checksum_path(path), digest_hex(&body))?;

        log::info!("Saved model artifact to {}", path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        Self::load_with_tables(path, RiskTables::standard())
    }

    pub fn load_with_tables(path: impl AsRef<Path>, tables: &RiskTables) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ArtifactError::NotTrained(path.to_path_buf()));
        }

        let body = fs::read(path)?;
        let sidecar = checksum_path(path);
        if !sidecar.exists() {
            return Err(ArtifactError::MissingChecksum(sidecar));
        }
        let expected = fs::read_to_string(&sidecar)?.trim().to_string();
        let actual = digest_hex(&body);
        if expected != actual {
            return Err(ArtifactError::ChecksumMismatch { expected, actual });
        }

        let bundle: ModelBundle = serde_json::from_slice(&body)?;
        bundle.validate(tables)?;

        log::info!(
            "Loaded model artifact from {} (classes: {})",
            path.display(),
            bundle.label_encoder.classes().join(", ")
        );
        Ok(bundle)
    }

    fn validate(&self, tables: &RiskTables) -> Result<(), ArtifactError> {
        validate_layout(self.feature_version, self.layout_hash)?;
        if self.numeric_cols != feature_names() || !self.categorical_cols.is_empty() {
            return Err(ArtifactError::FeatureNames);
        }

        let running = tables.fingerprint();
        if self.risk_table_fingerprint != running {
            return Err(ArtifactError::RiskTableDrift {
                artifact: self.risk_table_fingerprint,
                running,
            });
        }
        Ok(())
    }
}

/// `<path>.sha256`
pub fn checksum_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".sha256");
    PathBuf::from(name)
}

pub fn digest_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
