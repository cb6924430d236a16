use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::artifact::ArtifactError;
use super::gbm::GbmParams;

/// Training summary written next to the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    pub model_id: Uuid,
    pub features_categorical: Vec<String>,
    pub features_numeric: Vec<String>,
    pub target_classes: Vec<String>,
    pub best_cv_accuracy: f64,
    pub test_accuracy: f64,
    pub best_params: GbmParams,
    pub trained_at: DateTime<Utc>,
    pub rows: usize,
}

impl ModelMeta {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ArtifactError::NotTrained(path.to_path_buf()));
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Metadata is informational; a missing or unreadable file is not fatal
    pub fn load_optional(path: impl AsRef<Path>) -> Option<Self> {
        match Self::load(path.as_ref()) {
            Ok(meta) => Some(meta),
            Err(e) => {
                log::warn!("Model metadata unavailable at {}: {}", path.as_ref().display(), e);
                None
            }
        }
    }
}

/// Round to 4 decimal places
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(1.0), 1.0);
        assert_eq!(round4(0.99994), 0.9999);
    }

    #[test]
    fn test_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("meta.json");
        let meta = ModelMeta {
            model_id: Uuid::new_v4(),
            features_categorical: vec![],
            features_numeric: vec!["hour".to_string()],
            target_classes: vec!["Fatal".to_string(), "Minor".to_string()],
            best_cv_accuracy: 0.9876,
            test_accuracy: 0.99,
            best_params: GbmParams::default(),
            trained_at: Utc::now(),
            rows: 10,
        };
        meta.save(&path).unwrap();
        assert_eq!(ModelMeta::load(&path).unwrap(), meta);
    }

    #[test]
    fn test_load_optional_missing() {
        let dir = tempdir().unwrap();
        assert!(ModelMeta::load_optional(dir.path().join("none.json")).is_none());
    }
}
