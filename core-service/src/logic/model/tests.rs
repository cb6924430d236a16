use super::artifact::{checksum_path, ArtifactError, ModelBundle};
use super::classifier::Classifier;
use super::encoder::LabelEncoder;
use super::gbm::GbmParams;
use super::pipeline::Pipeline;
use super::predictor::PredictionService;
use crate::logic::features::build_matrix;
use crate::logic::generator::{generate, GeneratorConfig};
use crate::logic::risk::{AttributeRecord, RiskTables};
use once_cell::sync::Lazy;
use std::fs;
use tempfile::tempdir;

static BUNDLE: Lazy<ModelBundle> = Lazy::new(|| {
    let corpus = generate(&GeneratorConfig::new(1500, 42)).unwrap();
    let labels: Vec<String> = corpus.entries.iter().map(|e| e.label.to_string()).collect();
    let encoder = LabelEncoder::fit(&labels);
    let y = encoder.encode(&labels).unwrap();
    let x = build_matrix(corpus.records());

    let mut pipeline = Pipeline::new(GbmParams {
        n_estimators: 30,
        max_depth: 4,
        learning_rate: 0.3,
        ..GbmParams::default()
    });
    pipeline.fit(&x, &y).unwrap();
    ModelBundle::new(pipeline, encoder)
});

fn worst_case() -> AttributeRecord {
    AttributeRecord {
        weather: "Stormy".into(),
        road_condition: "Damaged".into(),
        lighting: "Dark".into(),
        road_type: "National Highway".into(),
        vehicle_type: "Truck".into(),
        location_detail: "Curve".into(),
        speed_limit: 110,
        driver_age: 19,
        alcohol: "Yes".into(),
        license_status: "None".into(),
        num_vehicles: 5,
        time_of_day: "2:00".into(),
        ..Default::default()
    }
}

#[test]
fn test_bundle_stamped_with_running_layout() {
    assert_eq!(BUNDLE.label_encoder.classes(), &["Fatal", "Minor", "Serious"]);
    assert!(BUNDLE.categorical_cols.is_empty());
    assert_eq!(BUNDLE.numeric_cols.len(), 12);
    assert_eq!(BUNDLE.risk_table_fingerprint, RiskTables::standard().fingerprint());
}

#[test]
fn test_save_load_preserves_predictions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    BUNDLE.save(&path).unwrap();
    assert!(checksum_path(&path).exists());

    let loaded = ModelBundle::load(&path).unwrap();
    assert_eq!(loaded, *BUNDLE);

    let before = PredictionService::from_bundle(BUNDLE.clone());
    let after = PredictionService::load(&path).unwrap();
    for record in [AttributeRecord::default(), worst_case()] {
        assert_eq!(before.predict(&record).unwrap(), after.predict(&record).unwrap());
    }
}

#[test]
fn test_missing_artifact_is_not_trained() {
    let dir = tempdir().unwrap();
    let err = PredictionService::load(dir.path().join("model.json")).unwrap_err();
    assert!(matches!(err, ArtifactError::NotTrained(_)));
    assert!(err.to_string().contains("not trained"));
}

#[test]
fn test_tampered_artifact_fails_checksum() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    BUNDLE.save(&path).unwrap();

    let mut body = fs::read(&path).unwrap();
    body.push(b' ');
    fs::write(&path, body).unwrap();

    assert!(matches!(
        ModelBundle::load(&path),
        Err(ArtifactError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_missing_checksum_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    BUNDLE.save(&path).unwrap();
    fs::remove_file(checksum_path(&path)).unwrap();

    assert!(matches!(ModelBundle::load(&path), Err(ArtifactError::MissingChecksum(_))));
}

#[test]
fn test_layout_mismatch_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    let mut stale = BUNDLE.clone();
    stale.feature_version += 1;
    stale.save(&path).unwrap();

    assert!(matches!(ModelBundle::load(&path), Err(ArtifactError::Layout(_))));
}

#[test]
fn test_risk_table_drift_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    BUNDLE.save(&path).unwrap();

    let mut drifted = RiskTables::standard().clone();
    drifted.alcohol_risk = 0.2;

    let err = ModelBundle::load_with_tables(&path, &drifted).unwrap_err();
    assert!(matches!(err, ArtifactError::RiskTableDrift { .. }));
    assert!(ModelBundle::load_with_tables(&path, RiskTables::standard()).is_ok());
}

#[test]
fn test_prediction_shape() {
    let service = PredictionService::from_bundle(BUNDLE.clone());
    let prediction = service.predict(&AttributeRecord::default()).unwrap();

    let keys: Vec<&str> = prediction.probabilities.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["fatal", "minor", "serious"]);
    assert!(keys.contains(&prediction.prediction.as_str()));

    let best = prediction
        .probabilities
        .values()
        .copied()
        .fold(f64::MIN, f64::max);
    assert_eq!(prediction.confidence, best);

    for p in prediction.probabilities.values() {
        assert_eq!(*p, (p * 10_000.0).round() / 10_000.0);
    }
}

#[test]
fn test_extreme_scenarios() {
    let service = PredictionService::from_bundle(BUNDLE.clone());
    assert_eq!(service.predict(&worst_case()).unwrap().prediction, "fatal");
    assert_eq!(service.predict(&AttributeRecord::default()).unwrap().prediction, "minor");
}

#[test]
fn test_holdout_accuracy_on_fresh_corpus() {
    let service = PredictionService::from_bundle(BUNDLE.clone());
    let fresh = generate(&GeneratorConfig::new(300, 7)).unwrap();
    let correct = fresh
        .entries
        .iter()
        .filter(|e| service.predict(&e.record).unwrap().prediction == e.label.as_str().to_lowercase())
        .count();
    // Labels are a deterministic function of the features
    assert!(correct as f64 / 300.0 > 0.8, "accuracy {}", correct as f64 / 300.0);
}
