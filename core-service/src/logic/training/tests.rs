use super::orchestrator::{format_summary, train_model, train_on, TrainingConfig};
use super::runner::{run, RunConfig};
use super::TrainingError;
use crate::logic::dataset::{write_corpus, TrainingSet};
use crate::logic::generator::{generate, GeneratorConfig};
use crate::logic::model::{GbmParams, ModelBundle, ModelMeta, PredictionService};
use crate::logic::risk::AttributeRecord;
use std::path::Path;
use tempfile::tempdir;

fn small_config(dir: &Path) -> TrainingConfig {
    TrainingConfig {
        grid: vec![
            GbmParams {
                n_estimators: 15,
                max_depth: 3,
                learning_rate: 0.3,
                ..GbmParams::default()
            },
            GbmParams {
                n_estimators: 25,
                max_depth: 4,
                learning_rate: 0.3,
                ..GbmParams::default()
            },
        ],
        folds: 3,
        ..TrainingConfig::new(
            dir.join("data").join("corpus.csv"),
            dir.join("model.json"),
            dir.join("model_meta.json"),
        )
    }
}

#[test]
fn test_train_model_end_to_end() {
    let dir = tempdir().unwrap();
    let config = small_config(dir.path());
    let corpus = generate(&GeneratorConfig::new(600, 42)).unwrap();
    write_corpus(&config.corpus_path, &corpus).unwrap();

    let meta = train_model(&config).unwrap();
    assert_eq!(meta.rows, 600);
    assert_eq!(meta.target_classes, vec!["Fatal", "Minor", "Serious"]);
    assert!(meta.features_categorical.is_empty());
    assert_eq!(meta.features_numeric.len(), 12);
    assert!(config.grid.contains(&meta.best_params));
    assert!(meta.test_accuracy > 0.5 && meta.test_accuracy <= 1.0);
    assert_eq!(meta.test_accuracy, (meta.test_accuracy * 10_000.0).round() / 10_000.0);

    // Metadata and artifact both land on disk and load back
    assert_eq!(ModelMeta::load(&config.meta_path).unwrap(), meta);
    let bundle = ModelBundle::load(&config.model_path).unwrap();
    assert_eq!(bundle.pipeline.params(), &meta.best_params);

    let service = PredictionService::load(&config.model_path).unwrap();
    let prediction = service.predict(&AttributeRecord::default()).unwrap();
    assert_eq!(prediction.probabilities.len(), 3);

    let summary = format_summary(&meta);
    assert!(summary.contains("Test accuracy"));
    assert!(summary.contains("Fatal, Minor, Serious"));
}

#[test]
fn test_missing_corpus() {
    let dir = tempdir().unwrap();
    let err = train_model(&small_config(dir.path())).unwrap_err();
    assert!(matches!(err, TrainingError::Dataset(_)));
}

#[test]
fn test_empty_corpus() {
    let dir = tempdir().unwrap();
    let err = train_on(&TrainingSet::default(), &small_config(dir.path())).unwrap_err();
    assert!(matches!(err, TrainingError::EmptyCorpus));
}

#[test]
fn test_runner_stops_when_target_reached() {
    let dir = tempdir().unwrap();
    let config = RunConfig {
        rows: 300,
        seed: 10,
        shards: 2,
        target_accuracy: 0.0,
        max_iterations: 3,
        training: small_config(dir.path()),
    };

    let reports = run(&config).unwrap();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].target_reached);
    assert!(config.training.corpus_path.exists());
}

#[test]
fn test_runner_reseeds_each_iteration() {
    let dir = tempdir().unwrap();
    let config = RunConfig {
        rows: 300,
        seed: 10,
        shards: 1,
        // Unreachable
        target_accuracy: 1.1,
        max_iterations: 2,
        training: small_config(dir.path()),
    };

    let reports = run(&config).unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].seed, 10);
    assert_eq!(reports[1].seed, 11);
    assert!(reports.iter().all(|r| !r.target_reached));
    assert_ne!(reports[0].meta.model_id, reports[1].meta.model_id);
}
