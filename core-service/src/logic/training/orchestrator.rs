//! Training orchestrator
//!
//! corpus -> shared feature builder -> grid search -> hold-out check ->
//! optional full refit -> artifact + metadata.

use std::path::PathBuf;

use chrono::Utc;
use uuid::Uuid;

use crate::constants;
use crate::logic::dataset::{load_corpus, TrainingSet};
use crate::logic::features::layout::feature_names;
use crate::logic::model::{round4, Classifier, GbmParams, LabelEncoder, ModelBundle, ModelMeta, Pipeline};

use super::search::{default_grid, GridSearch, DEFAULT_FOLDS};
use super::split::{select_labels, select_rows, stratified_split};
use super::TrainingError;

#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub corpus_path: PathBuf,
    pub model_path: PathBuf,
    pub meta_path: PathBuf,
    pub grid: Vec<GbmParams>,
    pub folds: usize,
    pub test_fraction: f64,
    pub seed: u64,
    /// Hold-out accuracy at or above which the final model is refit on all rows
    pub refit_threshold: f64,
}

impl TrainingConfig {
    pub fn new(corpus_path: impl Into<PathBuf>, model_path: impl Into<PathBuf>, meta_path: impl Into<PathBuf>) -> Self {
        Self {
            corpus_path: corpus_path.into(),
            model_path: model_path.into(),
            meta_path: meta_path.into(),
            grid: default_grid(),
            folds: DEFAULT_FOLDS,
            test_fraction: constants::DEFAULT_TEST_FRACTION,
            seed: constants::DEFAULT_SEED,
            refit_threshold: constants::DEFAULT_REFIT_THRESHOLD,
        }
    }

    /// Paths and seed from the environment, defaults otherwise
    pub fn from_env() -> Self {
        Self {
            seed: constants::get_seed(),
            ..Self::new(
                constants::get_corpus_path(),
                constants::get_model_path(),
                constants::get_meta_path(),
            )
        }
    }
}

/// Train from the corpus file and write artifact + metadata
pub fn train_model(config: &TrainingConfig) -> Result<ModelMeta, TrainingError> {
    let set = load_corpus(&config.corpus_path)?;
    train_on(&set, config)
}

pub fn train_on(set: &TrainingSet, config: &TrainingConfig) -> Result<ModelMeta, TrainingError> {
    if set.is_empty() {
        return Err(TrainingError::EmptyCorpus);
    }

    let x = set.features();
    let encoder = LabelEncoder::fit(&set.labels);
    let y = encoder.encode(&set.labels)?;
    log::info!(
        "Training on {} rows, {} features, classes: {}",
        x.nrows(),
        x.ncols(),
        encoder.classes().join(", ")
    );

    // Search
    let search = GridSearch::new(config.grid.clone(), config.folds, config.seed);
    let result = search.run(&x, &y, |params| Pipeline::new(params.clone()))?;

    // Hold-out
    let (train, test) = stratified_split(&y, config.test_fraction, config.seed);
    let mut pipeline = Pipeline::new(result.best_params.clone());
    pipeline.fit(&select_rows(&x, &train), &select_labels(&y, &train))?;
    let test_accuracy = pipeline.score(&select_rows(&x, &test), &select_labels(&y, &test))?;
    log::info!("Hold-out accuracy: {:.4} on {} rows", test_accuracy, test.len());

    if test_accuracy >= config.refit_threshold {
        log::info!("Refitting on all {} rows", x.nrows());
        pipeline = Pipeline::new(result.best_params.clone());
        pipeline.fit(&x, &y)?;
    }

    let meta = ModelMeta {
        model_id: Uuid::new_v4(),
        features_categorical: Vec::new(),
        features_numeric: feature_names(),
        target_classes: encoder.classes().to_vec(),
        best_cv_accuracy: round4(result.best_score),
        test_accuracy: round4(test_accuracy),
        best_params: result.best_params,
        trained_at: Utc::now(),
        rows: x.nrows(),
    };

    ModelBundle::new(pipeline, encoder).save(&config.model_path)?;
    meta.save(&config.meta_path)?;
    log::info!("Saved metadata to {}", config.meta_path.display());

    Ok(meta)
}

/// Plain-text summary of a training run
pub fn format_summary(meta: &ModelMeta) -> String {
    let p = &meta.best_params;
    let rows = [
        ("Model id", meta.model_id.to_string()),
        ("Rows", meta.rows.to_string()),
        ("Test accuracy", format!("{:.4}", meta.test_accuracy)),
        ("CV accuracy", format!("{:.4}", meta.best_cv_accuracy)),
        ("Classes", meta.target_classes.join(", ")),
        ("Features", meta.features_numeric.len().to_string()),
        ("n_estimators", p.n_estimators.to_string()),
        ("max_depth", p.max_depth.to_string()),
        ("learning_rate", p.learning_rate.to_string()),
        ("subsample", p.subsample.to_string()),
        ("colsample_bytree", p.colsample_bytree.to_string()),
        ("reg_alpha", p.reg_alpha.to_string()),
        ("reg_lambda", p.reg_lambda.to_string()),
    ];

    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(k, v)| format!("{:<width$}  {}", k, v, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
