//! Hyperparameter grid search with stratified k-fold CV
//!
//! Every (config, fold) fit is independent and runs on the rayon pool.
//! The winner is the config with the highest mean fold accuracy; on a tie
//! the earlier config in the grid wins.

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::logic::model::{Classifier, GbmParams};

use super::split::{select_labels, select_rows, stratified_kfold};
use super::TrainingError;

pub const DEFAULT_FOLDS: usize = 5;

/// Cross-validation result for one grid entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigScore {
    pub params: GbmParams,
    pub fold_scores: Vec<f64>,
    pub mean: f64,
    pub std: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub best_params: GbmParams,
    pub best_score: f64,
    pub scores: Vec<ConfigScore>,
}

#[derive(Debug, Clone)]
pub struct GridSearch {
    pub grid: Vec<GbmParams>,
    pub folds: usize,
    pub seed: u64,
}

impl GridSearch {
    pub fn new(grid: Vec<GbmParams>, folds: usize, seed: u64) -> Self {
        Self { grid, folds, seed }
    }

    pub fn run<C, F>(&self, x: &Array2<f64>, y: &[usize], factory: F) -> Result<SearchResult, TrainingError>
    where
        C: Classifier,
        F: Fn(&GbmParams) -> C + Sync,
    {
        if self.grid.is_empty() {
            return Err(TrainingError::EmptyGrid);
        }

        let folds = stratified_kfold(y, self.folds, self.seed)?;
        let jobs: Vec<(usize, usize)> = (0..self.grid.len())
            .flat_map(|c| (0..folds.len()).map(move |f| (c, f)))
            .collect();

        log::info!(
            "Grid search: {} configs x {} folds = {} fits",
            self.grid.len(),
            folds.len(),
            jobs.len()
        );

        let fold_scores = jobs
            .par_iter()
            .map(|&(c, f)| {
                let (train, test) = &folds[f];
                let mut model = factory(&self.grid[c]);
                model.fit(&select_rows(x, train), &select_labels(y, train))?;
                model.score(&select_rows(x, test), &select_labels(y, test))
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let scores: Vec<ConfigScore> = self
            .grid
            .iter()
            .zip(fold_scores.chunks(folds.len()))
            .map(|(params, chunk)| {
                let (mean, std) = mean_std(chunk);
                log::info!("CV {:.4} (+/- {:.4}) for {}", mean, std, params);
                ConfigScore {
                    params: params.clone(),
                    fold_scores: chunk.to_vec(),
                    mean,
                    std,
                }
            })
            .collect();

        let mut best = &scores[0];
        for score in &scores[1..] {
            if score.mean > best.mean {
                best = score;
            }
        }

        log::info!("Best CV accuracy {:.4}: {}", best.mean, best.params);
        Ok(SearchResult {
            best_params: best.params.clone(),
            best_score: best.mean,
            scores,
        })
    }
}

/// Mean and population standard deviation
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// The five boosting configurations searched by default
pub fn default_grid() -> Vec<GbmParams> {
    let config = |n_estimators: usize,
                  max_depth: usize,
                  learning_rate: f64,
                  sample: f64,
                  reg_alpha: f64,
                  reg_lambda: f64| GbmParams {
        n_estimators,
        max_depth,
        learning_rate,
        subsample: sample,
        colsample_bytree: sample,
        min_child_weight: 1.0,
        gamma: 0.0,
        reg_alpha,
        reg_lambda,
        ..GbmParams::default()
    };

    vec![
        config(800, 8, 0.08, 0.95, 0.0, 1.0),
        config(1200, 10, 0.05, 0.9, 0.01, 1.0),
        config(1500, 12, 0.03, 0.95, 0.0, 0.5),
        config(2000, 14, 0.02, 1.0, 0.0, 1.0),
        config(2500, 16, 0.015, 1.0, 0.0, 0.5),
    ]
}

/// Small grid for smoke runs
pub fn quick_grid() -> Vec<GbmParams> {
    vec![
        GbmParams {
            n_estimators: 60,
            max_depth: 6,
            learning_rate: 0.2,
            ..GbmParams::default()
        },
        GbmParams {
            n_estimators: 120,
            max_depth: 8,
            learning_rate: 0.1,
            subsample: 0.9,
            colsample_bytree: 0.9,
            ..GbmParams::default()
        },
    ]
}
