//! Training Module - Search, Evaluation & Persistence
//!
//! ## Structure
//! - `split`: Stratified k-fold and hold-out splits
//! - `search`: Parallel grid search over `GbmParams`
//! - `orchestrator`: Corpus -> artifact + metadata
//! - `runner`: Generate + train loop with a target accuracy

pub mod split;
pub mod search;
pub mod orchestrator;
pub mod runner;

#[cfg(test)]
mod tests;

use thiserror::Error;

use crate::logic::dataset::DatasetError;
use crate::logic::generator::GenerationError;
use crate::logic::model::{ArtifactError, ModelError};

pub use orchestrator::{format_summary, train_model, train_on, TrainingConfig};
pub use runner::{run, IterationReport, RunConfig};
pub use search::{default_grid, quick_grid, ConfigScore, GridSearch, SearchResult};
pub use split::{stratified_kfold, stratified_split};

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Corpus is empty")]
    EmptyCorpus,

    #[error("Hyperparameter grid is empty")]
    EmptyGrid,

    #[error("Cannot make {folds} folds from {rows} rows")]
    InvalidFolds { folds: usize, rows: usize },

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
