//! End-to-end runner: generate -> write corpus -> train, repeated with a
//! fresh seed per iteration until the target accuracy is reached.

use crate::constants;
use crate::logic::dataset::write_corpus;
use crate::logic::generator::{generate, generate_sharded, GeneratorConfig};
use crate::logic::model::ModelMeta;

use super::orchestrator::{format_summary, train_model, TrainingConfig};
use super::TrainingError;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub rows: usize,
    pub seed: u64,
    /// 1 = sequential generation
    pub shards: usize,
    pub target_accuracy: f64,
    pub max_iterations: usize,
    pub training: TrainingConfig,
}

impl RunConfig {
    pub fn new(training: TrainingConfig) -> Self {
        Self {
            rows: constants::get_corpus_rows(),
            seed: training.seed,
            shards: 1,
            target_accuracy: constants::TARGET_ACCURACY,
            max_iterations: constants::MAX_ITERATIONS,
            training,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IterationReport {
    pub iteration: usize,
    pub seed: u64,
    pub meta: ModelMeta,
    pub target_reached: bool,
}

/// Run up to `max_iterations` generate/train cycles; iteration `i` uses
/// seed `seed + i`. Stops at the first run reaching the target.
pub fn run(config: &RunConfig) -> Result<Vec<IterationReport>, TrainingError> {
    let mut reports = Vec::new();

    for iteration in 0..config.max_iterations.max(1) {
        let seed = config.seed.wrapping_add(iteration as u64);
        log::info!("Iteration {} (seed {})", iteration + 1, seed);

        let generator = GeneratorConfig::new(config.rows, seed);
        let corpus = if config.shards > 1 {
            generate_sharded(&generator, config.shards)?
        } else {
            generate(&generator)?
        };
        write_corpus(&config.training.corpus_path, &corpus)?;

        let training = TrainingConfig {
            seed,
            ..config.training.clone()
        };
        let meta = train_model(&training)?;
        let target_reached = meta.test_accuracy >= config.target_accuracy;

        log::info!("Training summary:\n{}", format_summary(&meta));
        if target_reached {
            log::info!("Target accuracy {} reached", config.target_accuracy);
        } else {
            log::warn!(
                "Target accuracy {} not reached (got {:.4})",
                config.target_accuracy,
                meta.test_accuracy
            );
        }

        reports.push(IterationReport {
            iteration,
            seed,
            meta,
            target_reached,
        });
        if target_reached {
            break;
        }
    }

    Ok(reports)
}
