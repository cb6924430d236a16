//! Severity CLI - corpus generation, training and one-off predictions

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use severity_core::constants;
use severity_core::logic::dataset::write_corpus;
use severity_core::logic::generator::{generate, generate_sharded, GeneratorConfig};
use severity_core::logic::model::PredictionService;
use severity_core::logic::risk::AttributeRecord;
use severity_core::logic::training::{self, format_summary, quick_grid, train_model, RunConfig, TrainingConfig};

#[derive(Parser)]
#[command(name = "severity")]
#[command(about = "Accident severity engine: synthesize a corpus, train, predict")]
#[command(version = constants::APP_VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a labeled synthetic corpus CSV
    Generate {
        /// Number of rows
        #[arg(long)]
        rows: Option<usize>,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Parallel shards (1 = sequential)
        #[arg(long, default_value = "1")]
        shards: usize,

        /// Output CSV path
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Train on an existing corpus and write artifact + metadata
    Train {
        #[command(flatten)]
        paths: PathArgs,

        /// Use the small smoke-test grid
        #[arg(long)]
        quick: bool,
    },
    /// Generate, train and report against the target accuracy
    Run {
        #[command(flatten)]
        paths: PathArgs,

        /// Number of rows
        #[arg(long)]
        rows: Option<usize>,

        /// Parallel shards (1 = sequential)
        #[arg(long, default_value = "1")]
        shards: usize,

        /// Generate/train cycles, each with the next seed
        #[arg(long, default_value_t = constants::MAX_ITERATIONS)]
        max_iterations: usize,

        /// Use the small smoke-test grid
        #[arg(long)]
        quick: bool,
    },
    /// Predict one record read as JSON from a file or stdin
    Predict {
        /// JSON file with an attribute record (default: stdin)
        input: Option<PathBuf>,

        /// Model artifact path
        #[arg(long)]
        model: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct PathArgs {
    /// Corpus CSV path
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Model artifact path
    #[arg(long)]
    model: Option<PathBuf>,

    /// Metadata JSON path
    #[arg(long)]
    meta: Option<PathBuf>,

    /// Seed for folds and the hold-out split
    #[arg(long)]
    seed: Option<u64>,
}

impl PathArgs {
    fn training_config(&self, quick: bool) -> TrainingConfig {
        let mut config = TrainingConfig::from_env();
        if let Some(corpus) = &self.corpus {
            config.corpus_path = corpus.clone();
        }
        if let Some(model) = &self.model {
            config.model_path = model.clone();
        }
        if let Some(meta) = &self.meta {
            config.meta_path = meta.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if quick {
            config.grid = quick_grid();
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate { rows, seed, shards, output } => {
            let config = GeneratorConfig::new(
                rows.unwrap_or_else(constants::get_corpus_rows),
                seed.unwrap_or_else(constants::get_seed),
            );
            let corpus = if shards > 1 {
                generate_sharded(&config, shards)
            } else {
                generate(&config)
            }
            .context("corpus generation failed")?;

            let output = output.unwrap_or_else(|| PathBuf::from(constants::get_corpus_path()));
            write_corpus(&output, &corpus)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("{} rows -> {} ({})", corpus.len(), output.display(), corpus.distribution());
        }
        Commands::Train { paths, quick } => {
            let config = paths.training_config(quick);
            let meta = train_model(&config).context("training failed")?;
            println!("{}", format_summary(&meta));
        }
        Commands::Run { paths, rows, shards, max_iterations, quick } => {
            let mut config = RunConfig::new(paths.training_config(quick));
            if let Some(rows) = rows {
                config.rows = rows;
            }
            config.shards = shards;
            config.max_iterations = max_iterations;

            let reports = training::run(&config).context("run failed")?;
            for report in &reports {
                println!("== Iteration {} (seed {}) ==", report.iteration + 1, report.seed);
                println!("{}", format_summary(&report.meta));
            }
            match reports.last() {
                Some(last) if last.target_reached => {
                    println!("Target accuracy {} reached", config.target_accuracy)
                }
                Some(last) => println!(
                    "Target accuracy {} not reached (best test accuracy {:.4})",
                    config.target_accuracy, last.meta.test_accuracy
                ),
                None => {}
            }
        }
        Commands::Predict { input, model } => {
            let model = model.unwrap_or_else(|| PathBuf::from(constants::get_model_path()));
            let service = PredictionService::load(&model)
                .with_context(|| format!("cannot load model {}", model.display()))?;

            let text = match input {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut text = String::new();
                    std::io::stdin().read_to_string(&mut text)?;
                    text
                }
            };
            let record: AttributeRecord = serde_json::from_str(&text).context("invalid record JSON")?;
            let prediction = service.predict(&record)?;
            println!("{}", serde_json::to_string_pretty(&prediction)?);
        }
    }

    Ok(())
}
