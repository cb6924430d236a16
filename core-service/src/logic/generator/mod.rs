//! Generator Module - Synthetic Training Corpus
//!
//! Samples random accident situations, labels them with the risk rules
//! (rejecting dead-zone scores) and attaches casualty/fatality counts.
//!
//! ## Structure
//! - `sampler`: Vocabularies, weights and the random record draw
//! - `casualty`: Counts conditioned on the assigned label
//! - `corpus`: Rejection-sampling driver (sequential and sharded)

pub mod sampler;
pub mod casualty;
pub mod corpus;

pub use casualty::{generate_counts, CasualtyCounts};
pub use corpus::{
    generate, generate_sharded, generate_with_tables, ClassDistribution, Corpus, CorpusEntry,
    GenerationError, GeneratorConfig, DEFAULT_MAX_ATTEMPTS_PER_ROW,
};
pub use sampler::sample_record;
