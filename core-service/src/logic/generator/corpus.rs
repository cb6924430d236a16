//! Corpus generation driver
//!
//! Rejection sampling: draw a random record, score and classify it, keep it
//! only if it lands outside the dead zones. Bounded by an attempts cap so a
//! misconfigured threshold set fails loudly instead of spinning forever.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::risk::{label_record, AttributeRecord, RiskTables, SeverityLabel, SeverityThresholds, Verdict};

use super::casualty::{generate_counts, CasualtyCounts};
use super::sampler::sample_record;

/// Attempts allowed per requested row before giving up
pub const DEFAULT_MAX_ATTEMPTS_PER_ROW: u64 = 100;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Corpus generation gave up after {attempts} attempts: accepted {accepted} of {target} rows")]
    AttemptsExhausted {
        accepted: usize,
        target: usize,
        attempts: u64,
    },
    #[error("Shard count must be at least 1")]
    NoShards,
}

/// One labeled synthetic accident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub record: AttributeRecord,
    pub label: SeverityLabel,
    pub counts: CasualtyCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub entries: Vec<CorpusEntry>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &AttributeRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    pub fn distribution(&self) -> ClassDistribution {
        let mut dist = ClassDistribution::default();
        for entry in &self.entries {
            dist.add(entry.label);
        }
        dist
    }
}

/// Per-label row counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDistribution {
    pub counts: BTreeMap<SeverityLabel, usize>,
}

impl ClassDistribution {
    pub fn add(&mut self, label: SeverityLabel) {
        *self.counts.entry(label).or_insert(0) += 1;
    }

    pub fn get(&self, label: SeverityLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Share of rows with this label, 0 for an empty corpus
    pub fn fraction(&self, label: SeverityLabel) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(label) as f64 / total as f64
        }
    }
}

impl std::fmt::Display for ClassDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = SeverityLabel::ALL
            .iter()
            .map(|label| format!("{}={} ({:.1}%)", label, self.get(*label), self.fraction(*label) * 100.0))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub target_rows: usize,
    pub seed: u64,
    pub max_attempts_per_row: u64,
    pub thresholds: SeverityThresholds,
}

impl GeneratorConfig {
    pub fn new(target_rows: usize, seed: u64) -> Self {
        Self {
            target_rows,
            seed,
            max_attempts_per_row: DEFAULT_MAX_ATTEMPTS_PER_ROW,
            thresholds: SeverityThresholds::default(),
        }
    }

    pub fn max_attempts(&self) -> u64 {
        (self.target_rows as u64).saturating_mul(self.max_attempts_per_row)
    }
}

// ============================================================================
// GENERATION
// ============================================================================

/// Generate `config.target_rows` labeled rows from one seeded RNG
pub fn generate(config: &GeneratorConfig) -> Result<Corpus, GenerationError> {
    let corpus = generate_with_tables(config, RiskTables::standard())?;
    log::info!(
        "Generated {} rows (seed {}): {}",
        corpus.len(),
        config.seed,
        corpus.distribution()
    );
    Ok(corpus)
}

pub fn generate_with_tables(config: &GeneratorConfig, tables: &RiskTables) -> Result<Corpus, GenerationError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let max_attempts = config.max_attempts();
    let mut entries = Vec::with_capacity(config.target_rows);
    let mut attempts: u64 = 0;

    while entries.len() < config.target_rows {
        if attempts >= max_attempts {
            return Err(GenerationError::AttemptsExhausted {
                accepted: entries.len(),
                target: config.target_rows,
                attempts,
            });
        }
        attempts += 1;

        let record = sample_record(&mut rng);
        let Verdict::Accepted(label) = label_record(&record, tables, &config.thresholds) else {
            continue;
        };
        let counts = generate_counts(label, &mut rng);
        entries.push(CorpusEntry { record, label, counts });
    }

    log::debug!(
        "Accepted {} of {} candidates ({:.1}%)",
        entries.len(),
        attempts,
        if attempts == 0 { 0.0 } else { entries.len() as f64 / attempts as f64 * 100.0 }
    );

    Ok(Corpus { entries })
}

/// Split the target across independent shards, each with RNG seed
/// `seed + shard`, and concatenate in shard order.
pub fn generate_sharded(config: &GeneratorConfig, shards: usize) -> Result<Corpus, GenerationError> {
    if shards == 0 {
        return Err(GenerationError::NoShards);
    }

    let tables = RiskTables::standard();
    let base = config.target_rows / shards;
    let extra = config.target_rows % shards;

    let parts = (0..shards)
        .into_par_iter()
        .map(|shard| {
            let shard_config = GeneratorConfig {
                target_rows: base + usize::from(shard < extra),
                seed: config.seed.wrapping_add(shard as u64),
                ..config.clone()
            };
            generate_with_tables(&shard_config, tables)
        })
        .collect::<Result<Vec<Corpus>, GenerationError>>()?;

    let corpus = Corpus {
        entries: parts.into_iter().flat_map(|part| part.entries).collect(),
    };

    log::info!(
        "Generated {} rows across {} shards (seed {}): {}",
        corpus.len(),
        shards,
        config.seed,
        corpus.distribution()
    );
    Ok(corpus)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::risk::{classify, score};

    #[test]
    fn test_generates_exact_count() {
        let corpus = generate(&GeneratorConfig::new(300, 42)).unwrap();
        assert_eq!(corpus.len(), 300);
        assert_eq!(corpus.distribution().total(), 300);
    }

    #[test]
    fn test_every_row_label_matches_rules() {
        let corpus = generate(&GeneratorConfig::new(500, 7)).unwrap();
        for entry in &corpus.entries {
            let verdict = classify(score(&entry.record));
            assert_eq!(verdict, Verdict::Accepted(entry.label));
        }
    }

    #[test]
    fn test_fatal_rows_have_consistent_counts() {
        let corpus = generate(&GeneratorConfig::new(2000, 9)).unwrap();
        for entry in corpus.entries.iter().filter(|e| e.label == SeverityLabel::Fatal) {
            assert!(entry.counts.casualties >= entry.counts.fatalities);
            assert!(entry.counts.fatalities >= 1);
        }
    }

    #[test]
    fn test_all_classes_present() {
        let dist = generate(&GeneratorConfig::new(3000, 42)).unwrap().distribution();
        for label in SeverityLabel::ALL {
            assert!(dist.get(label) > 0, "no {} rows", label);
        }
    }

    #[test]
    fn test_same_seed_same_corpus() {
        let a = generate(&GeneratorConfig::new(200, 5)).unwrap();
        let b = generate(&GeneratorConfig::new(200, 5)).unwrap();
        assert_eq!(a, b);

        let c = generate(&GeneratorConfig::new(200, 6)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_target_is_empty() {
        let corpus = generate(&GeneratorConfig::new(0, 1)).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_attempts_cap_reports_progress() {
        // Every score is rejected
        let config = GeneratorConfig {
            max_attempts_per_row: 3,
            thresholds: SeverityThresholds {
                minor_max: 0.0,
                serious_min: 100.0,
                serious_max: 200.0,
                fatal_min: 300.0,
            },
            ..GeneratorConfig::new(10, 42)
        };

        let err = generate(&config).unwrap_err();
        assert_eq!(
            err,
            GenerationError::AttemptsExhausted { accepted: 0, target: 10, attempts: 30 }
        );
        assert!(err.to_string().contains("accepted 0 of 10"));
    }

    #[test]
    fn test_sharded_matches_per_shard_generation() {
        let config = GeneratorConfig::new(101, 100);
        let corpus = generate_sharded(&config, 4).unwrap();
        assert_eq!(corpus.len(), 101);

        // Shard 0 gets 26 rows from seed 100
        let first = generate(&GeneratorConfig::new(26, 100)).unwrap();
        assert_eq!(&corpus.entries[..26], &first.entries[..]);

        // Deterministic regardless of thread scheduling
        assert_eq!(corpus, generate_sharded(&config, 4).unwrap());
    }

    #[test]
    fn test_zero_shards_rejected() {
        assert_eq!(
            generate_sharded(&GeneratorConfig::new(10, 1), 0).unwrap_err(),
            GenerationError::NoShards
        );
    }
}
