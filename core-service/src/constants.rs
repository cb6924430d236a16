//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! CLI flags override the environment, the environment overrides these.

/// Default corpus CSV location
pub const DEFAULT_CORPUS_PATH: &str = "data/accident_prediction_india.csv";

/// Default model artifact location (checksum sidecar sits next to it)
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// Default training metadata location
pub const DEFAULT_META_PATH: &str = "model_meta.json";

/// Default synthetic corpus size
pub const DEFAULT_CORPUS_ROWS: usize = 15_000;

/// Default seed for generation, CV folds and hold-out split
pub const DEFAULT_SEED: u64 = 42;

/// Hold-out share of the corpus
pub const DEFAULT_TEST_FRACTION: f64 = 0.15;

/// Refit on the full corpus when hold-out accuracy reaches this
pub const DEFAULT_REFIT_THRESHOLD: f64 = 0.95;

/// Runner target accuracy
pub const TARGET_ACCURACY: f64 = 0.99;

/// Runner generate/train cycles
pub const MAX_ITERATIONS: usize = 1;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Accident Severity";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get corpus path from environment or use default
pub fn get_corpus_path() -> String {
    std::env::var("SEVERITY_CORPUS_PATH")
        .unwrap_or_else(|_| DEFAULT_CORPUS_PATH.to_string())
}

/// Get model artifact path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("SEVERITY_MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get metadata path from environment or use default
pub fn get_meta_path() -> String {
    std::env::var("SEVERITY_META_PATH")
        .unwrap_or_else(|_| DEFAULT_META_PATH.to_string())
}

/// Get corpus size from environment or use default
pub fn get_corpus_rows() -> usize {
    std::env::var("SEVERITY_CORPUS_ROWS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_CORPUS_ROWS)
}

/// Get seed from environment or use default
pub fn get_seed() -> u64 {
    std::env::var("SEVERITY_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED)
}
