//! Dataset Module - Training Corpus Files
//!
//! CSV persistence for the synthetic corpus. Writing is strict (typed rows);
//! reading is lenient so the training path tolerates blanks and stray text.

pub mod record;
pub mod writer;
pub mod reader;


use std::path::PathBuf;

use thiserror::Error;

pub use reader::{load_corpus, read_rows, TrainingSet};
pub use record::{coerce_int, CorpusRow, RawCorpusRow, CORPUS_HEADERS};
pub use writer::{write_corpus, CorpusWriter};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Corpus file not found: {0}")]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
