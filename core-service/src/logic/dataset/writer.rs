use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::logic::dataset::record::{CorpusRow, CORPUS_HEADERS};
use crate::logic::dataset::DatasetError;
use crate::logic::generator::{Corpus, CorpusEntry};

/// Streaming CSV writer for the training corpus.
/// The header is written on creation, so even an empty corpus is a valid file.
pub struct CorpusWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows: usize,
}

impl CorpusWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        writer.write_record(CORPUS_HEADERS)?;

        Ok(Self { writer, path, rows: 0 })
    }

    pub fn append(&mut self, entry: &CorpusEntry) -> Result<(), DatasetError> {
        self.writer.serialize(CorpusRow::from(entry))?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and close, returning the number of data rows written
    pub fn finish(mut self) -> Result<usize, DatasetError> {
        self.writer.flush()?;
        Ok(self.rows)
    }
}

/// Write a whole corpus to `path`, replacing any existing file
pub fn write_corpus(path: impl AsRef<Path>, corpus: &Corpus) -> Result<usize, DatasetError> {
    let mut writer = CorpusWriter::create(path)?;
    for entry in &corpus.entries {
        writer.append(entry)?;
    }
    let path = writer.path().display().to_string();
    let rows = writer.finish()?;
    log::info!("Wrote {} corpus rows to {}", rows, path);
    Ok(rows)
}
