use std::path::Path;

use ndarray::Array2;

use crate::logic::dataset::record::RawCorpusRow;
use crate::logic::dataset::DatasetError;
use crate::logic::features::build_matrix;
use crate::logic::risk::AttributeRecord;

/// Corpus as loaded for training: one record and label string per kept row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    pub records: Vec<AttributeRecord>,
    pub labels: Vec<String>,
    /// Rows skipped for a missing severity
    pub dropped: usize,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Feature matrix through the shared builder
    pub fn features(&self) -> Array2<f64> {
        build_matrix(&self.records)
    }
}

/// Load a corpus CSV leniently
pub fn load_corpus(path: impl AsRef<Path>) -> Result<TrainingSet, DatasetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;
    let set = read_rows(reader)?;

    log::info!(
        "Loaded {} corpus rows from {} ({} dropped without severity)",
        set.len(),
        path.display(),
        set.dropped
    );
    Ok(set)
}

pub fn read_rows<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<TrainingSet, DatasetError> {
    let mut set = TrainingSet::default();

    for row in reader.deserialize::<RawCorpusRow>() {
        let row = row?;
        let Some(label) = row.label().map(str::to_string) else {
            set.dropped += 1;
            continue;
        };
        set.records.push(row.into_record());
        set.labels.push(label);
    }

    Ok(set)
}
