use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::classifier::ModelError;

/// Label strings <-> class indices. Classes are the sorted unique labels,
/// so the severity corpus encodes as Fatal=0, Minor=1, Serious=2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> Self {
        let classes: BTreeSet<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
        Self {
            classes: classes.into_iter().collect(),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.classes.binary_search_by(|c| c.as_str().cmp(label)).ok()
    }

    pub fn encode<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<usize>, ModelError> {
        labels
            .iter()
            .map(|l| {
                self.index_of(l.as_ref())
                    .ok_or_else(|| ModelError::UnknownLabel(l.as_ref().to_string()))
            })
            .collect()
    }

    pub fn decode(&self, index: usize) -> Result<&str, ModelError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(ModelError::UnknownClass(index))
    }
}
