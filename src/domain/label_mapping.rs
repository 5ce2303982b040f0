// ============================================================
// Layer 3 — Label Mapping
// ============================================================
// Maps target labels (player names) to stable integer class
// indices and back.
//
// Index assignment: sort the distinct labels, index = position.
//   ["Mohamed Salah", "Lionel Messi", "Mohamed Salah"]
//       → ["Lionel Messi", "Mohamed Salah"]
//       → Lionel Messi = 0, Mohamed Salah = 1
//
// The same mapping that encoded the training targets must decode
// the predictions. It travels with each run as
// `model_meta/label_encoder_classes.json`, a plain JSON array in
// index order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::error::{PredictorError, PredictorResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMapping {
    classes: Vec<String>,
}

impl LabelMapping {
    /// Build the mapping from raw training labels (sorted, deduplicated).
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        Self { classes: unique.into_iter().collect() }
    }

    /// Wrap a class list that is already in index order, e.g. one read
    /// back from a run artifact.
    pub fn from_classes(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Parse the JSON array stored alongside a run.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let classes: Vec<String> = serde_json::from_str(json)?;
        Ok(Self { classes })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.classes)
    }

    /// Class index of `label`, or None when it was not seen at fit time.
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes.binary_search_by(|c| c.as_str().cmp(label)).ok()
            // A mapping read from disk is not guaranteed to be sorted.
            .or_else(|| self.classes.iter().position(|c| c == label))
    }

    /// Encode every label, failing on the first unknown one.
    pub fn encode_all<'a, I>(&self, labels: I) -> PredictorResult<Vec<usize>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        labels
            .into_iter()
            .map(|l| {
                self.encode(l).ok_or_else(|| {
                    PredictorError::Training(format!("label '{l}' is not in the mapping"))
                })
            })
            .collect()
    }

    /// Label for a class index. Out-of-range indices are an error,
    /// never clamped.
    pub fn decode(&self, index: usize) -> PredictorResult<&str> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(PredictorError::MappingOutOfRange { index, len: self.classes.len() })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }
}
