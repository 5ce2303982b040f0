// ============================================================
// Layer 5 — Named Feature Rows
// ============================================================
// A single input row as ordered (column name, value) pairs:
//
//   [("club", Text("Liverpool")),
//    ("national_team", Text("Egypt")),
//    ("age", Number(32.0))]
//
// The pipeline records the column names it was fit on and
// rejects rows whose names or order differ.

use crate::domain::player::PlayerRecord;
use crate::domain::prediction::PredictionRequest;

pub const COL_CLUB:          &str = "club";
pub const COL_NATIONAL_TEAM: &str = "national_team";
pub const COL_AGE:           &str = "age";

/// Input column order of the player pipeline.
pub const FEATURE_COLUMNS: [&str; 3] = [COL_CLUB, COL_NATIONAL_TEAM, COL_AGE];
/// Columns that get one-hot encoded.
pub const CATEGORICAL_COLUMNS: [&str; 2] = [COL_CLUB, COL_NATIONAL_TEAM];
/// Columns passed through unchanged.
pub const PASSTHROUGH_COLUMNS: [&str; 1] = [COL_AGE];

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRow {
    columns: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column (builder style).
    pub fn with(mut self, name: impl Into<String>, value: FeatureValue) -> Self {
        self.columns.push((name.into(), value));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

impl From<&PredictionRequest> for FeatureRow {
    fn from(req: &PredictionRequest) -> Self {
        FeatureRow::new()
            .with(COL_CLUB, FeatureValue::Text(req.club.clone()))
            .with(COL_NATIONAL_TEAM, FeatureValue::Text(req.national_team.clone()))
            .with(COL_AGE, FeatureValue::Number(req.age as f64))
    }
}

impl From<&PlayerRecord> for FeatureRow {
    fn from(rec: &PlayerRecord) -> Self {
        FeatureRow::new()
            .with(COL_CLUB, FeatureValue::Text(rec.club.clone()))
            .with(COL_NATIONAL_TEAM, FeatureValue::Text(rec.national_team.clone()))
            .with(COL_AGE, FeatureValue::Number(rec.age as f64))
    }
}
