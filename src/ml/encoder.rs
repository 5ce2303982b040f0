// ============================================================
// Layer 5 — Column Transformer (one-hot + passthrough)
// ============================================================
// Turns a named FeatureRow into the numeric vector the tree sees:
//
//   [club one-hot ...][national_team one-hot ...][age]
//
// Each categorical column keeps the sorted vocabulary seen at fit
// time. A value outside that vocabulary encodes as an all-zero
// block (ignore-unknown), so new dropdown entries never break
// inference.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::error::{PredictorError, PredictorResult};
use crate::ml::features::{FeatureRow, FeatureValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotColumn {
    pub name:       String,
    pub categories: Vec<String>,
}

impl OneHotColumn {
    fn fit(name: &str, rows: &[FeatureRow]) -> PredictorResult<Self> {
        let mut vocab = BTreeSet::new();
        for row in rows {
            vocab.insert(text_value(row, name)?.to_string());
        }
        Ok(Self {
            name:       name.to_string(),
            categories: vocab.into_iter().collect(),
        })
    }

    /// Push one indicator per category. Returns false for an unknown value.
    fn encode_into(&self, value: &str, out: &mut Vec<f64>) -> bool {
        let hit = self.categories.binary_search_by(|c| c.as_str().cmp(value)).ok();
        out.extend((0..self.categories.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
        hit.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformer {
    categorical: Vec<OneHotColumn>,
    passthrough: Vec<String>,
}

impl ColumnTransformer {
    /// Learn the vocabulary of every categorical column.
    pub fn fit(
        rows:        &[FeatureRow],
        categorical: &[&str],
        passthrough: &[&str],
    ) -> PredictorResult<Self> {
        let categorical = categorical
            .iter()
            .map(|name| OneHotColumn::fit(name, rows))
            .collect::<PredictorResult<Vec<_>>>()?;

        Ok(Self {
            categorical,
            passthrough: passthrough.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Width of the output vector.
    pub fn n_features_out(&self) -> usize {
        self.categorical.iter().map(|c| c.categories.len()).sum::<usize>() + self.passthrough.len()
    }

    pub fn transform(&self, row: &FeatureRow) -> PredictorResult<Vec<f64>> {
        let mut out = Vec::with_capacity(self.n_features_out());

        for column in &self.categorical {
            let value = text_value(row, &column.name)?;
            if !column.encode_into(value, &mut out) {
                tracing::debug!("Unknown {} '{}' encoded as all zeros", column.name, value);
            }
        }

        for name in &self.passthrough {
            match row.get(name) {
                Some(FeatureValue::Number(v)) => out.push(*v),
                Some(FeatureValue::Text(t)) => {
                    return Err(PredictorError::FeatureMismatch(format!(
                        "column '{name}' must be numeric, got '{t}'"
                    )))
                }
                None => {
                    return Err(PredictorError::FeatureMismatch(format!("missing column '{name}'")))
                }
            }
        }

        Ok(out)
    }
}

fn text_value<'a>(row: &'a FeatureRow, name: &str) -> PredictorResult<&'a str> {
    match row.get(name) {
        Some(FeatureValue::Text(t)) => Ok(t.as_str()),
        Some(FeatureValue::Number(_)) => Err(PredictorError::FeatureMismatch(format!(
            "column '{name}' must be categorical text"
        ))),
        None => Err(PredictorError::FeatureMismatch(format!("missing column '{name}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::features::{CATEGORICAL_COLUMNS, PASSTHROUGH_COLUMNS};

    fn row(club: &str, nt: &str, age: f64) -> FeatureRow {
        FeatureRow::new()
            .with("club", FeatureValue::Text(club.into()))
            .with("national_team", FeatureValue::Text(nt.into()))
            .with("age", FeatureValue::Number(age))
    }

    fn fitted() -> ColumnTransformer {
        let rows = vec![
            row("Liverpool", "Egypt", 32.0),
            row("Inter Miami", "Argentina", 38.0),
            row("Liverpool", "Argentina", 30.0),
        ];
        ColumnTransformer::fit(&rows, &CATEGORICAL_COLUMNS, &PASSTHROUGH_COLUMNS).unwrap()
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let ct = fitted();
        assert_eq!(ct.categorical[0].categories, vec!["Inter Miami", "Liverpool"]);
        assert_eq!(ct.categorical[1].categories, vec!["Argentina", "Egypt"]);
        assert_eq!(ct.n_features_out(), 5);
    }

    #[test]
    fn test_known_values_one_hot_then_age() {
        let ct = fitted();
        let v  = ct.transform(&row("Liverpool", "Egypt", 32.0)).unwrap();
        assert_eq!(v, vec![0.0, 1.0, 0.0, 1.0, 32.0]);
    }

    #[test]
    fn test_unknown_value_is_all_zero_block() {
        let ct = fitted();
        let v  = ct.transform(&row("Nonexistent FC", "Egypt", 20.0)).unwrap();
        assert_eq!(v, vec![0.0, 0.0, 0.0, 1.0, 20.0]);
    }

    #[test]
    fn test_text_age_is_feature_mismatch() {
        let ct  = fitted();
        let bad = FeatureRow::new()
            .with("club", FeatureValue::Text("Liverpool".into()))
            .with("national_team", FeatureValue::Text("Egypt".into()))
            .with("age", FeatureValue::Text("old".into()));
        assert!(matches!(ct.transform(&bad), Err(PredictorError::FeatureMismatch(_))));
    }
}
