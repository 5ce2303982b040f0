// ============================================================
// Layer 5 — Prediction Pipeline
// ============================================================
// Preprocessing + classifier as one serializable unit:
//
//   FeatureRow ──▶ ColumnTransformer ──▶ DecisionTree ──▶ class index
//
// The tree is linfa-trees' CART with Gini impurity. Once fit (or
// deserialized from a run artifact) a Pipeline is never mutated;
// the server shares it read-only behind an Arc.

use std::fmt;

use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::domain::error::{PredictorError, PredictorResult};
use crate::ml::encoder::ColumnTransformer;
use crate::ml::features::{FeatureRow, CATEGORICAL_COLUMNS, FEATURE_COLUMNS, PASSTHROUGH_COLUMNS};

/// Hyperparameters of the decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth:        usize,
    pub min_samples_leaf: usize,
    /// Recorded with the run; linfa's CART has no randomised step.
    pub random_state:     u64,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self { max_depth: 5, min_samples_leaf: 1, random_state: 42 }
    }
}

#[derive(Serialize, Deserialize)]
pub struct Pipeline {
    feature_columns: Vec<String>,
    preprocessor:    ColumnTransformer,
    classifier:      DecisionTree<f64, usize>,
    n_classes:       usize,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("feature_columns", &self.feature_columns)
            .field("n_features_out", &self.preprocessor.n_features_out())
            .field("n_classes", &self.n_classes)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Fit the one-hot vocabulary and the tree on `rows`.
    ///
    /// `targets[i]` is the encoded label of `rows[i]`, each below `n_classes`.
    pub fn fit(
        rows:      &[FeatureRow],
        targets:   &[usize],
        n_classes: usize,
        params:    &TreeParams,
    ) -> PredictorResult<Self> {
        if rows.is_empty() {
            return Err(PredictorError::Training("no training rows".into()));
        }
        if rows.len() != targets.len() {
            return Err(PredictorError::Training(format!(
                "{} rows but {} targets",
                rows.len(),
                targets.len()
            )));
        }
        if let Some(&bad) = targets.iter().find(|&&t| t >= n_classes) {
            return Err(PredictorError::Training(format!(
                "target {bad} is outside {n_classes} classes"
            )));
        }

        let preprocessor = ColumnTransformer::fit(rows, &CATEGORICAL_COLUMNS, &PASSTHROUGH_COLUMNS)?;
        let records      = to_matrix(&preprocessor, rows)?;
        let dataset      = Dataset::new(records, Array1::from(targets.to_vec()));

        let classifier = DecisionTree::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(Some(params.max_depth))
            .min_weight_leaf(params.min_samples_leaf as f32)
            .fit(&dataset)
            .map_err(|e| PredictorError::Training(e.to_string()))?;

        tracing::debug!(
            "Fitted tree on {} rows, {} features, {} classes",
            rows.len(),
            preprocessor.n_features_out(),
            n_classes
        );

        Ok(Self {
            feature_columns: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            preprocessor,
            classifier,
            n_classes,
        })
    }

    /// Class index for a single row.
    pub fn predict_row(&self, row: &FeatureRow) -> PredictorResult<usize> {
        let mut out = self.predict_rows(std::slice::from_ref(row))?;
        out.pop()
            .ok_or_else(|| PredictorError::Training("classifier returned no prediction".into()))
    }

    /// Class index for each row, in order.
    pub fn predict_rows(&self, rows: &[FeatureRow]) -> PredictorResult<Vec<usize>> {
        for row in rows {
            self.check_columns(row)?;
        }
        let records = to_matrix(&self.preprocessor, rows)?;
        let predicted: Array1<usize> = self.classifier.predict(&records);
        Ok(predicted.to_vec())
    }

    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Column names and order must match the ones seen at fit time.
    fn check_columns(&self, row: &FeatureRow) -> PredictorResult<()> {
        let got: Vec<&str> = row.names().collect();
        if got.len() != self.feature_columns.len()
            || got.iter().zip(&self.feature_columns).any(|(g, e)| *g != e.as_str())
        {
            return Err(PredictorError::FeatureMismatch(format!(
                "expected columns {:?}, got {:?}",
                self.feature_columns, got
            )));
        }
        Ok(())
    }
}

fn to_matrix(preprocessor: &ColumnTransformer, rows: &[FeatureRow]) -> PredictorResult<Array2<f64>> {
    let width = preprocessor.n_features_out();
    let mut flat = Vec::with_capacity(rows.len() * width);
    for row in rows {
        flat.extend(preprocessor.transform(row)?);
    }
    Array2::from_shape_vec((rows.len(), width), flat)
        .map_err(|e| PredictorError::FeatureMismatch(e.to_string()))
}
