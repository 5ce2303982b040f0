// ============================================================
// Layer 5 — Inference Service
// ============================================================
// One prediction per call:
//
//   PredictionRequest ──▶ FeatureRow (club, national_team, age)
//                     ──▶ Pipeline::predict_row → class index
//                     ──▶ LabelMapping::decode  → player name
//
// Stateless apart from the LoadedModel it reads. A class index the
// mapping cannot decode is logged and returned as
// MappingOutOfRange, never clamped to a valid label.

use serde::Serialize;

use crate::domain::error::{PredictorError, PredictorResult};
use crate::domain::label_mapping::LabelMapping;
use crate::domain::prediction::{PredictionRequest, PredictionResponse};
use crate::ml::features::FeatureRow;
use crate::ml::pipeline::Pipeline;

/// Pipeline and label mapping fetched from the same training run.
#[derive(Debug)]
pub struct LoadedModel {
    pub run_id:   String,
    pub pipeline: Pipeline,
    pub labels:   LabelMapping,
}

impl LoadedModel {
    pub fn predict(&self, request: &PredictionRequest) -> PredictorResult<PredictionResponse> {
        predict(request, &self.pipeline, &self.labels)
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            run_id:          self.run_id.clone(),
            classes:         self.labels.classes().to_vec(),
            feature_columns: self.pipeline.feature_columns().to_vec(),
        }
    }
}

/// What `GET /api/model` reports about the served model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub run_id:          String,
    pub classes:         Vec<String>,
    pub feature_columns: Vec<String>,
}

pub fn predict(
    request:  &PredictionRequest,
    pipeline: &Pipeline,
    labels:   &LabelMapping,
) -> PredictorResult<PredictionResponse> {
    let row   = FeatureRow::from(request);
    let index = pipeline.predict_row(&row)?;

    let label = labels.decode(index).map_err(|e| {
        tracing::error!("Pipeline and label mapping disagree: {e}");
        e
    })?;

    tracing::debug!(
        "Predicted '{}' (class {}) for club='{}' national_team='{}' age={}",
        label, index, request.club, request.national_team, request.age
    );

    Ok(PredictionResponse::Label(label.to_string()))
}

/// Predict and return the bare label.
pub fn predict_label(model: &LoadedModel, request: &PredictionRequest) -> PredictorResult<String> {
    match model.predict(request)? {
        PredictionResponse::Label(l) => Ok(l),
        PredictionResponse::Pending  => Err(PredictorError::FeatureMismatch("no input given".into())),
    }
}
