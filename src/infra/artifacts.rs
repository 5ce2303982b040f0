// ============================================================
// Layer 6 — Run Artifacts
// ============================================================
// What a training run stores and what serving reads back:
//
//   player-predictor-model/model.json       PipelineArtifact (JSON)
//   model_meta/label_encoder_classes.json   LabelMapping (JSON array)
//
// The pipeline artifact embeds the run id it was logged under so
// a loader can tell when files from different runs got mixed.

use serde::{Deserialize, Serialize};

use crate::domain::error::{PredictorError, PredictorResult};
use crate::domain::label_mapping::LabelMapping;
use crate::infra::tracking::FileTrackingStore;
use crate::ml::pipeline::Pipeline;

/// Artifact path of the serialized pipeline.
pub const MODEL_ARTIFACT_PATH: &str = "player-predictor-model/model.json";

/// Artifact path of the label mapping, relative to the run.
pub const LABELS_ARTIFACT_PATH: &str = "model_meta/label_encoder_classes.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct PipelineArtifact {
    pub run_id:   String,
    pub pipeline: Pipeline,
}

/// Log the pipeline and the label mapping under `run_id`.
pub fn log_model_artifacts(
    store:    &FileTrackingStore,
    run_id:   &str,
    pipeline: Pipeline,
    labels:   &LabelMapping,
) -> PredictorResult<Pipeline> {
    let artifact = PipelineArtifact { run_id: run_id.to_string(), pipeline };
    let model_json = serde_json::to_vec(&artifact).map_err(|source| {
        PredictorError::Serialization { path: MODEL_ARTIFACT_PATH.into(), source }
    })?;
    let labels_json = labels.to_json().map_err(|source| {
        PredictorError::Serialization { path: LABELS_ARTIFACT_PATH.into(), source }
    })?;

    store.log_artifact_bytes(run_id, MODEL_ARTIFACT_PATH, &model_json)?;
    store.log_artifact_bytes(run_id, LABELS_ARTIFACT_PATH, labels_json.as_bytes())?;

    tracing::info!("Logged model and {} label classes to run {}", labels.len(), run_id);
    Ok(artifact.pipeline)
}
