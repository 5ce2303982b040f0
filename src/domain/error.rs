// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the predictor can report, split by where it
// surfaces:
//
//   startup (fatal)   NotFound, ArtifactMissing, Deserialization,
//                     InconsistentArtifacts
//   per request       FeatureMismatch        → 400 to the client
//                     MappingOutOfRange      → logged, 500
//   collaborators     DatasetUnavailable, Csv, Training, Io, Template,
//                     Serialization, InvalidName
//
// Lower layers return `Result<T, PredictorError>`; the application
// and CLI layers wrap these in anyhow with extra context.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used by the domain, data, ml and infra layers.
pub type PredictorResult<T> = Result<T, PredictorError>;

#[derive(Debug, Error)]
pub enum PredictorError {
    /// No run matches the selection policy.
    #[error("no run found for {0}")]
    NotFound(String),

    /// The run exists but one of its artifacts was never logged.
    #[error("run '{run_id}' has no artifact '{artifact}' (incomplete training run?)")]
    ArtifactMissing { run_id: String, artifact: String },

    /// An artifact or metadata file could not be parsed.
    #[error("cannot deserialize '{path}': {source}")]
    Deserialization {
        path:   PathBuf,
        source: serde_json::Error,
    },

    /// A run or metadata file could not be written as JSON.
    #[error("cannot serialize '{path}': {source}")]
    Serialization {
        path:   PathBuf,
        source: serde_json::Error,
    },

    /// A model name or artifact path that cannot be stored.
    #[error("invalid {kind} '{value}'")]
    InvalidName { kind: &'static str, value: String },

    /// The pipeline and label mapping do not belong together.
    #[error("inconsistent artifacts for run '{run_id}': {reason}")]
    InconsistentArtifacts { run_id: String, reason: String },

    /// The request does not match the column contract of the pipeline.
    #[error("feature mismatch: {0}")]
    FeatureMismatch(String),

    /// The classifier produced a class index the label mapping cannot decode.
    #[error("class index {index} is outside the label mapping (len {len})")]
    MappingOutOfRange { index: usize, len: usize },

    /// The dataset snapshot file is missing.
    #[error("dataset snapshot '{0}' is unavailable")]
    DatasetUnavailable(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Fitting or evaluating the pipeline failed.
    #[error("training failed: {0}")]
    Training(String),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PredictorError {
    /// True for errors caused by the caller's input rather than by the
    /// service itself.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictorError::FeatureMismatch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_feature_mismatch_is_client_error() {
        assert!(PredictorError::FeatureMismatch("age".into()).is_client_error());
        assert!(!PredictorError::MappingOutOfRange { index: 3, len: 2 }.is_client_error());
        assert!(!PredictorError::NotFound("run 'x'".into()).is_client_error());
    }

    #[test]
    fn test_messages_name_the_run() {
        let err = PredictorError::ArtifactMissing {
            run_id:   "abc".into(),
            artifact: "model_meta/label_encoder_classes.json".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("abc"));
        assert!(msg.contains("label_encoder_classes.json"));
    }

    #[test]
    fn test_invalid_name_message() {
        let err = PredictorError::InvalidName { kind: "model name", value: "a b".into() };
        assert_eq!(err.to_string(), "invalid model name 'a b'");
    }
}
