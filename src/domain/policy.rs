// ============================================================
// Layer 3 — Selection Policy
// ============================================================
// Which training run supplies the artifacts to serve:
//
//   RunId   exact run identifier
//   Latest  highest registered version of a model, any stage
//   Stage   highest version currently promoted to a stage
//
// Dispatched once at startup by the ModelResolver (Layer 6).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default target of `promote`. Any stage name is accepted.
pub const STAGE_PRODUCTION: &str = "Production";
/// Where `archive_existing` moves the previous holders of a stage.
pub const STAGE_ARCHIVED:   &str = "Archived";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SelectionPolicy {
    RunId  { run_id: String },
    Latest { model_name: String },
    Stage  { model_name: String, stage: String },
}

impl SelectionPolicy {
    pub fn run_id(run_id: impl Into<String>) -> Self {
        Self::RunId { run_id: run_id.into() }
    }

    pub fn latest(model_name: impl Into<String>) -> Self {
        Self::Latest { model_name: model_name.into() }
    }

    pub fn stage(model_name: impl Into<String>, stage: impl Into<String>) -> Self {
        Self::Stage { model_name: model_name.into(), stage: stage.into() }
    }
}

/// Rendered the way the registry addresses models, e.g.
/// `runs:/<id>`, `models:/player-predictor/latest`.
impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::RunId { run_id }            => write!(f, "runs:/{run_id}"),
            SelectionPolicy::Latest { model_name }       => write!(f, "models:/{model_name}/latest"),
            SelectionPolicy::Stage { model_name, stage } => write!(f, "models:/{model_name}/{stage}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_registry_uris() {
        assert_eq!(SelectionPolicy::run_id("abc").to_string(), "runs:/abc");
        assert_eq!(
            SelectionPolicy::latest("player-predictor").to_string(),
            "models:/player-predictor/latest"
        );
        assert_eq!(
            SelectionPolicy::stage("player-predictor", STAGE_PRODUCTION).to_string(),
            "models:/player-predictor/Production"
        );
    }
}
