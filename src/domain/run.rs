// ============================================================
// Layer 3 — Tracked Runs and Model Versions
// ============================================================
// A run is one training invocation: its params, metrics and a
// folder of artifacts. A model version points a registered model
// name at one run and optionally carries a deployment stage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunInfo {
    pub run_id:        String,
    pub experiment:    String,
    pub created_at_ms: i64,
    #[serde(default)]
    pub params:        BTreeMap<String, String>,
    #[serde(default)]
    pub metrics:       BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelVersion {
    pub version:       u32,
    pub run_id:        String,
    pub created_at_ms: i64,
    #[serde(default)]
    pub stage:         Option<String>,
}

impl ModelVersion {
    /// Stage names compare case-insensitively ("production" == "Production").
    pub fn is_in_stage(&self, stage: &str) -> bool {
        self.stage
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(stage))
    }
}
