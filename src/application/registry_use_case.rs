// ============================================================
// Layer 2 — RegistryUseCase
// ============================================================
// Housekeeping on the tracking store: list runs, list model
// versions, and move a version between stages.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::run::{ModelVersion, RunInfo};
use crate::domain::traits::TrackingStore;
use crate::infra::tracking::FileTrackingStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoteConfig {
    pub model_name:       String,
    pub version:          u32,
    pub stage:            String,
    /// Move versions already in `stage` to Archived.
    pub archive_existing: bool,
}

pub struct RegistryUseCase {
    store: FileTrackingStore,
}

impl RegistryUseCase {
    pub fn new(tracking_dir: impl Into<PathBuf>) -> Self {
        Self { store: FileTrackingStore::new(tracking_dir) }
    }

    pub fn runs(&self) -> Result<Vec<RunInfo>> {
        self.store
            .list_runs()
            .with_context(|| format!("Cannot list runs in '{}'", self.store.root().display()))
    }

    /// Registered versions, newest first.
    pub fn versions(&self, model_name: &str) -> Result<Vec<ModelVersion>> {
        let mut versions = self.store.model_versions(model_name)?;
        versions.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(versions)
    }

    pub fn promote(&self, cfg: &PromoteConfig) -> Result<ModelVersion> {
        self.store
            .transition_stage(&cfg.model_name, cfg.version, &cfg.stage, cfg.archive_existing)
            .with_context(|| {
                format!("Cannot move '{}' version {} to {}", cfg.model_name, cfg.version, cfg.stage)
            })
    }
}
