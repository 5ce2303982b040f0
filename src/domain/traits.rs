// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams other layers implement:
//
//   DatasetSource  → CsvDatasetLoader (Layer 4)
//   TrackingStore  → FileTrackingStore (Layer 6)
//
// The ModelResolver and the dropdown builder only see these
// traits, so tests can hand them in-memory stand-ins.

use std::path::{Path, PathBuf};

use crate::domain::error::PredictorResult;
use crate::domain::player::PlayerRecord;
use crate::domain::run::{ModelVersion, RunInfo};

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Anything that can hand out a snapshot of the player dataset.
pub trait DatasetSource {
    /// Load every row. An unavailable snapshot is an error; callers
    /// decide whether that is fatal (training) or not (dropdowns).
    fn load_all(&self) -> PredictorResult<Vec<PlayerRecord>>;
}

// ─── TrackingStore ────────────────────────────────────────────────────────────
/// Read side of the experiment tracker, as needed by the resolver.
pub trait TrackingStore {
    /// Metadata for one run, or None when the id is unknown.
    fn get_run(&self, run_id: &str) -> PredictorResult<Option<RunInfo>>;

    /// Every registered version of a model name. Empty when the name
    /// was never registered.
    fn model_versions(&self, model_name: &str) -> PredictorResult<Vec<ModelVersion>>;

    /// Copy `artifact_path` of `run_id` below `dest_dir` and return the
    /// local file. None when the run never logged that artifact.
    fn download_artifact(
        &self,
        run_id:        &str,
        artifact_path: &str,
        dest_dir:      &Path,
    ) -> PredictorResult<Option<PathBuf>>;
}
