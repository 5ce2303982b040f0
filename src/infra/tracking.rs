// ============================================================
// Layer 6 — File Tracking Store
// ============================================================
// A local experiment tracker: runs with params, metrics and
// artifacts, plus a model registry with staged versions.
//
// Layout under the tracking root:
//
//   runs/<run_id>/run.json             RunInfo (params, metrics)
//   runs/<run_id>/artifacts/<path>     logged files
//   registry/<model_name>.json         registered versions + stages
//
// JSON files are written to a temporary sibling and renamed into
// place, so readers never see a half-written file.

use std::{
    fs,
    path::{Component, Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::domain::error::{PredictorError, PredictorResult};
use crate::domain::policy::STAGE_ARCHIVED;
use crate::domain::run::{ModelVersion, RunInfo};
use crate::domain::traits::TrackingStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RegisteredModel {
    name:     String,
    versions: Vec<ModelVersion>,
}

#[derive(Debug, Clone)]
pub struct FileTrackingStore {
    root: PathBuf,
}

impl FileTrackingStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where resolvers download artifacts to by default.
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(".cache")
    }

    // ─── Runs ────────────────────────────────────────────────────────────────

    /// Start a new run under `experiment` with a fresh id.
    pub fn create_run(&self, experiment: &str) -> PredictorResult<RunInfo> {
        let run = RunInfo {
            run_id:        uuid::Uuid::new_v4().simple().to_string(),
            experiment:    experiment.to_string(),
            created_at_ms: now_ms(),
            params:        Default::default(),
            metrics:       Default::default(),
        };
        fs::create_dir_all(self.artifacts_dir(&run.run_id))?;
        write_json(&self.run_file(&run.run_id), &run)?;

        tracing::info!("Started run {} in experiment '{}'", run.run_id, experiment);
        Ok(run)
    }

    pub fn log_param(&self, run_id: &str, key: &str, value: impl ToString) -> PredictorResult<()> {
        self.update_run(run_id, |run| {
            run.params.insert(key.to_string(), value.to_string());
        })
    }

    pub fn log_metric(&self, run_id: &str, key: &str, value: f64) -> PredictorResult<()> {
        self.update_run(run_id, |run| {
            run.metrics.insert(key.to_string(), value);
        })
    }

    /// Store `bytes` as `artifact_path` of the run.
    pub fn log_artifact_bytes(
        &self,
        run_id:        &str,
        artifact_path: &str,
        bytes:         &[u8],
    ) -> PredictorResult<PathBuf> {
        self.require_run(run_id)?;
        let rel = relative_artifact_path(artifact_path).ok_or_else(|| PredictorError::InvalidName {
            kind:  "artifact path",
            value: artifact_path.to_string(),
        })?;

        let dest = self.artifacts_dir(run_id).join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, bytes)?;

        tracing::debug!("Logged artifact '{}' for run {}", artifact_path, run_id);
        Ok(dest)
    }

    /// Every run, newest first.
    pub fn list_runs(&self) -> PredictorResult<Vec<RunInfo>> {
        let runs_dir = self.root.join("runs");
        if !runs_dir.exists() {
            return Ok(Vec::new());
        }

        let mut runs = Vec::new();
        for entry in fs::read_dir(&runs_dir)? {
            let entry = entry?;
            if let Some(run) = read_json::<RunInfo>(&entry.path().join("run.json"))? {
                runs.push(run);
            }
        }
        runs.sort_by(|a, b| {
            b.created_at_ms.cmp(&a.created_at_ms).then_with(|| a.run_id.cmp(&b.run_id))
        });
        Ok(runs)
    }

    // ─── Registry ────────────────────────────────────────────────────────────

    /// Register `run_id` as the next version of `model_name`.
    pub fn register_model(&self, model_name: &str, run_id: &str) -> PredictorResult<ModelVersion> {
        self.require_run(run_id)?;
        let path = self.registry_file(model_name)?;
        let mut model = read_json::<RegisteredModel>(&path)?.unwrap_or_else(|| RegisteredModel {
            name:     model_name.to_string(),
            versions: Vec::new(),
        });

        let version = ModelVersion {
            version:       model.versions.iter().map(|v| v.version).max().unwrap_or(0) + 1,
            run_id:        run_id.to_string(),
            created_at_ms: now_ms(),
            stage:         None,
        };
        model.versions.push(version.clone());
        write_json(&path, &model)?;

        tracing::info!(
            "Registered run {} as '{}' version {}",
            run_id,
            model_name,
            version.version
        );
        Ok(version)
    }

    /// Move a version into `stage` ("None" clears the stage). With
    /// `archive_existing`, versions already in that stage move to Archived.
    pub fn transition_stage(
        &self,
        model_name:       &str,
        version:          u32,
        stage:            &str,
        archive_existing: bool,
    ) -> PredictorResult<ModelVersion> {
        let path = self.registry_file(model_name)?;
        let mut model = read_json::<RegisteredModel>(&path)?
            .ok_or_else(|| PredictorError::NotFound(format!("registered model '{model_name}'")))?;

        if !model.versions.iter().any(|v| v.version == version) {
            return Err(PredictorError::NotFound(format!("models:/{model_name}/{version}")));
        }

        let new_stage = (!stage.eq_ignore_ascii_case("none")).then(|| stage.to_string());

        for v in &mut model.versions {
            if v.version == version {
                v.stage = new_stage.clone();
            } else if archive_existing && new_stage.is_some() && v.is_in_stage(stage) {
                tracing::info!("Archiving '{}' version {}", model_name, v.version);
                v.stage = Some(STAGE_ARCHIVED.to_string());
            }
        }
        write_json(&path, &model)?;

        let updated = model
            .versions
            .into_iter()
            .find(|v| v.version == version)
            .ok_or_else(|| PredictorError::NotFound(format!("models:/{model_name}/{version}")))?;
        tracing::info!("'{}' version {} is now in stage {:?}", model_name, version, updated.stage);
        Ok(updated)
    }

    // ─── Paths ───────────────────────────────────────────────────────────────

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root.join("runs").join(run_id)
    }

    fn run_file(&self, run_id: &str) -> PathBuf {
        self.run_dir(run_id).join("run.json")
    }

    fn artifacts_dir(&self, run_id: &str) -> PathBuf {
        self.run_dir(run_id).join("artifacts")
    }

    fn registry_file(&self, model_name: &str) -> PredictorResult<PathBuf> {
        validate_model_name(model_name)?;
        Ok(self.root.join("registry").join(format!("{model_name}.json")))
    }

    fn require_run(&self, run_id: &str) -> PredictorResult<RunInfo> {
        self.get_run(run_id)?
            .ok_or_else(|| PredictorError::NotFound(format!("runs:/{run_id}")))
    }

    fn update_run(&self, run_id: &str, f: impl FnOnce(&mut RunInfo)) -> PredictorResult<()> {
        let mut run = self.require_run(run_id)?;
        f(&mut run);
        write_json(&self.run_file(run_id), &run)
    }
}

impl TrackingStore for FileTrackingStore {
    fn get_run(&self, run_id: &str) -> PredictorResult<Option<RunInfo>> {
        if !is_safe_segment(run_id) {
            return Ok(None);
        }
        read_json(&self.run_file(run_id))
    }

    fn model_versions(&self, model_name: &str) -> PredictorResult<Vec<ModelVersion>> {
        if !is_safe_segment(model_name) {
            return Ok(Vec::new());
        }
        let path = self.root.join("registry").join(format!("{model_name}.json"));
        Ok(read_json::<RegisteredModel>(&path)?
            .map(|m| m.versions)
            .unwrap_or_default())
    }

    fn download_artifact(
        &self,
        run_id:        &str,
        artifact_path: &str,
        dest_dir:      &Path,
    ) -> PredictorResult<Option<PathBuf>> {
        if !is_safe_segment(run_id) {
            return Ok(None);
        }
        let Some(rel) = relative_artifact_path(artifact_path) else {
            return Ok(None);
        };

        let src = self.artifacts_dir(run_id).join(&rel);
        if !src.is_file() {
            return Ok(None);
        }

        let dest = dest_dir.join(run_id).join(&rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&src, &dest)?;

        tracing::debug!("Downloaded '{}' of run {} to '{}'", artifact_path, run_id, dest.display());
        Ok(Some(dest))
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// Model names become registry file names: ASCII letters, digits,
/// '-', '_' and '.' only.
pub fn validate_model_name(model_name: &str) -> PredictorResult<()> {
    if is_safe_segment(model_name) {
        Ok(())
    } else {
        Err(PredictorError::InvalidName { kind: "model name", value: model_name.to_string() })
    }
}

/// Run ids and model names become directory / file names.
fn is_safe_segment(s: &str) -> bool {
    !s.is_empty()
        && s != "."
        && s != ".."
        && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Artifact paths are relative, '/'-separated and may not climb out.
fn relative_artifact_path(artifact_path: &str) -> Option<PathBuf> {
    let path = Path::new(artifact_path);
    let ok = !artifact_path.is_empty()
        && path.components().all(|c| matches!(c, Component::Normal(_)));
    ok.then(|| path.to_path_buf())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> PredictorResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| PredictorError::Deserialization { path: path.to_path_buf(), source })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> PredictorResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|source| PredictorError::Serialization { path: path.to_path_buf(), source })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Open a store rooted at `root`, creating the directory.
pub fn open_store(root: &Path) -> PredictorResult<FileTrackingStore> {
    fs::create_dir_all(root)?;
    Ok(FileTrackingStore::new(root))
}
