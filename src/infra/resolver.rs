// ============================================================
// Layer 6 — Model Resolver
// ============================================================
// Turns a SelectionPolicy into a LoadedModel, once, at startup:
//
//   1. select   policy ──▶ run id
//                 RunId   the run must exist
//                 Latest  highest registered version
//                 Stage   highest version in that stage (any case)
//   2. fetch    both artifacts of THAT run into <cache>/<run_id>/
//   3. verify   embedded run id == selected run
//               pipeline classes == label mapping length
//
// Every failure here is fatal for the server: it never starts
// with a partial or mixed model.

use std::{fs, path::PathBuf};

use crate::domain::error::{PredictorError, PredictorResult};
use crate::domain::label_mapping::LabelMapping;
use crate::domain::policy::SelectionPolicy;
use crate::domain::traits::TrackingStore;
use crate::infra::artifacts::{PipelineArtifact, LABELS_ARTIFACT_PATH, MODEL_ARTIFACT_PATH};
use crate::ml::inferencer::LoadedModel;

pub struct ModelResolver<S> {
    store:     S,
    cache_dir: PathBuf,
}

impl<S: TrackingStore> ModelResolver<S> {
    pub fn new(store: S, cache_dir: impl Into<PathBuf>) -> Self {
        Self { store, cache_dir: cache_dir.into() }
    }

    pub fn resolve(&self, policy: &SelectionPolicy) -> PredictorResult<LoadedModel> {
        let run_id = self.select_run(policy)?;
        tracing::info!("Resolved {} to run {}", policy, run_id);

        let model = self.load_run(&run_id)?;
        tracing::info!(
            "Loaded model from run {} ({} classes)",
            model.run_id,
            model.labels.len()
        );
        Ok(model)
    }

    /// Run id the policy points at.
    pub fn select_run(&self, policy: &SelectionPolicy) -> PredictorResult<String> {
        match policy {
            SelectionPolicy::RunId { run_id } => self
                .store
                .get_run(run_id)?
                .map(|run| run.run_id)
                .ok_or_else(|| PredictorError::NotFound(policy.to_string())),

            SelectionPolicy::Latest { model_name } => self
                .store
                .model_versions(model_name)?
                .into_iter()
                .max_by_key(|v| v.version)
                .map(|v| v.run_id)
                .ok_or_else(|| PredictorError::NotFound(policy.to_string())),

            SelectionPolicy::Stage { model_name, stage } => self
                .store
                .model_versions(model_name)?
                .into_iter()
                .filter(|v| v.is_in_stage(stage))
                .max_by_key(|v| v.version)
                .map(|v| v.run_id)
                .ok_or_else(|| PredictorError::NotFound(policy.to_string())),
        }
    }

    /// Fetch and cross-check both artifacts of one run.
    pub fn load_run(&self, run_id: &str) -> PredictorResult<LoadedModel> {
        let model_path  = self.fetch(run_id, MODEL_ARTIFACT_PATH)?;
        let labels_path = self.fetch(run_id, LABELS_ARTIFACT_PATH)?;

        let artifact: PipelineArtifact = serde_json::from_str(&fs::read_to_string(&model_path)?)
            .map_err(|source| PredictorError::Deserialization { path: model_path.clone(), source })?;
        let labels = LabelMapping::from_json(&fs::read_to_string(&labels_path)?)
            .map_err(|source| PredictorError::Deserialization { path: labels_path.clone(), source })?;

        if artifact.run_id != run_id {
            return Err(PredictorError::InconsistentArtifacts {
                run_id: run_id.to_string(),
                reason: format!("pipeline was logged by run '{}'", artifact.run_id),
            });
        }
        if artifact.pipeline.n_classes() != labels.len() {
            return Err(PredictorError::InconsistentArtifacts {
                run_id: run_id.to_string(),
                reason: format!(
                    "pipeline has {} classes, label mapping has {}",
                    artifact.pipeline.n_classes(),
                    labels.len()
                ),
            });
        }

        Ok(LoadedModel { run_id: run_id.to_string(), pipeline: artifact.pipeline, labels })
    }

    fn fetch(&self, run_id: &str, artifact: &str) -> PredictorResult<PathBuf> {
        self.store
            .download_artifact(run_id, artifact, &self.cache_dir)?
            .ok_or_else(|| PredictorError::ArtifactMissing {
                run_id:   run_id.to_string(),
                artifact: artifact.to_string(),
            })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::STAGE_PRODUCTION;
    use crate::domain::prediction::PredictionRequest;
    use crate::infra::artifacts::log_model_artifacts;
    use crate::infra::tracking::FileTrackingStore;
    use crate::ml::features::FeatureRow;
    use crate::ml::pipeline::{Pipeline, TreeParams};

    const MODEL: &str = "player-predictor";

    fn pipeline(n_classes: usize) -> Pipeline {
        let rows: Vec<FeatureRow> = [
            ("Inter Miami", "Argentina", 38),
            ("Liverpool", "Egypt", 32),
            ("Real Madrid", "France", 26),
        ]
        .iter()
        .map(|&(c, n, a)| FeatureRow::from(&PredictionRequest::new(c, n, a)))
        .collect();
        let targets: Vec<usize> = (0..3).map(|i| i % n_classes).collect();
        Pipeline::fit(&rows, &targets, n_classes, &TreeParams::default()).unwrap()
    }

    fn labels(names: &[&str]) -> LabelMapping {
        LabelMapping::from_classes(names.iter().map(|s| s.to_string()).collect())
    }

    /// A complete run registered under MODEL, with the given label set.
    fn trained_run(store: &FileTrackingStore, names: &[&str]) -> String {
        let run = store.create_run("test").unwrap();
        log_model_artifacts(store, &run.run_id, pipeline(names.len()), &labels(names)).unwrap();
        store.register_model(MODEL, &run.run_id).unwrap();
        run.run_id
    }

    fn setup() -> (tempfile::TempDir, FileTrackingStore) {
        let dir   = tempfile::tempdir().unwrap();
        let store = FileTrackingStore::new(dir.path().join("mlruns"));
        (dir, store)
    }

    fn resolver(dir: &tempfile::TempDir, store: FileTrackingStore) -> ModelResolver<FileTrackingStore> {
        ModelResolver::new(store, dir.path().join("cache"))
    }

    #[test]
    fn test_run_id_policy_loads_that_run() {
        let (dir, store) = setup();
        let first = trained_run(&store, &["Lionel Messi", "Mohamed Salah"]);
        let _     = trained_run(&store, &["A", "B", "C"]);

        let model = resolver(&dir, store).resolve(&SelectionPolicy::run_id(&first)).unwrap();
        assert_eq!(model.run_id, first);
        assert_eq!(model.labels.classes(), ["Lionel Messi", "Mohamed Salah"]);
        assert!(dir.path().join("cache").join(&first).join(MODEL_ARTIFACT_PATH).exists());
    }

    #[test]
    fn test_latest_picks_highest_version() {
        let (dir, store) = setup();
        let _      = trained_run(&store, &["A", "B"]);
        let second = trained_run(&store, &["A", "B", "C"]);

        let model = resolver(&dir, store).resolve(&SelectionPolicy::latest(MODEL)).unwrap();
        assert_eq!(model.run_id, second);
        assert_eq!(model.labels.len(), 3);
    }

    #[test]
    fn test_stage_policy_ignores_case() {
        let (dir, store) = setup();
        let promoted = trained_run(&store, &["A", "B"]);
        let _        = trained_run(&store, &["A", "B", "C"]);
        store.transition_stage(MODEL, 1, STAGE_PRODUCTION, true).unwrap();

        let model = resolver(&dir, store)
            .resolve(&SelectionPolicy::stage(MODEL, "production"))
            .unwrap();
        assert_eq!(model.run_id, promoted);
    }

    #[test]
    fn test_unmatched_policies_are_not_found() {
        let (dir, store) = setup();
        trained_run(&store, &["A", "B"]);
        let r = resolver(&dir, store);

        for policy in [
            SelectionPolicy::run_id("does-not-exist"),
            SelectionPolicy::latest("unregistered"),
            SelectionPolicy::stage(MODEL, "Staging"),
        ] {
            assert!(matches!(r.resolve(&policy), Err(PredictorError::NotFound(_))), "{policy}");
        }
    }

    #[test]
    fn test_missing_label_artifact_never_borrows_from_other_run() {
        let (dir, store) = setup();
        let _       = trained_run(&store, &["A", "B"]);
        let partial = store.create_run("test").unwrap().run_id;
        let body    = serde_json::to_vec(&PipelineArtifact {
            run_id:   partial.clone(),
            pipeline: pipeline(2),
        })
        .unwrap();
        store.log_artifact_bytes(&partial, MODEL_ARTIFACT_PATH, &body).unwrap();

        let err = resolver(&dir, store).resolve(&SelectionPolicy::run_id(&partial)).unwrap_err();
        assert!(matches!(
            err,
            PredictorError::ArtifactMissing { ref run_id, ref artifact }
                if run_id == &partial && artifact == LABELS_ARTIFACT_PATH
        ));
    }

    #[test]
    fn test_corrupt_labels_are_deserialization_error() {
        let (dir, store) = setup();
        let run_id = trained_run(&store, &["A", "B"]);
        store.log_artifact_bytes(&run_id, LABELS_ARTIFACT_PATH, b"{not json").unwrap();

        let err = resolver(&dir, store).resolve(&SelectionPolicy::run_id(&run_id)).unwrap_err();
        assert!(matches!(err, PredictorError::Deserialization { .. }));
    }

    #[test]
    fn test_class_count_mismatch_is_inconsistent() {
        let (dir, store) = setup();
        let run_id = trained_run(&store, &["A", "B", "C"]);
        store
            .log_artifact_bytes(&run_id, LABELS_ARTIFACT_PATH, labels(&["A", "B"]).to_json().unwrap().as_bytes())
            .unwrap();

        let err = resolver(&dir, store).resolve(&SelectionPolicy::run_id(&run_id)).unwrap_err();
        assert!(matches!(err, PredictorError::InconsistentArtifacts { .. }));
    }

    #[test]
    fn test_pipeline_copied_from_other_run_is_inconsistent() {
        let (dir, store) = setup();
        let source = trained_run(&store, &["A", "B"]);
        let target = trained_run(&store, &["A", "B"]);

        let foreign = fs::read(
            store.root().join("runs").join(&source).join("artifacts").join(MODEL_ARTIFACT_PATH),
        )
        .unwrap();
        store.log_artifact_bytes(&target, MODEL_ARTIFACT_PATH, &foreign).unwrap();

        let err = resolver(&dir, store).resolve(&SelectionPolicy::run_id(&target)).unwrap_err();
        assert!(matches!(err, PredictorError::InconsistentArtifacts { .. }));
    }
}
