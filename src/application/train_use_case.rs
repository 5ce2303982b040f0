// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one training run, in order:
//
//   Step 1: Load the dataset snapshot      (Layer 4 - data)
//   Step 2: Fit the label mapping          (Layer 3 - domain)
//   Step 3: Stratified train/test split    (Layer 4 - data)
//   Step 4: Fit pipeline, score accuracy   (Layer 5 - ml)
//   Step 5: Log params/metric/artifacts    (Layer 6 - infra)
//   Step 6: Register a model version       (Layer 6 - infra)
//   Step 7: Example prediction through the logged artifacts

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{loader::CsvDatasetLoader, splitter::stratified_split};
use crate::domain::label_mapping::LabelMapping;
use crate::domain::policy::SelectionPolicy;
use crate::domain::prediction::PredictionRequest;
use crate::domain::traits::DatasetSource;
use crate::infra::{
    artifacts::log_model_artifacts,
    resolver::ModelResolver,
    tracking::{open_store, validate_model_name},
};
use crate::ml::{
    features::FeatureRow,
    inferencer::predict_label,
    pipeline::TreeParams,
    trainer::run_training,
};

pub const DEFAULT_EXPERIMENT: &str = "Favorite Player Predictor";
pub const DEFAULT_MODEL_NAME: &str = "player-predictor";

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub dataset_path:     PathBuf,
    pub tracking_dir:     PathBuf,
    pub experiment:       String,
    pub model_name:       String,
    pub test_size:        f64,
    pub random_state:     u64,
    pub max_depth:        usize,
    pub min_samples_leaf: usize,
    /// Register the run as a new version of `model_name`.
    pub register:         bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path:     PathBuf::from("data/players.csv"),
            tracking_dir:     PathBuf::from("mlruns"),
            experiment:       DEFAULT_EXPERIMENT.to_string(),
            model_name:       DEFAULT_MODEL_NAME.to_string(),
            test_size:        0.3,
            random_state:     42,
            max_depth:        5,
            min_samples_leaf: 1,
            register:         true,
        }
    }
}

impl TrainConfig {
    fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth:        self.max_depth,
            min_samples_leaf: self.min_samples_leaf,
            random_state:     self.random_state,
        }
    }
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub run_id:             String,
    pub accuracy:           f64,
    pub version:            Option<u32>,
    pub example_prediction: String,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;

        // A bad name must fail before anything is logged
        if cfg.register {
            validate_model_name(&cfg.model_name).context("Cannot register the trained model")?;
        }

        // ── Step 1: Load the snapshot ─────────────────────────────────────────
        tracing::info!("Loading dataset from '{}'", cfg.dataset_path.display());
        let rows = CsvDatasetLoader::new(&cfg.dataset_path)
            .load_all()
            .context("Cannot load training dataset")?;
        if rows.is_empty() {
            bail!("Dataset '{}' has no rows", cfg.dataset_path.display());
        }

        // ── Step 2: Encode the target ─────────────────────────────────────────
        let labels = LabelMapping::fit(rows.iter().map(|r| r.favorite_player.as_str()));
        if rows.len() < labels.len() {
            bail!("{} rows cannot cover {} classes", rows.len(), labels.len());
        }
        let targets = labels.encode_all(rows.iter().map(|r| r.favorite_player.as_str()))?;
        tracing::info!("Loaded {} rows, {} classes", rows.len(), labels.len());

        // ── Step 3: Stratified split ──────────────────────────────────────────
        let samples: Vec<(FeatureRow, usize)> = rows
            .iter()
            .map(FeatureRow::from)
            .zip(targets.iter().copied())
            .collect();
        let (train, test) = stratified_split(samples, &targets, cfg.test_size, cfg.random_state);
        tracing::info!("Split: {} train, {} test", train.len(), test.len());

        let (train_x, train_y): (Vec<FeatureRow>, Vec<usize>) = train.into_iter().unzip();
        let (test_x, test_y):   (Vec<FeatureRow>, Vec<usize>) = test.into_iter().unzip();

        // ── Step 4: Fit and score ─────────────────────────────────────────────
        let params  = cfg.tree_params();
        let outcome = run_training(
            (train_x.as_slice(), train_y.as_slice()),
            (test_x.as_slice(), test_y.as_slice()),
            labels.len(),
            &params,
        )?;

        // ── Step 5: Log the run ───────────────────────────────────────────────
        let store = open_store(&cfg.tracking_dir).with_context(|| {
            format!("Cannot open tracking directory '{}'", cfg.tracking_dir.display())
        })?;
        let run   = store.create_run(&cfg.experiment)?;
        store.log_param(&run.run_id, "max_depth", params.max_depth)?;
        store.log_param(&run.run_id, "min_samples_leaf", params.min_samples_leaf)?;
        store.log_param(&run.run_id, "random_state", params.random_state)?;
        store.log_metric(&run.run_id, "accuracy", outcome.accuracy)?;
        log_model_artifacts(&store, &run.run_id, outcome.pipeline, &labels)?;

        // ── Step 6: Register ──────────────────────────────────────────────────
        let version = if cfg.register {
            Some(store.register_model(&cfg.model_name, &run.run_id)?.version)
        } else {
            None
        };

        // ── Step 7: Example prediction ────────────────────────────────────────
        // Read back through the resolver so the logged artifacts are checked
        let resolver = ModelResolver::new(store.clone(), store.cache_dir());
        let model    = resolver
            .resolve(&SelectionPolicy::run_id(&run.run_id))
            .context("Cannot reload the artifacts just logged")?;
        let example = predict_label(&model, &PredictionRequest::new("Liverpool", "Egypt", 32))?;
        tracing::info!(
            "Example prediction for a 32-year-old Liverpool fan from Egypt: {}",
            example
        );

        Ok(TrainReport {
            run_id: run.run_id,
            accuracy: outcome.accuracy,
            version,
            example_prediction: example,
        })
    }
}
