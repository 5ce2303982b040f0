// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Subcommands and their flags. Paths and the server address can
// also come from PREDICTOR_* environment variables.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::{
    registry_use_case::PromoteConfig,
    serve_use_case::ServeConfig,
    train_use_case::{TrainConfig, DEFAULT_EXPERIMENT, DEFAULT_MODEL_NAME},
};
use crate::domain::policy::{SelectionPolicy, STAGE_PRODUCTION};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the demo player dataset as CSV
    GenerateDataset(GenerateArgs),

    /// Train a decision tree, log the run and register it
    Train(TrainArgs),

    /// Move a registered model version to a stage
    Promote(PromoteArgs),

    /// List tracked runs and registered versions
    Runs(RunsArgs),

    /// Predict a favorite player from the command line
    Predict(PredictArgs),

    /// Serve the prediction form and JSON API
    Serve(ServeArgs),
}

// ─── Shared ──────────────────────────────────────────────────────────────────

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Root directory of the tracking store
    #[arg(long, env = "PREDICTOR_TRACKING_DIR", default_value = "mlruns")]
    pub tracking_dir: PathBuf,
}

/// Which run to load. Default: the latest registered version.
#[derive(Args, Debug, Clone)]
pub struct PolicyArgs {
    /// Load this exact run
    #[arg(long, conflicts_with = "stage")]
    pub run_id: Option<String>,

    /// Load the newest version in this stage (e.g. Staging, Production)
    #[arg(long)]
    pub stage: Option<String>,

    /// Registered model name used by the latest/stage policies
    #[arg(long, default_value = DEFAULT_MODEL_NAME)]
    pub model_name: String,
}

impl From<PolicyArgs> for SelectionPolicy {
    fn from(a: PolicyArgs) -> Self {
        match (a.run_id, a.stage) {
            (Some(run_id), _)   => SelectionPolicy::run_id(run_id),
            (None, Some(stage)) => SelectionPolicy::stage(a.model_name, stage),
            (None, None)        => SelectionPolicy::latest(a.model_name),
        }
    }
}

// ─── generate-dataset ────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output CSV file
    #[arg(long, env = "PREDICTOR_DATASET", default_value = "data/players.csv")]
    pub dataset: PathBuf,
}

// ─── train ───────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Dataset snapshot to train on
    #[arg(long, env = "PREDICTOR_DATASET", default_value = "data/players.csv")]
    pub dataset: PathBuf,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Experiment the run is filed under
    #[arg(long, default_value = DEFAULT_EXPERIMENT)]
    pub experiment: String,

    /// Registered model name
    #[arg(long, default_value = DEFAULT_MODEL_NAME)]
    pub model_name: String,

    /// Fraction of each class held out for evaluation
    #[arg(long, default_value_t = 0.3)]
    pub test_size: f64,

    /// Seed of the train/test split
    #[arg(long, default_value_t = 42)]
    pub random_state: u64,

    /// Maximum depth of the tree
    #[arg(long, default_value_t = 5)]
    pub max_depth: usize,

    /// Minimum number of samples in a leaf
    #[arg(long, default_value_t = 1)]
    pub min_samples_leaf: usize,

    /// Log the run without registering a model version
    #[arg(long)]
    pub no_register: bool,
}

impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            dataset_path:     a.dataset,
            tracking_dir:     a.store.tracking_dir,
            experiment:       a.experiment,
            model_name:       a.model_name,
            test_size:        a.test_size,
            random_state:     a.random_state,
            max_depth:        a.max_depth,
            min_samples_leaf: a.min_samples_leaf,
            register:         !a.no_register,
        }
    }
}

// ─── promote ─────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct PromoteArgs {
    /// Version number to move
    #[arg(long)]
    pub version: u32,

    /// Target stage ("None" clears the stage)
    #[arg(long, default_value = STAGE_PRODUCTION)]
    pub stage: String,

    #[arg(long, default_value = DEFAULT_MODEL_NAME)]
    pub model_name: String,

    /// Archive versions currently in the target stage
    #[arg(long)]
    pub archive_existing: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

impl From<PromoteArgs> for PromoteConfig {
    fn from(a: PromoteArgs) -> Self {
        PromoteConfig {
            model_name:       a.model_name,
            version:          a.version,
            stage:            a.stage,
            archive_existing: a.archive_existing,
        }
    }
}

// ─── runs ────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct RunsArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Registered model whose versions are listed
    #[arg(long, default_value = DEFAULT_MODEL_NAME)]
    pub model_name: String,
}

// ─── predict ─────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct PredictArgs {
    #[arg(long)]
    pub club: String,

    #[arg(long)]
    pub national_team: String,

    #[arg(long)]
    pub age: i64,

    #[command(flatten)]
    pub policy: PolicyArgs,

    #[command(flatten)]
    pub store: StoreArgs,
}

// ─── serve ───────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub policy: PolicyArgs,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Dataset snapshot for the dropdown suggestions
    #[arg(long, env = "PREDICTOR_DATASET", default_value = "data/players.csv")]
    pub dataset: PathBuf,

    #[arg(long, env = "PREDICTOR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PREDICTOR_PORT", default_value_t = 5001)]
    pub port: u16,

    /// Artifact download directory (default: <tracking-dir>/.cache)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}

impl From<ServeArgs> for ServeConfig {
    fn from(a: ServeArgs) -> Self {
        ServeConfig {
            tracking_dir: a.store.tracking_dir,
            dataset_path: a.dataset,
            policy:       a.policy.into(),
            host:         a.host,
            port:         a.port,
            cache_dir:    a.cache_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("player-predictor").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_serve_defaults_to_latest() {
        let Commands::Serve(args) = parse(&["serve", "--port", "8080"]) else { panic!() };
        assert_eq!(args.port, 8080);
        let cfg: ServeConfig = args.into();
        assert_eq!(cfg.policy, SelectionPolicy::latest(DEFAULT_MODEL_NAME));
    }

    #[test]
    fn test_stage_and_run_id_flags() {
        let Commands::Serve(args) = parse(&["serve", "--stage", "Production"]) else { panic!() };
        assert_eq!(
            SelectionPolicy::from(args.policy),
            SelectionPolicy::stage(DEFAULT_MODEL_NAME, "Production")
        );

        let Commands::Predict(args) = parse(&[
            "predict", "--club", "Liverpool", "--national-team", "Egypt", "--age", "32",
            "--run-id", "abc",
        ]) else {
            panic!()
        };
        assert_eq!(SelectionPolicy::from(args.policy), SelectionPolicy::run_id("abc"));
    }

    #[test]
    fn test_run_id_conflicts_with_stage() {
        let argv = ["player-predictor", "serve", "--run-id", "abc", "--stage", "Staging"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_train_args_into_config() {
        let Commands::Train(args) = parse(&["train", "--max-depth", "3", "--no-register"]) else {
            panic!()
        };
        let cfg: TrainConfig = args.into();
        assert_eq!(cfg.max_depth, 3);
        assert!(!cfg.register);
        assert_eq!(cfg.test_size, 0.3);
    }
}
