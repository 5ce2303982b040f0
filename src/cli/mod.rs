// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap.
// Business logic is delegated to Layer 2 (application):
//
//   generate-dataset  write the demo CSV snapshot
//   train             fit, log and register a run
//   promote           move a model version between stages
//   runs              list runs and registered versions
//   predict           one prediction, printed to stdout
//   serve             start the web form + JSON API

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{
    Commands, GenerateArgs, PredictArgs, PromoteArgs, RunsArgs, ServeArgs, TrainArgs,
};

use crate::domain::policy::SelectionPolicy;
use crate::domain::prediction::PredictionRequest;

#[derive(Parser, Debug)]
#[command(
    name = "player-predictor",
    version,
    about = "Train a favorite-player decision tree, track its runs, and serve predictions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::GenerateDataset(args) => run_generate(args),
            Commands::Train(args)           => run_train(args),
            Commands::Promote(args)         => run_promote(args),
            Commands::Runs(args)            => run_runs(args),
            Commands::Predict(args)         => run_predict(args),
            Commands::Serve(args)           => run_serve(args),
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    use crate::application::dataset_use_case::generate_dataset;

    let n = generate_dataset(&args.dataset)?;
    println!("Wrote {} rows to {}", n, args.dataset.display());
    Ok(())
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let report = TrainUseCase::new(args.into()).execute()?;

    println!("Run ID:   {}", report.run_id);
    println!("Accuracy: {:.2}", report.accuracy);
    if let Some(v) = report.version {
        println!("Version:  {v}");
    }
    println!("Example (Liverpool, Egypt, 32): {}", report.example_prediction);
    Ok(())
}

fn run_promote(args: PromoteArgs) -> Result<()> {
    use crate::application::registry_use_case::RegistryUseCase;

    let registry = RegistryUseCase::new(args.store.tracking_dir.clone());
    let version  = registry.promote(&args.into())?;
    println!(
        "Version {} (run {}) is now in stage {}",
        version.version,
        version.run_id,
        version.stage.as_deref().unwrap_or("None")
    );
    Ok(())
}

fn run_runs(args: RunsArgs) -> Result<()> {
    use crate::application::registry_use_case::RegistryUseCase;

    let registry = RegistryUseCase::new(args.store.tracking_dir);

    println!("{:<34} {:<28} {:>8}", "RUN ID", "EXPERIMENT", "ACCURACY");
    for run in registry.runs()? {
        let accuracy = run
            .metrics
            .get("accuracy")
            .map(|a| format!("{a:.2}"))
            .unwrap_or_else(|| "-".into());
        println!("{:<34} {:<28} {:>8}", run.run_id, run.experiment, accuracy);
    }

    println!("\n{:<8} {:<34} {}", "VERSION", "RUN ID", "STAGE");
    for v in registry.versions(&args.model_name)? {
        println!("{:<8} {:<34} {}", v.version, v.run_id, v.stage.as_deref().unwrap_or("None"));
    }
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::serve_use_case::load_model;
    use crate::ml::inferencer::predict_label;

    let policy: SelectionPolicy = args.policy.into();
    let model   = load_model(&args.store.tracking_dir, &policy, None)?;
    let request = PredictionRequest::new(args.club, args.national_team, args.age);

    println!("{}", predict_label(&model, &request)?);
    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<()> {
    use crate::application::serve_use_case::ServeUseCase;

    ServeUseCase::new(args.into()).execute()
}
