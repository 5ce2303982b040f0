// ============================================================
// Layer 2 — ServeUseCase
// ============================================================
// Startup sequence of the prediction server:
//
//   Step 1: Resolve the selection policy to one run   (fatal)
//   Step 2: Build dropdown options from the snapshot  (non-fatal)
//   Step 3: Compile the page template                 (fatal)
//   Step 4: Bind and serve until shut down
//
// The model is loaded exactly once. To serve a different run,
// restart with another policy.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{dropdown::DropdownOptions, loader::CsvDatasetLoader};
use crate::domain::policy::SelectionPolicy;
use crate::infra::{resolver::ModelResolver, tracking::FileTrackingStore};
use crate::ml::inferencer::LoadedModel;
use crate::web::{
    pages::PageRenderer,
    server::{run_server, AppState},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    pub tracking_dir: PathBuf,
    pub dataset_path: PathBuf,
    pub policy:       SelectionPolicy,
    pub host:         String,
    pub port:         u16,
    /// Artifact download directory; defaults to `<tracking_dir>/.cache`.
    pub cache_dir:    Option<PathBuf>,
}

pub struct ServeUseCase {
    config: ServeConfig,
}

impl ServeUseCase {
    pub fn new(config: ServeConfig) -> Self {
        Self { config }
    }

    /// Steps 1-3: everything the handlers need.
    pub fn build_state(&self) -> Result<AppState> {
        let cfg     = &self.config;
        let model   = load_model(&cfg.tracking_dir, &cfg.policy, cfg.cache_dir.as_deref())?;
        let options = DropdownOptions::build(&CsvDatasetLoader::new(&cfg.dataset_path));
        let pages   = PageRenderer::new().context("Cannot compile page template")?;

        Ok(AppState {
            model:   Arc::new(model),
            options: Arc::new(options),
            pages:   Arc::new(pages),
        })
    }

    /// Blocks until the server stops.
    pub fn execute(&self) -> Result<()> {
        let state = self.build_state()?;
        let host  = self.config.host.clone();
        let port  = self.config.port;

        actix_web::rt::System::new()
            .block_on(run_server(state, &host, port))
            .with_context(|| format!("Server on {host}:{port} failed"))
    }
}

/// Resolve the model `policy` selects from the store at `tracking_dir`.
pub fn load_model(
    tracking_dir: &Path,
    policy:       &SelectionPolicy,
    cache_dir:    Option<&Path>,
) -> Result<LoadedModel> {
    let store = FileTrackingStore::new(tracking_dir);
    let cache = cache_dir.map(Path::to_path_buf).unwrap_or_else(|| store.cache_dir());

    tracing::info!("Resolving {} from '{}'", policy, tracking_dir.display());
    ModelResolver::new(store, cache)
        .resolve(policy)
        .with_context(|| format!("Cannot load a model for {policy}"))
}
