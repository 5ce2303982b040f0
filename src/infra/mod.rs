// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Persistence of runs and models on the local filesystem:
//
//   tracking.rs  — FileTrackingStore
//                  Runs (params, metrics, artifacts) and a
//                  model registry with numbered, staged versions.
//
//   artifacts.rs — What a run stores
//                  Artifact paths and the pipeline envelope
//                  written by training and read by serving.
//
//   resolver.rs  — ModelResolver
//                  SelectionPolicy → one run → LoadedModel,
//                  with both artifacts taken from that run.

/// Local experiment tracker and model registry
pub mod tracking;

/// Artifact layout of a training run
pub mod artifacts;

/// Policy-driven model loading
pub mod resolver;
