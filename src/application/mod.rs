// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers for one goal each. No ML math,
// no HTTP, no printing; only workflow coordination with anyhow
// context on failures.

// Writing the demo dataset snapshot
pub mod dataset_use_case;

// Fit, evaluate, log and register a run
pub mod train_use_case;

// Runs, versions and stage transitions
pub mod registry_use_case;

// Resolve a model and start the web server
pub mod serve_use_case;
