// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits that name the concepts of the
// predictor. No file I/O, no HTTP, no linfa types.

// Typed error taxonomy shared by every lower layer
pub mod error;

// Sorted label list ↔ class index
pub mod label_mapping;

// One dataset row
pub mod player;

// Form, request and response of the inference service
pub mod prediction;

// Which run to serve: by id, latest, or by stage
pub mod policy;

// Tracked runs and registered model versions
pub mod run;

// DatasetSource and TrackingStore seams
pub mod traits;
