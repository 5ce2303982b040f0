// ============================================================
// Layer 5 — ML / Model Layer (linfa)
// ============================================================
// All linfa / ndarray code lives here. Other layers see a
// Pipeline that takes FeatureRows and returns class indices.
//
//   features.rs   — named single-row input (club, national_team, age)
//   encoder.rs    — one-hot + passthrough column transformer
//   pipeline.rs   — transformer + CART decision tree, serializable
//   trainer.rs    — fit on the train split, accuracy on the test split
//   inferencer.rs — request → row → class index → decoded label

/// Named feature rows and the pipeline's column contract
pub mod features;

/// One-hot encoding with ignore-unknown
pub mod encoder;

/// Preprocessing + decision tree
pub mod pipeline;

/// Fit and evaluate
pub mod trainer;

/// Single-request inference
pub mod inferencer;
