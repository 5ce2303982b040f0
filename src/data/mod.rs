// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the CSV snapshot on disk and the rows the
// ml layer fits on:
//
//   data/players.csv
//       │
//       ▼
//   CsvDatasetLoader   → Vec<PlayerRecord>
//       │
//       ├──▶ DropdownOptions   (web form suggestions)
//       │
//       ▼
//   stratified_split   → (train rows, test rows)
//
// `synthetic` produces the demo snapshot in the first place.

/// Reads and writes the dataset CSV
pub mod loader;

/// The fixed 46-row demo dataset
pub mod synthetic;

/// Seeded, stratified train/test split
pub mod splitter;

/// Sorted club / national team lists for the web form
pub mod dropdown;
