// ============================================================
// Layer 2 — Dataset generation
// ============================================================
// Writes the built-in demo dataset as the CSV snapshot that both
// training and the dropdown builder read.

use std::path::Path;

use anyhow::{Context, Result};

use crate::data::{loader::write_dataset, synthetic::player_dataset};

/// Write the demo dataset to `path`; returns the number of rows.
pub fn generate_dataset(path: &Path) -> Result<usize> {
    let rows = player_dataset();
    write_dataset(path, &rows)
        .with_context(|| format!("Cannot write dataset to '{}'", path.display()))?;
    tracing::info!("Wrote {} rows to '{}'", rows.len(), path.display());
    Ok(rows.len())
}
