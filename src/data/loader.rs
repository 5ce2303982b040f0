// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Reads and writes the dataset snapshot CSV:
//
//   club,national_team,age,favorite_player
//   Inter Miami,Argentina,38,Lionel Messi
//   ...
//
// Columns are matched by header name through serde, so the file
// may list them in any order.

use std::path::{Path, PathBuf};

use crate::domain::error::{PredictorError, PredictorResult};
use crate::domain::player::PlayerRecord;
use crate::domain::traits::DatasetSource;

/// Loads player rows from a CSV file on disk.
pub struct CsvDatasetLoader {
    path: PathBuf,
}

impl CsvDatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for CsvDatasetLoader {
    fn load_all(&self) -> PredictorResult<Vec<PlayerRecord>> {
        if !self.path.exists() {
            return Err(PredictorError::DatasetUnavailable(self.path.clone()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for record in reader.deserialize::<PlayerRecord>() {
            rows.push(record?);
        }

        tracing::info!("Loaded {} rows from '{}'", rows.len(), self.path.display());
        Ok(rows)
    }
}

/// Write `rows` as a CSV snapshot with a header line, creating
/// parent directories as needed.
pub fn write_dataset(path: &Path, rows: &[PlayerRecord]) -> PredictorResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::debug!("Wrote {} rows to '{}'", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_unavailable() {
        let loader = CsvDatasetLoader::new("does/not/exist.csv");
        let err = loader.load_all().unwrap_err();
        assert!(matches!(err, PredictorError::DatasetUnavailable(_)));
    }

    #[test]
    fn test_write_then_load() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("players.csv");
        let rows = vec![
            PlayerRecord::new("Liverpool", "Egypt", 32, "Mohamed Salah"),
            PlayerRecord::new("Bayern Munich", "Germany", 35, "Thomas Müller"),
        ];
        write_dataset(&path, &rows).unwrap();

        let loaded = CsvDatasetLoader::new(&path).load_all().unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_columns_matched_by_header() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.csv");
        std::fs::write(
            &path,
            "age,favorite_player,club,national_team\n38, Lionel Messi ,Inter Miami,Argentina\n",
        )
        .unwrap();

        let loaded = CsvDatasetLoader::new(&path).load_all().unwrap();
        assert_eq!(loaded, vec![PlayerRecord::new("Inter Miami", "Argentina", 38, "Lionel Messi")]);
    }

    #[test]
    fn test_bad_age_is_csv_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.csv");
        std::fs::write(&path, "club,national_team,age,favorite_player\nA,B,old,C\n").unwrap();

        let err = CsvDatasetLoader::new(&path).load_all().unwrap_err();
        assert!(matches!(err, PredictorError::Csv(_)));
    }
}
