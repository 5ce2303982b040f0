// ============================================================
// Layer 4 — Dropdown Options
// ============================================================
// Sorted, distinct clubs and national teams from the dataset
// snapshot. They only fill the <datalist> suggestions of the web
// form; predictions do not depend on them.
//
// An unavailable snapshot yields two empty lists and a warning.
// The service still starts and still predicts.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::player::PlayerRecord;
use crate::domain::traits::DatasetSource;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DropdownOptions {
    pub clubs:          Vec<String>,
    pub national_teams: Vec<String>,
}

impl DropdownOptions {
    /// Load the snapshot from `source` and collect the options.
    pub fn build(source: &dyn DatasetSource) -> Self {
        match source.load_all() {
            Ok(rows) => {
                let options = Self::from_rows(&rows);
                tracing::info!(
                    "Dropdown data loaded: {} clubs, {} national teams",
                    options.clubs.len(),
                    options.national_teams.len()
                );
                options
            }
            Err(e) => {
                tracing::warn!("Dropdown data unavailable, lists will be empty: {e}");
                Self::default()
            }
        }
    }

    pub fn from_rows(rows: &[PlayerRecord]) -> Self {
        let clubs: BTreeSet<&str> = rows.iter().map(|r| r.club.as_str()).collect();
        let teams: BTreeSet<&str> = rows.iter().map(|r| r.national_team.as_str()).collect();
        Self {
            clubs:          clubs.into_iter().map(String::from).collect(),
            national_teams: teams.into_iter().map(String::from).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty() && self.national_teams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::CsvDatasetLoader;
    use crate::domain::error::{PredictorError, PredictorResult};

    struct FixedSource(Vec<PlayerRecord>);

    impl DatasetSource for FixedSource {
        fn load_all(&self) -> PredictorResult<Vec<PlayerRecord>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    impl DatasetSource for BrokenSource {
        fn load_all(&self) -> PredictorResult<Vec<PlayerRecord>> {
            Err(PredictorError::Training("boom".into()))
        }
    }

    #[test]
    fn test_sorted_and_distinct() {
        let source = FixedSource(vec![
            PlayerRecord::new("Real Madrid", "Brazil", 23, "Vinícius Júnior"),
            PlayerRecord::new("Al-Nassr", "Portugal", 39, "Cristiano Ronaldo"),
            PlayerRecord::new("Real Madrid", "Portugal", 28, "Cristiano Ronaldo"),
        ]);
        let options = DropdownOptions::build(&source);
        assert_eq!(options.clubs, vec!["Al-Nassr", "Real Madrid"]);
        assert_eq!(options.national_teams, vec!["Brazil", "Portugal"]);
    }

    #[test]
    fn test_missing_snapshot_gives_empty_lists() {
        let options = DropdownOptions::build(&CsvDatasetLoader::new("missing/players.csv"));
        assert!(options.clubs.is_empty());
        assert!(options.national_teams.is_empty());
        assert!(options.is_empty());
    }

    #[test]
    fn test_any_load_error_degrades() {
        assert_eq!(DropdownOptions::build(&BrokenSource), DropdownOptions::default());
    }
}
