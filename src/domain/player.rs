// ============================================================
// Layer 3 — Player Record
// ============================================================
// One row of the dataset snapshot:
//   club, national_team, age, favorite_player
//
// Field names match the CSV header exactly so serde can map
// columns by name.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub club:            String,
    pub national_team:   String,
    pub age:             i64,
    pub favorite_player: String,
}

impl PlayerRecord {
    pub fn new(
        club:            impl Into<String>,
        national_team:   impl Into<String>,
        age:             i64,
        favorite_player: impl Into<String>,
    ) -> Self {
        Self {
            club:            club.into(),
            national_team:   national_team.into(),
            age,
            favorite_player: favorite_player.into(),
        }
    }
}
