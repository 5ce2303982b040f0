// ============================================================
// Layer 4 — Synthetic Dataset
// ============================================================
// The fixed demo dataset: 46 rows, 13 favorite players. Most
// (club, national team) pairs appear at least three times so a
// stratified 70/30 split keeps every player in the training set.

use crate::domain::player::PlayerRecord;

const ROWS: &[(&str, &str, i64, &str)] = &[
    ("Inter Miami",         "Argentina",   38, "Lionel Messi"),
    ("FC Barcelona",        "Argentina",   25, "Lionel Messi"),
    ("Al-Nassr",            "Portugal",    39, "Cristiano Ronaldo"),
    ("Real Madrid",         "Portugal",    28, "Cristiano Ronaldo"),
    ("Paris Saint-Germain", "France",      25, "Kylian Mbappé"),
    ("Manchester City",     "Norway",      23, "Erling Haaland"),
    ("FC Barcelona",        "Spain",       22, "Gavi"),
    ("Al-Nassr",            "Portugal",    35, "Cristiano Ronaldo"),
    ("Manchester City",     "Belgium",     30, "Kevin De Bruyne"),
    ("Paris Saint-Germain", "Brazil",      31, "Neymar Jr."),
    ("Liverpool",           "Egypt",       32, "Mohamed Salah"),
    ("Bayern Munich",       "Germany",     35, "Thomas Müller"),
    ("Real Madrid",         "Brazil",      23, "Vinícius Júnior"),
    ("Tottenham Hotspur",   "South Korea", 31, "Son Heung-min"),
    ("Manchester United",   "Portugal",    29, "Bruno Fernandes"),
    ("Inter Miami",         "Uruguay",     37, "Luis Suárez"),
    ("Paris Saint-Germain", "France",      26, "Kylian Mbappé"),
    ("Manchester City",     "Norway",      24, "Erling Haaland"),
    ("FC Barcelona",        "Spain",       21, "Gavi"),
    ("Manchester City",     "Belgium",     31, "Kevin De Bruyne"),
    ("Paris Saint-Germain", "Brazil",      32, "Neymar Jr."),
    ("Liverpool",           "Egypt",       31, "Mohamed Salah"),
    ("Bayern Munich",       "Germany",     36, "Thomas Müller"),
    ("Real Madrid",         "Brazil",      24, "Vinícius Júnior"),
    ("Tottenham Hotspur",   "South Korea", 32, "Son Heung-min"),
    ("Manchester United",   "Portugal",    30, "Bruno Fernandes"),
    ("Inter Miami",         "Uruguay",     38, "Luis Suárez"),
    ("Al-Nassr",            "Portugal",    36, "Cristiano Ronaldo"),
    ("Real Madrid",         "Brazil",      25, "Vinícius Júnior"),
    ("Liverpool",           "Egypt",       33, "Mohamed Salah"),
    ("Bayern Munich",       "Germany",     36, "Thomas Müller"),
    ("Tottenham Hotspur",   "South Korea", 33, "Son Heung-min"),
    ("Manchester United",   "Portugal",    30, "Bruno Fernandes"),
    ("Inter Miami",         "Argentina",   39, "Lionel Messi"),
    ("FC Barcelona",        "Spain",       23, "Gavi"),
    ("Al-Nassr",            "Portugal",    40, "Cristiano Ronaldo"),
    ("Inter Miami",         "Argentina",   38, "Lionel Messi"),
    ("Al-Nassr",            "Portugal",    39, "Cristiano Ronaldo"),
    ("Paris Saint-Germain", "France",      25, "Kylian Mbappé"),
    ("Manchester City",     "Norway",      23, "Erling Haaland"),
    ("FC Barcelona",        "Spain",       22, "Gavi"),
    ("Manchester City",     "Belgium",     30, "Kevin De Bruyne"),
    ("Paris Saint-Germain", "Brazil",      31, "Neymar Jr."),
    ("Liverpool",           "Egypt",       32, "Mohamed Salah"),
    ("Bayern Munich",       "Germany",     35, "Thomas Müller"),
    ("Real Madrid",         "Brazil",      23, "Vinícius Júnior"),
];

/// The demo dataset as owned records.
pub fn player_dataset() -> Vec<PlayerRecord> {
    ROWS.iter()
        .map(|&(club, nt, age, player)| PlayerRecord::new(club, nt, age, player))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn test_row_and_class_counts() {
        let rows = player_dataset();
        assert_eq!(rows.len(), 46);

        let players: BTreeSet<_> = rows.iter().map(|r| r.favorite_player.as_str()).collect();
        assert_eq!(players.len(), 13);
    }

    #[test]
    fn test_every_player_has_at_least_two_rows() {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for r in ROWS {
            *counts.entry(r.3).or_default() += 1;
        }
        assert!(counts.values().all(|&c| c >= 2), "{counts:?}");
    }
}
