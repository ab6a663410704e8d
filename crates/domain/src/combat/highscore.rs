//! Leaderboard ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;

/// Cumulative fight record of a character.
///
/// Only the record aggregator may change these counters, and only upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatRecord {
    pub fights: u32,
    pub victories: u32,
    pub defeats: u32,
}

/// One line of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighscoreEntry {
    pub character_id: CharacterId,
    pub name: String,
    pub record: CombatRecord,
    /// 1-based position in the leaderboard.
    pub rank: u32,
}

/// Leaderboard order: most victories, then fewest defeats, then lowest id.
pub fn compare_records(
    a: (CharacterId, &CombatRecord),
    b: (CharacterId, &CombatRecord),
) -> Ordering {
    b.1.victories
        .cmp(&a.1.victories)
        .then(a.1.defeats.cmp(&b.1.defeats))
        .then(a.0.cmp(&b.0))
}

/// Build the leaderboard from raw records.
///
/// Characters that have never fought are left out.
pub fn rank_highscores(
    rows: impl IntoIterator<Item = (CharacterId, String, CombatRecord)>,
) -> Vec<HighscoreEntry> {
    let mut rows: Vec<_> = rows
        .into_iter()
        .filter(|(_, _, record)| record.fights > 0)
        .collect();
    rows.sort_by(|a, b| compare_records((a.0, &a.2), (b.0, &b.2)));

    rows.into_iter()
        .zip(1u32..)
        .map(|((character_id, name, record), rank)| HighscoreEntry {
            character_id,
            name,
            record,
            rank,
        })
        .collect()
}
