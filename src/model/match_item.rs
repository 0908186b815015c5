use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MatchStatus;

/// A list of canonical matches, ordered as produced by the aggregator.
pub type MatchList = Vec<Match>;

/// A fixture in the canonical shape shared by every view of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: u64,
    /// Kickoff time; authoritative for ordering and filtering.
    #[serde(default)]
    pub utc_date: Option<DateTime<Utc>>,
    /// Display date, e.g. `Oct 26, 2024`.
    #[serde(default)]
    pub date: String,
    /// Display time, e.g. `03:00 PM`.
    #[serde(default)]
    pub time: String,
    pub league: String,
    pub team1: MatchTeam,
    pub team2: MatchTeam,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub minute: Option<u32>,
    /// Always `"home-away"`.
    pub score: String,
    pub title: String,
    #[serde(default)]
    pub stats: Option<CardStats>,
}

/// One side of a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTeam {
    pub name: String,
    pub logo: String,
}

/// Card counts derived from the bookings list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStats {
    pub yellow: u32,
    pub red: u32,
}

impl Match {
    /// Case-insensitive substring match against both team names and the league.
    /// `needle` must already be lowercased.
    pub fn mentions(&self, needle: &str) -> bool {
        [&self.team1.name, &self.team2.name, &self.league]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// A match snapshot pinned by the user; refreshed by reconciliation.
pub type TrackedMatch = Match;
