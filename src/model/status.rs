use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a fixture as reported by the upstream feed.
///
/// Unknown upstream values are kept verbatim in [`MatchStatus::Other`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::EnumString)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Timed,
    Live,
    InPlay,
    Finished,
    Postponed,
    Cancelled,
    Suspended,
    #[strum(default)]
    Other(String),
}

impl MatchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Timed => "TIMED",
            MatchStatus::Live => "LIVE",
            MatchStatus::InPlay => "IN_PLAY",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Postponed => "POSTPONED",
            MatchStatus::Cancelled => "CANCELLED",
            MatchStatus::Suspended => "SUSPENDED",
            MatchStatus::Other(raw) => raw,
        }
    }

    /// Sort priority: live first, then upcoming, then terminal, then unknown.
    pub fn priority(&self) -> u8 {
        match self {
            MatchStatus::Live | MatchStatus::InPlay => 1,
            MatchStatus::Scheduled | MatchStatus::Timed => 2,
            MatchStatus::Finished
            | MatchStatus::Postponed
            | MatchStatus::Cancelled
            | MatchStatus::Suspended => 3,
            MatchStatus::Other(_) => 4,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, MatchStatus::Live | MatchStatus::InPlay)
    }

    /// Live or not yet started. These are the matches shown by default.
    pub fn is_active(&self) -> bool {
        self.priority() <= 2
    }
}

impl From<String> for MatchStatus {
    fn from(raw: String) -> Self {
        raw.parse().unwrap_or(MatchStatus::Other(raw))
    }
}

impl From<MatchStatus> for String {
    fn from(status: MatchStatus) -> Self {
        match status {
            MatchStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
