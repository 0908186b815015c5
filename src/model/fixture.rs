use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// Inclusive calendar-date range sent as `dateFrom`/`dateTo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// `[now - days, now + days]`, truncated to UTC dates.
    pub fn around(now: DateTime<Utc>, days: i64) -> Self {
        Self {
            from: (now - Duration::days(days)).date_naive(),
            to: (now + Duration::days(days)).date_naive(),
        }
    }
}

/// Body of `GET /competitions/{code}/matches`.
///
/// Fixtures that do not decode are logged and dropped one by one, so a single
/// malformed entry never costs the rest of the competition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureList {
    #[serde(default, deserialize_with = "skip_unparsable")]
    pub matches: Vec<RawFixture>,
}

fn skip_unparsable<'de, D>(deserializer: D) -> Result<Vec<RawFixture>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let fixtures = items
        .into_iter()
        .filter_map(|item| {
            let id = item.get("id").cloned();
            match serde_json::from_value::<RawFixture>(item) {
                Ok(fixture) => Some(fixture),
                Err(e) => {
                    warn!(error = %e, id = ?id, "skipping unparsable fixture");
                    None
                }
            }
        })
        .collect();
    Ok(fixtures)
}

/// One fixture exactly as the upstream feed reports it. Only `id` is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFixture {
    pub id: u64,
    pub utc_date: Option<String>,
    pub status: Option<String>,
    pub minute: Option<u32>,
    pub competition: Option<RawCompetition>,
    pub home_team: Option<RawTeam>,
    pub away_team: Option<RawTeam>,
    pub score: Option<RawScore>,
    pub bookings: Option<Vec<RawBooking>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCompetition {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTeam {
    pub name: Option<String>,
    pub crest: Option<String>,
}

/// The score block carries several partial shapes; see `feed::normalize`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScore {
    pub full_time: Option<ScorePair>,
    pub regular_time: Option<ScorePair>,
    pub current: Option<ScorePair>,
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ScorePair {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBooking {
    pub card: Option<String>,
}
