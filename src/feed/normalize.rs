use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::model::{
    CardStats, Match, MatchStatus, MatchTeam, RawBooking, RawFixture, RawScore, RawTeam,
    ScorePair,
};

pub(crate) const UNKNOWN_LEAGUE: &str = "Unknown League";
pub(crate) const HOME_TEAM: &str = "Home Team";
pub(crate) const AWAY_TEAM: &str = "Away Team";
pub(crate) const PLACEHOLDER_LOGO: &str = "/logos/placeholder.png";

const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";
const DISPLAY_TIME_FORMAT: &str = "%I:%M %p";
const NAIVE_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Convert one upstream fixture into the canonical [`Match`]. Never fails.
pub fn normalize(raw: &RawFixture) -> Match {
    let utc_date = raw.utc_date.as_deref().and_then(parse_utc_date);
    let team1 = resolve_team(raw.home_team.as_ref(), HOME_TEAM);
    let team2 = resolve_team(raw.away_team.as_ref(), AWAY_TEAM);
    let title = format!("{} vs {}", team1.name, team2.name);

    Match {
        id: raw.id,
        utc_date,
        date: display(utc_date, DISPLAY_DATE_FORMAT),
        time: display(utc_date, DISPLAY_TIME_FORMAT),
        league: non_empty(raw.competition.as_ref().and_then(|c| c.name.as_deref()))
            .unwrap_or(UNKNOWN_LEAGUE)
            .to_string(),
        team1,
        team2,
        status: non_empty(raw.status.as_deref())
            .map(|s| MatchStatus::from(s.to_owned()))
            .unwrap_or_default(),
        minute: raw.minute.filter(|m| *m > 0),
        score: resolve_score(raw.score.as_ref()),
        title,
        stats: raw.bookings.as_deref().map(count_cards),
    }
}

pub(crate) fn parse_utc_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, NAIVE_DATE_TIME_FORMAT)
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
        .ok()
}

fn display(utc_date: Option<DateTime<Utc>>, format: &str) -> String {
    utc_date
        .map(|dt| dt.format(format).to_string())
        .unwrap_or_default()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn resolve_team(team: Option<&RawTeam>, fallback_name: &str) -> MatchTeam {
    MatchTeam {
        name: non_empty(team.and_then(|t| t.name.as_deref()))
            .unwrap_or(fallback_name)
            .to_string(),
        logo: non_empty(team.and_then(|t| t.crest.as_deref()))
            .unwrap_or(PLACEHOLDER_LOGO)
            .to_string(),
    }
}

/// First complete pair wins: full time, regular time, current, then the flat fields.
fn resolve_score(score: Option<&RawScore>) -> String {
    let Some(score) = score else {
        return "0-0".to_string();
    };

    let flat = ScorePair {
        home: score.home,
        away: score.away,
    };
    [score.full_time, score.regular_time, score.current, Some(flat)]
        .into_iter()
        .flatten()
        .find_map(|pair| match (pair.home, pair.away) {
            (Some(home), Some(away)) => Some(format!("{home}-{away}")),
            _ => None,
        })
        .unwrap_or_else(|| "0-0".to_string())
}

fn count_cards(bookings: &[RawBooking]) -> CardStats {
    bookings
        .iter()
        .fold(CardStats::default(), |mut stats, booking| {
            match booking.card.as_deref() {
                Some("YELLOW_CARD") => stats.yellow += 1,
                Some("RED_CARD") => stats.red += 1,
                _ => {}
            }
            stats
        })
}
