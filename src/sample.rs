use chrono::{TimeZone, Utc};

use crate::model::{Match, MatchList, MatchStatus, MatchTeam};

const HOME_LOGO: &str =
    "https://lh3.googleusercontent.com/a-/ALV-UjXq0QdFmSgX2s_RldE3oYh_sXJ6d9qO4yS8c3ZgXqg=s40-c";
const AWAY_LOGO: &str =
    "https://lh3.googleusercontent.com/a-/ALV-UjVw-jO6_Q3e_g-l9Q2lH4g_FwR7jO2pYdO3xZg=s40-c";

/// The fixed list shown before the first fetch and whenever every feed fails.
pub fn sample_matches() -> MatchList {
    vec![
        sample(1, "La Liga", (2024, 10, 26, 15, 0), "Real Madrid", "Barcelona"),
        sample(2, "Premier League", (2024, 10, 27, 16, 30), "Arsenal", "Liverpool"),
        sample(3, "Serie A", (2024, 10, 28, 18, 0), "Juventus", "AC Milan"),
    ]
}

fn sample(
    id: u64,
    league: &str,
    (year, month, day, hour, min): (i32, u32, u32, u32, u32),
    home: &str,
    away: &str,
) -> Match {
    let utc_date = Utc.with_ymd_and_hms(year, month, day, hour, min, 0).single();
    Match {
        id,
        utc_date,
        date: utc_date
            .map(|dt| dt.format("%b %-d, %Y").to_string())
            .unwrap_or_default(),
        time: utc_date
            .map(|dt| dt.format("%H:%M").to_string())
            .unwrap_or_default(),
        league: league.to_string(),
        team1: MatchTeam {
            name: home.to_string(),
            logo: HOME_LOGO.to_string(),
        },
        team2: MatchTeam {
            name: away.to_string(),
            logo: AWAY_LOGO.to_string(),
        },
        status: MatchStatus::Scheduled,
        minute: None,
        score: "0-0".to_string(),
        title: format!("{home} vs {away}"),
        stats: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_matches() {
        let samples = sample_matches();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].title, "Real Madrid vs Barcelona");
        assert_eq!(samples[0].date, "Oct 26, 2024");
        assert_eq!(samples[1].time, "16:30");
        assert!(samples.iter().all(|m| m.status == MatchStatus::Scheduled));
    }
}
