use tracing::{debug, instrument};

use crate::error::Result;
use crate::feed;
use crate::model::{DateWindow, FixtureList, RawFixture};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn competition_matches_url(base_url: &str, code: &str, window: DateWindow) -> String {
    format!(
        "{}/competitions/{code}/matches?dateFrom={}&dateTo={}",
        base_url.trim_end_matches('/'),
        window.from.format(DATE_FORMAT),
        window.to.format(DATE_FORMAT),
    )
}

#[instrument(skip(client, token))]
pub(crate) async fn get_competition_matches(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    code: &str,
    window: DateWindow,
) -> Result<Vec<RawFixture>> {
    let url = competition_matches_url(base_url, code, window);
    let list: FixtureList = feed::get_json(client, &url, token).await?;
    debug!(count = list.matches.len(), code, "fetched competition fixtures");
    Ok(list.matches)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn window() -> DateWindow {
        DateWindow {
            from: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
        }
    }

    #[test]
    fn test_url_carries_date_window() {
        let url = competition_matches_url("https://api.football-data.org/v4/", "PL", window());
        assert_eq!(
            url,
            "https://api.football-data.org/v4/competitions/PL/matches?dateFrom=2024-10-01&dateTo=2024-10-15"
        );
    }

    #[test]
    fn test_decode_fixture_list() {
        let body = r#"{
            "resultSet": {"count": 1},
            "matches": [{
                "id": 497410,
                "utcDate": "2024-10-05T14:00:00Z",
                "status": "FINISHED",
                "competition": {"name": "Premier League"},
                "homeTeam": {"name": "Arsenal FC", "crest": "https://crests.example/57.png"},
                "awayTeam": {"name": "Southampton FC", "crest": null},
                "score": {"fullTime": {"home": 3, "away": 1}, "halfTime": {"home": 0, "away": 0}}
            }]
        }"#;
        let list: FixtureList = feed::decode("test", body).unwrap();
        assert_eq!(list.matches.len(), 1);
        let fixture = &list.matches[0];
        assert_eq!(fixture.id, 497410);
        assert_eq!(fixture.status.as_deref(), Some("FINISHED"));
        let full_time = fixture.score.as_ref().and_then(|s| s.full_time).unwrap();
        assert_eq!((full_time.home, full_time.away), (Some(3), Some(1)));
    }

    #[test]
    fn test_decode_without_matches_key_is_empty() {
        let list: FixtureList = feed::decode("test", r#"{"errorCode": 0}"#).unwrap();
        assert!(list.matches.is_empty());
    }

    #[test]
    fn test_decode_skips_only_the_bad_fixtures() {
        let body = r#"{"matches": [
            {"id": 1, "status": "SCHEDULED"},
            {"id": 2, "status": "IN_PLAY", "minute": "45+2"},
            {"id": null},
            {"status": "TIMED"},
            "not a fixture",
            {"id": 5, "minute": 12}
        ]}"#;
        let list: FixtureList = feed::decode("test", body).unwrap();
        let ids: Vec<u64> = list.matches.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 5]);
        assert_eq!(list.matches[1].minute, Some(12));
    }

    #[test]
    fn test_decode_null_matches_is_empty() {
        let list: FixtureList = feed::decode("test", r#"{"matches": null}"#).unwrap();
        assert!(list.matches.is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result: Result<FixtureList> = feed::decode("test", "<html>");
        assert!(result.is_err());
    }
}
