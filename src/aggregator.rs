use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use tracing::{debug, instrument, warn};

use crate::client::FixtureSource;
use crate::config::Config;
use crate::error::{MatchdayError, Result};
use crate::feed::normalize::normalize;
use crate::model::{DateWindow, Match, MatchList};

/// Fetches every configured competition and merges the results into one ordered list.
pub struct Aggregator<S> {
    source: S,
    competitions: Vec<String>,
    window_days: i64,
}

impl<S: FixtureSource> Aggregator<S> {
    pub fn new(source: S, competitions: Vec<String>, window_days: i64) -> Self {
        Self {
            source,
            competitions,
            window_days,
        }
    }

    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(source, config.competitions.clone(), config.window_days)
    }

    pub fn competitions(&self) -> &[String] {
        &self.competitions
    }

    /// Run one aggregation cycle for the window around `now`.
    ///
    /// A failing competition is logged and skipped. Only when every competition
    /// fails does this return [`MatchdayError::AllFeedsFailed`].
    #[instrument(skip(self), fields(competitions = self.competitions.len()))]
    pub async fn fetch_matches(&self, now: DateTime<Utc>) -> Result<MatchList> {
        let window = DateWindow::around(now, self.window_days);

        let results = join_all(
            self.competitions
                .iter()
                .map(|code| self.source.competition_fixtures(code, window)),
        )
        .await;

        let mut failed = 0;
        let mut matches = MatchList::new();
        for (code, result) in self.competitions.iter().zip(results) {
            match result {
                Ok(fixtures) => {
                    debug!(code = %code, count = fixtures.len(), "competition fetched");
                    matches.extend(fixtures.iter().map(normalize));
                }
                Err(e) => {
                    warn!(code = %code, error = %e, "skipping competition");
                    failed += 1;
                }
            }
        }

        if failed > 0 && failed == self.competitions.len() {
            return Err(MatchdayError::AllFeedsFailed { attempted: failed });
        }

        sort_matches(&mut matches);
        Ok(matches)
    }
}

/// Order by status priority, then by kickoff. Matches without a kickoff go last
/// within their priority group.
pub fn sort_matches(matches: &mut [Match]) {
    matches.sort_by(compare_matches);
}

fn compare_matches(a: &Match, b: &Match) -> Ordering {
    a.status
        .priority()
        .cmp(&b.status.priority())
        .then_with(|| match (a.utc_date, b.utc_date) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::TimeZone;

    use super::*;
    use crate::model::{MatchStatus, RawFixture};

    /// Serves canned fixtures per competition code; missing codes fail.
    struct CannedSource(HashMap<&'static str, Vec<RawFixture>>);

    #[async_trait]
    impl FixtureSource for CannedSource {
        async fn competition_fixtures(
            &self,
            code: &str,
            _window: DateWindow,
        ) -> Result<Vec<RawFixture>> {
            self.0
                .get(code)
                .cloned()
                .ok_or_else(|| MatchdayError::UnexpectedStatus {
                    url: code.to_string(),
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                })
        }
    }

    fn fixture(id: u64, status: &str, utc_date: &str) -> RawFixture {
        RawFixture {
            id,
            status: Some(status.to_string()),
            utc_date: Some(utc_date.to_string()),
            ..Default::default()
        }
    }

    fn codes(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 20, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_successful_feeds() {
        let source = CannedSource(HashMap::from([
            ("PL", vec![fixture(1, "SCHEDULED", "2024-10-21T15:00:00Z")]),
            ("BL1", vec![fixture(2, "SCHEDULED", "2024-10-22T15:00:00Z")]),
            ("FL1", vec![fixture(3, "SCHEDULED", "2024-10-23T15:00:00Z")]),
        ]));
        let aggregator = Aggregator::new(source, codes(&["PL", "PD", "BL1", "SA", "FL1"]), 7);

        let matches = aggregator.fetch_matches(now()).await.unwrap();
        let ids: Vec<u64> = matches.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_total_failure_is_an_error() {
        let aggregator = Aggregator::new(CannedSource(HashMap::new()), codes(&["PL", "PD"]), 7);
        let err = aggregator.fetch_matches(now()).await.unwrap_err();
        assert!(matches!(err, MatchdayError::AllFeedsFailed { attempted: 2 }));
    }

    #[tokio::test]
    async fn test_sorted_by_priority_then_date() {
        let source = CannedSource(HashMap::from([(
            "PL",
            vec![
                fixture(1, "FINISHED", "2024-10-20T15:00:00Z"),
                fixture(2, "LIVE", "2024-10-20T15:00:00Z"),
                fixture(3, "SCHEDULED", "2024-10-20T15:00:00Z"),
                fixture(4, "AWARDED", "2024-10-19T15:00:00Z"),
                fixture(5, "SCHEDULED", "2024-10-19T15:00:00Z"),
                fixture(6, "IN_PLAY", "2024-10-20T14:00:00Z"),
            ],
        )]));
        let aggregator = Aggregator::new(source, codes(&["PL"]), 7);

        let matches = aggregator.fetch_matches(now()).await.unwrap();
        let order: Vec<(u64, MatchStatus)> =
            matches.iter().map(|m| (m.id, m.status.clone())).collect();
        assert_eq!(
            order,
            vec![
                (6, MatchStatus::InPlay),
                (2, MatchStatus::Live),
                (5, MatchStatus::Scheduled),
                (3, MatchStatus::Scheduled),
                (1, MatchStatus::Finished),
                (4, MatchStatus::Other("AWARDED".to_string())),
            ]
        );
    }

    #[test]
    fn test_missing_kickoff_sorts_last_in_group() {
        let mut matches: Vec<Match> = [
            RawFixture {
                id: 1,
                ..Default::default()
            },
            fixture(2, "SCHEDULED", "2024-10-20T15:00:00Z"),
        ]
        .iter()
        .map(normalize)
        .collect();
        sort_matches(&mut matches);
        assert_eq!(matches[0].id, 2);
        assert_eq!(matches[1].id, 1);
    }
}
