use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use itertools::Itertools;

use crate::error::{MatchdayError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v4";
/// Premier League, La Liga, Bundesliga, Serie A, Ligue 1.
pub const DEFAULT_COMPETITIONS: [&str; 5] = ["PL", "PD", "BL1", "SA", "FL1"];
pub const DEFAULT_LIVE_INTERVAL: Duration = Duration::from_millis(30_000);
/// Blob key the tracked set is stored under.
pub const TRACKED_MATCHES_KEY: &str = "trackedMatches";

/// Runtime settings for the store, the feed client and the binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub api_token: String,
    pub competitions: Vec<String>,
    /// Half-width of the fetch window around "now".
    pub window_days: i64,
    pub page_size: usize,
    pub live_interval: Duration,
    /// How far back finished matches stay visible in search results.
    pub recent_finished_days: i64,
    pub storage_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: String::new(),
            competitions: DEFAULT_COMPETITIONS.iter().map(|c| c.to_string()).collect(),
            window_days: 7,
            page_size: 20,
            live_interval: DEFAULT_LIVE_INTERVAL,
            recent_finished_days: 3,
            storage_dir: PathBuf::from(".matchday"),
        }
    }
}

impl Config {
    /// Defaults overridden by any `MATCHDAY_*` environment variables that are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(base_url) = lookup("MATCHDAY_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(token) = lookup("MATCHDAY_API_TOKEN") {
            config.api_token = token;
        }
        if let Some(raw) = lookup("MATCHDAY_COMPETITIONS") {
            config.competitions = raw
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_uppercase)
                .unique()
                .collect();
        }
        if let Some(raw) = lookup("MATCHDAY_PAGE_SIZE") {
            config.page_size = parse_var("MATCHDAY_PAGE_SIZE", &raw)?;
            if config.page_size == 0 {
                return Err(MatchdayError::Config {
                    var: "MATCHDAY_PAGE_SIZE",
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        if let Some(raw) = lookup("MATCHDAY_LIVE_INTERVAL_MS") {
            let millis: u64 = parse_var("MATCHDAY_LIVE_INTERVAL_MS", &raw)?;
            config.live_interval = Duration::from_millis(millis.max(1));
        }
        if let Some(dir) = lookup("MATCHDAY_STORAGE_DIR") {
            config.storage_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

fn parse_var<T>(var: &'static str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| MatchdayError::Config {
        var,
        reason: e.to_string(),
    })
}
