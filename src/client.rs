use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::config::Config;
use crate::error::Result;
use crate::feed;
use crate::model::{DateWindow, RawFixture};

/// Anything that can produce the raw fixtures of one competition.
///
/// [`FootballDataClient`] is the production source; tests plug in fakes.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    async fn competition_fixtures(&self, code: &str, window: DateWindow)
        -> Result<Vec<RawFixture>>;
}

#[async_trait]
impl<T: FixtureSource + ?Sized> FixtureSource for Arc<T> {
    async fn competition_fixtures(
        &self,
        code: &str,
        window: DateWindow,
    ) -> Result<Vec<RawFixture>> {
        (**self).competition_fixtures(code, window).await
    }
}

/// HTTP client for the football-data.org v4 API.
///
/// Wraps a [`reqwest::Client`] together with the API base URL and token.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> matchday::Result<()> {
/// use matchday::{DateWindow, FixtureSource, FootballDataClient};
///
/// let client = FootballDataClient::new("https://api.football-data.org/v4", "my-token");
/// let window = DateWindow::around(chrono::Utc::now(), 7);
/// let fixtures = client.competition_fixtures("PL", window).await?;
/// println!("Found {} fixtures", fixtures.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FootballDataClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl FootballDataClient {
    /// Create a new client with default HTTP settings.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, token)
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http: client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone(), config.api_token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl FixtureSource for FootballDataClient {
    /// Fetch every fixture of a competition within the date window.
    #[instrument(skip(self))]
    async fn competition_fixtures(
        &self,
        code: &str,
        window: DateWindow,
    ) -> Result<Vec<RawFixture>> {
        feed::competition::get_competition_matches(
            &self.http,
            &self.base_url,
            &self.token,
            code,
            window,
        )
        .await
    }
}
