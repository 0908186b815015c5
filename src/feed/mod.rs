pub(crate) mod competition;
pub(crate) mod normalize;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{MatchdayError, Result};

/// Header carrying the API token on every upstream request.
pub(crate) const AUTH_HEADER: &str = "X-Auth-Token";

/// Fetch a URL with the auth headers and decode the body as JSON.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    token: &str,
) -> Result<T> {
    debug!(url, "fetching feed");

    let response = client
        .get(url)
        .header(AUTH_HEADER, token)
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await
        .map_err(|e| MatchdayError::Http {
            url: url.to_owned(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(MatchdayError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| MatchdayError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    decode(url, &body)
}

pub(crate) fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| MatchdayError::Decode {
        url: url.to_owned(),
        source: e,
    })
}
