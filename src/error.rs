/// All errors that can occur while fetching, aggregating or persisting matches.
#[derive(thiserror::Error, Debug)]
pub enum MatchdayError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the expected JSON document.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// Every configured competition feed failed in one aggregation cycle.
    #[error("all {attempted} competition feeds failed")]
    AllFeedsFailed { attempted: usize },

    /// Reading or writing a persisted blob failed.
    #[error("storage failure for key {key}: {source}")]
    Storage {
        key: String,
        source: std::io::Error,
    },

    /// Failed to serialize state for persistence.
    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An environment variable held an unusable value.
    #[error("invalid configuration value for {var}: {reason}")]
    Config { var: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, MatchdayError>;
