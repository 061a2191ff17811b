use thiserror::Error;

/// Errors surfaced by the collector API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response (connect failure,
    /// timeout, aborted body).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The endpoint answered with an unexpected status.
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    /// The requested bid notice does not exist upstream.
    #[error("bid notice {0} not found")]
    NotFound(String),
    /// The response body did not match the expected shape.
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;
