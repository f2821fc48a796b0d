use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy for one feed fetch. Nothing here is retried locally;
/// the refresh timer is the retry mechanism.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("feed responded with HTTP status {0}")]
    Status(StatusCode),

    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("feed body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}
