use hyper::http::uri::InvalidUri;
use hyper::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Why a single provider gave no answer. The resolver treats all of them alike.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Transport(#[from] hyper::Error),
    #[error(transparent)]
    Http(#[from] hyper::http::Error),
    #[error("non-success status code: {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("response rejected: {0}")]
    Rejected(String),
    #[error("target gives an invalid URI: {0}")]
    InvalidUri(#[from] InvalidUri),
}

impl From<StatusCode> for ProviderError {
    fn from(status_code: StatusCode) -> Self {
        Self::Status(status_code)
    }
}
