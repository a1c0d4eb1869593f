use reqwest::StatusCode;
use thiserror::Error;

/// Collection path of the listing resource
pub const PROPERTIES_PATH: &str = "/api/properties";

/// Failures talking to the listing backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, DNS, or timeout failure before a response arrived
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{method} {url} returned {status}")]
    Status {
        method: &'static str,
        url: String,
        status: StatusCode,
    },

    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL {0:?}")]
    InvalidUrl(String),
}

impl ApiError {
    /// True when the backend answered 404 for the addressed property
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
