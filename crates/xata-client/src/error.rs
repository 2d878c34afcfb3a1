//! Xata client error types.

use thiserror::Error;

/// Result type for Xata client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the Xata client.
///
/// Application-level failures embedded in otherwise successful record
/// responses are not errors at this layer; they are carried by
/// [`RecordResponse`](crate::RecordResponse) and left to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, TLS, timeout, connect).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status with the backend's message.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Request or response body could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ApiError {
    /// Creates a status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let error = ApiError::status(404, "table not found");
        assert_eq!(
            error.to_string(),
            "request failed with status 404: table not found"
        );
    }

    #[test]
    fn test_config_display() {
        let error = ApiError::config("missing api key");
        assert_eq!(error.to_string(), "invalid configuration: missing api key");
    }
}
