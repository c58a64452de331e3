//! Upstream API error types.

use thiserror::Error;

/// Errors that can occur while talking to the KMB open-data API.
///
/// These never reach a tool caller directly. `HttpFetcher` renders them into
/// an `{"error": "<display text>"}` response object.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("HTTP error: {status} for url ({url})")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The request could not be sent or the connection failed.
    #[error("Request error: {0}")]
    Request(#[source] reqwest::Error),

    /// Anything else, e.g. a body that is not valid JSON.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Create an "unexpected" error.
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Render this error as the response object cached and returned in place
    /// of a payload.
    pub fn into_response(self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_response_shape() {
        let err = ApiError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            url: "https://example.invalid/stop/X".to_string(),
        };
        let response = err.into_response();
        let message = response["error"].as_str().unwrap();
        assert!(message.starts_with("HTTP error: 404"));
        assert!(response.get("data").is_none());
    }

    #[test]
    fn test_unexpected_error_prefix() {
        let response = ApiError::unexpected("bad json").into_response();
        assert_eq!(response["error"], "Unexpected error: bad json");
    }
}
