//! Error types for remote registry calls.

use thiserror::Error;

/// Convenience alias for fallible registry operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure classes for calls against the document registry.
///
/// Every variant carries the endpoint path so call sites can log a useful
/// line without threading extra context around.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The registry could not be reached at all.
    #[error("could not reach the registry at {endpoint}: {message}")]
    Connection { endpoint: String, message: String },

    /// The request exceeded the configured timeout.
    #[error("request to {endpoint} timed out")]
    Timeout { endpoint: String },

    /// The registry answered with a non-success status code.
    #[error("registry returned HTTP {status} for {endpoint}")]
    Status {
        endpoint: String,
        status: u16,
        /// Text of a structured `{ "error": ... }` body, when one was sent.
        message: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("could not decode the response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// The configured base URL does not parse.
    #[error("invalid registry base URL {url:?}: {message}")]
    BaseUrl { url: String, message: String },
}

impl ApiError {
    /// Classify a transport-level failure from the HTTP client.
    pub(crate) fn from_request(endpoint: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout {
                endpoint: endpoint.to_string(),
            }
        } else if err.is_decode() {
            ApiError::Decode {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        } else {
            ApiError::Connection {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Server-provided error text, shown verbatim where the UI allows it.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_expose_the_server_message() {
        let err = ApiError::Status {
            endpoint: "/upload".to_string(),
            status: 400,
            message: Some("File type not allowed".to_string()),
        };
        assert_eq!(err.server_message(), Some("File type not allowed"));
    }

    #[test]
    fn transport_errors_have_no_server_message() {
        let err = ApiError::Timeout {
            endpoint: "/search".to_string(),
        };
        assert_eq!(err.server_message(), None);
        assert!(err.to_string().contains("/search"));
    }
}
