//! Error types for URL construction, transport calls and interceptors.
//!
//! # Error Handling
//!
//! - [`UrlBuildError`]: The request URL could not be assembled
//! - [`TransportError`]: The transport call failed (network, timeout, non-2xx status)
//! - [`HookError`]: A request or response interceptor failed
//!
//! [`TransportError`] and [`HookError`] never reach callers of the fluent API
//! directly: the execution engine converts them into a
//! [`ResponseEnvelope`](crate::clients::ResponseEnvelope) carrying a
//! normalized error.
//!
//! # Example
//!
//! ```rust
//! use fluent_api::clients::{TransportError, TransportErrorKind};
//!
//! let error = TransportError::from_code("ECONNABORTED", "timeout of 30000ms exceeded");
//! assert_eq!(error.kind, TransportErrorKind::Timeout);
//! assert!(error.status.is_none());
//! ```

use thiserror::Error;

/// Error returned when a request URL cannot be built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlBuildError {
    /// The base URL was empty.
    #[error("Base URL is required to build a request URL.")]
    EmptyBase,

    /// The joined URL could not be parsed.
    #[error("Could not construct a valid URL from '{url}': {reason}")]
    InvalidUrlConstruction {
        /// The URL input that failed to parse.
        url: String,
        /// The parser's explanation.
        reason: String,
    },
}

/// Classification of a transport failure.
///
/// The execution engine uses the kind to pick the synthesized status code
/// and message when a failure carries neither.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The request did not complete before its timeout.
    Timeout,
    /// DNS resolution failed or the connection was refused.
    ConnectionFailed,
    /// The server answered with a non-2xx status.
    Status,
    /// Any other failure, including interceptor failures.
    Other,
}

impl TransportErrorKind {
    /// Maps a Node-style error code onto a kind.
    ///
    /// `ECONNABORTED` and `ETIMEDOUT` are timeouts; `ECONNREFUSED` and
    /// `ENOTFOUND` are connection failures. Everything else is [`Self::Other`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "ECONNABORTED" | "ETIMEDOUT" => Self::Timeout,
            "ECONNREFUSED" | "ENOTFOUND" => Self::ConnectionFailed,
            _ => Self::Other,
        }
    }
}

/// Error returned by a [`Transport`](crate::clients::Transport) when a request fails.
///
/// # Example
///
/// ```rust
/// use fluent_api::clients::TransportError;
/// use serde_json::json;
///
/// let error = TransportError::status(404, Some(json!({"message": "User not found"})));
/// assert_eq!(error.status, Some(404));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct TransportError {
    /// The HTTP status of the failed response, if one was received.
    pub status: Option<u16>,
    /// The failure classification.
    pub kind: TransportErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
    /// The parsed body of the failed response, if any.
    pub payload: Option<serde_json::Value>,
}

impl TransportError {
    /// Creates an error of the given kind with no status or payload.
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: None,
            kind,
            message: message.into(),
            payload: None,
        }
    }

    /// Creates an error from a Node-style error code (e.g. `ECONNABORTED`).
    #[must_use]
    pub fn from_code(code: &str, message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::from_code(code), message)
    }

    /// Creates an error for a non-2xx response.
    #[must_use]
    pub fn status(status: u16, payload: Option<serde_json::Value>) -> Self {
        Self {
            status: Some(status),
            kind: TransportErrorKind::Status,
            message: format!("Request failed with status code {status}"),
            payload,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::ConnectionFailed
        } else {
            TransportErrorKind::Other
        };
        Self {
            status: error.status().map(|s| s.as_u16()),
            kind,
            message: error.to_string(),
            payload: None,
        }
    }
}

/// Error returned by a request or response interceptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HookError {
    /// Description of what went wrong in the interceptor.
    pub message: String,
}

impl HookError {
    /// Creates a new interceptor error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<HookError> for TransportError {
    fn from(error: HookError) -> Self {
        Self::new(TransportErrorKind::Other, error.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_node_codes() {
        assert_eq!(
            TransportErrorKind::from_code("ECONNABORTED"),
            TransportErrorKind::Timeout
        );
        assert_eq!(
            TransportErrorKind::from_code("ETIMEDOUT"),
            TransportErrorKind::Timeout
        );
        assert_eq!(
            TransportErrorKind::from_code("ECONNREFUSED"),
            TransportErrorKind::ConnectionFailed
        );
        assert_eq!(
            TransportErrorKind::from_code("ENOTFOUND"),
            TransportErrorKind::ConnectionFailed
        );
        assert_eq!(
            TransportErrorKind::from_code("EPIPE"),
            TransportErrorKind::Other
        );
    }

    #[test]
    fn test_status_error_message() {
        let error = TransportError::status(502, None);
        assert_eq!(error.to_string(), "Request failed with status code 502");
        assert_eq!(error.kind, TransportErrorKind::Status);
    }

    #[test]
    fn test_hook_error_converts_to_other_kind() {
        let error: TransportError = HookError::new("token refresh failed").into();
        assert_eq!(error.kind, TransportErrorKind::Other);
        assert_eq!(error.message, "token refresh failed");
        assert!(error.status.is_none());
    }

    #[test]
    fn test_url_build_error_messages() {
        assert!(UrlBuildError::EmptyBase.to_string().contains("Base URL"));
        let error = UrlBuildError::InvalidUrlConstruction {
            url: "api.example.com/".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(error.to_string().contains("api.example.com/"));
    }
}
