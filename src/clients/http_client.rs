//! Request execution engine.
//!
//! This module provides [`HttpClient`], which turns a resolved
//! [`RequestDescriptor`] into a [`ResponseEnvelope`]. Every call is a single
//! pass with no retries:
//!
//! 1. Reject a descriptor without URL (error envelope, no I/O)
//! 2. Run the request interceptor, if any
//! 3. Apply the default timeout when none is set
//! 4. Send through the [`Transport`]
//! 5. Build the envelope from `{data, errors}`, or hand the raw response to
//!    the response interceptor
//! 6. Fold any transport or interceptor failure into an error envelope

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::clients::errors::{TransportError, TransportErrorKind};
use crate::clients::http_request::RequestDescriptor;
use crate::clients::http_response::ResponseEnvelope;
use crate::clients::interceptors::{RequestInterceptor, ResponseInterceptor};
use crate::clients::normalize::{make_error_response, normalize_error};
use crate::clients::transport::Transport;
use crate::config::ClientConfig;

/// Timeout applied to requests that do not set one (30 000 ms).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Message for descriptors that reach the engine without a URL.
pub const MISSING_URL_MESSAGE: &str = "Request URL is required";

/// Message used when a failure carries no usable description.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Executes resolved requests and normalizes their outcome.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and cheap to share behind an [`Arc`]; every
/// fluent chain created from one client holds a reference to the same engine.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    request_interceptor: Option<Arc<dyn RequestInterceptor>>,
    response_interceptor: Option<Arc<dyn ResponseInterceptor>>,
    default_timeout: Duration,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("transport", &self.transport)
            .field("request_interceptor", &self.request_interceptor.is_some())
            .field("response_interceptor", &self.response_interceptor.is_some())
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

impl HttpClient {
    /// Creates an engine from the transport, interceptors and timeout of `config`.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            transport: config.transport(),
            request_interceptor: config.request_interceptor(),
            response_interceptor: config.response_interceptor(),
            default_timeout: config.timeout(),
        }
    }

    /// Creates an engine with no interceptors and the default timeout.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            request_interceptor: None,
            response_interceptor: None,
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Returns the timeout applied to requests without one.
    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Executes a request.
    ///
    /// This never fails: transport errors, interceptor errors and a missing
    /// URL all come back as an envelope with `data: None` and one
    /// engine-synthesized error.
    pub async fn execute(&self, request: RequestDescriptor) -> ResponseEnvelope {
        if request.url.trim().is_empty() {
            tracing::warn!("Rejected {} request without URL", request.method);
            return ResponseEnvelope::with_errors(vec![make_error_response(
                400,
                MISSING_URL_MESSAGE,
            )]);
        }

        match self.dispatch(request).await {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::warn!(
                    status = ?error.status,
                    kind = ?error.kind,
                    "Request failed: {}",
                    error.message
                );
                Self::error_envelope(&error)
            }
        }
    }

    async fn dispatch(&self, request: RequestDescriptor) -> Result<ResponseEnvelope, TransportError> {
        let mut request = match &self.request_interceptor {
            Some(interceptor) => interceptor.intercept(request).await?,
            None => request,
        };

        if request.timeout.is_none() {
            tracing::debug!(
                "Applying default timeout of {}ms",
                self.default_timeout.as_millis()
            );
            request.timeout = Some(self.default_timeout);
        }

        tracing::debug!("Sending {} request to {}", request.method, request.url);
        let response = self.transport.send(&request).await?;

        if let Some(interceptor) = &self.response_interceptor {
            return Ok(interceptor.intercept(response).await?);
        }

        Ok(Self::envelope_from_payload(&response.data))
    }

    /// Builds an envelope from a `{data, errors}` payload.
    ///
    /// Payloads without a `data` key yield `data: None`; an empty or missing
    /// `errors` array yields no errors.
    #[must_use]
    pub fn envelope_from_payload(payload: &Value) -> ResponseEnvelope {
        let data = payload.get("data").filter(|d| !d.is_null()).cloned();
        let errors = payload
            .get("errors")
            .and_then(Value::as_array)
            .filter(|errors| !errors.is_empty())
            .map(|errors| errors.iter().map(normalize_error).collect());

        ResponseEnvelope {
            data,
            errors,
            extensions: None,
        }
    }

    /// Converts a failure into an error envelope.
    #[must_use]
    pub fn error_envelope(error: &TransportError) -> ResponseEnvelope {
        let status = error.status.unwrap_or(match error.kind {
            TransportErrorKind::Timeout => 408,
            _ => 500,
        });
        ResponseEnvelope::with_errors(vec![make_error_response(
            status,
            Self::failure_message(error),
        )])
    }

    /// Picks the message for a failure, in priority order: payload `message`,
    /// payload `error`, fixed timeout / connection texts, the failure's own
    /// message, then [`FALLBACK_ERROR_MESSAGE`].
    fn failure_message(error: &TransportError) -> String {
        let from_payload = |key: &str| {
            error
                .payload
                .as_ref()
                .and_then(|payload| payload.get(key))
                .and_then(|value| match value {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
        };

        if let Some(message) = from_payload("message").or_else(|| from_payload("error")) {
            return message;
        }

        match error.kind {
            TransportErrorKind::Timeout => "Request timeout".to_string(),
            TransportErrorKind::ConnectionFailed => "Network connection failed".to_string(),
            _ if !error.message.is_empty() => error.message.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}
