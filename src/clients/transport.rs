//! Transport abstraction and the default reqwest-backed implementation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{HttpMethod, RequestDescriptor};
use crate::clients::http_response::TransportResponse;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Performs one outbound HTTP call for a resolved [`RequestDescriptor`].
///
/// Implementations must return `Err` for network failures, timeouts and
/// non-2xx statuses, classifying them with
/// [`TransportErrorKind`](crate::clients::TransportErrorKind).
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Sends the request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the call does not produce a 2xx response.
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError>;
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
///
/// - Applies the descriptor timeout to the request
/// - Sends the body as JSON unless it is absent or `null`
/// - Parses response bodies as JSON, keeping non-JSON text as a string value
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with a rustls-backed client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(format!("fluent-api-rust v{SDK_VERSION}"))
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Creates a transport around an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Parses a body as JSON; non-JSON text is kept as a string value.
    fn parse_body(text: String) -> serde_json::Value {
        if text.is_empty() {
            return serde_json::Value::Null;
        }
        serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Patch => self.client.patch(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        match &request.body {
            None | Some(serde_json::Value::Null) => {}
            Some(body) => req_builder = req_builder.json(body),
        }

        let res = req_builder.send().await?;

        let status = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = Self::parse_body(res.text().await?);

        if !(200..300).contains(&status) {
            return Err(TransportError::status(status, Some(body)));
        }

        Ok(TransportResponse::new(status, headers, body))
    }
}
