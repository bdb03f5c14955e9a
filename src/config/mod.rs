//! Configuration types for fluent API clients.
//!
//! This module provides the frozen instance configuration captured when a
//! [`FluentClient`](crate::FluentClient) is created.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: The configuration struct holding all client settings
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`BaseUrl`]: A validated absolute base URL
//!
//! # Example
//!
//! ```rust
//! use fluent_api::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .base_url("https://api.example.com")
//!     .header("Authorization", "Bearer token")
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use std::sync::Arc;
use std::time::Duration;

use crate::clients::graphql::{QueryBuilder, VariableQueryBuilder};
use crate::clients::{
    merge_headers, set_header, Headers, ReqwestTransport, RequestInterceptor,
    ResponseInterceptor, Transport, DEFAULT_TIMEOUT,
};
use crate::error::ConfigError;

/// Configuration for a fluent API client.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`. Pluggable parts
/// (transport, interceptors, query builder) are shared behind [`Arc`], so
/// cloning a configuration never duplicates them.
///
/// # Example
///
/// ```rust
/// use fluent_api::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("https://api.example.com")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url().as_ref(), "https://api.example.com");
/// assert!(config.headers().is_empty());
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    base_url: BaseUrl,
    headers: Headers,
    timeout: Duration,
    transport: Arc<dyn Transport>,
    request_interceptor: Option<Arc<dyn RequestInterceptor>>,
    response_interceptor: Option<Arc<dyn ResponseInterceptor>>,
    query_builder: Arc<dyn QueryBuilder>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("transport", &self.transport)
            .field("request_interceptor", &self.request_interceptor.is_some())
            .field("response_interceptor", &self.response_interceptor.is_some())
            .field("query_builder", &self.query_builder)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the timeout applied to requests without an explicit one.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Returns the request interceptor, if configured.
    #[must_use]
    pub fn request_interceptor(&self) -> Option<Arc<dyn RequestInterceptor>> {
        self.request_interceptor.clone()
    }

    /// Returns the response interceptor, if configured.
    #[must_use]
    pub fn response_interceptor(&self) -> Option<Arc<dyn ResponseInterceptor>> {
        self.response_interceptor.clone()
    }

    /// Returns the GraphQL query builder.
    #[must_use]
    pub fn query_builder(&self) -> Arc<dyn QueryBuilder> {
        Arc::clone(&self.query_builder)
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// The only required field is `base_url`.
///
/// # Defaults
///
/// - `headers`: Empty
/// - `timeout`: [`DEFAULT_TIMEOUT`] (30 seconds)
/// - `transport`: [`ReqwestTransport`]
/// - `query_builder`: [`VariableQueryBuilder`]
/// - interceptors: `None`
#[derive(Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    headers: Headers,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
    request_interceptor: Option<Arc<dyn RequestInterceptor>>,
    response_interceptor: Option<Arc<dyn ResponseInterceptor>>,
    query_builder: Option<Arc<dyn QueryBuilder>>,
}

impl std::fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Adds a single default header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, key.into(), value.into());
        self
    }

    /// Merges a map of default headers; later keys win regardless of case.
    #[must_use]
    pub fn headers(mut self, headers: Headers) -> Self {
        merge_headers(&mut self.headers, headers);
        self
    }

    /// Sets the timeout applied to requests without an explicit one.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the transport used to send requests.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the request interceptor.
    #[must_use]
    pub fn request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptor = Some(Arc::new(interceptor));
        self
    }

    /// Sets the response interceptor.
    #[must_use]
    pub fn response_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.response_interceptor = Some(Arc::new(interceptor));
        self
    }

    /// Sets the GraphQL query builder.
    #[must_use]
    pub fn query_builder(mut self, query_builder: Arc<dyn QueryBuilder>) -> Self {
        self.query_builder = Some(query_builder);
        self
    }

    /// Builds the [`ClientConfig`], validating the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if no (or an empty) base URL
    /// was set, or [`ConfigError::MalformedBaseUrl`] if it does not parse.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let base_url = BaseUrl::new(self.base_url.ok_or(ConfigError::InvalidBaseUrl)?)?;

        Ok(ClientConfig {
            base_url,
            headers: self.headers,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(ReqwestTransport::new())),
            request_interceptor: self.request_interceptor,
            response_interceptor: self.response_interceptor,
            query_builder: self
                .query_builder
                .unwrap_or_else(|| Arc::new(VariableQueryBuilder)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HookError, RequestDescriptor};

    #[test]
    fn test_builder_requires_base_url() {
        let result = ClientConfigBuilder::new().build();
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl)));
    }

    #[test]
    fn test_builder_rejects_empty_base_url() {
        let result = ClientConfig::builder().base_url("").build();
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl)));
    }

    #[test]
    fn test_builder_rejects_malformed_base_url() {
        let result = ClientConfig::builder().base_url("example").build();
        assert!(matches!(result, Err(ConfigError::MalformedBaseUrl { .. })));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder()
            .base_url("https://api.example.com")
            .build()
            .unwrap();

        assert!(config.headers().is_empty());
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(config.request_interceptor().is_none());
        assert!(config.response_interceptor().is_none());
    }

    #[test]
    fn test_builder_merges_headers() {
        let mut extra = Headers::new();
        extra.insert("Accept".to_string(), "application/json".to_string());
        extra.insert("x-env".to_string(), "prod".to_string());

        let config = ClientConfig::builder()
            .base_url("https://api.example.com")
            .header("X-Env", "dev")
            .headers(extra)
            .build()
            .unwrap();

        assert_eq!(config.headers().get("x-env"), Some(&"prod".to_string()));
        assert!(!config.headers().contains_key("X-Env"));
        assert_eq!(config.headers().len(), 2);
    }

    #[test]
    fn test_builder_with_interceptors_and_timeout() {
        let config = ClientConfig::builder()
            .base_url("https://api.example.com")
            .timeout(Duration::from_secs(5))
            .request_interceptor(|request: RequestDescriptor| async move {
                Ok::<_, HookError>(request)
            })
            .build()
            .unwrap();

        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.request_interceptor().is_some());
    }

    #[test]
    fn test_config_is_send_sync_and_debug() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientConfig>();

        let config = ClientConfig::builder()
            .base_url("https://api.example.com")
            .build()
            .unwrap();
        let debug_str = format!("{:?}", config.clone());
        assert!(debug_str.contains("ClientConfig"));
        assert!(debug_str.contains("api.example.com"));
    }
}
