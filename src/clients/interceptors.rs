//! Request and response interceptors.
//!
//! Interceptors are optional async hooks run by the execution engine around
//! the transport call. Both traits are implemented for async closures:
//!
//! ```rust
//! use fluent_api::clients::{HookError, RequestDescriptor};
//! use fluent_api::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .base_url("https://api.example.com")
//!     .request_interceptor(|mut request: RequestDescriptor| async move {
//!         request.headers.insert("Authorization".to_string(), "Bearer token".to_string());
//!         Ok::<_, HookError>(request)
//!     })
//!     .build()
//!     .unwrap();
//! # let _ = config;
//! ```

use std::future::Future;

use async_trait::async_trait;

use crate::clients::errors::HookError;
use crate::clients::http_request::RequestDescriptor;
use crate::clients::http_response::{ResponseEnvelope, TransportResponse};

/// Rewrites a request before it is sent.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Returns the descriptor that will actually be sent.
    ///
    /// # Errors
    ///
    /// A [`HookError`] is reported to the caller as a failed response.
    async fn intercept(&self, request: RequestDescriptor) -> Result<RequestDescriptor, HookError>;
}

/// Replaces the default envelope construction for successful responses.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    /// Builds the envelope returned to the caller from the raw response.
    ///
    /// # Errors
    ///
    /// A [`HookError`] is reported to the caller as a failed response.
    async fn intercept(&self, response: TransportResponse) -> Result<ResponseEnvelope, HookError>;
}

#[async_trait]
impl<F, Fut> RequestInterceptor for F
where
    F: Fn(RequestDescriptor) -> Fut + Send + Sync,
    Fut: Future<Output = Result<RequestDescriptor, HookError>> + Send + 'static,
{
    async fn intercept(&self, request: RequestDescriptor) -> Result<RequestDescriptor, HookError> {
        self(request).await
    }
}

#[async_trait]
impl<F, Fut> ResponseInterceptor for F
where
    F: Fn(TransportResponse) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ResponseEnvelope, HookError>> + Send + 'static,
{
    async fn intercept(&self, response: TransportResponse) -> Result<ResponseEnvelope, HookError> {
        self(response).await
    }
}
