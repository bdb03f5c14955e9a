//! REST-specific error types.
//!
//! Transport failures of a REST call are not errors at this level: they are
//! returned inside the [`ResponseEnvelope`](crate::clients::ResponseEnvelope).
//! A terminal verb call only fails when its URL cannot be assembled.
//!
//! # Example
//!
//! ```rust,ignore
//! use fluent_api::clients::rest::RestError;
//!
//! match client.rest().child("users").get(Default::default()).await {
//!     Ok(envelope) if envelope.is_ok() => println!("Users: {:?}", envelope.data),
//!     Ok(envelope) => println!("Request failed: {:?}", envelope.errors),
//!     Err(RestError::Url(e)) => println!("Bad URL: {e}"),
//! }
//! ```

use crate::clients::UrlBuildError;
use thiserror::Error;

/// Error type for REST terminal calls.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RestError {
    /// The request URL could not be built from the base and path.
    #[error(transparent)]
    Url(#[from] UrlBuildError),
}
