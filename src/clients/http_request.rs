//! Request types handed to the execution engine.
//!
//! This module provides [`HttpMethod`], the fully resolved
//! [`RequestDescriptor`], and the per-call [`RequestOptions`] accepted by
//! REST verb calls.

use std::fmt;
use std::time::Duration;

use crate::clients::url_builder::QueryParams;
use crate::clients::validators::{set_header, Headers};

/// HTTP methods reachable from a REST chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// All methods, in declaration order.
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Resolves a chain key to a method.
    ///
    /// Only the exact lowercase names match: `get` is a method, while `GET`
    /// or `Get` are ordinary path segments.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.key() == key)
    }

    /// Returns the lowercase chain key for this method.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }

    /// Returns the uppercase wire name for this method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request, ready for the transport.
///
/// Descriptors are assembled fresh for every terminal call and are never
/// shared between calls. Interceptors receive and return them by value.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    /// The absolute request URL.
    pub url: String,
    /// The HTTP method.
    pub method: HttpMethod,
    /// The JSON body, passed through unchanged.
    pub body: Option<serde_json::Value>,
    /// The final merged headers.
    pub headers: Headers,
    /// Request timeout; the engine fills in its default when `None`.
    pub timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// Creates a descriptor with no body, headers or timeout.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            body: None,
            headers: Headers::new(),
            timeout: None,
        }
    }
}

/// Per-call options for REST verb calls.
///
/// # Example
///
/// ```rust
/// use fluent_api::clients::RequestOptions;
/// use serde_json::json;
///
/// let options = RequestOptions::new()
///     .query("page", 1)
///     .query("filter", None::<String>)
///     .header("X-Trace", "abc")
///     .body(json!({"name": "Ada"}));
/// assert_eq!(options.query.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    /// Query parameters; `null` values are skipped when the URL is built.
    pub query: QueryParams,
    /// Request body.
    pub body: Option<serde_json::Value>,
    /// Headers that override every other header layer.
    pub headers: Headers,
    /// Explicit timeout for this call.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query parameter. `None`/`null` values are kept here and
    /// dropped during URL construction.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, key.into(), value.into());
        self
    }

    /// Sets an explicit timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
