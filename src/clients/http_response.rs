//! Response types returned by terminal calls.
//!
//! This module provides the raw [`TransportResponse`] produced by a
//! transport and the [`ResponseEnvelope`] every terminal REST or GraphQL
//! call resolves to, along with its [`NormalizedError`] entries.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A successful response from the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers (lowercased names; headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response payload.
    pub data: Value,
}

impl TransportResponse {
    /// Creates a new transport response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, Vec<String>>, data: Value) -> Self {
        Self {
            status,
            headers,
            data,
        }
    }

    /// Returns the first value of the given header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// The `extensions` object of a [`NormalizedError`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorExtensions {
    /// Machine-readable error code (HTTP status or GraphQL error code).
    pub code: String,
    /// Resolved error message; usually a string, but 401/404/500 pass the
    /// original value through untouched.
    #[serde(default)]
    pub message: Value,
    /// Set on errors synthesized by the execution engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
}

/// An error entry with a stable `{code, message}` contract.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedError {
    /// Top-level message; only set on engine-synthesized errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The normalized code and message.
    pub extensions: ErrorExtensions,
}

impl NormalizedError {
    /// Returns the error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.extensions.code
    }
}

/// The single result shape of every terminal call.
///
/// `data` is `None` whenever the call failed or the payload did not follow
/// the `{data, errors}` envelope. Errors, when present, are never empty.
///
/// # Example
///
/// ```rust
/// use fluent_api::clients::ResponseEnvelope;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u64,
/// }
///
/// let envelope = ResponseEnvelope::with_data(json!({"id": 7}));
/// let typed = envelope.into_typed::<User>().unwrap();
/// assert_eq!(typed.data.unwrap().id, 7);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: DeserializeOwned"))]
pub struct ResponseEnvelope<T = Value> {
    /// The response data.
    pub data: Option<T>,
    /// Normalized errors, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<NormalizedError>>,
    /// Reserved for GraphQL response extensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// GraphQL responses share the envelope shape.
pub type GraphqlResponse<T = Value> = ResponseEnvelope<T>;

impl<T> ResponseEnvelope<T> {
    /// Creates a successful envelope around `data`.
    #[must_use]
    pub const fn with_data(data: T) -> Self {
        Self {
            data: Some(data),
            errors: None,
            extensions: None,
        }
    }

    /// Creates a failed envelope with `data: None`.
    #[must_use]
    pub const fn with_errors(errors: Vec<NormalizedError>) -> Self {
        Self {
            data: None,
            errors: Some(errors),
            extensions: None,
        }
    }

    /// Returns `true` when no errors are attached.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.as_ref().map_or(true, Vec::is_empty)
    }

    /// Returns `true` when the first error carries code `404`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.errors
            .as_deref()
            .is_some_and(crate::clients::normalize::is_not_found)
    }
}

impl ResponseEnvelope<Value> {
    /// Deserializes `data` into `T`, keeping errors and extensions.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error if `data` does not match `T`.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<ResponseEnvelope<T>, serde_json::Error> {
        let data = self.data.map(serde_json::from_value).transpose()?;
        Ok(ResponseEnvelope {
            data,
            errors: self.errors,
            extensions: self.extensions,
        })
    }
}
