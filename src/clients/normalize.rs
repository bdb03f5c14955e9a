//! Error normalization.
//!
//! Raw error objects (`{message?, code?, extensions?}`) from GraphQL or REST
//! payloads are mapped to a stable `{extensions: {code, message}}` shape by a
//! three-stage pipeline:
//!
//! 1. [`attach_code`]: lift `code` into `extensions`, carrying `message` along
//! 2. [`attach_message`]: move the outer `message` into `extensions.message`
//! 3. [`resolve_message`]: map the code to its final message
//!
//! Stage 3 keeps only `code` and `message`; any other extension keys are
//! dropped.
//!
//! Errors synthesized by the execution engine bypass the pipeline and are
//! built with [`make_error_response`].

use serde_json::{Map, Value};

use crate::clients::http_response::{ErrorExtensions, NormalizedError};

/// Top-level message of every engine-synthesized error.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Runs a raw error object through all three stages.
///
/// # Example
///
/// ```rust
/// use fluent_api::clients::normalize_error;
/// use serde_json::json;
///
/// let error = normalize_error(&json!({"extensions": {"code": "BAD_USER_INPUT"}}));
/// assert_eq!(error.extensions.message, json!("Input is not valid"));
/// ```
#[must_use]
pub fn normalize_error(raw: &Value) -> NormalizedError {
    resolve_message(&attach_message(&attach_code(raw)))
}

/// Stage 1: lifts `code` into `extensions`.
///
/// An existing `extensions.code` wins over a top-level `code`; absent both,
/// the code defaults to the empty string.
#[must_use]
pub fn attach_code(raw: &Value) -> Value {
    let mut error = as_object(raw);
    let mut extensions = error
        .get("extensions")
        .map(as_object)
        .unwrap_or_default();

    if !extensions.contains_key("code") {
        let code = error
            .get("code")
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        extensions.insert("code".to_string(), code);
    }
    error.remove("code");
    error.insert("extensions".to_string(), Value::Object(extensions));
    Value::Object(error)
}

/// Stage 2: moves the outer `message` into `extensions.message`.
#[must_use]
pub fn attach_message(error: &Value) -> Value {
    let mut error = as_object(error);
    let mut extensions = error
        .get("extensions")
        .map(as_object)
        .unwrap_or_default();

    if let Some(message) = error.remove("message") {
        extensions.insert("message".to_string(), message);
    }
    error.insert("extensions".to_string(), Value::Object(extensions));
    Value::Object(error)
}

/// Stage 3: resolves the final message from the code table.
///
/// | code | message |
/// |------|---------|
/// | `401`, `404`, `500` | original message |
/// | `422` | object values joined with `", "`, otherwise original |
/// | `BAD_USER_INPUT` | `Input is not valid` |
/// | `INTERNAL_SERVER_ERROR` | `Internal Server Error` |
/// | empty | empty string |
/// | anything else | `Unknown error` |
#[must_use]
pub fn resolve_message(error: &Value) -> NormalizedError {
    let extensions = error.get("extensions");
    let code = extensions
        .and_then(|ext| ext.get("code"))
        .map(code_string)
        .unwrap_or_default();
    let message = extensions
        .and_then(|ext| ext.get("message"))
        .cloned()
        .unwrap_or(Value::Null);

    let resolved = match code.as_str() {
        "" => Value::String(String::new()),
        "401" | "404" | "500" => message,
        "422" => join_object_values(message),
        "BAD_USER_INPUT" => Value::String("Input is not valid".to_string()),
        "INTERNAL_SERVER_ERROR" => Value::String(INTERNAL_SERVER_ERROR.to_string()),
        _ => Value::String("Unknown error".to_string()),
    };

    NormalizedError {
        message: None,
        extensions: ErrorExtensions {
            code,
            message: resolved,
            error: None,
        },
    }
}

/// Builds an engine-synthesized error, bypassing the pipeline.
///
/// # Example
///
/// ```rust
/// use fluent_api::clients::make_error_response;
/// use serde_json::json;
///
/// let error = make_error_response(408, "Request timeout");
/// assert_eq!(error.extensions.code, "408");
/// assert_eq!(error.extensions.message, json!("Request timeout"));
/// assert_eq!(error.extensions.error, Some(true));
/// ```
#[must_use]
pub fn make_error_response(code: impl ToString, message: impl Into<String>) -> NormalizedError {
    NormalizedError {
        message: Some(INTERNAL_SERVER_ERROR.to_string()),
        extensions: ErrorExtensions {
            code: code.to_string(),
            message: Value::String(message.into()),
            error: Some(true),
        },
    }
}

/// Returns `true` iff the first error carries code `404`.
#[must_use]
pub fn is_not_found(errors: &[NormalizedError]) -> bool {
    errors.first().is_some_and(|e| e.extensions.code == "404")
}

fn as_object(value: &Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn code_string(code: &Value) -> String {
    match code {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn join_object_values(message: Value) -> Value {
    let parts: Vec<String> = match &message {
        Value::Object(map) => map.values().map(value_text).collect(),
        Value::Array(items) => items.iter().map(value_text).collect(),
        _ => return message,
    };
    Value::String(parts.join(", "))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
