//! Guard functions for the inputs accepted by fluent chains.
//!
//! Each guard either returns the validated (and normalized) value or a
//! [`ValidationError`]. None of them perform I/O.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use crate::clients::url_builder::value_text;
use crate::error::ValidationError;

/// A header mapping as carried by contexts and descriptors.
pub type Headers = HashMap<String, String>;

/// Inserts one header, replacing any existing entry whose name differs only
/// in ASCII case.
pub fn set_header(target: &mut Headers, key: String, value: String) {
    target.retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
    target.insert(key, value);
}

/// Layers `layer` over `target`. Header names compare case-insensitively and
/// the spelling from `layer` is kept.
pub fn merge_headers(target: &mut Headers, layer: Headers) {
    for (key, value) in layer {
        set_header(target, key, value);
    }
}

/// Validates that `url` is a syntactically valid absolute URL.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidUrl`] if the URL does not parse.
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    url::Url::parse(url)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidUrl {
            url: url.to_string(),
        })
}

/// Validates a field name (non-empty, non-blank).
///
/// # Errors
///
/// Returns [`ValidationError::FieldNameRequired`] for empty or blank names.
pub fn validate_field(field: &str) -> Result<(), ValidationError> {
    if field.trim().is_empty() {
        return Err(ValidationError::FieldNameRequired);
    }
    Ok(())
}

/// Validates a selection set (non-empty, non-blank).
///
/// # Errors
///
/// Returns [`ValidationError::EmptySelection`] for empty or blank selections.
pub fn validate_selection(selection: &str) -> Result<(), ValidationError> {
    if selection.trim().is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    Ok(())
}

/// Validates GraphQL arguments.
///
/// Absent arguments become an empty map; anything but a JSON object
/// (including an explicit `null`) is rejected.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidArgs`] if `args` is present but not an object.
pub fn validate_args(args: Option<Value>) -> Result<Map<String, Value>, ValidationError> {
    match args {
        None => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(ValidationError::InvalidArgs),
    }
}

/// Conversion into a validated header mapping.
///
/// Typed maps and pair lists always succeed. A [`serde_json::Value`] must be
/// an object whose values are strings, numbers or booleans; numbers and
/// booleans are stringified. `None` is rejected like a JSON `null`.
pub trait IntoHeaders {
    /// Converts `self` into a header mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidHeaders`] if the value is not a
    /// plain key/value mapping.
    fn into_headers(self) -> Result<Headers, ValidationError>;
}

impl IntoHeaders for Headers {
    fn into_headers(self) -> Result<Headers, ValidationError> {
        Ok(self)
    }
}

impl IntoHeaders for HashMap<&str, &str> {
    fn into_headers(self) -> Result<Headers, ValidationError> {
        Ok(self
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }
}

impl IntoHeaders for BTreeMap<String, String> {
    fn into_headers(self) -> Result<Headers, ValidationError> {
        Ok(self.into_iter().collect())
    }
}

impl<const N: usize> IntoHeaders for [(&str, &str); N] {
    fn into_headers(self) -> Result<Headers, ValidationError> {
        Ok(self
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }
}

impl IntoHeaders for Vec<(String, String)> {
    fn into_headers(self) -> Result<Headers, ValidationError> {
        Ok(self.into_iter().collect())
    }
}

impl IntoHeaders for Value {
    fn into_headers(self) -> Result<Headers, ValidationError> {
        let Value::Object(map) = self else {
            return Err(ValidationError::InvalidHeaders);
        };
        let mut headers = Headers::new();
        for (key, value) in map {
            let value = match value {
                Value::String(_) | Value::Number(_) | Value::Bool(_) => value_text(&value),
                _ => return Err(ValidationError::InvalidHeaders),
            };
            set_header(&mut headers, key, value);
        }
        Ok(headers)
    }
}

impl<T: IntoHeaders> IntoHeaders for Option<T> {
    fn into_headers(self) -> Result<Headers, ValidationError> {
        self.map_or(Err(ValidationError::InvalidHeaders), IntoHeaders::into_headers)
    }
}
