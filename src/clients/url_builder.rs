//! Request URL construction.
//!
//! [`build_url`] joins a base URL, accumulated path segments and optional
//! query parameters into one URL string.
//!
//! # Resolution Rules
//!
//! - The base is treated as a directory: a missing trailing slash is added,
//!   so `https://api.example.com/v1` + `users` gives `https://api.example.com/v1/users`
//! - Segments are joined with `/` and resolved relative to the base
//! - Query values of `null` are skipped; `0`, `false` and `""` are kept
//!
//! # Example
//!
//! ```rust
//! use fluent_api::clients::build_url;
//! use serde_json::{json, Value};
//!
//! let query = vec![
//!     ("page".to_string(), json!(1)),
//!     ("limit".to_string(), Value::Null),
//!     ("name".to_string(), json!("test")),
//! ];
//! let url = build_url("https://api.example.com", &["users"], Some(&query)).unwrap();
//! assert_eq!(url, "https://api.example.com/users?page=1&name=test");
//! ```

use serde_json::Value;
use url::Url;

use crate::clients::errors::UrlBuildError;

/// Ordered query parameters; `null` values are dropped when the URL is built.
pub type QueryParams = Vec<(String, Value)>;

/// Builds a request URL from a base, path segments and query parameters.
///
/// # Errors
///
/// Returns [`UrlBuildError::EmptyBase`] if `base` is empty, or
/// [`UrlBuildError::InvalidUrlConstruction`] if the base (or the joined
/// result) cannot be parsed as an absolute URL.
pub fn build_url<S: AsRef<str>>(
    base: &str,
    segments: &[S],
    query: Option<&QueryParams>,
) -> Result<String, UrlBuildError> {
    if base.is_empty() {
        return Err(UrlBuildError::EmptyBase);
    }

    let base_dir = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    let base_url = Url::parse(&base_dir).map_err(|e| UrlBuildError::InvalidUrlConstruction {
        url: base_dir.clone(),
        reason: e.to_string(),
    })?;

    let path = segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/");
    let mut url = base_url
        .join(&path)
        .map_err(|e| UrlBuildError::InvalidUrlConstruction {
            url: format!("{base_dir}{path}"),
            reason: e.to_string(),
        })?;

    let params: Vec<(&str, String)> = query
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| query_value(value).map(|v| (key.as_str(), v)))
        .collect();
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }

    Ok(url.into())
}

/// Coerces a query value to its string form, skipping `null`.
fn query_value(value: &Value) -> Option<String> {
    (!value.is_null()).then(|| value_text(value))
}

/// Returns the text form of a path or query value.
///
/// Strings are used as-is. Whole-number floats drop their fraction, so
/// `2.0` becomes `"2"` just like `2`.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                format!("{:.0}", f + 0.0)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
