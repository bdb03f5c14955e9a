//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A validated absolute base URL.
///
/// The original string is kept as given (trimmed), so the configured value
/// is exactly what requests resolve against.
///
/// # Serialization
///
/// `BaseUrl` serializes to and deserializes from the plain URL string:
///
/// ```rust
/// use fluent_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.example.com").unwrap();
/// let json = serde_json::to_string(&url).unwrap();
/// assert_eq!(json, r#""https://api.example.com""#);
/// ```
///
/// # Example
///
/// ```rust
/// use fluent_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.example.com/v1").unwrap();
/// assert_eq!(url.as_ref(), "https://api.example.com/v1");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("api.example.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    raw: String,
    parsed: url::Url,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is empty, or
    /// [`ConfigError::MalformedBaseUrl`] if it does not parse as an absolute URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let raw = url.trim().to_string();

        if raw.is_empty() {
            return Err(ConfigError::InvalidBaseUrl);
        }

        let parsed =
            url::Url::parse(&raw).map_err(|_| ConfigError::MalformedBaseUrl { url: raw.clone() })?;

        Ok(Self { raw, parsed })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.parsed.scheme()
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        self.parsed.host_str()
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_rejects_empty_string() {
        assert!(matches!(BaseUrl::new(""), Err(ConfigError::InvalidBaseUrl)));
        assert!(matches!(BaseUrl::new("   "), Err(ConfigError::InvalidBaseUrl)));
    }

    #[test]
    fn test_base_url_rejects_malformed() {
        assert!(matches!(
            BaseUrl::new("not a url"),
            Err(ConfigError::MalformedBaseUrl { url }) if url == "not a url"
        ));
        assert!(BaseUrl::new("api.example.com").is_err());
        assert!(BaseUrl::new("/relative/path").is_err());
    }

    #[test]
    fn test_base_url_accepts_absolute_urls() {
        let url = BaseUrl::new("http://localhost:3000").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), Some("localhost"));

        let url = BaseUrl::new("  https://api.example.com/graphql ").unwrap();
        assert_eq!(url.as_ref(), "https://api.example.com/graphql");
    }

    #[test]
    fn test_base_url_deserialize_validates() {
        let url: BaseUrl = serde_json::from_str(r#""https://api.example.com""#).unwrap();
        assert_eq!(url.as_ref(), "https://api.example.com");

        let result: Result<BaseUrl, _> = serde_json::from_str(r#""nope""#);
        assert!(result.is_err());
    }
}
