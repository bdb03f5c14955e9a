//! Per-chain request context.

use crate::clients::validators::{merge_headers, Headers};

/// Base URL and header overrides carried along a fluent chain.
///
/// A context is never mutated: [`with_base`](Self::with_base) and
/// [`with_headers`](Self::with_headers) return a new value, leaving every
/// previously created chain object untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    base: Option<String>,
    headers: Option<Headers>,
}

impl RequestContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the base URL override, if any.
    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Returns the header overrides, if any.
    #[must_use]
    pub const fn headers(&self) -> Option<&Headers> {
        self.headers.as_ref()
    }

    /// Returns a copy of this context whose base is replaced by `base`.
    #[must_use]
    pub fn with_base(&self, base: impl Into<String>) -> Self {
        Self {
            base: Some(base.into()),
            headers: self.headers.clone(),
        }
    }

    /// Returns a copy of this context with `headers` merged over the existing ones.
    ///
    /// Keys present in `headers` win, compared case-insensitively.
    #[must_use]
    pub fn with_headers(&self, headers: Headers) -> Self {
        let mut merged = self.headers.clone().unwrap_or_default();
        merge_headers(&mut merged, headers);
        Self {
            base: self.base.clone(),
            headers: Some(merged),
        }
    }

    /// Resolves the effective base URL, falling back to `default`.
    #[must_use]
    pub fn resolve_base<'a>(&'a self, default: &'a str) -> &'a str {
        self.base.as_deref().unwrap_or(default)
    }
}
