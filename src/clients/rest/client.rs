//! REST path resolver.
//!
//! A [`PathNode`] is an immutable value holding the path segments and
//! [`RequestContext`] accumulated so far. Every chain step returns a new
//! node; only a terminal verb call performs I/O.

use std::sync::Arc;

use serde_json::Value;

use crate::client::ClientInner;
use crate::clients::rest::RestError;
use crate::clients::url_builder::{build_url, value_text};
use crate::clients::validators::{merge_headers, validate_url, IntoHeaders};
use crate::clients::{
    Headers, HttpMethod, RequestContext, RequestDescriptor, RequestOptions, ResponseEnvelope,
};
use crate::error::ValidationError;

/// Reserved key that returns the base-override function.
pub const BASE_KEY: &str = "base";

/// Reserved key that returns the header-override function.
pub const HEADERS_KEY: &str = "headers";

/// One step of a REST chain.
///
/// # Thread Safety
///
/// `PathNode` is `Send + Sync`; sibling nodes created from the same parent
/// share nothing mutable and can be used from different tasks.
///
/// # Example
///
/// ```rust,ignore
/// // GET https://api.example.com/api/v1/users/123/posts
/// let node = client.rest().child("api").child("v1").child("users").call([123]).child("posts");
/// assert_eq!(node.path(), "api/v1/users/123/posts");
/// let response = node.get(RequestOptions::new()).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PathNode {
    inner: Arc<ClientInner>,
    segments: Vec<String>,
    ctx: RequestContext,
}

// Verify PathNode is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PathNode>();
};

/// The result of looking up a key on a [`PathNode`].
#[derive(Clone, Debug)]
pub enum PathAccess {
    /// An ordinary key: the node extended by one segment.
    Segment(PathNode),
    /// One of the five lowercase verb keys.
    Verb(RestCall),
    /// The `base` key; call [`PathNode::base`].
    Base,
    /// The `headers` key; call [`PathNode::headers`].
    Headers,
}

impl PathNode {
    pub(crate) fn root(inner: Arc<ClientInner>) -> Self {
        Self {
            inner,
            segments: Vec::new(),
            ctx: RequestContext::new(),
        }
    }

    /// Appends `name` as a path segment, whatever its value.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self {
            inner: Arc::clone(&self.inner),
            segments,
            ctx: self.ctx.clone(),
        }
    }

    /// Resolves a key the way chained property access does.
    ///
    /// `base` and `headers` are reserved, the exact lowercase verb names
    /// return a terminal call, and everything else (including `GET`) is a
    /// new path segment.
    #[must_use]
    pub fn access(&self, key: &str) -> PathAccess {
        match key {
            BASE_KEY => PathAccess::Base,
            HEADERS_KEY => PathAccess::Headers,
            _ => HttpMethod::from_key(key).map_or_else(
                || PathAccess::Segment(self.child(key)),
                |method| PathAccess::Verb(self.verb(method)),
            ),
        }
    }

    /// Appends every argument as a segment, skipping `null` values.
    ///
    /// Strings are used as-is; other values use their JSON text, so
    /// `call([123])` and `call([123.0])` both append `"123"`.
    #[must_use]
    pub fn call<I>(&self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut segments = self.segments.clone();
        segments.extend(
            args.into_iter()
                .map(Into::into)
                .filter(|value| !value.is_null())
                .map(|value| value_text(&value)),
        );
        Self {
            inner: Arc::clone(&self.inner),
            segments,
            ctx: self.ctx.clone(),
        }
    }

    /// Returns a node with the same path whose requests go to `base`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrl`] if `base` is not an absolute URL.
    pub fn base(&self, base: &str) -> Result<Self, ValidationError> {
        validate_url(base)?;
        tracing::debug!("Overriding base URL for '{}' with {base}", self.path());
        Ok(Self {
            inner: Arc::clone(&self.inner),
            segments: self.segments.clone(),
            ctx: self.ctx.with_base(base),
        })
    }

    /// Returns a node with `headers` merged into its context.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidHeaders`] if `headers` is not a flat
    /// key to string mapping.
    pub fn headers(&self, headers: impl IntoHeaders) -> Result<Self, ValidationError> {
        let headers = headers.into_headers()?;
        tracing::debug!("Merging {} header(s) into '{}'", headers.len(), self.path());
        Ok(Self {
            inner: Arc::clone(&self.inner),
            segments: self.segments.clone(),
            ctx: self.ctx.with_headers(headers),
        })
    }

    /// Returns the terminal call for `method`.
    #[must_use]
    pub fn verb(&self, method: HttpMethod) -> RestCall {
        RestCall {
            node: self.clone(),
            method,
        }
    }

    /// Sends a GET request for this path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Url`] if the URL cannot be built. Transport
    /// failures are reported inside the envelope.
    pub async fn get(&self, options: RequestOptions) -> Result<ResponseEnvelope, RestError> {
        self.verb(HttpMethod::Get).send(options).await
    }

    /// Sends a POST request for this path.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn post(&self, options: RequestOptions) -> Result<ResponseEnvelope, RestError> {
        self.verb(HttpMethod::Post).send(options).await
    }

    /// Sends a PUT request for this path.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn put(&self, options: RequestOptions) -> Result<ResponseEnvelope, RestError> {
        self.verb(HttpMethod::Put).send(options).await
    }

    /// Sends a PATCH request for this path.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn patch(&self, options: RequestOptions) -> Result<ResponseEnvelope, RestError> {
        self.verb(HttpMethod::Patch).send(options).await
    }

    /// Sends a DELETE request for this path.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn delete(&self, options: RequestOptions) -> Result<ResponseEnvelope, RestError> {
        self.verb(HttpMethod::Delete).send(options).await
    }

    /// Returns the segments joined with `/`.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Returns the accumulated segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the chain context.
    #[must_use]
    pub const fn context(&self) -> &RequestContext {
        &self.ctx
    }
}

/// A terminal verb call bound to a [`PathNode`].
#[derive(Clone, Debug)]
pub struct RestCall {
    node: PathNode,
    method: HttpMethod,
}

impl RestCall {
    /// Returns the HTTP method of this call.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Resolves the request without sending it.
    ///
    /// Headers are layered instance defaults, then context headers, then
    /// `options.headers`; later layers win key by key.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Url`] if the URL cannot be built.
    pub fn prepare(&self, options: RequestOptions) -> Result<RequestDescriptor, RestError> {
        let inner = &self.node.inner;
        let base = self.node.ctx.resolve_base(inner.base_url());
        let query = (!options.query.is_empty()).then_some(&options.query);
        let url = build_url(base, &self.node.segments, query)?;

        let mut headers: Headers = inner.config.headers().clone();
        if let Some(ctx_headers) = self.node.ctx.headers() {
            merge_headers(&mut headers, ctx_headers.clone());
        }
        merge_headers(&mut headers, options.headers);

        Ok(RequestDescriptor {
            url,
            method: self.method,
            body: options.body,
            headers,
            timeout: options.timeout,
        })
    }

    /// Resolves and executes the request.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Url`] if the URL cannot be built. Transport and
    /// interceptor failures come back as an error envelope.
    pub async fn send(&self, options: RequestOptions) -> Result<ResponseEnvelope, RestError> {
        let request = self.prepare(options)?;
        Ok(self.node.inner.engine.execute(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::{client_with, RecordingTransport};
    use serde_json::json;

    fn transport() -> Arc<RecordingTransport> {
        RecordingTransport::new(json!({"data": {"ok": true}}))
    }

    #[test]
    fn test_segments_accumulate() {
        let client = client_with(transport());
        let node = client
            .rest()
            .child("api")
            .child("v1")
            .child("users")
            .call([123])
            .child("posts");
        assert_eq!(node.path(), "api/v1/users/123/posts");
    }

    #[test]
    fn test_call_filters_null_and_stringifies() {
        let client = client_with(transport());
        let node = client
            .rest()
            .child("users")
            .call([Value::Null, json!(123), Value::Null, json!("posts")]);
        assert_eq!(node.segments(), ["users", "123", "posts"]);

        let node = client.rest().call([Some("a"), None, Some("b")]);
        assert_eq!(node.path(), "a/b");

        let node = client.rest().call([json!(false), json!(1.5)]);
        assert_eq!(node.path(), "false/1.5");

        let node = client.rest().child("users").call([json!(1.0), json!(-3.0)]);
        assert_eq!(node.path(), "users/1/-3");
    }

    #[test]
    fn test_access_distinguishes_verbs_from_segments() {
        let client = client_with(transport());
        let users = client.rest().child("users");

        assert!(matches!(users.access("get"), PathAccess::Verb(call) if call.method() == HttpMethod::Get));
        assert!(matches!(users.access("delete"), PathAccess::Verb(_)));
        assert!(matches!(users.access("base"), PathAccess::Base));
        assert!(matches!(users.access("headers"), PathAccess::Headers));

        match users.access("GET") {
            PathAccess::Segment(node) => assert_eq!(node.path(), "users/GET"),
            other => panic!("expected segment, got {other:?}"),
        }
        match users.access("Post") {
            PathAccess::Segment(node) => assert_eq!(node.path(), "users/Post"),
            other => panic!("expected segment, got {other:?}"),
        }
    }

    #[test]
    fn test_siblings_are_independent() {
        let client = client_with(transport());
        let parent = client.rest().child("users");
        let a = parent.child("a");
        let b = parent.base("https://b.example.com").unwrap();

        assert_eq!(parent.path(), "users");
        assert_eq!(a.path(), "users/a");
        assert!(parent.context().base().is_none());
        assert!(a.context().base().is_none());
        assert_eq!(b.context().base(), Some("https://b.example.com"));
    }

    #[test]
    fn test_base_and_headers_validate_synchronously() {
        let client = client_with(transport());
        let users = client.rest().child("users");

        assert!(matches!(
            users.base("not-a-url"),
            Err(ValidationError::InvalidUrl { .. })
        ));

        let err = users.headers(Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "Headers must be a valid object");
        assert!(users.headers(json!(["a"])).is_err());
    }

    #[test]
    fn test_prepare_layers_headers() {
        let client = client_with(transport());
        let call = client
            .rest()
            .child("users")
            .headers([("Content-Type", "application/xml"), ("X-Ctx", "1")])
            .unwrap()
            .verb(HttpMethod::Post);

        let request = call
            .prepare(RequestOptions::new().header("Content-Type", "text/plain"))
            .unwrap();

        assert_eq!(request.headers.get("Content-Type"), Some(&"text/plain".to_string()));
        assert_eq!(request.headers.get("X-Ctx"), Some(&"1".to_string()));
        assert_eq!(request.method, HttpMethod::Post);
    }

    #[test]
    fn test_prepare_merges_headers_case_insensitively() {
        let client = client_with(transport());
        let request = client
            .rest()
            .child("users")
            .headers([("X-Trace", "ctx")])
            .unwrap()
            .verb(HttpMethod::Post)
            .prepare(
                RequestOptions::new()
                    .header("content-type", "text/plain")
                    .header("x-trace", "call"),
            )
            .unwrap();

        assert_eq!(request.headers.len(), 2);
        assert_eq!(request.headers.get("content-type"), Some(&"text/plain".to_string()));
        assert_eq!(request.headers.get("x-trace"), Some(&"call".to_string()));
        assert!(!request.headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_prepare_builds_url_with_query_and_passes_body() {
        let client = client_with(transport());
        let request = client
            .rest()
            .child("users")
            .verb(HttpMethod::Put)
            .prepare(
                RequestOptions::new()
                    .query("page", 1)
                    .query("limit", Value::Null)
                    .body(json!({"name": "Ada"})),
            )
            .unwrap();

        assert_eq!(request.url, "https://api.example.com/users?page=1");
        assert_eq!(request.body, Some(json!({"name": "Ada"})));
        assert!(request.timeout.is_none());
    }

    #[tokio::test]
    async fn test_verb_call_executes_through_engine() {
        let transport = transport();
        let client = client_with(transport.clone());

        let envelope = client
            .rest()
            .child("users")
            .base("https://other.example.com/v2")
            .unwrap()
            .delete(RequestOptions::new())
            .await
            .unwrap();

        assert_eq!(envelope.data, Some(json!({"ok": true})));
        let sent = transport.last();
        assert_eq!(sent.url, "https://other.example.com/v2/users");
        assert_eq!(sent.method, HttpMethod::Delete);
        assert!(sent.timeout.is_some());
    }

    #[tokio::test]
    async fn test_root_path_hits_base() {
        let transport = transport();
        let client = client_with(transport.clone());

        client.rest().get(RequestOptions::new()).await.unwrap();
        assert_eq!(transport.last().url, "https://api.example.com/");
    }
}
