//! The client facade.
//!
//! [`FluentClient`] wires a frozen [`ClientConfig`] to the execution engine
//! and hands out the two chain entry points, [`rest`](FluentClient::rest)
//! and [`gql`](FluentClient::gql).

use std::sync::Arc;

use crate::clients::graphql::GraphqlRoot;
use crate::clients::rest::PathNode;
use crate::clients::HttpClient;
use crate::config::ClientConfig;
use crate::error::ConfigError;

/// State shared by every chain created from one client.
#[derive(Debug)]
pub(crate) struct ClientInner {
    pub(crate) config: ClientConfig,
    pub(crate) engine: HttpClient,
}

impl ClientInner {
    pub(crate) fn base_url(&self) -> &str {
        self.config.base_url().as_ref()
    }
}

/// Entry point for fluent REST and GraphQL requests.
///
/// Cloning is cheap; all clones share the same configuration and engine.
///
/// # Example
///
/// ```rust,ignore
/// use fluent_api::{ClientConfig, FluentClient, RequestOptions};
///
/// let client = FluentClient::new(
///     ClientConfig::builder()
///         .base_url("https://api.example.com")
///         .header("Authorization", "Bearer token")
///         .build()?,
/// );
///
/// // GET https://api.example.com/users/42/posts?page=1
/// let posts = client
///     .rest()
///     .child("users")
///     .call([42])
///     .child("posts")
///     .get(RequestOptions::new().query("page", 1))
///     .await?;
///
/// // POST { query: "query { user (id: 42) { id name } }" }
/// let user = client
///     .gql()
///     .query()
///     .field("user")?
///     .args(serde_json::json!({"id": 42}))?
///     .select("id name")?
///     .await;
/// ```
#[derive(Clone, Debug)]
pub struct FluentClient {
    inner: Arc<ClientInner>,
}

// Verify FluentClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FluentClient>();
};

impl FluentClient {
    /// Creates a client from a validated configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let engine = HttpClient::new(&config);
        Self {
            inner: Arc::new(ClientInner { config, engine }),
        }
    }

    /// Creates a client with default settings for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the base URL is empty or malformed.
    pub fn from_base_url(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self::new(ClientConfig::builder().base_url(base_url).build()?))
    }

    /// Returns the frozen configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Returns the root of a REST chain (no segments, empty context).
    #[must_use]
    pub fn rest(&self) -> PathNode {
        PathNode::root(Arc::clone(&self.inner))
    }

    /// Returns the root of a GraphQL chain.
    #[must_use]
    pub fn gql(&self) -> GraphqlRoot {
        GraphqlRoot::new(Arc::clone(&self.inner))
    }
}
