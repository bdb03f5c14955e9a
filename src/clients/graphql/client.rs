//! GraphQL operation resolver.
//!
//! The chain has three layers: [`GraphqlRoot`] picks the operation type,
//! [`OperationNode`] picks the root field, and [`QueryNode`] collects
//! arguments and context until [`select`](QueryNode::select) or
//! [`execute`](QueryNode::execute) builds the query.

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::client::ClientInner;
use crate::clients::graphql::errors::{GraphqlError, QueryBuildError};
use crate::clients::graphql::query::{template_for, OperationKind};
use crate::clients::validators::{
    merge_headers, validate_args, validate_field, validate_selection, validate_url, IntoHeaders,
};
use crate::clients::{GraphqlResponse, Headers, HttpMethod, RequestContext, RequestDescriptor};
use crate::error::ValidationError;

/// Entry point of a GraphQL chain.
#[derive(Clone, Debug)]
pub struct GraphqlRoot {
    inner: Arc<ClientInner>,
    ctx: RequestContext,
}

impl GraphqlRoot {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            inner,
            ctx: RequestContext::new(),
        }
    }

    /// Starts a `query` operation.
    #[must_use]
    pub fn query(&self) -> OperationNode {
        self.kind(OperationKind::Query)
    }

    /// Starts a `mutation` operation.
    #[must_use]
    pub fn mutation(&self) -> OperationNode {
        self.kind(OperationKind::Mutation)
    }

    /// Starts a `subscription` operation.
    ///
    /// The query is sent as a regular POST; there is no streaming transport.
    #[must_use]
    pub fn subscription(&self) -> OperationNode {
        self.kind(OperationKind::Subscription)
    }

    /// Starts an operation by name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidOperation`] for anything other than
    /// `query`, `mutation` or `subscription`.
    pub fn operation(&self, name: &str) -> Result<OperationNode, ValidationError> {
        OperationKind::from_name(name)
            .map(|kind| self.kind(kind))
            .ok_or_else(|| ValidationError::InvalidOperation {
                operation: name.to_string(),
            })
    }

    /// Returns the chain context.
    #[must_use]
    pub const fn context(&self) -> &RequestContext {
        &self.ctx
    }

    fn kind(&self, kind: OperationKind) -> OperationNode {
        OperationNode {
            inner: Arc::clone(&self.inner),
            kind,
            ctx: self.ctx.clone(),
        }
    }
}

/// An operation whose root field is not chosen yet.
#[derive(Clone, Debug)]
pub struct OperationNode {
    inner: Arc<ClientInner>,
    kind: OperationKind,
    ctx: RequestContext,
}

impl OperationNode {
    /// Returns the operation type.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Chooses the root field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::FieldNameRequired`] if `name` is blank.
    pub fn field(&self, name: &str) -> Result<QueryNode, ValidationError> {
        validate_field(name)?;
        Ok(QueryNode {
            inner: Arc::clone(&self.inner),
            kind: self.kind,
            field: name.to_string(),
            args: Map::new(),
            ctx: self.ctx.clone(),
        })
    }
}

/// The result of looking up a property on a [`QueryNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryMember {
    /// `select`
    Select,
    /// `execute`
    Execute,
    /// `base`
    Base,
    /// `headers`
    Headers,
}

impl QueryMember {
    /// The four property names a query node answers to.
    pub const NAMES: [&'static str; 4] = ["select", "execute", "base", "headers"];
}

/// A GraphQL operation with a root field, arguments and context.
///
/// Every method returns a new node; the receiver is never modified, so
/// sibling nodes keep their own arguments and context.
///
/// # Example
///
/// ```rust,ignore
/// let user = client.gql().query().field("user")?;
/// let first = user.args(json!({"id": 1}))?;
/// let second = user.args(json!({"id": 2}))?;
///
/// // query { user (id: 1) { id name } }
/// let response = first.select("id name")?.await;
/// ```
#[derive(Clone, Debug)]
pub struct QueryNode {
    inner: Arc<ClientInner>,
    kind: OperationKind,
    field: String,
    args: Map<String, Value>,
    ctx: RequestContext,
}

// Verify QueryNode is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryNode>();
};

impl QueryNode {
    /// Returns a node with `args` as its argument map.
    ///
    /// `None` resets the arguments to an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidArgs`] if `args` is not a JSON object.
    pub fn args(&self, args: impl Into<Option<Value>>) -> Result<Self, ValidationError> {
        let args = validate_args(args.into())?;
        Ok(Self {
            args,
            ..self.clone()
        })
    }

    /// Returns a node whose request goes to `base`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrl`] if `base` is not an absolute URL.
    pub fn base(&self, base: &str) -> Result<Self, ValidationError> {
        validate_url(base)?;
        tracing::debug!("Overriding base URL for {} {} with {base}", self.kind, self.field);
        Ok(Self {
            ctx: self.ctx.with_base(base),
            ..self.clone()
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
        tracing::debug!(
            "Merging {} header(s) into {} {}",
            headers.len(),
            self.kind,
            self.field
        );
        Ok(Self {
            ctx: self.ctx.with_headers(headers),
            ..self.clone()
        })
    }

    /// Builds the operation with `selection` as its field list.
    ///
    /// The returned [`PreparedOperation`] is sent when awaited.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Validation`] if `selection` is blank, or
    /// [`GraphqlError::QueryBuildFailed`] if query synthesis fails.
    pub fn select(&self, selection: &str) -> Result<PreparedOperation, GraphqlError> {
        validate_selection(selection)?;
        self.prepare(selection)
    }

    /// Builds the operation with an empty selection.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::QueryBuildFailed`] if query synthesis fails.
    pub fn execute(&self) -> Result<PreparedOperation, GraphqlError> {
        self.prepare("")
    }

    /// Resolves a property name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidProperty`] for names other than
    /// those in [`QueryMember::NAMES`].
    pub fn member(&self, name: &str) -> Result<QueryMember, ValidationError> {
        match name {
            "select" => Ok(QueryMember::Select),
            "execute" => Ok(QueryMember::Execute),
            "base" => Ok(QueryMember::Base),
            "headers" => Ok(QueryMember::Headers),
            _ => Err(ValidationError::InvalidProperty {
                property: name.to_string(),
            }),
        }
    }

    /// Returns the operation type.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Returns the root field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the argument map.
    #[must_use]
    pub const fn arguments(&self) -> &Map<String, Value> {
        &self.args
    }

    /// Returns the chain context.
    #[must_use]
    pub const fn context(&self) -> &RequestContext {
        &self.ctx
    }

    fn prepare(&self, selection: &str) -> Result<PreparedOperation, GraphqlError> {
        let template = template_for(self.kind, &self.field, selection, !self.args.is_empty());
        let built = self
            .inner
            .config
            .query_builder()
            .build(&template, &self.args)
            .map_err(|source| self.build_failed(source))?;
        if built.query.trim().is_empty() {
            return Err(self.build_failed(QueryBuildError::InvalidGeneratedQuery));
        }

        let url = self.ctx.resolve_base(self.inner.base_url()).to_string();

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        merge_headers(&mut headers, self.inner.config.headers().clone());
        if let Some(ctx_headers) = self.ctx.headers() {
            merge_headers(&mut headers, ctx_headers.clone());
        }

        let mut request = RequestDescriptor::new(HttpMethod::Post, url);
        request.body = Some(json!({
            "query": built.query,
            "variables": built.variables,
        }));
        request.headers = headers;

        Ok(PreparedOperation {
            inner: Arc::clone(&self.inner),
            request,
        })
    }

    fn build_failed(&self, source: QueryBuildError) -> GraphqlError {
        tracing::warn!("Query build failed for {} {}: {source}", self.kind, self.field);
        GraphqlError::QueryBuildFailed {
            operation: self.kind,
            field: self.field.clone(),
            source,
        }
    }
}

/// A built GraphQL request, sent when awaited or on [`send`](Self::send).
#[derive(Clone, Debug)]
pub struct PreparedOperation {
    inner: Arc<ClientInner>,
    request: RequestDescriptor,
}

impl PreparedOperation {
    /// Returns the request that will be sent.
    #[must_use]
    pub const fn descriptor(&self) -> &RequestDescriptor {
        &self.request
    }

    /// Returns the generated query text.
    #[must_use]
    pub fn query(&self) -> &str {
        self.request
            .body
            .as_ref()
            .and_then(|body| body.get("query"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Returns the generated variables.
    #[must_use]
    pub fn variables(&self) -> Option<&Map<String, Value>> {
        self.request
            .body
            .as_ref()
            .and_then(|body| body.get("variables"))
            .and_then(Value::as_object)
    }

    /// Sends the request. Failures are reported inside the response.
    pub async fn send(self) -> GraphqlResponse {
        self.inner.engine.execute(self.request).await
    }
}

impl IntoFuture for PreparedOperation {
    type Output = GraphqlResponse;
    type IntoFuture = Pin<Box<dyn Future<Output = GraphqlResponse> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}
