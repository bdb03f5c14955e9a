//! Fluent GraphQL chains.
//!
//! A GraphQL chain starts at [`FluentClient::gql`](crate::FluentClient::gql)
//! and always has the same three steps: operation type, root field, then
//! either [`select`](QueryNode::select) or [`execute`](QueryNode::execute).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`GraphqlRoot`]: Picks `query`, `mutation` or `subscription`
//! - [`OperationNode`]: Picks the root field
//! - [`QueryNode`]: Holds arguments and context, builds the query
//! - [`PreparedOperation`]: A built request, sent when awaited
//! - [`QueryBuilder`] / [`VariableQueryBuilder`]: Query text synthesis
//! - [`GraphqlError`]: Synchronous chain and build failures
//!
//! # Example
//!
//! ```rust,ignore
//! use fluent_api::FluentClient;
//! use serde_json::json;
//!
//! let client = FluentClient::from_base_url("https://api.example.com/graphql")?;
//!
//! // mutation ($name: String!) { createUser (name: $name) { id } }
//! let response = client
//!     .gql()
//!     .mutation()
//!     .field("createUser")?
//!     .args(json!({"name": {"type": "String!", "value": "Ada"}}))?
//!     .select("id")?
//!     .await;
//!
//! if response.is_not_found() {
//!     println!("No such user");
//! }
//! ```
//!
//! # Response Structure
//!
//! Every call resolves to a [`GraphqlResponse`](crate::clients::GraphqlResponse):
//! `data` is `None` when the server returned no data or the request failed,
//! and `errors` holds normalized errors from either source.

mod client;
mod errors;
mod query;

pub use client::{GraphqlRoot, OperationNode, PreparedOperation, QueryMember, QueryNode};
pub use errors::{GraphqlError, QueryBuildError};
pub use query::{template_for, BuiltQuery, OperationKind, QueryBuilder, VariableQueryBuilder};
