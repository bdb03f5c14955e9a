//! GraphQL-specific error types.
//!
//! Both errors here are raised synchronously while a chain is built or a
//! terminal call is prepared. Operational failures of the request itself are
//! never returned as `Err`; they arrive as errors inside the
//! [`GraphqlResponse`](crate::clients::GraphqlResponse).
//!
//! - [`GraphqlError::Validation`]: Structural misuse of the chain
//! - [`GraphqlError::QueryBuildFailed`]: Query synthesis failed
//!
//! # Example
//!
//! ```rust,ignore
//! use fluent_api::clients::graphql::GraphqlError;
//!
//! match client.gql().query().field("user")?.select("") {
//!     Err(GraphqlError::Validation(e)) => println!("Bad chain: {e}"),
//!     Err(GraphqlError::QueryBuildFailed { operation, field, source }) => {
//!         println!("Could not build {operation} {field}: {source}");
//!     }
//!     Ok(prepared) => { let response = prepared.await; }
//! }
//! ```

use thiserror::Error;

use crate::clients::graphql::query::OperationKind;
use crate::error::ValidationError;

/// Error returned by a [`QueryBuilder`](crate::clients::graphql::QueryBuilder).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryBuildError {
    /// The builder produced an empty query.
    #[error("Generated query is empty or invalid")]
    InvalidGeneratedQuery,

    /// An argument name or input-object key is not a valid GraphQL name.
    #[error("Invalid argument name '{name}'")]
    InvalidArgumentName {
        /// The rejected name.
        name: String,
    },

    /// A `{type, value}` argument could not be turned into a variable.
    #[error("Invalid variable '{name}': {reason}")]
    InvalidVariable {
        /// The argument name.
        name: String,
        /// Why the variable was rejected.
        reason: String,
    },
}

/// Error type for GraphQL chain operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphqlError {
    /// The chain was built with invalid input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Query synthesis failed for the given operation and field.
    #[error("Failed to build {operation} for field '{field}': {source}")]
    QueryBuildFailed {
        /// The operation type being built.
        operation: OperationKind,
        /// The root field being built.
        field: String,
        /// The underlying builder failure.
        source: QueryBuildError,
    },
}
