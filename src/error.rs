//! Error types for configuration and fluent-chain validation.
//!
//! This module contains the errors raised before any I/O happens: invalid
//! client configuration and structural misuse of the fluent API.
//!
//! # Error Handling
//!
//! Both error types are returned synchronously as `Err` from the call that
//! received the bad input. Operational failures (network, timeouts, remote
//! errors) are never reported through these types; they are folded into a
//! [`ResponseEnvelope`](crate::clients::ResponseEnvelope) instead.
//!
//! # Example
//!
//! ```rust
//! use fluent_api::{ClientConfig, ConfigError};
//!
//! let result = ClientConfig::builder().base_url("").build();
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl)));
//! ```

use thiserror::Error;

use crate::clients::graphql::QueryMember;

/// Errors that can occur while building a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL is missing or empty.
    #[error("Base URL is required and must be a non-empty string.")]
    InvalidBaseUrl,

    /// The base URL could not be parsed as an absolute URL.
    #[error("Invalid base URL '{url}'. Please provide an absolute URL with scheme (e.g., 'https://api.example.com').")]
    MalformedBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

/// Errors raised while constructing a fluent request chain.
///
/// These represent programming errors in the way the chain is built and are
/// always reported before any request is issued.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A `base(...)` override was not a valid absolute URL.
    #[error("Invalid URL '{url}'. Base must be a valid absolute URL.")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
    },

    /// A `headers(...)` override was not a plain key/value mapping.
    #[error("Headers must be a valid object")]
    InvalidHeaders,

    /// GraphQL arguments were not a plain object.
    #[error("Arguments must be a plain object")]
    InvalidArgs,

    /// A GraphQL field name was empty.
    #[error("Field name is required")]
    FieldNameRequired,

    /// A GraphQL selection set was empty or blank.
    #[error("Selection must be a non-empty string")]
    EmptySelection,

    /// The GraphQL root was asked for an unknown operation type.
    #[error("Invalid operation '{operation}'. Valid operations are: query, mutation, subscription")]
    InvalidOperation {
        /// The rejected operation name.
        operation: String,
    },

    /// A GraphQL query builder was asked for an unknown member.
    #[error(
        "Invalid property '{property}'. Valid properties are: {}",
        QueryMember::NAMES.join(", ")
    )]
    InvalidProperty {
        /// The rejected property name.
        property: String,
    },
}
