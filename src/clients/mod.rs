//! Request construction and execution.
//!
//! This module holds the pieces shared by the REST and GraphQL chains: the
//! request context, validators, the URL builder, the execution engine with
//! its transport and interceptors, and the error normalizer.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The execution engine turning a descriptor into an envelope
//! - [`RequestDescriptor`]: A fully resolved request
//! - [`RequestOptions`]: Per-call query, body, headers and timeout for REST verbs
//! - [`ResponseEnvelope`]: The single return shape of every terminal call
//! - [`NormalizedError`]: A `{message, extensions: {code, message}}` error
//! - [`Transport`] / [`ReqwestTransport`]: The outbound HTTP call
//! - [`RequestInterceptor`] / [`ResponseInterceptor`]: Optional hooks
//! - [`rest::PathNode`]: A step of a REST chain
//! - [`graphql::QueryNode`]: A step of a GraphQL chain
//!
//! # Error Handling
//!
//! Misuse of a chain (bad URL, headers, arguments or names) fails
//! synchronously with a [`ValidationError`](crate::ValidationError).
//! Transport, status, timeout and interceptor failures never surface as
//! `Err`; they are folded into the envelope:
//!
//! | Failure | `extensions.code` | `extensions.message` |
//! |---------|-------------------|----------------------|
//! | HTTP status | the status | payload `message`, else payload `error`, else `Request failed with status code N` |
//! | Timeout | `408` | `Request timeout` |
//! | Connection refused / DNS | `500` | `Network connection failed` |
//! | Missing URL | `400` | `Request URL is required` |

mod context;
mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;
mod interceptors;
mod normalize;
pub mod rest;
#[cfg(test)]
pub(crate) mod testing;
mod transport;
mod url_builder;
mod validators;

pub use context::RequestContext;
pub use errors::{HookError, TransportError, TransportErrorKind, UrlBuildError};
pub use http_client::{HttpClient, DEFAULT_TIMEOUT, FALLBACK_ERROR_MESSAGE, MISSING_URL_MESSAGE};
pub use http_request::{HttpMethod, RequestDescriptor, RequestOptions};
pub use http_response::{
    ErrorExtensions, GraphqlResponse, NormalizedError, ResponseEnvelope, TransportResponse,
};
pub use interceptors::{RequestInterceptor, ResponseInterceptor};
pub use normalize::{
    attach_code, attach_message, is_not_found, make_error_response, normalize_error,
    resolve_message, INTERNAL_SERVER_ERROR,
};
pub use transport::{ReqwestTransport, Transport, SDK_VERSION};
pub use url_builder::{build_url, QueryParams};
pub use validators::{
    merge_headers, set_header, validate_args, validate_field, validate_selection, validate_url,
    Headers, IntoHeaders,
};

// Re-export the chain entry types at the clients module level
pub use graphql::{GraphqlError, GraphqlRoot, QueryNode};
pub use rest::{PathNode, RestError};
