//! Fluent REST chains.
//!
//! A REST chain starts at [`FluentClient::rest`](crate::FluentClient::rest)
//! and accumulates path segments until a verb is called:
//!
//! - [`PathNode::child`] appends one segment
//! - [`PathNode::call`] appends every non-null argument as a segment
//! - [`PathNode::base`] / [`PathNode::headers`] override the context
//! - [`PathNode::get`], [`post`](PathNode::post), [`put`](PathNode::put),
//!   [`patch`](PathNode::patch), [`delete`](PathNode::delete) execute
//!
//! [`PathNode::access`] resolves a string key the same way, for callers that
//! build chains from dynamic names.
//!
//! # Example
//!
//! ```rust,ignore
//! use fluent_api::{FluentClient, RequestOptions};
//!
//! let client = FluentClient::from_base_url("https://api.example.com")?;
//!
//! let response = client
//!     .rest()
//!     .child("users")
//!     .headers([("X-Trace", "abc")])?
//!     .post(RequestOptions::new().body(serde_json::json!({"name": "Ada"})))
//!     .await?;
//!
//! if let Some(errors) = &response.errors {
//!     println!("Failed: {}", errors[0].extensions.message);
//! }
//! ```

mod client;
mod errors;

pub use client::{PathAccess, PathNode, RestCall, BASE_KEY, HEADERS_KEY};
pub use errors::RestError;
