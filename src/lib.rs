//! # Fluent API Client
//!
//! A fluent request-construction layer for REST and GraphQL APIs. Requests
//! are described by chaining method calls on immutable builder values; the
//! chain only becomes a network call at its terminal step.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - REST path chains with per-step base URL and header overrides
//! - GraphQL operation chains with query synthesis and variables
//! - A single-pass execution engine with request/response interceptors
//!   and a default timeout
//! - One response shape for every call, with normalized `{code, message}` errors
//!
//! ## Quick Start
//!
//! ```rust
//! use fluent_api::{ClientConfig, FluentClient};
//!
//! let client = FluentClient::new(
//!     ClientConfig::builder()
//!         .base_url("https://api.example.com")
//!         .header("Authorization", "Bearer token")
//!         .build()
//!         .unwrap(),
//! );
//!
//! let posts = client.rest().child("users").call([42]).child("posts");
//! assert_eq!(posts.path(), "users/42/posts");
//! ```
//!
//! ## REST
//!
//! ```rust,ignore
//! use fluent_api::RequestOptions;
//!
//! // GET https://api.example.com/users?page=1
//! let response = client
//!     .rest()
//!     .child("users")
//!     .get(RequestOptions::new().query("page", 1))
//!     .await?;
//!
//! match response.errors {
//!     None => println!("Users: {:?}", response.data),
//!     Some(errors) => println!("Failed with code {}", errors[0].code()),
//! }
//! ```
//!
//! ## GraphQL
//!
//! ```rust,ignore
//! use serde_json::json;
//!
//! // query { user (id: 42) { id name } }
//! let response = client
//!     .gql()
//!     .query()
//!     .field("user")?
//!     .args(json!({"id": 42}))?
//!     .select("id name")?
//!     .await;
//! ```
//!
//! ## Interceptors
//!
//! ```rust,ignore
//! use fluent_api::{ClientConfig, HookError, RequestDescriptor};
//!
//! let config = ClientConfig::builder()
//!     .base_url("https://api.example.com")
//!     .request_interceptor(|mut request: RequestDescriptor| async move {
//!         request.headers.insert("X-Request-Id".into(), "abc".into());
//!         Ok::<_, HookError>(request)
//!     })
//!     .build()?;
//! ```
//!
//! ## Design Principles
//!
//! - **Immutable chains**: every step returns a new value; siblings never
//!   observe each other's overrides
//! - **Synchronous misuse errors**: bad URLs, headers, arguments and names
//!   fail at the call site, before any I/O
//! - **Failures as data**: transport and interceptor failures are returned
//!   inside the [`ResponseEnvelope`], never as `Err`
//! - **Thread-safe**: all public types are `Send + Sync`

pub mod client;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use client::FluentClient;
pub use config::{BaseUrl, ClientConfig, ClientConfigBuilder};
pub use error::{ConfigError, ValidationError};

// Re-export request/response types
pub use clients::{
    GraphqlError, GraphqlResponse, HookError, HttpClient, HttpMethod, NormalizedError,
    RequestDescriptor, RequestInterceptor, RequestOptions, ResponseEnvelope, ResponseInterceptor,
    RestError, Transport, TransportError, TransportResponse,
};
