//! Schema-driven HTTP API clients.
//!
//! Describe an API once as a tree of [`Endpoint`]s, then call it through a
//! generated [`Api`] whose namespaces mirror the tree. Each call merges the
//! caller's data over the endpoint defaults, checks required keys, and routes
//! the payload to the query string or body according to the endpoint's
//! method and `Content-Type`.
//!
//! # Example
//!
//! ```no_run
//! use quiver::prelude::*;
//! use serde_json::json;
//!
//! # async fn run() -> quiver::Result<()> {
//! let schema = Schema::from_json(r#"{
//!     "auth": {
//!         "token": {
//!             "apiSchema": {
//!                 "method": "POST",
//!                 "url": "https://auth.example.com/oauth/token",
//!                 "headers": {"Content-Type": "application/x-www-form-urlencoded"},
//!                 "data": {
//!                     "defaults": {"grant_type": "client_credentials"},
//!                     "required": ["client_id", "client_secret"]
//!                 }
//!             }
//!         }
//!     }
//! }"#)?;
//!
//! let api = Api::with_default_client(&schema);
//! let token = api
//!     .call("auth.token", Some(params(&json!({"client_id": "id", "client_secret": "s"}))?))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! See the [tutorial][_tutorial] for a complete guide.

pub mod _tutorial;
mod api;
mod api_client;
mod client;
mod config;
mod connector;
pub mod prelude;

pub use api::{Api, ApiMethod, ApiNode, Namespace};
pub use api_client::ApiClient;
pub use client::HyperClient;
pub use config::ClientConfig;

// Re-export core types
pub use quiver_core::{
    Channel, ContentType, DataRules, ENDPOINT_MARKER, Endpoint, Error, ExtendConfig, Form,
    HeaderIndex, Headers, HttpClient, Method, Params, Part, PathParams, Request, RequestConfig,
    Response, Result, Schema, SchemaNode, Transport, api_call, build_config, from_json, merge,
    params, to_form, to_json, to_pairs,
};

// Re-export http types for status codes and headers
pub use quiver_core::{StatusCode, header};
