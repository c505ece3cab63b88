//! Core types for quiver, a schema-driven HTTP API client.
//!
//! This crate holds everything that does not touch the network:
//! - [`Endpoint`] and [`Schema`] - the declarative description of an API
//! - [`build_config`] - turns one call's data into a routed [`RequestConfig`]
//! - [`ExtendConfig`] - per-endpoint hook run before data is merged
//! - [`Transport`] and [`HttpClient`] - the seams to the network
//! - [`Request`] and [`Response`] - wire-level HTTP types
//! - [`Error`] and [`Result`] - error handling
//! - [`StatusCode`] and [`header`] - re-exported from the `http` crate

mod body;
mod builder;
mod client;
mod config;
mod endpoint;
mod error;
mod headers;
mod hook;
mod method;
mod multipart;
mod params;
pub mod prelude;
mod request;
mod response;
mod schema;
mod transport;

pub use body::{ContentType, from_json, to_form, to_json};
pub use builder::{api_call, build_config};
pub use client::HttpClient;
pub use config::{Channel, RequestConfig};
pub use endpoint::{DataRules, Endpoint};
pub use error::{Error, Result};
pub use headers::{HeaderIndex, Headers};
pub use hook::{ExtendConfig, PathParams};
pub use method::Method;
pub use multipart::{Form, Part};
pub use params::{Params, merge, params, to_pairs};
pub use request::Request;
pub use response::Response;
pub use schema::{ENDPOINT_MARKER, Schema, SchemaNode};
pub use transport::Transport;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
