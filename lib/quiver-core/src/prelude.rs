//! Prelude module for convenient imports.
//!
//! ```ignore
//! use quiver_core::prelude::*;
//! ```

pub use crate::{
    Endpoint, Error, ExtendConfig, Method, Params, PathParams, RequestConfig, Response, Result,
    Schema, SchemaNode, Transport, build_config, params,
};
