//! Prelude module for convenient imports.
//!
//! ```ignore
//! use quiver::prelude::*;
//! ```

pub use crate::{
    Api, ApiClient, ApiMethod, ClientConfig, Endpoint, Error, ExtendConfig, HyperClient, Method,
    Params, PathParams, RequestConfig, Response, Result, Schema, StatusCode, Transport, params,
};
pub use serde::{Deserialize, Serialize};
