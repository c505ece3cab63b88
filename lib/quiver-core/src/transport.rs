//! The seam between request building and the network.

use std::future::Future;
use std::sync::Arc;

use crate::{RequestConfig, Response, Result};

/// Performs a routed call.
///
/// A transport receives the fully built [`RequestConfig`] of one call and
/// returns the outcome unchanged to the caller. Tests substitute a recording
/// transport; production code uses an HTTP-backed one.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use bytes::Bytes;
/// use quiver_core::{RequestConfig, Response, Result, Transport};
///
/// struct Echo;
///
/// impl Transport for Echo {
///     async fn dispatch(&self, config: RequestConfig) -> Result<Response> {
///         Ok(Response::new(200, HashMap::new(), Bytes::from(config.url)))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Send the call described by `config`.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying transport fails with.
    fn dispatch(
        &self,
        config: RequestConfig,
    ) -> impl Future<Output = Result<Response>> + Send;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn dispatch(
        &self,
        config: RequestConfig,
    ) -> impl Future<Output = Result<Response>> + Send {
        (**self).dispatch(config)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn dispatch(
        &self,
        config: RequestConfig,
    ) -> impl Future<Output = Result<Response>> + Send {
        (**self).dispatch(config)
    }
}
