//! Wire-level HTTP execution.

use std::future::Future;

use crate::{Request, Response, Result};

/// Executes one wire request.
///
/// Implementations own connection pooling and TLS. Non-2xx statuses are
/// returned as responses, not errors.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error on network, TLS or timeout failures.
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response>> + Send;
}
