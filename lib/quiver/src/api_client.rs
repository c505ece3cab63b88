//! Transport adapter over an [`HttpClient`].
//!
//! [`ApiClient`] turns a routed [`RequestConfig`] into a wire request, runs it
//! through any [`HttpClient`] and logs the outcome.

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, Level, debug, info, span, warn};
use url::Url;

use crate::{HttpClient, HyperClient, RequestConfig, Response, Result, Transport};

/// [`Transport`] backed by an [`HttpClient`].
///
/// Relative endpoint URLs are joined onto the base URL, if one is set.
/// The endpoint deadline travels on the [`Request`](crate::Request) for the
/// client to enforce. Non-2xx responses are turned into [`Error::Http`](crate::Error::Http) unless
/// [`error_for_status`](Self::error_for_status) is switched off.
///
/// # Example
///
/// ```no_run
/// use quiver::{ApiClient, ClientConfig, HyperClient};
///
/// # fn main() -> quiver::Result<()> {
/// let http = HyperClient::with_config(ClientConfig::default().with_max_in_flight(16));
///
/// let github = ApiClient::new(http.clone()).with_base_url("https://api.github.com")?;
/// let gitlab = ApiClient::new(http).with_base_url("https://gitlab.com/api/v4/")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient<C> {
    client: C,
    base_url: Option<Url>,
    error_for_status: bool,
}

impl<C> ApiClient<C> {
    /// Wrap an HTTP client; endpoint URLs must be absolute.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            base_url: None,
            error_for_status: true,
        }
    }

    /// Resolve relative endpoint URLs against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn with_base_url(self, base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(self.with_url(base_url))
    }

    /// Resolve relative endpoint URLs against a pre-parsed URL.
    #[must_use]
    pub fn with_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Turn non-2xx responses into errors (on by default).
    #[must_use]
    pub const fn error_for_status(mut self, enabled: bool) -> Self {
        self.error_for_status = enabled;
        self
    }

    /// Base URL, if any.
    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Inner HTTP client.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.client
    }

    /// Consume the wrapper and return the inner HTTP client.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.client
    }
}

impl Default for ApiClient<HyperClient> {
    fn default() -> Self {
        Self::new(HyperClient::new())
    }
}

impl<C: HttpClient> ApiClient<C> {
    async fn send(&self, config: RequestConfig) -> Result<Response> {
        let channels = config.channels();
        let request = config.into_request(self.base_url.as_ref())?;

        let method = request.method();
        let url = request.url().to_string();
        let span = span!(Level::INFO, "api_request", %method, %url);

        async move {
            let start = Instant::now();
            info!(?channels, timeout = ?request.timeout(), "sending request");
            debug!(headers = ?request.headers(), "request headers");

            let result = self.client.execute(request).await;
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(response) if response.is_success() => {
                    info!(status = response.status(), elapsed_ms, "request completed");
                }
                Ok(response) => {
                    warn!(status = response.status(), elapsed_ms, "request failed with HTTP error");
                }
                Err(err) => warn!(error = %err, elapsed_ms, "request failed"),
            }

            match result {
                Ok(response) if self.error_for_status => response.error_for_status(),
                other => other,
            }
        }
        .instrument(span)
        .await
    }
}

impl<C: HttpClient> Transport for ApiClient<C> {
    fn dispatch(
        &self,
        config: RequestConfig,
    ) -> impl Future<Output = Result<Response>> + Send {
        self.send(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use assert2::{check, let_assert};
    use bytes::Bytes;
    use quiver_core::{Error, Method, Request};

    use super::*;

    struct Canned {
        status: u16,
        seen: Mutex<Vec<Request>>,
    }

    impl Canned {
        fn new(status: u16) -> Self {
            Self {
                status,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl HttpClient for Canned {
        async fn execute(&self, request: Request) -> Result<Response> {
            self.seen.lock().expect("lock").push(request);
            Ok(Response::new(self.status, HashMap::new(), Bytes::from_static(b"{}")))
        }
    }

    fn config(url: &str) -> RequestConfig {
        RequestConfig {
            url: url.to_string(),
            ..RequestConfig::default()
        }
    }

    #[tokio::test]
    async fn joins_relative_url_onto_base() {
        let client = ApiClient::new(Canned::new(200))
            .with_base_url("https://api.example.com/v2/")
            .expect("base url");

        client.dispatch(config("users")).await.expect("ok");

        let seen = client.inner().seen.lock().expect("lock");
        let_assert!(Some(request) = seen.first());
        check!(request.url().as_str() == "https://api.example.com/v2/users");
        check!(request.method() == Method::Get);
    }

    #[tokio::test]
    async fn relative_url_without_base_is_an_error() {
        let client = ApiClient::new(Canned::new(200));

        let result = client.dispatch(config("/users")).await;

        let_assert!(Err(Error::InvalidUrl(_)) = result);
        check!(client.inner().seen.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn non_success_becomes_http_error() {
        let client = ApiClient::new(Canned::new(503));

        let err = client
            .dispatch(config("https://api.example.com/health"))
            .await
            .expect_err("503");

        check!(err.status() == Some(503));
        check!(err.body().is_some());
    }

    #[tokio::test]
    async fn non_success_passes_through_when_disabled() {
        let client = ApiClient::new(Canned::new(404)).error_for_status(false);

        let response = client
            .dispatch(config("https://api.example.com/missing"))
            .await
            .expect("response");

        check!(response.status() == 404);
    }

    #[tokio::test]
    async fn endpoint_deadline_reaches_the_client() {
        let client = ApiClient::new(Canned::new(200));
        let mut slow = config("https://api.example.com/slow");
        slow.timeout = Some(Duration::from_millis(100));

        client.dispatch(slow).await.expect("ok");

        let seen = client.inner().seen.lock().expect("lock");
        let_assert!(Some(request) = seen.first());
        check!(request.timeout() == Some(Duration::from_millis(100)));
    }
}
