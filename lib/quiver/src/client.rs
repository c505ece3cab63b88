//! Default HTTP client built on hyper-util.
//!
//! Each call runs under the deadline its endpoint declared, falling back to
//! [`ClientConfig::default_timeout`]. The configured `User-Agent` is added
//! unless the endpoint declares one, and [`ClientConfig::max_in_flight`] caps
//! concurrent calls across every API sharing the client.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use quiver_core::{HttpClient, header::USER_AGENT};
use tower::limit::ConcurrencyLimitLayer;
use tower::util::BoxCloneService;
use tower::{Layer, ServiceExt};
use tower_service::Service;
use tracing::debug;

use crate::{ClientConfig, Error, Request, Response, Result, connector::https_connector};

type CallService = BoxCloneService<Request, Response, Error>;

type CallFuture = Pin<Box<dyn Future<Output = Result<Response>> + Send + 'static>>;

/// Pooled hyper client sending one call at a time.
#[derive(Clone)]
struct Wire {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: Arc<ClientConfig>,
}

impl Wire {
    fn new(config: Arc<ClientConfig>) -> Self {
        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .retry_canceled_requests(config.retry_canceled_requests)
            .build(https_connector(&config));

        Self { inner, config }
    }

    fn to_hyper(&self, request: Request) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body) = request
            .with_default_header(USER_AGENT.as_str(), &self.config.user_agent)
            .into_parts();

        let builder = headers.iter().fold(
            http::Request::builder()
                .method(http::Method::from(method))
                .uri(url.as_str()),
            |builder, (name, value)| builder.header(name.as_str(), value.as_str()),
        );

        builder
            .body(body.map_or_else(Full::default, Full::new))
            .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn send(self, request: Request) -> Result<Response> {
        let deadline = self.config.deadline_for(&request);
        let hyper_request = self.to_hyper(request)?;

        tokio::time::timeout(deadline, self.exchange(hyper_request))
            .await
            .map_err(|_| Error::Timeout)?
    }

    async fn exchange(&self, request: http::Request<Full<Bytes>>) -> Result<Response> {
        let response = self.inner.request(request).await.map_err(|err| classify(&err))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|err| Error::connection(err.to_string()))?
            .to_bytes();

        Ok(Response::new(status, headers, body))
    }
}

impl Service<Request> for Wire {
    type Response = Response;
    type Error = Error;
    type Future = CallFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        Box::pin(self.clone().send(request))
    }
}

// hyper-util reports TLS failures as connect errors; only the cause chain tells them apart
fn classify(err: &hyper_util::client::legacy::Error) -> Error {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    let lowered = message.to_ascii_lowercase();
    if ["tls", "certificate", "handshake"]
        .iter()
        .any(|hint| lowered.contains(hint))
    {
        Error::tls(message)
    } else {
        Error::connection(message)
    }
}

/// HTTP client with connection pooling and rustls TLS.
///
/// This is the client behind [`Api::with_default_client`](crate::Api::with_default_client).
/// Clones share the connection pool and the in-flight cap.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use quiver::{ClientConfig, HyperClient};
///
/// let client = HyperClient::with_config(
///     ClientConfig::default()
///         .with_default_timeout(Duration::from_secs(10))
///         .with_max_in_flight(8),
/// );
/// ```
#[derive(Clone)]
pub struct HyperClient {
    // `BoxCloneService` is not `Sync`; the lock is only held to clone it
    service: Arc<Mutex<CallService>>,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Client with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Client with a custom configuration.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let config = Arc::new(config);
        let wire = Wire::new(Arc::clone(&config));
        let service = match config.max_in_flight {
            Some(max) => CallService::new(ConcurrencyLimitLayer::new(max).layer(wire)),
            None => CallService::new(wire),
        };

        Self {
            service: Arc::new(Mutex::new(service)),
            config,
        }
    }

    /// Client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for HyperClient {
    async fn execute(&self, request: Request) -> Result<Response> {
        let service = self
            .service
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        debug!(deadline_ms = ?self.config.deadline_for(&request).as_millis(), "executing");

        service.oneshot(request).await
    }
}
