//! Configuration of the default HTTP transport.

use std::time::Duration;

use quiver_core::Request;

/// Settings for [`HyperClient`](crate::HyperClient).
///
/// Endpoints may declare their own `timeout`; [`default_timeout`](Self::default_timeout)
/// only applies to calls whose endpoint does not.
///
/// ```
/// use std::time::Duration;
///
/// use quiver::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_default_timeout(Duration::from_secs(5))
///     .with_max_in_flight(8)
///     .with_user_agent("billing-sync/2.1");
/// assert_eq!(config.max_in_flight, Some(8));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline for calls whose endpoint declares none.
    pub default_timeout: Duration,
    /// TCP connect deadline.
    pub connect_timeout: Duration,
    /// Maximum idle pooled connections per host.
    pub pool_idle_per_host: usize,
    /// How long an idle pooled connection is kept.
    pub pool_idle_timeout: Duration,
    /// Resend a call that was canceled before its pooled connection was ready.
    pub retry_canceled_requests: bool,
    /// Cap on calls in flight across every API sharing the client.
    pub max_in_flight: Option<usize>,
    /// `User-Agent` sent when the endpoint declares none.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            retry_canceled_requests: true,
            max_in_flight: None,
            user_agent: concat!("quiver/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Set the deadline used when an endpoint declares none.
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Set the TCP connect deadline.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the maximum idle connections kept per host.
    #[must_use]
    pub const fn with_pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = count;
        self
    }

    /// Set how long idle connections are kept.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set whether canceled calls are resent on a fresh connection.
    #[must_use]
    pub const fn with_retry_canceled_requests(mut self, retry: bool) -> Self {
        self.retry_canceled_requests = retry;
        self
    }

    /// Cap the number of calls in flight.
    #[must_use]
    pub const fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = Some(max);
        self
    }

    /// Set the default `User-Agent`.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Deadline for one call: the endpoint's own, else the client default.
    #[must_use]
    pub fn deadline_for(&self, request: &Request) -> Duration {
        request.timeout().unwrap_or(self.default_timeout)
    }
}

#[cfg(test)]
mod tests {
    use quiver_core::Method;

    use super::*;

    fn request(timeout: Option<Duration>) -> Request {
        let url = "https://api.example.com/reports".parse().expect("url");
        Request::new(Method::Get, url).with_timeout(timeout)
    }

    #[test]
    fn default_config() {
        let config = ClientConfig::default();

        assert_eq!(config.default_timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.pool_idle_per_host, 32);
        assert!(config.retry_canceled_requests);
        assert!(config.max_in_flight.is_none());
        assert!(config.user_agent.starts_with("quiver/"));
    }

    #[test]
    fn setters_override_defaults() {
        let config = ClientConfig::default()
            .with_default_timeout(Duration::from_secs(60))
            .with_connect_timeout(Duration::from_secs(5))
            .with_pool_idle_per_host(16)
            .with_pool_idle_timeout(Duration::from_secs(15))
            .with_retry_canceled_requests(false)
            .with_max_in_flight(4)
            .with_user_agent("billing-sync/2.1");

        assert_eq!(config.default_timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.pool_idle_per_host, 16);
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(15));
        assert!(!config.retry_canceled_requests);
        assert_eq!(config.max_in_flight, Some(4));
        assert_eq!(config.user_agent, "billing-sync/2.1");
    }

    #[test]
    fn endpoint_timeout_beats_client_default() {
        let config = ClientConfig::default().with_default_timeout(Duration::from_secs(30));

        assert_eq!(
            config.deadline_for(&request(Some(Duration::from_millis(250)))),
            Duration::from_millis(250)
        );
        assert_eq!(config.deadline_for(&request(None)), Duration::from_secs(30));
    }
}
