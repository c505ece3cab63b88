//! # Chapter 2: Hooks & Transports
//!
//! ## Config Hooks
//!
//! An endpoint can carry one [`ExtendConfig`](crate::ExtendConfig) hook. It
//! sees the working config and the raw call data before defaults are merged;
//! at that point `config.data` and the channel slots are still empty.
//! [`PathParams`](crate::PathParams) fills `{name}` placeholders:
//!
//! ```
//! use quiver::{Endpoint, Params, PathParams, RequestConfig};
//!
//! let get_repo = Endpoint::get("https://api.github.com/repos/{owner}/{repo}")
//!     .extend_config(PathParams);
//!
//! let versioned = Endpoint::get("https://api.example.com/items").extend_config(
//!     |config: &mut RequestConfig, data: Option<&Params>| {
//!         if data.is_some_and(|d| d.contains_key("beta")) {
//!             config.url = config.url.replace("api.", "beta.");
//!         }
//!     },
//! );
//! ```
//!
//! ## Transports
//!
//! Calls are sent through a [`Transport`](crate::Transport). The default,
//! [`ApiClient`](crate::ApiClient), wraps any [`HttpClient`](crate::HttpClient):
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use quiver::{Api, ApiClient, ClientConfig, HyperClient, Schema};
//!
//! # fn main() -> quiver::Result<()> {
//! let http = HyperClient::with_config(
//!     ClientConfig::default()
//!         .with_default_timeout(Duration::from_secs(10))
//!         .with_max_in_flight(8),
//! );
//! let transport = ApiClient::new(http).with_base_url("https://api.example.com/v1/")?;
//!
//! let api = Api::new(transport, &Schema::new());
//! # Ok(())
//! # }
//! ```
//!
//! An endpoint's own `timeout` wins over the client's `default_timeout`.
//! The in-flight cap is shared by every clone of the client, so APIs built on
//! the same `HyperClient` queue behind one another.
//!
//! In tests, implement `Transport` yourself and record the configs it
//! receives instead of hitting the network.
//!
//! ## Errors
//!
//! | Situation                     | Error                                   |
//! |-------------------------------|-----------------------------------------|
//! | required key missing          | `Error::MissingParameters` (`is_validation()`) |
//! | non-2xx status                | `Error::Http` with the body             |
//! | deadline exceeded             | `Error::Timeout`                        |
//! | relative URL and no base URL  | `Error::InvalidUrl`                     |
