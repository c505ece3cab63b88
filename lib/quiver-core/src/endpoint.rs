//! Endpoint definitions.
//!
//! An [`Endpoint`] is the static description of one HTTP call: method, URL,
//! headers and the rules applied to call-time data. It is authored once by the
//! API consumer and never mutated by a call.
//!
//! # Example
//!
//! ```
//! use quiver_core::{Endpoint, Method};
//! use serde_json::json;
//!
//! let create_user = Endpoint::post("https://api.example.com/users")
//!     .header("Content-Type", "application/json")
//!     .default_param("role", json!("member"))
//!     .required(["name", "email"]);
//!
//! assert_eq!(create_user.method, Some(Method::Post));
//! assert!(create_user.validates());
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ExtendConfig, Headers, Method, Params};

/// Static description of one HTTP endpoint.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Endpoint {
    /// HTTP method; `None` means GET.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
    /// Absolute URL, or a path resolved against the transport's base URL.
    pub url: String,
    /// Declared headers; the `Content-Type` value drives data routing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    /// Rules for call-time data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataRules>,
    /// Per-request deadline handed to the transport, in milliseconds on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "millis")]
    pub timeout: Option<Duration>,
    /// Hook run on the working config before call data is merged.
    #[serde(skip)]
    pub extend_config: Option<Arc<dyn ExtendConfig>>,
}

/// Defaults and requirements for call-time data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRules {
    /// Values used when the caller does not provide them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Params>,
    /// Keys the effective payload must contain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Turn required-key validation on or off; unset means on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<bool>,
}

impl Endpoint {
    /// Create an endpoint with no method (GET semantics).
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Create an explicit GET endpoint.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::Get)
    }

    /// Create a POST endpoint.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::Post)
    }

    /// Create a PUT endpoint.
    #[must_use]
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::Put)
    }

    /// Create a PATCH endpoint.
    #[must_use]
    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::Patch)
    }

    /// Create a DELETE endpoint.
    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::Delete)
    }

    /// Set the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Declare a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    /// Add one default data value.
    #[must_use]
    pub fn default_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.rules_mut()
            .defaults
            .get_or_insert_with(Params::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the default data values.
    #[must_use]
    pub fn defaults(mut self, defaults: Params) -> Self {
        self.rules_mut().defaults = Some(defaults);
        self
    }

    /// Declare the keys every call must provide (directly or through defaults).
    #[must_use]
    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules_mut().required = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Turn required-key validation on or off.
    #[must_use]
    pub fn validate(mut self, validate: bool) -> Self {
        self.rules_mut().validate = Some(validate);
        self
    }

    /// Set a per-request deadline.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Install a config hook, run before call data is merged.
    #[must_use]
    pub fn extend_config(mut self, hook: impl ExtendConfig + 'static) -> Self {
        self.extend_config = Some(Arc::new(hook));
        self
    }

    /// Returns `true` when call data goes to the query string (no method, or GET).
    #[must_use]
    pub const fn is_get(&self) -> bool {
        matches!(self.method, None | Some(Method::Get))
    }

    /// Default data values, if any.
    #[must_use]
    pub fn data_defaults(&self) -> Option<&Params> {
        self.data.as_ref().and_then(|rules| rules.defaults.as_ref())
    }

    /// Required keys, if any.
    #[must_use]
    pub fn required_params(&self) -> &[String] {
        self.data
            .as_ref()
            .and_then(|rules| rules.required.as_deref())
            .unwrap_or_default()
    }

    /// Returns `true` if calls are checked for required keys.
    #[must_use]
    pub fn validates(&self) -> bool {
        let enabled = self
            .data
            .as_ref()
            .is_none_or(|rules| rules.validate.unwrap_or(true));
        enabled && !self.required_params().is_empty()
    }

    fn rules_mut(&mut self) -> &mut DataRules {
        self.data.get_or_insert_with(DataRules::default)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("data", &self.data)
            .field("timeout", &self.timeout)
            .field("extend_config", &self.extend_config.is_some())
            .finish()
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        timeout: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match timeout {
            Some(timeout) => {
                let ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
                serializer.serialize_some(&ms)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
