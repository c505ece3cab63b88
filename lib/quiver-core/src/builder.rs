//! Request building: from an endpoint and call data to a routed config.
//!
//! [`build_config`] runs the whole per-call pipeline:
//!
//! 1. copy the endpoint's static fields into a fresh [`RequestConfig`];
//! 2. run the endpoint's [`ExtendConfig`](crate::ExtendConfig) hook, if any;
//! 3. merge the call data over the endpoint defaults;
//! 4. check required keys (unless validation is turned off);
//! 5. route the payload to its transmission channels.
//!
//! Routing is additive. A GET endpoint (or one without a method) always
//! sends the payload in the query string, and the declared `Content-Type`
//! may add a body channel on top of it:
//!
//! | Declared headers                          | Channel added           |
//! |-------------------------------------------|-------------------------|
//! | none at all                               | JSON body               |
//! | `application/x-www-form-urlencoded`       | url-encoded form        |
//! | `multipart/form-data`                     | multipart form          |
//! | `application/json`                        | JSON body               |
//! | headers without any `Content-Type`        | nothing                 |

use crate::{
    ContentType, Endpoint, Error, HeaderIndex, Params, RequestConfig, Response, Result, Transport,
    merge,
};

/// Build the routed request config for one call.
///
/// Routing looks at the endpoint's own method and headers, not at what the
/// hook may have changed in the working config.
///
/// # Errors
///
/// Returns [`Error::MissingParameters`] if validation is enabled and the
/// effective payload lacks a required key.
///
/// # Example
///
/// ```
/// use quiver_core::{Channel, Endpoint, build_config, params};
/// use serde_json::json;
///
/// let search = Endpoint::new("https://api.example.com/search")
///     .default_param("page", 1)
///     .required(["q"]);
///
/// let config = build_config(&search, Some(params(&json!({"q": "rust"})).unwrap())).unwrap();
/// assert_eq!(config.channels(), [Channel::Query, Channel::Json]);
/// assert_eq!(config.query.unwrap()["page"], json!(1));
///
/// let err = build_config(&search, None).unwrap_err();
/// assert!(err.is_validation());
/// ```
pub fn build_config(endpoint: &Endpoint, data: Option<Params>) -> Result<RequestConfig> {
    let mut config = RequestConfig::from_endpoint(endpoint);

    if let Some(hook) = &endpoint.extend_config {
        hook.extend(&mut config, data.as_ref());
    }

    let payload = match endpoint.data_defaults() {
        Some(defaults) => Some(merge(defaults, data.as_ref())),
        None => data,
    };

    if endpoint.validates() {
        check_required(endpoint.required_params(), payload.as_ref())?;
    }

    route(endpoint, &mut config, payload.as_ref());
    config.data = payload;

    Ok(config)
}

/// Build the config for one call and hand it to the transport.
///
/// The transport's result is returned unchanged. A validation failure
/// returns before the transport is touched.
///
/// # Errors
///
/// Returns the validation error, or whatever the transport returns.
pub async fn api_call<T>(
    transport: &T,
    endpoint: &Endpoint,
    data: Option<Params>,
) -> Result<Response>
where
    T: Transport + ?Sized,
{
    let config = build_config(endpoint, data)?;
    transport.dispatch(config).await
}

fn check_required(required: &[String], payload: Option<&Params>) -> Result<()> {
    let present = |name: &String| payload.is_some_and(|p| p.contains_key(name));
    if required.iter().all(present) {
        return Ok(());
    }

    let keys = payload.map(|p| p.keys().cloned().collect::<Vec<_>>());
    Err(Error::missing_parameters(
        required.iter().cloned(),
        keys.unwrap_or_default(),
    ))
}

fn route(endpoint: &Endpoint, config: &mut RequestConfig, payload: Option<&Params>) {
    if endpoint.is_get() {
        config.query = payload.cloned();
    }

    let Some(headers) = &endpoint.headers else {
        config.body = payload.cloned();
        config.json = true;
        return;
    };

    // Declared headers without a content type: no body channel.
    let Some(content_type) = HeaderIndex::new(headers).content_type() else {
        return;
    };

    if ContentType::FormUrlEncoded.is_declared_in(content_type) {
        config.form = payload.cloned();
    }
    if ContentType::Multipart.is_declared_in(content_type) {
        config.form_data = payload.cloned();
    }
    if ContentType::Json.is_declared_in(content_type) {
        config.body = payload.cloned();
        config.json = true;
    }
}
