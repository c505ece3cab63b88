//! Config extension hooks.
//!
//! An endpoint may carry one [`ExtendConfig`] hook. It receives the working
//! [`RequestConfig`] and the raw call data, and runs after the endpoint fields
//! are copied but before defaults are merged and data is routed.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{Params, RequestConfig, params::scalar_text};

/// Strategy that adjusts a working request config for one call.
///
/// Closures with the matching signature implement this trait.
///
/// The hook sees the config before any payload is set: `config.data` and
/// every channel slot are still `None`, and the endpoint's defaults and
/// required names are not copied into the config. A hook that needs them
/// must capture the [`Endpoint`](crate::Endpoint) values it cares about, or
/// read the raw call `data` it is given.
///
/// # Example
///
/// ```
/// use quiver_core::{Endpoint, Params, RequestConfig};
///
/// let endpoint = Endpoint::get("https://api.example.com/search").extend_config(
///     |config: &mut RequestConfig, _data: Option<&Params>| {
///         config.url.push_str("/v2");
///     },
/// );
/// assert!(endpoint.extend_config.is_some());
/// ```
pub trait ExtendConfig: Send + Sync {
    /// Mutate `config` in place for the call carrying `data`.
    fn extend(&self, config: &mut RequestConfig, data: Option<&Params>);
}

impl<F> ExtendConfig for F
where
    F: Fn(&mut RequestConfig, Option<&Params>) + Send + Sync,
{
    fn extend(&self, config: &mut RequestConfig, data: Option<&Params>) {
        self(config, data);
    }
}

// Unreserved characters and sub-delims stay readable; everything that would
// change the path structure is encoded.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// Hook filling `{name}` placeholders in the URL from call data.
///
/// Values are percent-encoded as a single path segment. Placeholders without a
/// matching key are left as they are, and the payload itself is not modified,
/// so the value is still routed like any other field.
///
/// # Example
///
/// ```
/// use quiver_core::{Endpoint, PathParams, build_config, params};
/// use serde_json::json;
///
/// let endpoint = Endpoint::delete("https://api.example.com/users/{id}")
///     .extend_config(PathParams);
///
/// let data = params(&json!({"id": "a b"})).expect("object");
/// let config = build_config(&endpoint, Some(data)).expect("valid call");
/// assert_eq!(config.url, "https://api.example.com/users/a%20b");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParams;

impl ExtendConfig for PathParams {
    fn extend(&self, config: &mut RequestConfig, data: Option<&Params>) {
        let Some(data) = data else {
            return;
        };
        for (name, value) in data {
            let placeholder = format!("{{{name}}}");
            if config.url.contains(&placeholder) {
                let text = scalar_text(value);
                let encoded = utf8_percent_encode(&text, PATH_SEGMENT_ENCODE_SET).to_string();
                config.url = config.url.replace(&placeholder, &encoded);
            }
        }
    }
}
