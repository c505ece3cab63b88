//! What a call resolves to.
//!
//! A [`Response`] is handed back by a [`Transport`](crate::Transport) as it
//! came off the wire: status, headers and the buffered body.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use bytes::Bytes;
//! use quiver_core::Response;
//!
//! let response = Response::new(200, HashMap::new(), Bytes::from(r#"{"id":1}"#));
//! let value: serde_json::Value = response.error_for_status().unwrap().json().unwrap();
//! assert_eq!(value["id"], 1);
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::{ContentType, Error, Params, Result, from_json};

/// Status, headers and body of a completed call.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Header value, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if the server labelled the body as JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .is_some_and(|value| ContentType::Json.is_declared_in(value))
    }

    /// Buffered body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into the body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending path if decoding fails.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        from_json(&self.body)
    }

    /// Decode a JSON object body as call data for another endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON object.
    pub fn params(self) -> Result<Params> {
        self.json()
    }

    /// Turn a non-2xx response into [`Error::Http`], keeping the body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] when the status is not 2xx.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::http(self.status, self.body))
        }
    }

    /// Body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(self) -> std::result::Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }
}
