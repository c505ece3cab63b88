//! Error types for quiver.
//!
//! Validation and lookup failures are raised before anything is sent;
//! everything else comes back from the transport unchanged.

use bytes::Bytes;
use derive_more::{Display, Error, From};

/// Everything a call can fail with.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Required call data is missing; raised before anything is sent.
    #[display(
        "Missing some of the following required parameters: {} :: Current parameters :: {}",
        required.join(", "),
        present.join(", ")
    )]
    #[from(skip)]
    MissingParameters {
        /// Every required parameter declared by the endpoint, in order.
        #[error(not(source))]
        required: Vec<String>,
        /// Keys actually present in the effective payload, in order.
        #[error(not(source))]
        present: Vec<String>,
    },

    /// No method lives at this dotted path of the generated API.
    #[display("unknown API method: {_0}")]
    #[from(skip)]
    UnknownMethod(#[error(not(source))] String),

    /// The server answered with a non-2xx status.
    #[display("HTTP error {status}: {reason}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
        /// Response body as received.
        #[error(not(source))]
        body: Bytes,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "users.get.apiSchema.method").
        path: String,
        /// Error message.
        message: String,
    },

    /// Query string or url-encoded form serialization error.
    #[display("query serialization error: {_0}")]
    #[from]
    QuerySerialization(serde_html_form::ser::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a missing-parameters validation error.
    #[must_use]
    pub fn missing_parameters<R, P>(required: R, present: P) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self::MissingParameters {
            required: required.into_iter().map(Into::into).collect(),
            present: present.into_iter().map(Into::into).collect(),
        }
    }

    /// HTTP error for a non-2xx status, keeping the response body.
    #[must_use]
    pub fn http(status: u16, body: Bytes) -> Self {
        let reason = ::http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown Status");
        Self::Http {
            status,
            reason: reason.to_string(),
            body,
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if required call data was missing.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingParameters { .. })
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if a dotted path named no API method.
    #[must_use]
    pub const fn is_unknown_method(&self) -> bool {
        matches!(self, Self::UnknownMethod(_))
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The response body, if this is an HTTP error.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        match self {
            Self::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Decode the HTTP error body as JSON.
    ///
    /// Returns `None` if this is not an HTTP error.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_message() {
        let err = Error::missing_parameters(["a", "b"], ["a", "c"]);
        insta::assert_snapshot!(
            err.to_string(),
            @"Missing some of the following required parameters: a, b :: Current parameters :: a, c"
        );
        assert!(err.is_validation());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn missing_parameters_without_data() {
        let err = Error::missing_parameters(["id"], Vec::<String>::new());
        assert_eq!(
            err.to_string(),
            "Missing some of the following required parameters: id :: Current parameters :: "
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(Error::http(404, Bytes::new()).to_string(), "HTTP error 404: Not Found");
        assert_eq!(Error::http(599, Bytes::new()).to_string(), "HTTP error 599: Unknown Status");
        assert_eq!(Error::Timeout.to_string(), "request timeout");
        assert_eq!(
            Error::UnknownMethod("users.remove".to_string()).to_string(),
            "unknown API method: users.remove"
        );
        assert_eq!(
            Error::json_deserialization("users.get", "missing field `url`").to_string(),
            "JSON deserialization error at 'users.get': missing field `url`"
        );
    }

    #[test]
    fn error_status() {
        let err = Error::http(404, Bytes::new());
        assert_eq!(err.status(), Some(404));
        assert!(err.is_client_error());
        assert!(err.is_not_found());
        assert!(!err.is_server_error());

        let err = Error::http(503, Bytes::new());
        assert!(err.is_server_error());
        assert!(!err.is_validation());

        assert_eq!(Error::Timeout.status(), None);
        assert!(Error::Timeout.is_timeout());
        assert!(Error::connection("refused").is_connection());
        assert!(Error::UnknownMethod("x".to_string()).is_unknown_method());
    }

    #[test]
    fn error_decode_body() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Problem {
            error: String,
        }

        let err = Error::http(422, Bytes::from(r#"{"error": "sku taken"}"#));

        let decoded = err
            .decode_body::<Problem>()
            .expect("HTTP error")
            .expect("decodes");
        assert_eq!(decoded.error, "sku taken");
        assert!(Error::Timeout.decode_body::<Problem>().is_none());
    }
}
