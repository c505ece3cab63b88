//! The wire form of one API call.
//!
//! [`RequestConfig::into_request`](crate::RequestConfig::into_request) lowers a
//! routed config into a [`Request`]: the URL already carries the query
//! channel, the body is encoded, and the endpoint's deadline travels along so
//! the [`HttpClient`](crate::HttpClient) can enforce it.

use std::time::Duration;

use bytes::Bytes;
use url::Url;

use crate::{
    Headers, Method,
    headers::{find_header, has_header, remove_header},
};

/// An encoded HTTP call, ready to hand to an [`HttpClient`](crate::HttpClient).
///
/// Headers keep the order the endpoint declared them in, and lookups ignore
/// case.
///
/// ```
/// use std::time::Duration;
///
/// use quiver_core::{Method, Request};
///
/// let url = "https://api.example.com/users".parse().expect("url");
/// let request = Request::new(Method::Post, url)
///     .with_header("content-type", "application/json")
///     .with_default_header("Content-Type", "text/plain")
///     .with_body(r#"{"name":"Ada"}"#)
///     .with_timeout(Some(Duration::from_secs(2)));
///
/// assert_eq!(request.content_type(), Some("application/json"));
/// assert_eq!(request.timeout(), Some(Duration::from_secs(2)));
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: Headers,
    body: Option<Bytes>,
    timeout: Option<Duration>,
}

impl Request {
    /// A bodiless request with no headers.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Headers::new(),
            body: None,
            timeout: None,
        }
    }

    /// Append declared headers as they are, duplicates and casing included.
    #[must_use]
    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Set a header, replacing every case variant of `name`.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        remove_header(&mut self.headers, &name);
        self.headers.insert(name, value.into());
        self
    }

    /// Set a header only if no case variant of `name` is present.
    #[must_use]
    pub fn with_default_header(self, name: &str, value: &str) -> Self {
        if has_header(&self.headers, name) {
            self
        } else {
            self.with_header(name, value)
        }
    }

    /// Set the encoded body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the deadline; `None` leaves it to the client.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Target URL, query string included.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Headers in declaration order.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First header value declared under `name`, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// The `Content-Type` the body is sent with.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Encoded body, if any channel produced one.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Deadline declared by the endpoint.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Split into method, URL, headers and body.
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, Headers, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Request {
        Request::new(
            Method::Get,
            Url::parse("https://api.example.com/users").expect("valid URL"),
        )
    }

    #[test]
    fn declared_headers_keep_order_and_casing() {
        let request = users().with_headers([
            ("X-Trace".to_string(), "1".to_string()),
            ("accept".to_string(), "text/csv".to_string()),
        ]);

        let names: Vec<&str> = request.headers().keys().map(String::as_str).collect();
        assert_eq!(names, ["X-Trace", "accept"]);
        assert_eq!(request.header("Accept"), Some("text/csv"));
    }

    #[test]
    fn with_header_replaces_case_variants() {
        let request = users()
            .with_headers([("content-type".to_string(), "multipart/form-data".to_string())])
            .with_header("Content-Type", "multipart/form-data; boundary=x");

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.content_type(), Some("multipart/form-data; boundary=x"));
    }

    #[test]
    fn default_header_never_overrides() {
        let request = users()
            .with_header("ACCEPT", "text/csv")
            .with_default_header("Accept", "application/json")
            .with_default_header("User-Agent", "reports/1.0");

        assert_eq!(request.header("accept"), Some("text/csv"));
        assert_eq!(request.header("user-agent"), Some("reports/1.0"));
        assert_eq!(request.headers().len(), 2);
    }

    #[test]
    fn timeout_and_body_travel_with_the_request() {
        let request = users()
            .with_body("{}")
            .with_timeout(Some(Duration::from_millis(1500)));

        assert_eq!(request.timeout(), Some(Duration::from_millis(1500)));
        let (method, url, headers, body) = request.into_parts();
        assert_eq!(method, Method::Get);
        assert_eq!(url.path(), "/users");
        assert!(headers.is_empty());
        assert_eq!(body.as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn bare_request_has_no_deadline() {
        let request = users();

        assert!(request.timeout().is_none());
        assert!(request.body().is_none());
        assert!(request.content_type().is_none());
    }
}
