//! Per-call request configuration.
//!
//! A [`RequestConfig`] is built fresh for every call from an [`Endpoint`]. It
//! carries the effective payload and the transmission channels it was routed
//! to, and is what a [`Transport`](crate::Transport) receives.

use std::time::Duration;

use url::Url;

use crate::{
    ContentType, Endpoint, Form, Headers, Method, Params, Part, Request, Result, to_form, to_json,
    to_pairs,
};

/// Where a payload is transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// URL query string.
    Query,
    /// `application/x-www-form-urlencoded` body.
    Form,
    /// `multipart/form-data` body.
    Multipart,
    /// JSON body.
    Json,
}

/// Working configuration for one call.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// HTTP method; `None` means GET.
    pub method: Option<Method>,
    /// Target URL, absolute or relative to the transport's base URL.
    pub url: String,
    /// Headers copied from the endpoint.
    pub headers: Option<Headers>,
    /// Per-request deadline.
    pub timeout: Option<Duration>,
    /// Effective payload: call data merged over the endpoint defaults.
    pub data: Option<Params>,
    /// Payload sent in the query string.
    pub query: Option<Params>,
    /// Payload sent as a url-encoded form.
    pub form: Option<Params>,
    /// Payload sent as multipart form fields.
    pub form_data: Option<Params>,
    /// Payload sent as the request body.
    pub body: Option<Params>,
    /// Body is JSON and a JSON response is expected.
    pub json: bool,
    /// Extra multipart parts (e.g. file uploads) appended after the fields.
    pub files: Vec<Part>,
}

impl RequestConfig {
    /// Copy the static fields of an endpoint.
    #[must_use]
    pub fn from_endpoint(endpoint: &Endpoint) -> Self {
        Self {
            method: endpoint.method,
            url: endpoint.url.clone(),
            headers: endpoint.headers.clone(),
            timeout: endpoint.timeout,
            ..Self::default()
        }
    }

    /// Attach an extra multipart part.
    pub fn attach(&mut self, part: Part) {
        self.files.push(part);
    }

    /// Channels that received a payload slot, in routing order.
    ///
    /// The JSON channel counts as soon as the JSON flag is set.
    #[must_use]
    pub fn channels(&self) -> Vec<Channel> {
        let mut channels = Vec::new();
        if self.query.is_some() {
            channels.push(Channel::Query);
        }
        if self.form.is_some() {
            channels.push(Channel::Form);
        }
        if self.form_data.is_some() {
            channels.push(Channel::Multipart);
        }
        if self.json {
            channels.push(Channel::Json);
        }
        channels
    }

    /// Convert into a wire request.
    ///
    /// A relative URL is joined onto `base` and the query channel is appended
    /// to it. Body precedence is multipart, then url-encoded form, then JSON
    /// body. The endpoint deadline is carried over.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the body cannot be encoded.
    pub fn into_request(self, base: Option<&Url>) -> Result<Request> {
        let mut url = resolve_url(&self.url, base)?;
        if let Some(query) = self.query.as_ref().filter(|q| !q.is_empty()) {
            url.query_pairs_mut().extend_pairs(to_pairs(query));
        }

        let mut request = Request::new(self.method.unwrap_or(Method::Get), url)
            .with_headers(self.headers.unwrap_or_default())
            .with_timeout(self.timeout);

        if self.form_data.is_some() || !self.files.is_empty() {
            let form = self
                .form_data
                .as_ref()
                .map_or_else(Form::new, Form::from_params);
            let (content_type, body) = self.files.into_iter().fold(form, Form::part).into_body();
            request = request.with_header("Content-Type", content_type).with_body(body);
        } else if let Some(form) = &self.form {
            request = request
                .with_default_header("Content-Type", ContentType::FormUrlEncoded.as_str())
                .with_body(to_form(&to_pairs(form))?);
        } else if let Some(body) = &self.body {
            if self.json {
                request = request.with_default_header("Content-Type", ContentType::Json.as_str());
            }
            request = request.with_body(to_json(body)?);
        }

        if self.json {
            request = request.with_default_header("Accept", ContentType::Json.as_str());
        }
        Ok(request)
    }
}

fn resolve_url(raw: &str, base: Option<&Url>) -> Result<Url> {
    match (Url::parse(raw), base) {
        (Ok(url), _) => Ok(url),
        (Err(url::ParseError::RelativeUrlWithoutBase), Some(base)) => Ok(base.join(raw)?),
        (Err(err), _) => Err(err.into()),
    }
}
