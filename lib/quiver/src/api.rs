//! Generated API objects.
//!
//! [`Api::new`] walks a [`Schema`] once and mirrors its shape: every endpoint
//! becomes an [`ApiMethod`] bound to its definition and to the shared
//! transport, and every nested schema becomes a [`Namespace`].
//!
//! # Example
//!
//! ```no_run
//! use quiver::{Api, Endpoint, PathParams, Schema, params};
//! use serde_json::json;
//!
//! # async fn run() -> quiver::Result<()> {
//! let schema = Schema::new().namespace(
//!     "repos",
//!     Schema::new().endpoint(
//!         "get",
//!         Endpoint::get("https://api.github.com/repos/{owner}/{repo}").extend_config(PathParams),
//!     ),
//! );
//!
//! let github = Api::with_default_client(&schema);
//! let repo = github
//!     .call("repos.get", Some(params(&json!({"owner": "rust-lang", "repo": "cargo"}))?))
//!     .await?;
//! let repo: serde_json::Value = repo.json()?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use quiver_core::{Schema, SchemaNode};
use tracing::{Instrument, debug, info_span, warn};

use crate::{
    ApiClient, Endpoint, Error, HyperClient, Params, Response, Result, Transport, build_config,
};

/// A callable bound to one endpoint.
pub struct ApiMethod<T> {
    path: String,
    endpoint: Arc<Endpoint>,
    transport: Arc<T>,
}

impl<T> ApiMethod<T> {
    /// Dotted path of this method from the API root, e.g. `repos.issues.create`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The endpoint definition this method was built from.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl<T: Transport> ApiMethod<T> {
    /// Call the endpoint with `data`.
    ///
    /// Defaults are merged, the endpoint hook runs and required keys are
    /// checked right away; the returned future only sends the request. A
    /// validation failure resolves to [`Error::MissingParameters`] without
    /// touching the transport.
    pub fn call(
        &self,
        data: Option<Params>,
    ) -> impl Future<Output = Result<Response>> + Send + use<T> {
        let span = info_span!("api_call", method = %self.path);
        let built = span.in_scope(|| {
            let built = build_config(&self.endpoint, data);
            match &built {
                Ok(config) => debug!(channels = ?config.channels(), url = %config.url, "request built"),
                Err(err) => warn!(error = %err, "call rejected"),
            }
            built
        });
        let transport = Arc::clone(&self.transport);

        async move { transport.dispatch(built?).await }.instrument(span)
    }
}

impl<T> Clone for ApiMethod<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            endpoint: Arc::clone(&self.endpoint),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> fmt::Debug for ApiMethod<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiMethod")
            .field("path", &self.path)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// One entry of a generated API.
pub enum ApiNode<T> {
    /// A callable endpoint.
    Method(ApiMethod<T>),
    /// A nested group.
    Namespace(Namespace<T>),
}

impl<T> ApiNode<T> {
    /// The method, if this entry is one.
    #[must_use]
    pub const fn as_method(&self) -> Option<&ApiMethod<T>> {
        match self {
            Self::Method(method) => Some(method),
            Self::Namespace(_) => None,
        }
    }

    /// The namespace, if this entry is one.
    #[must_use]
    pub const fn as_namespace(&self) -> Option<&Namespace<T>> {
        match self {
            Self::Namespace(namespace) => Some(namespace),
            Self::Method(_) => None,
        }
    }
}

impl<T> Clone for ApiNode<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Method(method) => Self::Method(method.clone()),
            Self::Namespace(namespace) => Self::Namespace(namespace.clone()),
        }
    }
}

impl<T> fmt::Debug for ApiNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method(method) => f.debug_tuple("Method").field(method).finish(),
            Self::Namespace(namespace) => f.debug_tuple("Namespace").field(namespace).finish(),
        }
    }
}

/// A group of methods and nested groups, ordered by name.
pub struct Namespace<T> {
    nodes: BTreeMap<String, ApiNode<T>>,
}

impl<T> Namespace<T> {
    fn build(schema: &Schema, prefix: &str, transport: &Arc<T>) -> Self {
        let nodes = schema
            .iter()
            .map(|(name, node)| {
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                let node = match node {
                    SchemaNode::Endpoint(endpoint) => ApiNode::Method(ApiMethod {
                        path,
                        endpoint: Arc::clone(endpoint),
                        transport: Arc::clone(transport),
                    }),
                    SchemaNode::Namespace(children) => {
                        ApiNode::Namespace(Self::build(children, &path, transport))
                    }
                };
                (name.clone(), node)
            })
            .collect();
        Self { nodes }
    }

    /// Entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ApiNode<T>> {
        self.nodes.get(name)
    }

    /// Method by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&ApiMethod<T>> {
        self.get(name).and_then(ApiNode::as_method)
    }

    /// Nested namespace by name.
    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&Self> {
        self.get(name).and_then(ApiNode::as_namespace)
    }

    /// Entry at a dotted path such as `repos.issues.create`.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&ApiNode<T>> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let node = self.get(head)?;
        match rest {
            None => Some(node),
            Some(rest) => node.as_namespace()?.lookup(rest),
        }
    }

    /// Entry names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Entries in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ApiNode<T>> {
        self.nodes.iter()
    }

    /// Number of direct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Namespace<T> {
    type Item = (&'a String, &'a ApiNode<T>);
    type IntoIter = btree_map::Iter<'a, String, ApiNode<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Clone for Namespace<T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
        }
    }
}

impl<T> fmt::Debug for Namespace<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.nodes.iter()).finish()
    }
}

/// A generated API: the schema's shape, with endpoints made callable.
pub struct Api<T> {
    root: Namespace<T>,
    transport: Arc<T>,
}

impl<T> Api<T> {
    /// Build the API for `schema`, sending every call through `transport`.
    #[must_use]
    pub fn new(transport: T, schema: &Schema) -> Self {
        Self::with_shared(Arc::new(transport), schema)
    }

    /// Build the API on a transport shared with other APIs.
    #[must_use]
    pub fn with_shared(transport: Arc<T>, schema: &Schema) -> Self {
        let root = Namespace::build(schema, "", &transport);
        Self { root, transport }
    }

    /// Top-level namespace.
    #[must_use]
    pub const fn root(&self) -> &Namespace<T> {
        &self.root
    }

    /// The shared transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Method at a dotted path.
    #[must_use]
    pub fn method(&self, path: &str) -> Option<&ApiMethod<T>> {
        self.root.lookup(path).and_then(ApiNode::as_method)
    }

    /// Namespace at a dotted path.
    #[must_use]
    pub fn namespace(&self, path: &str) -> Option<&Namespace<T>> {
        self.root.lookup(path).and_then(ApiNode::as_namespace)
    }
}

impl<T: Transport> Api<T> {
    /// Call the method at a dotted path.
    ///
    /// An unknown path resolves to [`Error::UnknownMethod`].
    pub fn call(
        &self,
        path: &str,
        data: Option<Params>,
    ) -> impl Future<Output = Result<Response>> + Send + use<T> {
        let call = self
            .method(path)
            .map(|method| method.call(data))
            .ok_or_else(|| Error::UnknownMethod(path.to_string()));

        async move { call?.await }
    }
}

impl Api<ApiClient<HyperClient>> {
    /// Build the API on a default [`HyperClient`]; endpoint URLs must be absolute.
    #[must_use]
    pub fn with_default_client(schema: &Schema) -> Self {
        Self::new(ApiClient::default(), schema)
    }
}

impl<T> Clone for Api<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> fmt::Debug for Api<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert2::{check, let_assert};
    use bytes::Bytes;

    use super::*;
    use crate::RequestConfig;

    struct Noop;

    impl Transport for Noop {
        async fn dispatch(&self, _config: RequestConfig) -> Result<Response> {
            Ok(Response::new(200, HashMap::new(), Bytes::new()))
        }
    }

    fn schema() -> Schema {
        Schema::new()
            .endpoint("ping", Endpoint::new("https://api.example.com/ping"))
            .namespace(
                "users",
                Schema::new()
                    .endpoint("list", Endpoint::get("https://api.example.com/users"))
                    .namespace(
                        "admin",
                        Schema::new().endpoint("ban", Endpoint::post("https://api.example.com/ban")),
                    ),
            )
    }

    #[test]
    fn mirrors_schema_shape() {
        let api = Api::new(Noop, &schema());

        check!(api.root().keys().collect::<Vec<_>>() == ["ping", "users"]);
        let_assert!(Some(users) = api.namespace("users"));
        check!(users.keys().collect::<Vec<_>>() == ["admin", "list"]);
        check!(api.method("users.admin.ban").is_some());
        check!(api.method("users.admin").is_none());
        check!(api.namespace("users.admin").map(Namespace::len) == Some(1));
    }

    #[test]
    fn methods_know_their_path() {
        let api = Api::new(Noop, &schema());

        let_assert!(Some(ban) = api.method("users.admin.ban"));
        check!(ban.path() == "users.admin.ban");
        check!(ban.endpoint().url == "https://api.example.com/ban");
    }

    #[test]
    fn lookup_misses() {
        let api = Api::new(Noop, &schema());

        check!(api.root().lookup("nope").is_none());
        check!(api.root().lookup("ping.deeper").is_none());
        check!(api.root().lookup("").is_none());
    }

    #[test]
    fn empty_schema_gives_empty_api() {
        let api = Api::new(Noop, &Schema::new());
        check!(api.root().is_empty());
    }

    #[tokio::test]
    async fn unknown_path_names_the_method() {
        let api = Api::new(Noop, &schema());

        let err = api.call("users.remove", None).await.expect_err("unknown");

        check!(err.is_unknown_method());
        check!(err.to_string() == "unknown API method: users.remove");
    }
}
