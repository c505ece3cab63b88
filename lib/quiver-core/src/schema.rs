//! Schema trees.
//!
//! A [`Schema`] describes the shape of a generated API: each entry is either
//! an endpoint or a nested namespace.
//!
//! In JSON, an endpoint is an object carrying the `apiSchema` key, which holds
//! the endpoint definition. Any other object is a namespace:
//!
//! ```json
//! {
//!   "users": {
//!     "list": { "apiSchema": { "url": "/users" } },
//!     "create": { "apiSchema": { "method": "post", "url": "/users" } }
//!   },
//!   "ping": { "apiSchema": { "url": "/ping" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::sync::Arc;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Endpoint, Result};

/// Key marking an endpoint leaf in the JSON form of a schema.
pub const ENDPOINT_MARKER: &str = "apiSchema";

/// One entry of a schema tree.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// A callable endpoint.
    Endpoint(Arc<Endpoint>),
    /// A nested group of entries.
    Namespace(Schema),
}

impl From<Endpoint> for SchemaNode {
    fn from(endpoint: Endpoint) -> Self {
        Self::Endpoint(Arc::new(endpoint))
    }
}

impl From<Schema> for SchemaNode {
    fn from(schema: Schema) -> Self {
        Self::Namespace(schema)
    }
}

/// A named tree of endpoints, ordered by name.
///
/// # Example
///
/// ```
/// use quiver_core::{Endpoint, Schema, SchemaNode};
///
/// let schema = Schema::new()
///     .endpoint("ping", Endpoint::get("/ping"))
///     .namespace(
///         "users",
///         Schema::new()
///             .endpoint("list", Endpoint::get("/users"))
///             .endpoint("create", Endpoint::post("/users")),
///     );
///
/// assert_eq!(schema.len(), 2);
/// assert!(matches!(schema.get("users"), Some(SchemaNode::Namespace(users)) if users.len() == 2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    nodes: BTreeMap<String, SchemaNode>,
}

impl Schema {
    /// Create an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON form of a schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonDeserialization`](crate::Error::JsonDeserialization)
    /// with the path of the offending entry.
    pub fn from_json(json: &str) -> Result<Self> {
        crate::from_json(json.as_bytes())
    }

    /// Add an endpoint entry.
    #[must_use]
    pub fn endpoint(mut self, name: impl Into<String>, endpoint: Endpoint) -> Self {
        self.insert(name, endpoint);
        self
    }

    /// Add a nested namespace.
    #[must_use]
    pub fn namespace(mut self, name: impl Into<String>, schema: Self) -> Self {
        self.insert(name, schema);
        self
    }

    /// Insert an entry, returning the one it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        node: impl Into<SchemaNode>,
    ) -> Option<SchemaNode> {
        self.nodes.insert(name.into(), node.into())
    }

    /// Entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.nodes.get(name)
    }

    /// Entries in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, SchemaNode> {
        self.nodes.iter()
    }

    /// Number of direct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the schema has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = (&'a String, &'a SchemaNode);
    type IntoIter = btree_map::Iter<'a, String, SchemaNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.nodes.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let nodes = BTreeMap::deserialize(deserializer)?;
        Ok(Self { nodes })
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Endpoint(endpoint) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(ENDPOINT_MARKER, endpoint.as_ref())?;
                map.end()
            }
            Self::Namespace(schema) => schema.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = SchemaNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an endpoint (object with `{ENDPOINT_MARKER}`) or a namespace object")
    }

    // An object carrying the marker is an endpoint, whatever else it holds.
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut endpoint: Option<Endpoint> = None;
        let mut children = BTreeMap::new();

        while let Some(key) = map.next_key::<String>()? {
            if key == ENDPOINT_MARKER {
                if endpoint.is_some() {
                    return Err(de::Error::duplicate_field(ENDPOINT_MARKER));
                }
                endpoint = Some(map.next_value()?);
            } else {
                let node: SchemaNode = map.next_value()?;
                children.insert(key, node);
            }
        }

        Ok(match endpoint {
            Some(endpoint) => SchemaNode::from(endpoint),
            None => SchemaNode::Namespace(Schema { nodes: children }),
        })
    }
}
