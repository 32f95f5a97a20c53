use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Namespace string the index uses to store tags that have no namespace.
///
/// Shared with the producer of raw tag documents. Consumers of formatted
/// tags see [`Namespace::Null`] instead.
pub const NAMESPACE_NULL_VALUE: &str = "__xjoin_null_namespace__";

/// Namespace slot of a tag record.
///
/// Distinguishes a record without a `namespace` key from one carrying an
/// explicit `null`, so records pass through without gaining or losing keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Namespace {
    /// No `namespace` key in the record
    #[default]
    Absent,
    /// `namespace: null`
    Null,
    /// `namespace: "<value>"`
    Named(String),
}

impl Namespace {
    pub fn named(value: impl Into<String>) -> Self {
        Self::Named(value.into())
    }

    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// String value, `None` for both absent and null.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Named(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl Serialize for Namespace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Named(value) => serializer.serialize_str(value),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Namespace {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.map_or(Self::Null, Self::Named))
    }
}

/// A tag record as stored in the search index.
///
/// Only `namespace` is interpreted; `key`, `value` and anything else are
/// kept verbatim in `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Namespace::is_absent")]
    pub namespace: Namespace,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A tag whose namespace sentinel has been replaced by [`Namespace::Null`].
pub type NormalizedTag = Tag;

impl Tag {
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            fields: Map::new(),
        }
    }

    /// Builder-style helper for attaching an opaque field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
