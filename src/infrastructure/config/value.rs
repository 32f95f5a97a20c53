use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use super::loader::ConfigError;
use super::schema::ConfigSchema;
use crate::domain::models::{Settings, REDACTED_VALUE};

/// Realized configuration tree.
///
/// Same shape as the schema with every leaf resolved. Immutable once
/// built. `Display`, `Debug` and `Serialize` all go through the redacted
/// form; raw sensitive values are only reachable via [`ConfigValue::get`]
/// and [`ConfigValue::settings`].
#[derive(Clone, PartialEq)]
pub struct ConfigValue {
    tree: Value,
    sensitive_paths: Vec<&'static str>,
}

impl ConfigValue {
    pub(crate) fn new(tree: Map<String, Value>, schema: &ConfigSchema) -> Self {
        Self {
            tree: Value::Object(tree),
            sensitive_paths: schema.sensitive_leaves().map(|leaf| leaf.path).collect(),
        }
    }

    /// Value at a dotted path, e.g. `logging.cloudwatch.region`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup_path(&self.tree, path)
    }

    /// Convert into the typed settings view.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        Ok(serde_json::from_value(self.tree.clone())?)
    }

    /// Non-empty values of every sensitive leaf, for log scrubbing.
    pub fn sensitive_values(&self) -> Vec<&str> {
        self.sensitive_paths
            .iter()
            .filter_map(|path| self.get(path))
            .filter_map(Value::as_str)
            .filter(|value| !value.is_empty())
            .collect()
    }

    /// The tree with every sensitive leaf replaced by [`REDACTED_VALUE`].
    pub fn redacted(&self) -> Value {
        let mut tree = self.tree.clone();
        for path in &self.sensitive_paths {
            if let Some(slot) = lookup_path_mut(&mut tree, path) {
                *slot = Value::String(REDACTED_VALUE.to_string());
            }
        }
        tree
    }

    /// Human-readable dump of the full tree, safe for audit logging.
    pub fn to_sanitized_string(&self) -> String {
        serde_json::to_string_pretty(&self.redacted()).unwrap_or_default()
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sanitized_string())
    }
}

impl fmt::Debug for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigValue")
            .field("tree", &self.redacted())
            .finish()
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.redacted().serialize(serializer)
    }
}

pub(crate) fn lookup_path<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(tree, |node, segment| node.as_object()?.get(segment))
}

fn lookup_path_mut<'a>(tree: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    path.split('.')
        .try_fold(tree, |node, segment| node.as_object_mut()?.get_mut(segment))
}

/// Insert `value` at a dotted path, creating intermediate objects.
pub(crate) fn insert_path(tree: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else {
        return;
    };

    let mut node = tree;
    for segment in segments {
        let entry = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(next) = entry else {
            return;
        };
        node = next;
    }
    node.insert(last.to_string(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::schema::SERVICE_SCHEMA;
    use serde_json::json;

    fn sample() -> ConfigValue {
        let mut tree = Map::new();
        insert_path(&mut tree, "commit", json!("abc123"));
        insert_path(&mut tree, "es.username", json!("elastic"));
        insert_path(&mut tree, "es.password", json!("s3cr3t"));
        insert_path(&mut tree, "logging.cloudwatch.secret", Value::Null);
        insert_path(&mut tree, "logging.cloudwatch.region", json!("eu-west-1"));
        ConfigValue::new(tree, &SERVICE_SCHEMA)
    }

    #[test]
    fn test_insert_and_lookup() {
        let config = sample();
        assert_eq!(config.get("commit"), Some(&json!("abc123")));
        assert_eq!(config.get("logging.cloudwatch.region"), Some(&json!("eu-west-1")));
        assert!(config.get("logging.cloudwatch").unwrap().is_object());
        assert!(config.get("logging.missing").is_none());
        assert!(config.get("commit.nested").is_none());
    }

    #[test]
    fn test_sanitized_string_redacts_sensitive_leaves() {
        let config = sample();
        let dump = config.to_sanitized_string();

        assert!(!dump.contains("s3cr3t"));
        assert!(dump.contains("elastic"));
        assert!(dump.contains(REDACTED_VALUE));

        let redacted = config.redacted();
        assert_eq!(redacted["es"]["password"], json!(REDACTED_VALUE));
        assert_eq!(redacted["logging"]["cloudwatch"]["secret"], json!(REDACTED_VALUE));
    }

    #[test]
    fn test_debug_and_serialize_are_redacted() {
        let config = sample();
        assert!(!format!("{config:?}").contains("s3cr3t"));
        assert!(!config.to_string().contains("s3cr3t"));
        assert!(!serde_json::to_string(&config).unwrap().contains("s3cr3t"));
    }

    #[test]
    fn test_sensitive_values() {
        assert_eq!(sample().sensitive_values(), vec!["s3cr3t"]);
    }
}
