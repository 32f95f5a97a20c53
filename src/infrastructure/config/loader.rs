use figment::providers::{Format as _, Yaml};
use figment::Figment;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::schema::{ConfigSchema, DefaultValue, Leaf};
use super::value::{insert_path, lookup_path, ConfigValue};
use crate::domain::models::Settings;
use crate::infrastructure::logging::parse_log_level;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed: {}", format_violations(.violations))]
    Validation { violations: Vec<Violation> },

    #[error("Failed to read configuration document {path}: {reason}")]
    Source { path: String, reason: String },

    #[error("Configuration does not match the typed settings: {0}")]
    Extract(#[from] serde_json::Error),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error, fatal, silent")]
    InvalidLogLevel(String),
}

impl ConfigError {
    /// Violations of a failed validation, empty for other errors.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation { violations } => violations,
            _ => &[],
        }
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Where a rejected value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Env(&'static str),
    Document,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(var) => write!(f, "environment variable {var}"),
            Self::Document => f.write_str("configuration document"),
        }
    }
}

/// A single schema violation.
///
/// Messages name the field and never carry the value of a sensitive leaf.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{field}: required value is missing (set {env_var})")]
    MissingRequired {
        field: &'static str,
        env_var: &'static str,
    },

    #[error("{field}: required when {flag} is enabled (set {env_var})")]
    RequiredWhen {
        field: &'static str,
        env_var: &'static str,
        flag: &'static str,
    },

    #[error("{field}: expected {expected} from {origin}, {}", describe_received(.received.as_deref()))]
    InvalidFormat {
        field: &'static str,
        origin: Origin,
        expected: String,
        /// `None` when the leaf is sensitive
        received: Option<String>,
    },

    #[error("{key}: not declared in the configuration schema")]
    UnknownKey { key: String },
}

fn describe_received(received: Option<&str>) -> String {
    received.map_or_else(|| "value hidden".to_string(), |value| format!("got {value:?}"))
}

impl Violation {
    /// Dotted path of the offending field or key.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequired { field, .. }
            | Self::RequiredWhen { field, .. }
            | Self::InvalidFormat { field, .. } => field,
            Self::UnknownKey { key } => key,
        }
    }

    pub const fn is_unknown_key(&self) -> bool {
        matches!(self, Self::UnknownKey { .. })
    }
}

/// Snapshot of environment variables.
///
/// Values that are not valid UTF-8 are kept apart (lossily decoded) so a
/// bound leaf can reject them instead of falling back to its default.
/// `Debug` lists variable names only.
#[derive(Clone, Default)]
pub struct Environment {
    vars: BTreeMap<String, String>,
    unreadable: BTreeMap<String, String>,
}

impl Environment {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Build from raw OS pairs. Entries whose name is not UTF-8 are skipped.
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut env = Self::default();
        for (key, value) in vars {
            let Ok(key) = key.into_string() else {
                continue;
            };
            match value.into_string() {
                Ok(value) => {
                    env.vars.insert(key, value);
                }
                Err(raw) => {
                    env.unreadable.insert(key, raw.to_string_lossy().into_owned());
                }
            }
        }
        env
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Lossy rendering of a variable whose value is not valid UTF-8.
    pub fn unreadable(&self, name: &str) -> Option<&str> {
        self.unreadable.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.unreadable.remove(&name);
        self.vars.insert(name, value.into());
        self
    }

    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.vars.remove(name);
        self.unreadable.remove(name);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            unreadable: BTreeMap::new(),
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.vars.keys().chain(self.unreadable.keys()))
            .finish()
    }
}

/// Configuration loader driven by a [`ConfigSchema`].
///
/// Precedence per leaf (highest first):
/// 1. Bound environment variable
/// 2. Configuration document (optional YAML file)
/// 3. Schema default
#[derive(Debug, Clone)]
pub struct ConfigLoader<'a> {
    schema: &'a ConfigSchema,
    document: Option<Value>,
    strict: bool,
}

impl<'a> ConfigLoader<'a> {
    /// Strict loader with no configuration document.
    pub const fn new(schema: &'a ConfigSchema) -> Self {
        Self {
            schema,
            document: None,
            strict: true,
        }
    }

    /// Toggle rejection of undeclared document keys.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_document(mut self, document: Value) -> Self {
        self.document = Some(document);
        self
    }

    /// Use a YAML file as the configuration document.
    pub fn with_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::Source {
                path: path.display().to_string(),
                reason: "file not found".to_string(),
            });
        }

        let document: Value = Figment::from(Yaml::file(path))
            .extract()
            .map_err(|err| ConfigError::Source {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?;

        debug!(path = %path.display(), "loaded configuration document");
        Ok(self.with_document(document))
    }

    /// Resolve, validate and realize every leaf of the schema.
    ///
    /// All violations are collected before failing so a single run reports
    /// every problem.
    pub fn load(&self, env: &Environment) -> Result<ConfigValue, ConfigError> {
        let mut violations = Vec::new();

        if let Some(document) = &self.document {
            if self.strict {
                self.check_declared(document, "", &mut violations);
            }
        }

        let mut tree = Map::new();
        for leaf in self.schema.leaves() {
            match self.resolve(leaf, env) {
                Ok(Some(value)) => insert_path(&mut tree, leaf.path, value),
                Ok(None) => violations.push(Violation::MissingRequired {
                    field: leaf.path,
                    env_var: leaf.env,
                }),
                Err(violation) => violations.push(violation),
            }
        }

        self.check_conditional(&tree, &mut violations);

        if !violations.is_empty() {
            return Err(ConfigError::Validation { violations });
        }

        Ok(ConfigValue::new(tree, self.schema))
    }

    /// Load and convert into the typed settings view.
    pub fn load_settings(&self, env: &Environment) -> Result<(ConfigValue, Settings), ConfigError> {
        let config = self.load(env)?;
        let settings = config.settings()?;
        Self::validate(&settings)?;
        Ok((config, settings))
    }

    /// Checks that need the typed view.
    pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
        parse_log_level(&settings.logging.level)
            .map(|_| ())
            .map_err(|_| ConfigError::InvalidLogLevel(settings.logging.level.clone()))
    }

    /// `Ok(None)` means a required leaf stayed unset or blank.
    fn resolve(&self, leaf: &'static Leaf, env: &Environment) -> Result<Option<Value>, Violation> {
        if let Some(lossy) = env.unreadable(leaf.env) {
            return Err(invalid_format(leaf, Origin::Env(leaf.env), lossy.to_string()));
        }

        let resolved = if let Some(raw) = env.get(leaf.env) {
            let value = leaf
                .parse_str(raw)
                .ok_or_else(|| invalid_format(leaf, Origin::Env(leaf.env), raw.to_string()))?;
            Some(value)
        } else if let Some(value) = self.document_value(leaf.path) {
            match (value, leaf.default) {
                (Value::Null, DefaultValue::Optional) => Some(Value::Null),
                (Value::Null, DefaultValue::Required) => None,
                _ => {
                    let checked = leaf
                        .check(value)
                        .ok_or_else(|| invalid_format(leaf, Origin::Document, value.to_string()))?;
                    Some(checked)
                }
            }
        } else {
            leaf.default.to_value()
        };

        Ok(resolved.filter(|value| !(leaf.default.to_value().is_none() && Leaf::is_blank(value))))
    }

    fn document_value(&self, path: &str) -> Option<&Value> {
        self.document
            .as_ref()
            .and_then(|document| lookup_path(document, path))
    }

    fn check_declared(&self, node: &Value, prefix: &str, violations: &mut Vec<Violation>) {
        let Some(object) = node.as_object() else {
            return;
        };

        for (key, value) in object {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };

            if self.schema.leaf(&path).is_some() {
                continue;
            }
            if self.schema.is_branch(&path) && value.is_object() {
                self.check_declared(value, &path, violations);
                continue;
            }
            violations.push(Violation::UnknownKey { key: path });
        }
    }

    fn check_conditional(&self, tree: &Map<String, Value>, violations: &mut Vec<Violation>) {
        let tree = Value::Object(tree.clone());
        for leaf in self.schema.leaves() {
            let Some(flag) = leaf.required_when else {
                continue;
            };
            let enabled = lookup_path(&tree, flag).and_then(Value::as_bool) == Some(true);
            let present = lookup_path(&tree, leaf.path).is_some_and(|value| !Leaf::is_blank(value));
            if enabled && !present {
                violations.push(Violation::RequiredWhen {
                    field: leaf.path,
                    env_var: leaf.env,
                    flag,
                });
            }
        }
    }
}

fn invalid_format(leaf: &Leaf, origin: Origin, received: String) -> Violation {
    Violation::InvalidFormat {
        field: leaf.path,
        origin,
        expected: leaf.expected(),
        received: (!leaf.sensitive).then_some(received),
    }
}

/// Load the service configuration with a strict loader.
pub fn load(schema: &ConfigSchema, env: &Environment) -> Result<ConfigValue, ConfigError> {
    ConfigLoader::new(schema).load(env)
}
