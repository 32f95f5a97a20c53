//! Declarative configuration schema
//!
//! The schema is plain data: one [`Leaf`] per option, addressed by its
//! dotted path in the configuration tree. The loader interprets it; nothing
//! here reads the environment.

use serde_json::{Number, Value};

use crate::domain::models::RuntimeEnv;

/// Expected type of a leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Non-negative integer
    Nat,
    /// Any finite number
    Number,
    /// `true/false`, `1/0`, `yes/no`, `on/off`
    Boolean,
    /// Any string
    String,
    /// One of a fixed set of strings
    OneOf(&'static [&'static str]),
}

impl Format {
    /// Parse a raw environment string. `None` when it does not match.
    pub fn parse_str(self, raw: &str) -> Option<Value> {
        let trimmed = raw.trim();
        match self {
            Self::Nat => trimmed.parse::<u64>().ok().map(Value::from),
            Self::Number => parse_number(trimmed),
            Self::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(Value::Bool(true)),
                "false" | "0" | "no" | "off" => Some(Value::Bool(false)),
                _ => None,
            },
            Self::String => Some(Value::String(raw.to_string())),
            Self::OneOf(allowed) => allowed
                .contains(&trimmed)
                .then(|| Value::String(trimmed.to_string())),
        }
    }

    /// Check a value taken from a configuration document.
    ///
    /// Strings are coerced through [`Format::parse_str`] so quoted YAML
    /// scalars behave like environment values.
    pub fn check(self, value: &Value) -> Option<Value> {
        match (self, value) {
            (Self::String, Value::String(_)) => Some(value.clone()),
            (_, Value::String(raw)) => self.parse_str(raw),
            (Self::Nat, Value::Number(n)) => n.as_u64().map(Value::from),
            (Self::Number, Value::Number(n)) => n
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|_| value.clone()),
            (Self::Boolean, Value::Bool(_)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Human-readable description used in validation messages.
    pub fn expected(self) -> String {
        match self {
            Self::Nat => "a non-negative integer".to_string(),
            Self::Number => "a number".to_string(),
            Self::Boolean => "a boolean (true/false, 1/0, yes/no, on/off)".to_string(),
            Self::String => "a string".to_string(),
            Self::OneOf(allowed) => format!("one of [{}]", allowed.join(", ")),
        }
    }
}

fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(integer) = raw.parse::<i64>() {
        return Some(Value::from(integer));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// Value used when neither the environment nor a document sets a leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// No default; loading fails when the leaf stays unset or empty
    Required,
    /// No default; resolves to `null`
    Optional,
    Text(&'static str),
    Integer(u64),
    Flag(bool),
}

impl DefaultValue {
    /// Concrete default, `None` for required leaves.
    pub fn to_value(self) -> Option<Value> {
        match self {
            Self::Required => None,
            Self::Optional => Some(Value::Null),
            Self::Text(text) => Some(Value::String(text.to_string())),
            Self::Integer(n) => Some(Value::from(n)),
            Self::Flag(flag) => Some(Value::Bool(flag)),
        }
    }
}

/// One configuration option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leaf {
    /// Dotted path in the configuration tree, e.g. `es.password`
    pub path: &'static str,
    pub format: Format,
    pub default: DefaultValue,
    /// Bound environment variable
    pub env: &'static str,
    /// Redacted in every printable form
    pub sensitive: bool,
    /// Boolean leaf that makes this leaf required when it resolves to `true`
    pub required_when: Option<&'static str>,
    /// Inclusive upper bound for integer values
    pub max: Option<u64>,
}

impl Leaf {
    pub const fn new(
        path: &'static str,
        format: Format,
        default: DefaultValue,
        env: &'static str,
    ) -> Self {
        Self {
            path,
            format,
            default,
            env,
            sensitive: false,
            required_when: None,
            max: None,
        }
    }

    #[must_use]
    pub const fn sensitive(self) -> Self {
        Self {
            sensitive: true,
            ..self
        }
    }

    #[must_use]
    pub const fn required_when(self, flag: &'static str) -> Self {
        Self {
            required_when: Some(flag),
            ..self
        }
    }

    #[must_use]
    pub const fn at_most(self, max: u64) -> Self {
        Self {
            max: Some(max),
            ..self
        }
    }

    /// Parse a raw environment string against the format and bound.
    pub fn parse_str(&self, raw: &str) -> Option<Value> {
        self.format.parse_str(raw).and_then(|value| self.within_bound(value))
    }

    /// Check a configuration document value against the format and bound.
    pub fn check(&self, value: &Value) -> Option<Value> {
        self.format.check(value).and_then(|value| self.within_bound(value))
    }

    pub fn expected(&self) -> String {
        match self.max {
            Some(max) => format!("{} no greater than {max}", self.format.expected()),
            None => self.format.expected(),
        }
    }

    fn within_bound(&self, value: Value) -> Option<Value> {
        match (self.max, value.as_u64()) {
            (Some(max), Some(n)) if n > max => None,
            _ => Some(value),
        }
    }

    /// Whether the resolved value counts as unset for a required leaf.
    pub fn is_blank(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// A static tree of option definitions.
#[derive(Debug, Clone, Copy)]
pub struct ConfigSchema {
    leaves: &'static [Leaf],
}

impl ConfigSchema {
    pub const fn new(leaves: &'static [Leaf]) -> Self {
        Self { leaves }
    }

    pub const fn leaves(&self) -> &'static [Leaf] {
        self.leaves
    }

    pub fn leaf(&self, path: &str) -> Option<&'static Leaf> {
        self.leaves.iter().find(|leaf| leaf.path == path)
    }

    /// True when `path` is an interior node, i.e. some leaf lives below it.
    pub fn is_branch(&self, path: &str) -> bool {
        self.leaves.iter().any(|leaf| {
            leaf.path
                .strip_prefix(path)
                .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    pub fn sensitive_leaves(&self) -> impl Iterator<Item = &'static Leaf> {
        self.leaves.iter().filter(|leaf| leaf.sensitive)
    }
}

/// Schema of the search service.
pub const SERVICE_SCHEMA: ConfigSchema = ConfigSchema::new(&[
    Leaf::new(
        "env",
        Format::OneOf(RuntimeEnv::VALUES),
        DefaultValue::Text("development"),
        "NODE_ENV",
    ),
    Leaf::new(
        "commit",
        Format::String,
        DefaultValue::Required,
        "OPENSHIFT_BUILD_COMMIT",
    ),
    Leaf::new("port", Format::Nat, DefaultValue::Integer(4000), "HTTP_PORT")
        .at_most(u16::MAX as u64),
    Leaf::new(
        "logging.level",
        Format::String,
        DefaultValue::Text("trace"),
        "LOG_LEVEL",
    ),
    Leaf::new(
        "logging.pretty",
        Format::Boolean,
        DefaultValue::Flag(false),
        "LOG_PRETTY",
    ),
    Leaf::new(
        "logging.cloudwatch.enabled",
        Format::Boolean,
        DefaultValue::Flag(false),
        "LOG_CW_ENABLED",
    ),
    Leaf::new(
        "logging.cloudwatch.prefix",
        Format::String,
        DefaultValue::Text("xjoin-search-"),
        "LOG_CW_PREFIX",
    ),
    Leaf::new(
        "logging.cloudwatch.intervalMs",
        Format::Number,
        DefaultValue::Integer(1000),
        "LOG_CW_INTERVAL_MS",
    ),
    Leaf::new(
        "logging.cloudwatch.key",
        Format::String,
        DefaultValue::Optional,
        "LOG_CW_KEY",
    )
    .required_when("logging.cloudwatch.enabled"),
    Leaf::new(
        "logging.cloudwatch.secret",
        Format::String,
        DefaultValue::Optional,
        "LOG_CW_SECRET",
    )
    .sensitive()
    .required_when("logging.cloudwatch.enabled"),
    Leaf::new(
        "logging.cloudwatch.region",
        Format::String,
        DefaultValue::Text("us-east-1"),
        "LOG_CW_REGION",
    ),
    Leaf::new(
        "es.nodes",
        Format::String,
        DefaultValue::Text("http://localhost:9200"),
        "ES_NODES",
    ),
    Leaf::new(
        "es.username",
        Format::String,
        DefaultValue::Text(""),
        "ES_USERNAME",
    ),
    Leaf::new(
        "es.password",
        Format::String,
        DefaultValue::Text(""),
        "ES_PASSWORD",
    )
    .sensitive(),
    Leaf::new(
        "metrics.prefix",
        Format::String,
        DefaultValue::Text("xjoin_search_"),
        "METRICS_PREFIX",
    ),
    Leaf::new(
        "queries.hosts.index",
        Format::String,
        DefaultValue::Text("test.hosts"),
        "HOSTS_INDEX",
    ),
]);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_nat_format() {
        assert_eq!(Format::Nat.parse_str("8080"), Some(json!(8080)));
        assert_eq!(Format::Nat.parse_str(" 0 "), Some(json!(0)));
        assert_eq!(Format::Nat.parse_str("-1"), None);
        assert_eq!(Format::Nat.parse_str("abc"), None);
        assert_eq!(Format::Nat.parse_str("1.5"), None);
        assert_eq!(Format::Nat.parse_str(""), None);
    }

    #[test]
    fn test_number_format() {
        assert_eq!(Format::Number.parse_str("250"), Some(json!(250)));
        assert_eq!(Format::Number.parse_str("-3"), Some(json!(-3)));
        assert_eq!(Format::Number.parse_str("0.5"), Some(json!(0.5)));
        assert_eq!(Format::Number.parse_str("NaN"), None);
        assert_eq!(Format::Number.parse_str("soon"), None);
    }

    #[test]
    fn test_boolean_format() {
        for raw in ["true", "TRUE", "1", "yes", "on"] {
            assert_eq!(Format::Boolean.parse_str(raw), Some(json!(true)), "{raw}");
        }
        for raw in ["false", "False", "0", "no", "off"] {
            assert_eq!(Format::Boolean.parse_str(raw), Some(json!(false)), "{raw}");
        }
        assert_eq!(Format::Boolean.parse_str("maybe"), None);
    }

    #[test]
    fn test_one_of_format() {
        let format = Format::OneOf(RuntimeEnv::VALUES);
        assert_eq!(format.parse_str("test"), Some(json!("test")));
        assert_eq!(format.parse_str("staging"), None);
        assert_eq!(
            format.expected(),
            "one of [production, development, test]"
        );
    }

    #[test]
    fn test_check_document_values() {
        assert_eq!(Format::Nat.check(&json!(8080)), Some(json!(8080)));
        assert_eq!(Format::Nat.check(&json!("8080")), Some(json!(8080)));
        assert_eq!(Format::Nat.check(&json!(-1)), None);
        assert_eq!(Format::Boolean.check(&json!(true)), Some(json!(true)));
        assert_eq!(Format::String.check(&json!(5)), None);
        assert_eq!(Format::String.check(&json!("5")), Some(json!("5")));
        assert_eq!(Format::Number.check(&json!(1.25)), Some(json!(1.25)));
    }

    #[test]
    fn test_service_schema_is_consistent() {
        let mut paths = HashSet::new();
        let mut env_vars = HashSet::new();

        for leaf in SERVICE_SCHEMA.leaves() {
            assert!(paths.insert(leaf.path), "duplicate path {}", leaf.path);
            assert!(env_vars.insert(leaf.env), "duplicate env var {}", leaf.env);

            if let Some(flag) = leaf.required_when {
                let flag_leaf = SERVICE_SCHEMA.leaf(flag).unwrap();
                assert_eq!(flag_leaf.format, Format::Boolean);
            }

            match leaf.default.to_value() {
                None | Some(Value::Null) => {}
                Some(default) => assert!(
                    leaf.check(&default).is_some(),
                    "default of {} does not match its format",
                    leaf.path
                ),
            }
        }

        assert_eq!(SERVICE_SCHEMA.leaves().len(), 16);
    }

    #[test]
    fn test_service_schema_env_bindings() {
        let bindings: Vec<_> = SERVICE_SCHEMA
            .leaves()
            .iter()
            .map(|leaf| (leaf.path, leaf.env))
            .collect();

        assert_eq!(
            bindings,
            vec![
                ("env", "NODE_ENV"),
                ("commit", "OPENSHIFT_BUILD_COMMIT"),
                ("port", "HTTP_PORT"),
                ("logging.level", "LOG_LEVEL"),
                ("logging.pretty", "LOG_PRETTY"),
                ("logging.cloudwatch.enabled", "LOG_CW_ENABLED"),
                ("logging.cloudwatch.prefix", "LOG_CW_PREFIX"),
                ("logging.cloudwatch.intervalMs", "LOG_CW_INTERVAL_MS"),
                ("logging.cloudwatch.key", "LOG_CW_KEY"),
                ("logging.cloudwatch.secret", "LOG_CW_SECRET"),
                ("logging.cloudwatch.region", "LOG_CW_REGION"),
                ("es.nodes", "ES_NODES"),
                ("es.username", "ES_USERNAME"),
                ("es.password", "ES_PASSWORD"),
                ("metrics.prefix", "METRICS_PREFIX"),
                ("queries.hosts.index", "HOSTS_INDEX"),
            ]
        );
    }

    #[test]
    fn test_port_upper_bound() {
        let port = SERVICE_SCHEMA.leaf("port").unwrap();

        assert_eq!(port.parse_str("65535"), Some(json!(65535)));
        assert_eq!(port.parse_str("65536"), None);
        assert_eq!(port.check(&json!(70000)), None);
        assert_eq!(port.check(&json!("8080")), Some(json!(8080)));
        assert_eq!(port.expected(), "a non-negative integer no greater than 65535");
    }

    #[test]
    fn test_sensitive_leaves() {
        let sensitive: Vec<_> = SERVICE_SCHEMA.sensitive_leaves().map(|l| l.path).collect();
        assert_eq!(sensitive, vec!["logging.cloudwatch.secret", "es.password"]);
    }

    #[test]
    fn test_branch_detection() {
        assert!(SERVICE_SCHEMA.is_branch("logging"));
        assert!(SERVICE_SCHEMA.is_branch("logging.cloudwatch"));
        assert!(SERVICE_SCHEMA.is_branch("queries.hosts"));
        assert!(!SERVICE_SCHEMA.is_branch("logging.level"));
        assert!(!SERVICE_SCHEMA.is_branch("log"));
        assert!(SERVICE_SCHEMA.leaf("es.password").unwrap().sensitive);
    }
}
