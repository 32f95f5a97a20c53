use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Placeholder written in place of every sensitive value.
pub const REDACTED_VALUE: &str = "[Sensitive]";

/// Typed view of the realized service configuration.
///
/// Built once at startup from a validated `ConfigValue` and handed to the
/// components that need it. Field names mirror the configuration tree, so
/// the camelCase keys of the tree are renamed where they differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Runtime environment selector
    pub env: RuntimeEnv,

    /// Build or commit identifier of the running image
    pub commit: String,

    /// HTTP listen port
    pub port: u16,

    /// Logging configuration
    pub logging: LoggingSettings,

    /// Search index connection settings
    pub es: SearchIndexSettings,

    /// Metrics naming
    pub metrics: MetricsSettings,

    /// Index names per queryable entity type
    pub queries: QuerySettings,
}

/// Runtime environment selector (`NODE_ENV`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnv {
    Production,
    Development,
    Test,
}

impl RuntimeEnv {
    /// All accepted spellings, in schema order.
    pub const VALUES: &'static [&'static str] = &["production", "development", "test"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
        }
    }

    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for RuntimeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Human-readable output instead of JSON lines
    pub pretty: bool,

    /// Log shipping sink
    pub cloudwatch: CloudWatchSettings,
}

/// Log shipping sink configuration.
///
/// The shipper itself lives outside this crate; these values are carried
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudWatchSettings {
    pub enabled: bool,

    /// Log group/stream name prefix
    pub prefix: String,

    /// Flush interval in milliseconds
    #[serde(rename = "intervalMs")]
    pub interval_ms: f64,

    /// Access key id
    pub key: Option<String>,

    /// Secret access key
    pub secret: Option<Secret>,

    pub region: String,
}

impl CloudWatchSettings {
    /// Flush interval as a `Duration`, `None` when negative or not finite.
    pub fn flush_interval(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.interval_ms / 1000.0).ok()
    }
}

/// Search index connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIndexSettings {
    /// Comma-separated list of node URLs
    pub nodes: String,

    pub username: String,

    pub password: Secret,
}

impl SearchIndexSettings {
    /// Individual node URLs with surrounding whitespace and empty entries removed.
    pub fn node_list(&self) -> Vec<&str> {
        self.nodes
            .split(',')
            .map(str::trim)
            .filter(|node| !node.is_empty())
            .collect()
    }

    /// Whether basic auth credentials should be sent to the index.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}

/// Metrics naming
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSettings {
    /// Prefix prepended to every metric name
    pub prefix: String,
}

/// Index names per queryable entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySettings {
    pub hosts: EntityQuerySettings,
}

/// Backing index of one entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityQuerySettings {
    pub index: String,
}

/// A string value that is never printed.
///
/// `Debug`, `Display` and `Serialize` all emit [`REDACTED_VALUE`]; the
/// value is only reachable through [`Secret::expose`].
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({REDACTED_VALUE})")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED_VALUE)
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Settings {
        Settings {
            env: RuntimeEnv::Development,
            commit: "abc123".to_string(),
            port: 4000,
            logging: LoggingSettings {
                level: "info".to_string(),
                pretty: false,
                cloudwatch: CloudWatchSettings {
                    enabled: true,
                    prefix: "xjoin-search-".to_string(),
                    interval_ms: 1500.0,
                    key: Some("AKIAEXAMPLE".to_string()),
                    secret: Some(Secret::new("cw-secret-value")),
                    region: "us-east-1".to_string(),
                },
            },
            es: SearchIndexSettings {
                nodes: "http://es-1:9200, http://es-2:9200,".to_string(),
                username: "elastic".to_string(),
                password: Secret::new("s3cr3t"),
            },
            metrics: MetricsSettings {
                prefix: "xjoin_search_".to_string(),
            },
            queries: QuerySettings {
                hosts: EntityQuerySettings {
                    index: "test.hosts".to_string(),
                },
            },
        }
    }

    #[test]
    fn test_secret_never_printed() {
        let settings = sample();
        let debug = format!("{settings:?}");
        let json = serde_json::to_string(&settings).unwrap();

        for rendered in [&debug, &json] {
            assert!(!rendered.contains("s3cr3t"));
            assert!(!rendered.contains("cw-secret-value"));
            assert!(rendered.contains(REDACTED_VALUE));
        }
        assert_eq!(settings.es.password.expose(), "s3cr3t");
        assert_eq!(settings.es.password.to_string(), REDACTED_VALUE);
    }

    #[test]
    fn test_node_list() {
        let settings = sample();
        assert_eq!(
            settings.es.node_list(),
            vec!["http://es-1:9200", "http://es-2:9200"]
        );
        assert!(settings.es.has_credentials());
    }

    #[test]
    fn test_flush_interval() {
        let mut cloudwatch = sample().logging.cloudwatch;
        assert_eq!(cloudwatch.flush_interval(), Some(Duration::from_millis(1500)));

        cloudwatch.interval_ms = -1.0;
        assert_eq!(cloudwatch.flush_interval(), None);
    }

    #[test]
    fn test_runtime_env_serde() {
        let env: RuntimeEnv = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(env, RuntimeEnv::Production);
        assert!(env.is_production());
        assert!(serde_json::from_str::<RuntimeEnv>("\"staging\"").is_err());
        assert_eq!(RuntimeEnv::Test.to_string(), "test");
    }
}
