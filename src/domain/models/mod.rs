pub mod config;
pub mod tag;

pub use config::{
    CloudWatchSettings, EntityQuerySettings, LoggingSettings, MetricsSettings, QuerySettings,
    RuntimeEnv, SearchIndexSettings, Secret, Settings, REDACTED_VALUE,
};
pub use tag::{Namespace, NormalizedTag, Tag, NAMESPACE_NULL_VALUE};
