//! Configuration management infrastructure
//!
//! Schema-driven configuration:
//! - Declarative schema with per-leaf format, default and env binding
//! - Optional YAML document layered under the environment (figment)
//! - Strict validation of undeclared keys
//! - Redacted dump for diagnostics

pub mod loader;
pub mod schema;
pub mod value;

pub use loader::{load, ConfigError, ConfigLoader, Environment, Origin, Violation};
pub use schema::{ConfigSchema, DefaultValue, Format, Leaf, SERVICE_SCHEMA};
pub use value::ConfigValue;
