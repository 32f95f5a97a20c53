//! xjoin-search core
//!
//! Configuration bootstrapping and tag formatting for the xjoin search
//! service. The HTTP layer, search-index client, metrics and log shipping
//! consume what this crate produces.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): typed settings and the tag record model
//! - **Application Layer** (`application`): one-time startup context
//! - **Service Layer** (`services`): tag namespace normalization
//! - **Infrastructure Layer** (`infrastructure`): schema-driven config loading, logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use xjoin_search::application::{AppContext, BootstrapOptions};
//! use xjoin_search::infrastructure::config::Environment;
//!
//! fn main() -> anyhow::Result<()> {
//!     let ctx = AppContext::bootstrap(&Environment::from_process(), &BootstrapOptions::default())?;
//!     println!("{}", ctx.config());
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{AppContext, BootstrapOptions};
pub use domain::models::{
    Namespace, NormalizedTag, RuntimeEnv, Secret, Settings, Tag, NAMESPACE_NULL_VALUE,
    REDACTED_VALUE,
};
pub use infrastructure::config::{
    ConfigError, ConfigLoader, ConfigSchema, ConfigValue, Environment, Violation, SERVICE_SCHEMA,
};
pub use services::{format_tags, normalize};
