//! Process startup: load the configuration once and hand it out explicitly.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::domain::models::Settings;
use crate::infrastructure::config::{ConfigLoader, ConfigValue, Environment, SERVICE_SCHEMA};
use crate::infrastructure::logging::{LogConfig, SecretScrubber};

/// Inputs to [`AppContext::bootstrap`] besides the environment.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    /// Optional YAML configuration document
    pub config_file: Option<PathBuf>,
    /// Reject undeclared keys in the document
    pub strict: bool,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            config_file: None,
            strict: true,
        }
    }
}

/// Validated configuration shared by every component of the process.
///
/// Built once; components receive it (or the `Arc<Settings>`) as an
/// argument rather than looking it up globally.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ConfigValue,
    settings: Arc<Settings>,
    scrubber: SecretScrubber,
}

impl AppContext {
    /// Load and validate the configuration. Any violation aborts startup.
    pub fn bootstrap(env: &Environment, options: &BootstrapOptions) -> Result<Self> {
        let mut loader = ConfigLoader::new(&SERVICE_SCHEMA).strict(options.strict);
        if let Some(path) = &options.config_file {
            loader = loader
                .with_file(path)
                .with_context(|| format!("Failed to open config file {}", path.display()))?;
        }

        let (config, settings) = loader
            .load_settings(env)
            .context("Failed to load configuration")?;
        let scrubber = SecretScrubber::for_config(&config);

        Ok(Self {
            config,
            settings: Arc::new(settings),
            scrubber,
        })
    }

    pub const fn config(&self) -> &ConfigValue {
        &self.config
    }

    pub fn settings(&self) -> Arc<Settings> {
        Arc::clone(&self.settings)
    }

    pub const fn scrubber(&self) -> &SecretScrubber {
        &self.scrubber
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig::from(&self.settings.logging)
    }

    /// Emit the redacted configuration for audit purposes.
    pub fn log_startup(&self) {
        info!(
            env = %self.settings.env,
            commit = %self.settings.commit,
            port = self.settings.port,
            config = %self.config,
            "configuration loaded"
        );
    }
}
