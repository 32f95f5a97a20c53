//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across multiple integration test files.

use xjoin_search::infrastructure::config::SERVICE_SCHEMA;

/// Every environment variable bound by the service schema.
#[allow(dead_code)]
pub fn schema_env_vars() -> Vec<&'static str> {
    SERVICE_SCHEMA.leaves().iter().map(|leaf| leaf.env).collect()
}

/// `temp-env` assignment list: all schema variables unset except `set`.
#[allow(dead_code)]
pub fn isolated_vars(set: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
    schema_env_vars()
        .into_iter()
        .map(|var| {
            let value = set
                .iter()
                .find(|(name, _)| *name == var)
                .map(|(_, value)| *value);
            (var, value)
        })
        .collect()
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
