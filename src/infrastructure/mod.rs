//! Infrastructure layer module
//!
//! Adapters around the process environment:
//! - Schema-driven configuration loading
//! - Logging and secret scrubbing

pub mod config;
pub mod logging;
