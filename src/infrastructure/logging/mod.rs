//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty formatting driven by configuration
//! - `RUST_LOG` overrides on top of the configured level
//! - Secret scrubbing for text that leaves the process

pub mod config;
pub mod logger;
pub mod secret_scrubbing;

pub use config::{LogConfig, LogFormat};
pub use logger::{parse_log_level, LoggerImpl};
pub use secret_scrubbing::SecretScrubber;
