//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands, TagsArgs};

use crate::infrastructure::logging::SecretScrubber;

/// Print a failed command's error chain with secrets scrubbed.
pub fn handle_error(err: &anyhow::Error, scrubber: &SecretScrubber, json_mode: bool) {
    let message = scrubber.scrub(&format!("{err:#}"));
    if json_mode {
        let body = serde_json::json!({ "success": false, "error": message });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {message}");
    }
}
