//! Implementation of the `xjoin-search config` command.

use anyhow::Result;
use serde::Serialize;

use crate::application::AppContext;
use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::ConfigValue;

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub config: ConfigValue,
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        self.config.to_sanitized_string()
    }

    fn to_json(&self) -> serde_json::Value {
        self.config.redacted()
    }
}

pub fn execute(ctx: &AppContext, json_mode: bool) -> Result<()> {
    output(
        &ConfigOutput {
            config: ctx.config().clone(),
        },
        json_mode,
    );
    Ok(())
}
