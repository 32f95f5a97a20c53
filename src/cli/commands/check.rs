//! Implementation of the `xjoin-search check` command.

use anyhow::Result;
use serde::Serialize;

use crate::application::AppContext;
use crate::cli::output::{output, CommandOutput};

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub valid: bool,
    pub env: String,
    pub commit: String,
    pub port: u16,
    pub search_nodes: Vec<String>,
    pub hosts_index: String,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        format!(
            "Configuration OK\n  env:          {}\n  commit:       {}\n  port:         {}\n  search nodes: {}\n  hosts index:  {}",
            self.env,
            self.commit,
            self.port,
            self.search_nodes.join(", "),
            self.hosts_index
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl From<&AppContext> for CheckOutput {
    fn from(ctx: &AppContext) -> Self {
        let settings = ctx.settings();
        Self {
            valid: true,
            env: settings.env.to_string(),
            commit: settings.commit.clone(),
            port: settings.port,
            search_nodes: settings.es.node_list().into_iter().map(String::from).collect(),
            hosts_index: settings.queries.hosts.index.clone(),
        }
    }
}

pub fn execute(ctx: &AppContext, json_mode: bool) -> Result<()> {
    output(&CheckOutput::from(ctx), json_mode);
    Ok(())
}
