//! Implementation of the `xjoin-search tags` command.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use tracing::debug;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::TagsArgs;
use crate::domain::models::{NormalizedTag, Tag};
use crate::services::format_tags;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct TagsOutput {
    pub tags: Vec<NormalizedTag>,
}

impl CommandOutput for TagsOutput {
    fn to_human(&self) -> String {
        serde_json::to_string_pretty(&self.tags).unwrap_or_default()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.tags).unwrap_or_default()
    }
}

/// Parse a JSON document of tags and format them. `null` counts as no tags.
pub fn format_document(input: &str) -> Result<Vec<NormalizedTag>> {
    let tags: Option<Vec<Tag>> =
        serde_json::from_str(input).context("Input is not a JSON array of tag records")?;
    Ok(format_tags(tags.as_deref()))
}

pub fn execute(args: &TagsArgs, json_mode: bool) -> Result<()> {
    let input = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read tags from stdin")?;
            buffer
        }
    };

    let tags = format_document(&input)?;
    debug!(count = tags.len(), "formatted tags");
    output(&TagsOutput { tags }, json_mode);
    Ok(())
}
