//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::BootstrapOptions;

#[derive(Parser, Debug)]
#[command(name = "xjoin-search")]
#[command(about = "xjoin search configuration and tag tooling", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// YAML configuration document layered under the environment
    #[arg(long, global = true, env = "XJOIN_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Accept document keys the configuration schema does not declare
    #[arg(long, global = true)]
    pub lenient: bool,
}

impl Cli {
    pub fn bootstrap_options(&self) -> BootstrapOptions {
        BootstrapOptions {
            config_file: self.config_file.clone(),
            strict: !self.lenient,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the configuration with sensitive values redacted
    Config,

    /// Validate the configuration and exit
    Check,

    /// Normalize a JSON array of tag records
    Tags(TagsArgs),
}

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Read tags from this file instead of stdin
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,
}
