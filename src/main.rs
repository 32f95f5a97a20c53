//! xjoin-search CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use xjoin_search::application::AppContext;
use xjoin_search::cli::{commands, handle_error, Cli, Commands};
use xjoin_search::infrastructure::config::{Environment, SERVICE_SCHEMA};
use xjoin_search::infrastructure::logging::{LoggerImpl, SecretScrubber};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let env = Environment::from_process();
    let scrubber = SecretScrubber::for_environment(&SERVICE_SCHEMA, &env);

    let result = match &cli.command {
        Commands::Config => {
            bootstrap(&cli, &env).and_then(|ctx| commands::config::execute(&ctx, cli.json))
        }
        Commands::Check => {
            bootstrap(&cli, &env).and_then(|ctx| commands::check::execute(&ctx, cli.json))
        }
        Commands::Tags(args) => commands::tags::execute(args, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            handle_error(&err, &scrubber, cli.json);
            ExitCode::FAILURE
        }
    }
}

fn bootstrap(cli: &Cli, env: &Environment) -> Result<AppContext> {
    let ctx = AppContext::bootstrap(env, &cli.bootstrap_options())?;
    LoggerImpl::init(&ctx.log_config())?;
    ctx.log_startup();
    Ok(ctx)
}
