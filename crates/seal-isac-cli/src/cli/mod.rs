//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use std::process::ExitCode;

use crate::config::Config;
use crate::logging;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Flags and environment first, then the config file
    let config = Config::load()?;
    let ctx = commands::Context {
        api_key: cli.api_key.or(config.api_key),
        identity: cli.identity.or(config.identity),
        host: cli.host.or(config.host),
        output_format: cli.output.unwrap_or(OutputFormat::Pretty),
    };

    match cli.command {
        Commands::BlockUrl(args) => commands::block::execute(ctx, args).await,
        Commands::UnblockUrl(args) => commands::unblock::execute(ctx, args).await,
        Commands::AllowUrl(args) => commands::allow::execute(ctx, args).await,
        Commands::UntrustUrl(args) => commands::untrust::execute(ctx, args).await,
        Commands::Status(args) => commands::status::execute(ctx, args).await,
    }
}
