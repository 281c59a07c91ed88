//! Deep Research: command-line and web entry point

use anyhow::Result;
use clap::Parser;
use deep_research::{
    cli::{self, Cli, Command},
    config, logging,
};
use owo_colors::OwoColorize;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".bold().red(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // Load configuration
    let mut settings = config::load(cli.config.as_deref())?;
    cli.apply(&mut settings);

    // Initialize logging
    logging::init(&settings.logging)?;
    info!("Starting Deep Research v{}", deep_research::VERSION);

    match cli.command() {
        Command::Ask(args) => cli::ask(&settings, args).await,
        Command::Serve(args) => {
            cli::serve(settings, args).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
