//! Command-line front end
//!
//! `ask` runs one query in the terminal, `serve` starts the web interface.
//! With no subcommand, `ask` runs and prompts for the query.

pub mod display;

use crate::config::Settings;
use crate::logging::timestamped_log_file;
use crate::storage::{ResultsStore, SavedPaths};
use crate::web::{create_router, AppState};
use crate::workflow::ResearchWorkflow;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

/// Deep Research AI Agent System
#[derive(Parser, Debug)]
#[command(name = "deep-research", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a research.yml settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `deep_research=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also write logs to a timestamped file in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Research a query and print the findings and answer
    Ask(AskArgs),
    /// Serve the web interface
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub struct AskArgs {
    /// Research query to process (prompted for when omitted)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Save research results and draft
    #[arg(short, long)]
    pub save: bool,
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl Cli {
    /// Apply global flags on top of loaded settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(ref level) = self.log_level {
            settings.logging.level = level.clone();
        }
        if let Some(ref dir) = self.log_dir {
            settings.logging.file = Some(timestamped_log_file(dir));
        }
    }

    /// The subcommand to run, `ask` when none was given
    pub fn command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Ask(AskArgs::default()))
    }
}

impl ServeArgs {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(ref bind) = self.bind {
            settings.server.bind_address = bind.clone();
        }
    }
}

/// Run one query in the terminal
pub async fn ask(settings: &Settings, args: AskArgs) -> Result<ExitCode> {
    display::welcome(&settings.general.app_name);

    let query = match args.query {
        Some(query) => query,
        None => display::prompt_query()?,
    };
    let query = query.trim();
    if query.is_empty() {
        display::failure("No query provided. Exiting.");
        return Ok(ExitCode::FAILURE);
    }

    settings.validate()?;
    let workflow = ResearchWorkflow::from_settings(settings)?;

    let spinner = display::spinner("Running research workflow...");
    let (findings, draft) = match workflow.run(query).await {
        Ok(output) => {
            display::spinner_done(&spinner, true);
            output
        }
        Err(e) => {
            display::spinner_done(&spinner, false);
            display::failure(&format!("Error running research workflow: {}", e));
            error!("Error in research workflow: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let saved = if args.save {
        let store = ResultsStore::new(&settings.storage.results_dir);
        store.init()?;
        store.save_run(query, &findings, &draft)
    } else {
        SavedPaths::default()
    };

    display::results(&findings, &draft, &saved);
    Ok(ExitCode::SUCCESS)
}

/// Start the web server and run until it stops
pub async fn serve(mut settings: Settings, args: ServeArgs) -> Result<()> {
    args.apply(&mut settings);
    settings.validate()?;

    let store = ResultsStore::new(&settings.storage.results_dir);
    store.init()?;
    info!("Saving results under {}", store.root().display());

    if settings.uses_mock_search() {
        warn!("No search API key configured, searches will return mock results");
    }

    let workflow = ResearchWorkflow::from_settings(&settings)?;

    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    let state = AppState::new(settings, workflow)?;
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
