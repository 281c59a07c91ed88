//! Tracing subscriber setup

use crate::config::LoggingSettings;
use anyhow::Result;
use chrono::Local;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter: `RUST_LOG` wins, then the configured level.
/// HTTP plumbing is held at `warn`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},hyper=warn,reqwest=warn,h2=warn", level))
    })
}

/// Install the global subscriber: stdout, plus a plain-text file when configured
pub fn init(settings: &LoggingSettings) -> Result<()> {
    let file_layer = match settings.file {
        Some(ref path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            let file = File::options().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter(&settings.level))
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Logging already initialized: {}", e))?;

    tracing::info!("Logging configured successfully");
    Ok(())
}

/// `<dir>/research_agent_<timestamp>.log`
pub fn timestamped_log_file(dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("research_agent_{}.log", timestamp))
}
