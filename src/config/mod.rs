//! Configuration module for the research agent
//!
//! Handles loading settings from YAML files and environment variables.
//! Settings are passed explicitly to every component; there is no global copy.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load settings from an explicit path, the environment, or the default locations.
///
/// A `.env` file in the working directory is read first, so its variables
/// take part in the environment overlay.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    if dotenvy::dotenv().is_ok() {
        info!("Loaded environment from .env");
    }

    if let Some(path) = explicit {
        info!("Loading settings from: {}", path.display());
        return from_path(path);
    }

    if let Ok(path) = std::env::var("RESEARCH_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            return from_path(&path);
        }
    }

    for path in default_paths().iter() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            return from_path(path);
        }
    }

    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}

fn from_path(path: &Path) -> Result<Settings> {
    let mut settings = Settings::from_file(path)?;
    settings.merge_env();
    Ok(settings)
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("research.yml"),
        PathBuf::from("config/research.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("deep-research/research.yml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "general:\n  app_name: Test Desk\nstorage:\n  results_dir: /tmp/out").unwrap();

        let settings = load(Some(file.path())).unwrap();
        assert_eq!(settings.general.app_name, "Test Desk");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load(Some(Path::new("/nonexistent/research.yml")));
        assert!(result.is_err());
    }
}
