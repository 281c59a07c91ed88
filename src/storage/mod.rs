//! Saving findings and drafts to disk
//!
//! Findings go to `<results_dir>/research/<name>_<timestamp>.json`, drafts to
//! `<results_dir>/drafts/<name>_<timestamp>.md`, where `<name>` is derived
//! from the query by `safe_query_name`.

use crate::results::Finding;
use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Longest query prefix used in a file name, in characters
pub const MAX_NAME_CHARS: usize = 50;

/// Contents of a saved findings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResearch {
    pub query: String,
    pub timestamp: String,
    pub results: Vec<Finding>,
}

/// A findings file on disk, for listings
#[derive(Debug, Clone, Serialize)]
pub struct SavedResearchEntry {
    pub path: PathBuf,
    pub query: String,
    pub timestamp: String,
    pub finding_count: usize,
}

/// Where one run's output landed. A path is `None` when that write failed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SavedPaths {
    pub research_file: Option<PathBuf>,
    pub draft_file: Option<PathBuf>,
}

/// Directory layout for saved output
#[derive(Debug, Clone)]
pub struct ResultsStore {
    root: PathBuf,
}

impl ResultsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn research_dir(&self) -> PathBuf {
        self.root.join("research")
    }

    pub fn drafts_dir(&self) -> PathBuf {
        self.root.join("drafts")
    }

    /// Create the output directories
    pub fn init(&self) -> Result<()> {
        for dir in [self.research_dir(), self.drafts_dir()] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Cannot create {}", dir.display()))?;
        }
        Ok(())
    }

    /// Write findings as pretty JSON `{query, timestamp, results}`
    pub fn save_research_results(
        &self,
        findings: &[Finding],
        query: &str,
        timestamp: &str,
    ) -> Result<PathBuf> {
        let path = self
            .research_dir()
            .join(format!("{}_{}.json", safe_query_name(query), timestamp));

        let data = SavedResearch {
            query: query.to_string(),
            timestamp: timestamp.to_string(),
            results: findings.to_vec(),
        };

        let json = serde_json::to_string_pretty(&data)?;
        fs::write(&path, json).with_context(|| format!("Cannot write {}", path.display()))?;

        info!("Research results saved to {}", path.display());
        Ok(path)
    }

    /// Write the draft as Markdown under a heading and a generation line
    pub fn save_draft(&self, draft: &str, query: &str, timestamp: &str) -> Result<PathBuf> {
        let path = self
            .drafts_dir()
            .join(format!("{}_{}.md", safe_query_name(query), timestamp));

        let generated = Local::now().format("%Y-%m-%d %H:%M:%S");
        let content = format!("# {}\n\n*Generated on {}*\n\n{}", query, generated, draft);
        fs::write(&path, content).with_context(|| format!("Cannot write {}", path.display()))?;

        info!("Draft saved to {}", path.display());
        Ok(path)
    }

    /// Save both outputs of a run under one timestamp.
    ///
    /// Write failures are logged and reported as a missing path; they never
    /// fail the run that produced the output.
    pub fn save_run(&self, query: &str, findings: &[Finding], draft: &str) -> SavedPaths {
        let timestamp = timestamp();
        let research_file = self
            .save_research_results(findings, query, &timestamp)
            .map_err(|e| error!("Error saving research results: {:#}", e))
            .ok();
        let draft_file = self
            .save_draft(draft, query, &timestamp)
            .map_err(|e| error!("Error saving draft: {:#}", e))
            .ok();

        SavedPaths {
            research_file,
            draft_file,
        }
    }

    /// Read a findings file back
    pub fn load_research_results(&self, path: &Path) -> Result<SavedResearch> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
        let data = serde_json::from_str(&content)
            .with_context(|| format!("Invalid research file {}", path.display()))?;
        info!("Research results loaded from {}", path.display());
        Ok(data)
    }

    /// Saved findings files, newest first. Unreadable files are skipped.
    pub fn list_research(&self) -> Result<Vec<SavedResearchEntry>> {
        let dir = self.research_dir();
        if !dir.exists() {
            return Ok(vec![]);
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.load_research_results(&path) {
                Ok(saved) => entries.push(SavedResearchEntry {
                    path,
                    query: saved.query,
                    timestamp: saved.timestamp,
                    finding_count: saved.results.len(),
                }),
                Err(e) => warn!("Skipping {}: {:#}", path.display(), e),
            }
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}

/// Current local time as `YYYYmmdd_HHMMSS`
pub fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// File-name-safe form of a query: every non-alphanumeric character becomes
/// `_`, and the result is cut to 50 characters.
pub fn safe_query_name(query: &str) -> String {
    query
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .take(MAX_NAME_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(content: &str) -> Finding {
        Finding {
            title: "T".to_string(),
            content: content.to_string(),
            source_url: "https://s.example".to_string(),
            source_title: "S".to_string(),
        }
    }

    #[test]
    fn test_safe_query_name() {
        assert_eq!(safe_query_name("climate change?"), "climate_change_");
        assert_eq!(safe_query_name("a/b\\c:d"), "a_b_c_d");
        assert_eq!(safe_query_name("émigré 2024"), "émigré_2024");

        let long = "x".repeat(80);
        assert_eq!(safe_query_name(&long).chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(&ts[8..9], "_");
        assert!(ts.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_init_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::new(dir.path().join("out"));
        store.init().unwrap();

        assert!(store.research_dir().is_dir());
        assert!(store.drafts_dir().is_dir());
    }

    #[test]
    fn test_save_and_load_research() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::new(dir.path());
        store.init().unwrap();

        let findings = vec![finding("one"), finding("two")];
        let path = store
            .save_research_results(&findings, "sea ice?", "20240101_120000")
            .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "sea_ice__20240101_120000.json"
        );

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["query"], "sea ice?");
        assert_eq!(raw["timestamp"], "20240101_120000");
        assert_eq!(raw["results"][1]["content"], "two");

        let loaded = store.load_research_results(&path).unwrap();
        assert_eq!(loaded.results, findings);
    }

    #[test]
    fn test_save_draft_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::new(dir.path());
        store.init().unwrap();

        let path = store
            .save_draft("Body text", "sea ice", "20240101_120000")
            .unwrap();
        assert!(path.ends_with("drafts/sea_ice_20240101_120000.md"));

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("# sea ice"));
        assert_eq!(lines.next(), Some(""));
        assert!(lines.next().unwrap().starts_with("*Generated on "));
        assert!(content.ends_with("\n\nBody text"));
    }

    #[test]
    fn test_save_without_init_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::new(dir.path().join("missing"));
        assert!(store.save_draft("x", "q", "20240101_120000").is_err());
    }

    #[test]
    fn test_save_run_reports_failures_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::new(dir.path());
        let missing = store.save_run("q", &[finding("a")], "draft");
        assert!(missing.research_file.is_none());
        assert!(missing.draft_file.is_none());

        store.init().unwrap();
        let saved = store.save_run("q", &[finding("a")], "draft");
        assert!(saved.research_file.unwrap().is_file());
        assert!(saved.draft_file.unwrap().is_file());
    }

    #[test]
    fn test_list_research_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::new(dir.path());
        assert!(store.list_research().unwrap().is_empty());

        store.init().unwrap();
        store
            .save_research_results(&[finding("a")], "old", "20230101_000000")
            .unwrap();
        store
            .save_research_results(&[finding("a"), finding("b")], "new", "20240101_000000")
            .unwrap();
        fs::write(store.research_dir().join("broken.json"), "{").unwrap();

        let entries = store.list_research().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].query, "new");
        assert_eq!(entries[0].finding_count, 2);
        assert_eq!(entries[1].query, "old");
    }
}
