use crate::models::HISTORY_CAP;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;

/// One successfully searched topic.
///
/// Entries are never mutated after creation; the history sequence is only
/// prepended to and truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub topic: String,
    pub timestamp: DateTime<Utc>,
}

/// Persisted preference and history store.
///
/// Holds two independent values under the data directory, mirroring the two
/// browser-local storage keys of the original artifact:
/// - `study_history.json`: the JSON-serialized history sequence
///   (most-recent-first, capped at [`HISTORY_CAP`] entries)
/// - `dark_mode`: the dark-mode boolean in its string form
///
/// Loaded once at startup; every successful search and every theme toggle
/// writes through to disk. Malformed or missing history degrades silently to
/// an empty sequence - a persistence read error is never fatal.
#[derive(Debug)]
pub struct PreferenceStore {
    history_path: Utf8PathBuf,
    dark_mode_path: Utf8PathBuf,
    history: Vec<HistoryEntry>,
    dark_mode: bool,
}

impl PreferenceStore {
    /// Open the store, creating the data directory if needed and loading
    /// both persisted values.
    ///
    /// # Arguments
    /// * `data_dir` - Directory containing the persisted files
    pub fn open<P: AsRef<Utf8Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)
                .with_context(|| format!("Failed to create data directory: {}", data_dir))?;
        }

        let mut store = Self {
            history_path: data_dir.join("study_history.json"),
            dark_mode_path: data_dir.join("dark_mode"),
            history: Vec::new(),
            dark_mode: false,
        };
        store.load();
        Ok(store)
    }

    /// Re-read both keys from disk.
    ///
    /// Missing or unparsable history yields an empty sequence; a missing
    /// dark-mode flag yields `false`. Neither case raises.
    pub fn load(&mut self) {
        self.history = self.load_history();
        self.dark_mode = self.load_dark_mode();
        tracing::info!(
            entries = self.history.len(),
            dark_mode = self.dark_mode,
            "Loaded preference store"
        );
    }

    fn load_history(&self) -> Vec<HistoryEntry> {
        if !self.history_path.exists() {
            return Vec::new();
        }

        let contents = match fs::read_to_string(&self.history_path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Failed to read history file {}: {}", self.history_path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&contents) {
            Ok(mut entries) => {
                // Enforce the cap even if a hand-edited file exceeds it
                entries.truncate(HISTORY_CAP);
                entries
            }
            Err(e) => {
                tracing::warn!(
                    "Malformed history in {}, starting empty: {}",
                    self.history_path,
                    e
                );
                Vec::new()
            }
        }
    }

    fn load_dark_mode(&self) -> bool {
        match fs::read_to_string(&self.dark_mode_path) {
            Ok(contents) => contents.trim() == "true",
            Err(_) => false,
        }
    }

    /// The history sequence, most recent first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Current dark-mode preference.
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Record a successfully searched topic.
    ///
    /// Prepends an entry stamped now, truncates to the [`HISTORY_CAP`] most
    /// recent entries, and persists the full sequence (overwrite, not
    /// append).
    pub fn record_topic(&mut self, topic: &str) -> Result<()> {
        self.history.insert(
            0,
            HistoryEntry {
                topic: topic.to_string(),
                timestamp: Utc::now(),
            },
        );
        self.history.truncate(HISTORY_CAP);
        self.save_history()
    }

    /// Update the dark-mode preference and persist its string form.
    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<()> {
        self.dark_mode = enabled;
        fs::write(&self.dark_mode_path, if enabled { "true" } else { "false" })
            .with_context(|| format!("Failed to write dark mode flag: {}", self.dark_mode_path))?;
        tracing::debug!(enabled, "Saved dark mode preference");
        Ok(())
    }

    /// Topic string of the history entry at `index`, for prefilling the next
    /// query. Does not itself trigger a request.
    pub fn select_topic(&self, index: usize) -> Option<&str> {
        self.history.get(index).map(|entry| entry.topic.as_str())
    }

    fn save_history(&self) -> Result<()> {
        let json = serde_json::to_string(&self.history)
            .context("Failed to serialize history to JSON")?;

        fs::write(&self.history_path, json)
            .with_context(|| format!("Failed to write history: {}", self.history_path))?;

        tracing::debug!(entries = self.history.len(), "Saved search history");
        Ok(())
    }
}
