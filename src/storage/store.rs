//! Persistent history store
//!
//! [`Store`] owns the loaded settings and history and writes them back to the
//! data directory after every mutation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::persistence::{load_json_or, save_json};
use crate::history::{History, HistoryError, reverse_lines};
use crate::models::settings::{clamp_max_history, clamp_poll_ms};
use crate::models::{ExportBundle, ImportPayload, Settings, string_members};
use crate::utils::get_data_dir;

const CONFIG_FILENAME: &str = "config.json";
const HISTORY_FILENAME: &str = "history.json";
const FAVORITES_FILENAME: &str = "favorites.json";
const LOG_FILENAME: &str = "copy2.log";

/// Default file name offered for exports
pub const DEFAULT_EXPORT_FILENAME: &str = "copy2_export.json";

/// Locations of the files inside the data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub config: PathBuf,
    pub history: PathBuf,
    pub favorites: PathBuf,
    pub log: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            config: data_dir.join(CONFIG_FILENAME),
            history: data_dir.join(HISTORY_FILENAME),
            favorites: data_dir.join(FAVORITES_FILENAME),
            log: data_dir.join(LOG_FILENAME),
            data_dir,
        }
    }

    /// Paths for the resolved per-user data directory
    pub fn resolve() -> Result<Self> {
        Ok(Self::new(get_data_dir()?))
    }
}

/// Partial settings change; `None` leaves a field as is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub max_history: Option<usize>,
    pub poll_ms: Option<u64>,
    pub session_only: Option<bool>,
    pub wrap_mode: Option<bool>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

pub struct Store {
    paths: DataPaths,
    settings: Settings,
    history: History,
    save_error: Option<String>,
}

impl Store {
    /// Load settings, history and favorites from `paths`
    ///
    /// Missing or corrupt files fall back to defaults. Non-string members of
    /// the history and favorites lists are skipped.
    pub fn open(paths: DataPaths) -> Self {
        let raw_settings = load_json_or(&paths.config, serde_json::Value::Null);
        let settings = Settings::from_value(&raw_settings);
        let items = load_string_list(&paths.history);
        let favorites = load_string_list(&paths.favorites);

        let history = History::from_parts(items, favorites, settings.max_history);
        debug!(
            items = history.len(),
            favorites = history.favorites().len(),
            data_dir = %paths.data_dir.display(),
            "loaded store"
        );

        Self { paths, settings, history, save_error: None }
    }

    /// Open the store in the resolved per-user data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(DataPaths::resolve()?))
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Write everything back to disk
    ///
    /// Settings are always written. History and favorites are skipped in
    /// session-only mode.
    pub fn persist(&self) -> Result<()> {
        save_json(&self.paths.config, &self.settings)?;
        if self.settings.session_only {
            return Ok(());
        }
        save_json(&self.paths.history, &self.history.to_vec())?;
        save_json(&self.paths.favorites, self.history.favorites())?;
        Ok(())
    }

    /// Error from the most recent failed save, cleared by reading it
    ///
    /// Mutators never fail because of disk errors: the in-memory change stands
    /// and the failure is logged and kept here for the UI to report.
    pub fn take_save_error(&mut self) -> Option<String> {
        self.save_error.take()
    }

    fn save(&mut self) {
        match self.persist() {
            Ok(()) => self.save_error = None,
            Err(e) => {
                let message = format!("{:#}", e);
                warn!(error = %message, "failed to save data");
                self.save_error = Some(message);
            }
        }
    }

    /// Record captured text; returns whether history changed
    pub fn record(&mut self, text: &str) -> bool {
        let changed = self.history.push(text);
        if changed {
            self.save();
        }
        changed
    }

    pub fn delete(&mut self, index: usize) -> Result<String, HistoryError> {
        let removed = self.history.remove(index)?;
        self.save();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.save();
    }

    pub fn toggle_favorite(&mut self, index: usize) -> Result<bool, HistoryError> {
        let favorite = self.history.toggle_favorite(index)?;
        self.save();
        Ok(favorite)
    }

    /// Apply a settings change, clamping values and resizing history
    pub fn update_settings(&mut self, update: SettingsUpdate) {
        if let Some(max_history) = update.max_history {
            self.settings.max_history = clamp_max_history(max_history);
            self.history.set_capacity(self.settings.max_history);
        }
        if let Some(poll_ms) = update.poll_ms {
            self.settings.poll_ms = clamp_poll_ms(poll_ms);
        }
        if let Some(session_only) = update.session_only {
            self.settings.session_only = session_only;
        }
        if let Some(wrap_mode) = update.wrap_mode {
            self.settings.wrap_mode = wrap_mode;
        }
        self.save();
    }

    /// Text to place on the clipboard for item `index`
    ///
    /// Reverse-lines mode is applied when enabled in settings.
    pub fn copy_text(&self, index: usize) -> Option<String> {
        let item = self.history.get(index)?;
        if self.settings.wrap_mode { Some(reverse_lines(item)) } else { Some(item.to_string()) }
    }

    /// Write an export bundle to `path`
    pub fn export_to(&self, path: &Path) -> Result<ExportBundle> {
        let bundle = ExportBundle::new(
            self.history.to_vec(),
            self.history.favorites().to_vec(),
            self.settings.clone(),
        );
        save_json(path, &bundle).with_context(|| format!("Export failed: {}", path.display()))?;
        info!(path = %path.display(), items = bundle.history.len(), "exported history");
        Ok(bundle)
    }

    /// Merge an export file into the current history
    pub fn import_from(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read import file {}", path.display()))?;
        let document: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse import file {}", path.display()))?;
        let payload = ImportPayload::from_value(&document)?;

        self.history.merge_import(payload.history, payload.favorites);
        self.save();
        info!(path = %path.display(), items = self.history.len(), "imported history");
        Ok(())
    }
}

fn load_string_list(path: &Path) -> Vec<String> {
    let raw = load_json_or(path, serde_json::Value::Null);
    string_members(&raw).unwrap_or_default()
}
