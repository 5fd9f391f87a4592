//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Builder for creating a populated copy2 data directory
pub struct DataDirBuilder {
    temp_dir: TempDir,
}

impl DataDirBuilder {
    /// Create a new builder with an empty data directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write history.json with the given items, oldest first
    pub fn with_history(self, items: &[&str]) -> Self {
        self.write_json("history.json", &serde_json::json!(items))
    }

    /// Write favorites.json with the given items
    pub fn with_favorites(self, items: &[&str]) -> Self {
        self.write_json("favorites.json", &serde_json::json!(items))
    }

    /// Write config.json verbatim
    pub fn with_config(self, config: serde_json::Value) -> Self {
        self.write_json("config.json", &config)
    }

    /// Write an arbitrary file into the data directory
    pub fn with_file(self, name: &str, content: &str) -> Self {
        fs::write(self.temp_dir.path().join(name), content).expect("Failed to write file");
        self
    }

    fn write_json(self, name: &str, value: &serde_json::Value) -> Self {
        let content = serde_json::to_string_pretty(value).expect("Failed to serialize");
        self.with_file(name, &content)
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `copy2` command pointed at `data_dir`
pub fn copy2_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_copy2"));
    cmd.env("COPY2_DATA_DIR", data_dir).env_remove("COPY2_LOG");
    cmd
}

/// Read a JSON string list from the data directory
pub fn read_list(data_dir: &Path, name: &str) -> Vec<String> {
    let content = fs::read_to_string(data_dir.join(name)).expect("Failed to read list file");
    serde_json::from_str(&content).expect("Failed to parse list file")
}

/// Read a JSON document from an arbitrary path
pub fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read json file");
    serde_json::from_str(&content).expect("Failed to parse json file")
}
