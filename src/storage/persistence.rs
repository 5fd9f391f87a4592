//! JSON persistence: tolerant loads and atomic writes

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Load JSON from `path`, returning `default` if the file is missing or unreadable
///
/// A file that exists but fails to parse is logged and treated as missing.
pub fn load_json_or<T: DeserializeOwned>(path: &Path, default: T) -> T {
    match load_json(path) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(e) => {
            warn!(path = %path.display(), error = %format!("{:#}", e), "ignoring unreadable data file");
            default
        }
    }
}

/// Load JSON from `path`; `Ok(None)` when the file does not exist
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;
    Ok(Some(value))
}

/// Write `value` as pretty JSON atomically (temp file + rename)
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;

    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid file path: {}", path.display()))?
        .to_string_lossy();
    let temp_path = path.with_file_name(format!("{}.tmp", file_name));

    fs::write(&temp_path, json)
        .with_context(|| format!("Failed to write temp file {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let value: Vec<String> = load_json_or(&dir.path().join("missing.json"), vec!["d".into()]);
        assert_eq!(value, vec!["d".to_string()]);
    }

    #[test]
    fn test_load_corrupt_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{not json").unwrap();

        let value: Vec<String> = load_json_or(&path, Vec::new());
        assert!(value.is_empty());
        assert!(load_json::<Vec<String>>(&path).is_err());
    }

    #[test]
    fn test_save_creates_parent_and_no_temp_left() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("favorites.json");

        save_json(&path, &vec!["a", "b"]).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("nested").join("favorites.json.tmp").exists());
        let loaded: Option<Vec<String>> = load_json(&path).unwrap();
        assert_eq!(loaded, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_save_keeps_non_ascii_readable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        save_json(&path, &vec!["héllo 世界"]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("héllo 世界"));
        assert!(raw.contains('\n'), "output should be pretty-printed");
    }
}
