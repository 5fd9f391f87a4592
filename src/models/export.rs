use anyhow::{Result, bail};
use chrono::Local;
use serde::{Deserialize, Serialize};

use super::settings::Settings;

/// Timestamp format used in exports and status messages
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Full snapshot written by `export`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub exported_at: String,
    pub history: Vec<String>,
    pub favorites: Vec<String>,
    pub settings: Settings,
}

impl ExportBundle {
    pub fn new(history: Vec<String>, favorites: Vec<String>, settings: Settings) -> Self {
        Self { exported_at: now_timestamp(), history, favorites, settings }
    }
}

/// Lists recovered from an import document
///
/// `None` means the document had no usable list under that key, which leaves
/// the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPayload {
    pub history: Option<Vec<String>>,
    pub favorites: Option<Vec<String>>,
}

impl ImportPayload {
    /// Extract history and favorites from a JSON document
    ///
    /// Only arrays are accepted for either key and non-string members are skipped.
    /// Settings carried by the document are ignored.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let Some(map) = value.as_object() else {
            bail!("Import file must contain a JSON object");
        };

        Ok(Self {
            history: map.get("history").and_then(string_members),
            favorites: map.get("favorites").and_then(string_members),
        })
    }
}

/// String members of a JSON array; `None` when `value` is not an array
pub fn string_members(value: &serde_json::Value) -> Option<Vec<String>> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
}

/// Current local time as `YYYY-MM-DD HH:MM:SS`
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_import_payload_full() {
        let doc = json!({"history": ["a", "b"], "favorites": ["b"]});
        let payload = ImportPayload::from_value(&doc).unwrap();
        assert_eq!(payload.history, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(payload.favorites, Some(vec!["b".to_string()]));
    }

    #[test]
    fn test_import_payload_skips_non_strings() {
        let doc = json!({"history": ["a", 1, null, {"x": 1}, "b"], "favorites": [true]});
        let payload = ImportPayload::from_value(&doc).unwrap();
        assert_eq!(payload.history, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(payload.favorites, Some(vec![]));
    }

    #[test]
    fn test_import_payload_non_list_keys_are_ignored() {
        let doc = json!({"history": "not a list", "settings": {}});
        let payload = ImportPayload::from_value(&doc).unwrap();
        assert_eq!(payload.history, None);
        assert_eq!(payload.favorites, None);
    }

    #[test]
    fn test_import_payload_rejects_non_object() {
        let result = ImportPayload::from_value(&json!(["a", "b"]));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("JSON object"));
    }

    #[test]
    fn test_export_bundle_serializes_all_fields() {
        let bundle = ExportBundle::new(vec!["x".into()], vec![], Settings::default());
        let value = serde_json::to_value(&bundle).unwrap();
        assert!(value.get("exported_at").is_some());
        assert_eq!(value["history"], json!(["x"]));
        assert_eq!(value["settings"]["max_history"], json!(50));
    }

    #[test]
    fn test_now_timestamp_shape() {
        let ts = now_timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
    }
}
