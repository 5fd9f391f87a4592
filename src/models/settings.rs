use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_HISTORY: usize = 50;
pub const DEFAULT_POLL_MS: u64 = 400;

pub const MIN_MAX_HISTORY: usize = 5;
pub const MAX_MAX_HISTORY: usize = 500;
pub const MIN_POLL_MS: u64 = 100;
pub const MAX_POLL_MS: u64 = 5000;

/// User preferences persisted in `config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Number of history items kept (5-500)
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    /// Clipboard poll interval in milliseconds (100-5000)
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
    /// Keep history in memory only
    #[serde(default)]
    pub session_only: bool,
    /// Reverse the line order of items when copying them back
    #[serde(default)]
    pub wrap_mode: bool,
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

fn default_poll_ms() -> u64 {
    DEFAULT_POLL_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            poll_ms: DEFAULT_POLL_MS,
            session_only: false,
            wrap_mode: false,
        }
    }
}

impl Settings {
    /// Clamp numeric fields into their supported ranges
    pub fn clamped(mut self) -> Self {
        self.max_history = clamp_max_history(self.max_history);
        self.poll_ms = clamp_poll_ms(self.poll_ms);
        self
    }

    /// Build settings from an arbitrary JSON value, tolerating wrong types
    ///
    /// Fields that are missing or of the wrong type fall back to their defaults.
    /// Numbers given as strings (`"120"`) are accepted.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let defaults = Self::default();
        let Some(map) = value.as_object() else {
            return defaults;
        };

        let max_history = map
            .get("max_history")
            .and_then(value_as_i64)
            .map(|n| n.max(0) as usize)
            .unwrap_or(defaults.max_history);
        let poll_ms = map
            .get("poll_ms")
            .and_then(value_as_i64)
            .map(|n| n.max(0) as u64)
            .unwrap_or(defaults.poll_ms);
        let session_only = map.get("session_only").map(value_truthy).unwrap_or(false);
        let wrap_mode = map.get("wrap_mode").map(value_truthy).unwrap_or(false);

        Self { max_history, poll_ms, session_only, wrap_mode }.clamped()
    }
}

pub fn clamp_max_history(value: usize) -> usize {
    value.clamp(MIN_MAX_HISTORY, MAX_MAX_HISTORY)
}

pub fn clamp_poll_ms(value: u64) -> u64 {
    value.clamp(MIN_POLL_MS, MAX_POLL_MS)
}

fn value_as_i64(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        serde_json::Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn value_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(a) => !a.is_empty(),
        serde_json::Value::Object(o) => !o.is_empty(),
    }
}
