//! Per-user persistence for settings, history and favorites
//!
//! Three JSON files live in the data directory:
//! - `config.json`: [`Settings`](crate::models::Settings)
//! - `history.json`: history items, oldest first
//! - `favorites.json`: favorite items
//!
//! Data location (override with `COPY2_DATA_DIR`):
//! - Windows: `%LOCALAPPDATA%\MellowsLab\copy2\`
//! - macOS: `~/Library/Application Support/copy2/`
//! - Linux: `~/.local/share/copy2/`

pub mod persistence;
pub mod store;

pub use persistence::{load_json, load_json_or, save_json};
pub use store::{DEFAULT_EXPORT_FILENAME, DataPaths, SettingsUpdate, Store};
