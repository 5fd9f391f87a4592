//! Data models for the clipboard history.
//!
//! - [`Settings`] - User preferences stored in `config.json`
//! - [`ExportBundle`] - Snapshot written by export
//! - [`ImportPayload`] - Lists recovered from an import document

pub mod export;
pub mod settings;

pub use export::{ExportBundle, ImportPayload, TIMESTAMP_FORMAT, now_timestamp, string_members};
pub use settings::Settings;
