//! Copy 2.0 - clipboard history with search, favorites and export/import
//!
//! This library implements the clipboard-history core behind the `copy2`
//! binary:
//!
//! - Capturing clipboard changes by polling ([`monitor`])
//! - Bounded, deduplicated history with favorites and search ([`history`])
//! - Per-user persistence of settings, history and favorites ([`storage`])
//! - An interactive terminal browser ([`tui`]) and a command line ([`cli`])
//!
//! # Example
//!
//! ```no_run
//! use copy2::{DataPaths, Store};
//!
//! let mut store = Store::open(DataPaths::resolve()?);
//! store.record("copied text");
//! println!("History holds {} items", store.history().len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod history;
pub mod logging;
pub mod models;
pub mod monitor;
pub mod storage;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use clipboard::{ClipboardProvider, SystemClipboard, copy_to_clipboard, read_clipboard};
pub use history::{History, HistoryError, SearchCursor};
pub use models::{ExportBundle, Settings};
pub use monitor::ClipboardMonitor;
pub use storage::{DataPaths, SettingsUpdate, Store};
pub use utils::{format_path_with_tilde, get_data_dir};
