// TUI module for the interactive history browser
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use std::path::PathBuf;

use anyhow::Result;
pub use app::App;
use tracing::warn;

use crate::clipboard::{ClipboardProvider, SystemClipboard};
use crate::storage::Store;
use terminal::TerminalManager;

/// Run the interactive TUI with live clipboard capture
///
/// Exports and imports go through `export_path`. Returns the store so callers
/// can report on the final state.
pub fn run_interactive(store: Store, export_path: PathBuf) -> Result<Store> {
    let clipboard: Option<Box<dyn ClipboardProvider>> = match SystemClipboard::new() {
        Ok(clipboard) => Some(Box::new(clipboard)),
        Err(e) => {
            warn!(error = %format!("{:#}", e), "system clipboard unavailable");
            None
        }
    };

    let mut manager = TerminalManager::new()?;
    let mut app = App::new(store, clipboard, export_path);

    let res = app.run(manager.terminal_mut());

    manager.restore()?;
    res.map(|()| app.into_store())
}
