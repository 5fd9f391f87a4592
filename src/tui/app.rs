//! TUI application state and event handling.
//!
//! The `App` struct owns the [`Store`], the clipboard monitor and all view
//! state. `run()` interleaves three things in one loop:
//!
//! - **Capture**: polls the clipboard every `poll_ms` and records new text
//! - **Rendering**: redraws when state changed or every 100ms (resize handling)
//! - **Input**: maps key presses to [`Action`]s and applies them
//!
//! Clipboard access is optional: without a usable system clipboard the app
//! still browses, searches and edits history, and reports copy failures in the
//! status bar.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::{info, warn};

use super::events::{Action, Focus, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::{ClipboardProvider, copy_with_provider};
use crate::history::SearchCursor;
use crate::models::now_timestamp;
use crate::monitor::ClipboardMonitor;
use crate::storage::{SettingsUpdate, Store};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Window in which a second Ctrl+L confirms clearing history
const CLEAR_CONFIRM_WINDOW_MS: u64 = 5000;
/// Search input limit
const MAX_SEARCH_LEN: usize = 256;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

pub struct App {
    store: Store,
    monitor: ClipboardMonitor,
    clipboard: Option<Box<dyn ClipboardProvider>>,
    export_path: PathBuf,
    focus: Focus,
    selected_idx: usize,
    marked: BTreeSet<usize>,
    search_input: String,
    search: SearchCursor,
    clear_requested_at: Option<Instant>,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
    last_poll_time: Option<Instant>,
}

impl App {
    pub fn new(
        store: Store,
        clipboard: Option<Box<dyn ClipboardProvider>>,
        export_path: PathBuf,
    ) -> Self {
        let selected_idx = store.history().len().saturating_sub(1);
        let mut app = Self {
            store,
            monitor: ClipboardMonitor::new(),
            clipboard,
            export_path,
            focus: Focus::List,
            selected_idx,
            marked: BTreeSet::new(),
            search_input: String::new(),
            search: SearchCursor::new(),
            clear_requested_at: None,
            should_quit: false,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
            last_poll_time: None,
        };

        let loaded = format!(
            "Loaded {} items. Favorites: {}.",
            app.store.history().len(),
            app.store.history().favorites().len()
        );
        app.set_status(loaded, MessageType::Success, STATUS_SUCCESS_DURATION_MS);
        if app.clipboard.is_none() {
            app.set_status(
                "✗ Clipboard unavailable, capture disabled",
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            );
        }
        app
    }

    /// Give the store back (after the UI exits)
    pub fn into_store(self) -> Store {
        self.store
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Error, STATUS_ERROR_DURATION_MS);
    }

    fn set_success(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Success, STATUS_SUCCESS_DURATION_MS);
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.store.settings().poll_ms)
    }

    /// Poll the clipboard if the interval has elapsed
    fn capture_tick(&mut self) {
        let due = self.last_poll_time.map(|t| t.elapsed() >= self.poll_interval()).unwrap_or(true);
        if !due {
            return;
        }
        self.last_poll_time = Some(Instant::now());

        let Some(clipboard) = self.clipboard.as_deref_mut() else {
            return;
        };
        if self.monitor.poll(clipboard, &mut self.store).is_some() {
            self.history_changed();
            self.select_last();
            self.report_save_error();
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("interactive session started");
        while !self.should_quit {
            self.check_and_clear_expired_status();
            self.capture_tick();

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100)
            {
                terminal.draw(|f| render_ui(f, &self.render_state()))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let timeout = self.poll_interval().min(Duration::from_millis(100));
            let action = poll_event(timeout, self.focus)?;
            self.handle_action(action);
        }

        if let Err(e) = self.store.persist() {
            warn!(error = %format!("{:#}", e), "failed to persist on exit");
        }
        info!("interactive session ended");
        Ok(())
    }

    fn render_state(&self) -> RenderState<'_> {
        RenderState {
            history: self.store.history(),
            selected_idx: self.selected_idx,
            marked: &self.marked,
            matches: self.search.matches(),
            search_input: &self.search_input,
            focus: self.focus,
            paused: self.monitor.is_paused(),
            reverse_lines: self.store.settings().wrap_mode,
            data_dir: &self.store.paths().data_dir,
            status_message: self.status_message.as_ref(),
        }
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        if !matches!(action, Action::Clear | Action::None) {
            self.clear_requested_at = None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusSearch => self.set_focus(Focus::Search),
            Action::FocusList => self.set_focus(Focus::List),
            Action::RunSearch => self.run_search(),
            Action::ClearSearch => self.clear_search(),
            Action::NextMatch => self.step_match(1),
            Action::PrevMatch => self.step_match(-1),
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-10),
            Action::PageDown => self.move_selection(10),
            Action::Copy => self.copy_selected(),
            Action::Delete => self.delete_selected(),
            Action::Export => self.export(),
            Action::Import => self.import(),
            Action::Clear => self.request_clear(),
            Action::ToggleFavorite => self.toggle_favorite(),
            Action::ToggleMark => self.toggle_mark(),
            Action::Combine => self.combine(),
            Action::TogglePause => {
                let paused = self.monitor.toggle_pause();
                self.set_success(if paused { "Capture paused." } else { "Capture running." });
            }
            Action::ToggleReverseLines => self.toggle_reverse_lines(),
            Action::UpdateSearch(c) => self.update_search(c),
            Action::DeleteChar => self.delete_char(),
            Action::None => {}
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            self.needs_redraw = true;
        }
    }

    fn selected_text(&self) -> Option<&str> {
        self.store.history().get(self.selected_idx)
    }

    fn move_selection(&mut self, delta: isize) {
        let total = self.store.history().len();
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    fn select_last(&mut self) {
        self.selected_idx = self.store.history().len().saturating_sub(1);
        self.needs_redraw = true;
    }

    /// Indices shift on every history mutation, so marks and matches are stale
    fn history_changed(&mut self) {
        self.marked.clear();
        if self.search.is_active() {
            let query = self.search.query().to_string();
            self.search.search(self.store.history().items(), &query);
        }
        self.needs_redraw = true;
    }

    /// Surface a failed save in the status bar; the change itself stands
    fn report_save_error(&mut self) {
        if let Some(error) = self.store.take_save_error() {
            self.set_error(format!("✗ Could not save: {}", error));
        }
    }

    fn update_search(&mut self, c: char) {
        // Limit search input to prevent unbounded growth
        if self.search_input.chars().count() < MAX_SEARCH_LEN {
            self.search_input.push(c);
            self.needs_redraw = true;
        }
    }

    fn delete_char(&mut self) {
        if self.search_input.pop().is_some() {
            self.needs_redraw = true;
        }
    }

    fn run_search(&mut self) {
        let query = self.search_input.trim().to_string();
        if query.is_empty() {
            self.search.clear();
            self.set_success("Search cleared.");
            return;
        }

        match self.search.search(self.store.history().items(), &query) {
            Some(idx) => {
                self.selected_idx = idx;
                let count = self.search.matches().len();
                self.set_success(format!("Found {} matches for: {}", count, query));
            }
            None => self.set_error(format!("No matches for: {}", query)),
        }
    }

    fn step_match(&mut self, direction: isize) {
        if !self.search.is_active() {
            self.run_search();
            return;
        }
        match self.search.step(self.store.history().items(), direction) {
            Some(idx) => {
                self.selected_idx = idx;
                self.needs_redraw = true;
            }
            None => {
                let query = self.search.query().to_string();
                self.set_error(format!("No matches for: {}", query));
            }
        }
    }

    /// Esc: clear the search, or quit when there is nothing to clear
    fn clear_search(&mut self) {
        if self.search_input.is_empty() && !self.search.is_active() {
            if self.focus == Focus::Search {
                self.set_focus(Focus::List);
            } else {
                self.should_quit = true;
            }
            return;
        }
        self.search_input.clear();
        self.search.clear();
        self.needs_redraw = true;
    }

    fn copy_out(&mut self, text: &str, success: String) {
        let Some(clipboard) = self.clipboard.as_deref_mut() else {
            self.set_error("✗ Clipboard error: clipboard unavailable");
            return;
        };
        match copy_with_provider(text, clipboard) {
            Ok(()) => self.set_success(success),
            Err(e) => self.set_error(format!("✗ Clipboard error: {}", e)),
        }
    }

    fn copy_selected(&mut self) {
        let Some(text) = self.store.copy_text(self.selected_idx) else {
            self.set_error("✗ No entry selected");
            return;
        };
        self.copy_out(&text, format!("✓ Copied to clipboard at {}", now_timestamp()));
    }

    fn delete_selected(&mut self) {
        if self.selected_text().is_none() {
            return;
        }
        match self.store.delete(self.selected_idx) {
            Ok(_) => {
                self.history_changed();
                self.select_last();
                self.set_success("✓ Deleted");
                self.report_save_error();
            }
            Err(e) => self.set_error(format!("✗ Delete failed: {}", e)),
        }
    }

    fn request_clear(&mut self) {
        let confirmed = self
            .clear_requested_at
            .map(|t| t.elapsed() < Duration::from_millis(CLEAR_CONFIRM_WINDOW_MS))
            .unwrap_or(false);

        if !confirmed {
            self.clear_requested_at = Some(Instant::now());
            self.set_error("Press Ctrl+L again to clear all history items");
            return;
        }

        self.clear_requested_at = None;
        self.store.clear();
        self.history_changed();
        self.selected_idx = 0;
        self.set_success("✓ History cleared");
        self.report_save_error();
    }

    fn toggle_favorite(&mut self) {
        if self.selected_text().is_none() {
            return;
        }
        match self.store.toggle_favorite(self.selected_idx) {
            Ok(true) => self.set_success("★ Added to favorites"),
            Ok(false) => self.set_success("Removed from favorites"),
            Err(e) => self.set_error(format!("✗ Favorite failed: {}", e)),
        }
        self.report_save_error();
    }

    fn toggle_mark(&mut self) {
        if self.selected_text().is_none() {
            return;
        }
        if !self.marked.remove(&self.selected_idx) {
            self.marked.insert(self.selected_idx);
        }
        self.needs_redraw = true;
    }

    /// Combine marked items (or the selected one) and copy the result
    fn combine(&mut self) {
        let indices: Vec<usize> = if self.marked.is_empty() {
            vec![self.selected_idx]
        } else {
            self.marked.iter().copied().collect()
        };

        let Some(combined) = self.store.history().combine(&indices) else {
            self.set_error("✗ Nothing to combine");
            return;
        };
        self.copy_out(&combined, format!("✓ Combined {} items and copied.", indices.len()));
    }

    fn toggle_reverse_lines(&mut self) {
        let enabled = !self.store.settings().wrap_mode;
        let update = SettingsUpdate { wrap_mode: Some(enabled), ..Default::default() };
        self.store.update_settings(update);
        self.set_success(if enabled { "Reverse-lines copy on." } else { "Reverse-lines copy off." });
        self.report_save_error();
    }

    fn export(&mut self) {
        match self.store.export_to(&self.export_path) {
            Ok(_) => {
                let msg = format!("✓ Exported to {}", self.export_path.display());
                self.set_success(msg);
            }
            Err(e) => self.set_error(format!("✗ {:#}", e)),
        }
    }

    fn import(&mut self) {
        let path = self.export_path.clone();
        match self.store.import_from(&path) {
            Ok(()) => {
                self.history_changed();
                self.select_last();
                self.set_success(format!("✓ Imported from {}", path.display()));
                self.report_save_error();
            }
            Err(e) => self.set_error(format!("✗ Import failed: {:#}", e)),
        }
    }
}
