//! Clipboard capture by polling
//!
//! Each poll reads the clipboard text and records it when it differs from the
//! last value seen. Polling keeps the monitor portable across platforms that
//! lack change notifications.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::clipboard::ClipboardProvider;
use crate::storage::Store;

#[derive(Debug, Default)]
pub struct ClipboardMonitor {
    last_seen: String,
    paused: bool,
}

impl ClipboardMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Poll the clipboard once, recording new text into `store`
    ///
    /// Returns the captured text when history changed. Clipboard read failures
    /// (empty clipboard, non-text contents, locked by another process) are
    /// skipped. Save failures are logged by the store.
    pub fn poll(&mut self, provider: &mut dyn ClipboardProvider, store: &mut Store) -> Option<String> {
        if self.paused {
            return None;
        }

        let text = match provider.get_text() {
            Ok(text) => normalize_clip(&text),
            Err(e) => {
                debug!(error = %e, "clipboard read skipped");
                return None;
            }
        };

        if text.is_empty() || text == self.last_seen {
            return None;
        }
        self.last_seen = text.clone();

        store.record(&text).then_some(text)
    }

    /// Poll until `shutdown` is set, sleeping `poll_ms` between polls
    ///
    /// `on_capture` is called with every newly recorded item.
    pub fn run(
        &mut self,
        provider: &mut dyn ClipboardProvider,
        store: &mut Store,
        shutdown: Arc<AtomicBool>,
        mut on_capture: impl FnMut(&str),
    ) -> Result<()> {
        info!(poll_ms = store.settings().poll_ms, "clipboard capture started");
        while !shutdown.load(Ordering::Relaxed) {
            if let Some(text) = self.poll(provider, store) {
                on_capture(&text);
            }
            thread::sleep(Duration::from_millis(store.settings().poll_ms));
        }
        info!("clipboard capture stopped");
        Ok(())
    }
}

/// Strip leading and trailing line breaks from clipboard text
pub fn normalize_clip(text: &str) -> String {
    text.trim_matches(|c| c == '\r' || c == '\n').to_string()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::clipboard::tests::MockClipboard;
    use crate::storage::DataPaths;

    fn temp_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(DataPaths::new(dir.path()));
        (dir, store)
    }

    #[test]
    fn test_normalize_clip() {
        assert_eq!(normalize_clip("\r\nhello\n"), "hello");
        assert_eq!(normalize_clip("  spaced  \n"), "  spaced  ");
        assert_eq!(normalize_clip("\n\r\n"), "");
    }

    #[test]
    fn test_poll_records_new_text() {
        let (_dir, mut store) = temp_store();
        let mut monitor = ClipboardMonitor::new();
        let mut clipboard = MockClipboard::with_text("copied\n");

        assert_eq!(monitor.poll(&mut clipboard, &mut store), Some("copied".to_string()));
        assert_eq!(store.history().to_vec(), vec!["copied"]);
    }

    #[test]
    fn test_poll_ignores_unchanged_text() {
        let (_dir, mut store) = temp_store();
        let mut monitor = ClipboardMonitor::new();
        let mut clipboard = MockClipboard::with_text("same");

        monitor.poll(&mut clipboard, &mut store);
        assert_eq!(monitor.poll(&mut clipboard, &mut store), None);
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_poll_unchanged_after_delete_is_not_recaptured() {
        let (_dir, mut store) = temp_store();
        let mut monitor = ClipboardMonitor::new();
        let mut clipboard = MockClipboard::with_text("gone");

        monitor.poll(&mut clipboard, &mut store);
        store.delete(0).unwrap();

        assert_eq!(monitor.poll(&mut clipboard, &mut store), None);
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_poll_paused_captures_nothing() {
        let (_dir, mut store) = temp_store();
        let mut monitor = ClipboardMonitor::new();
        assert!(monitor.toggle_pause());
        let mut clipboard = MockClipboard::with_text("ignored");

        assert_eq!(monitor.poll(&mut clipboard, &mut store), None);
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_poll_skips_empty_and_failures() {
        let (_dir, mut store) = temp_store();
        let mut monitor = ClipboardMonitor::new();

        let mut blank = MockClipboard::with_text("\r\n");
        assert_eq!(monitor.poll(&mut blank, &mut store), None);

        let mut failing = MockClipboard::with_failure();
        assert_eq!(monitor.poll(&mut failing, &mut store), None);
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_poll_recaptures_after_other_text() {
        let (_dir, mut store) = temp_store();
        let mut monitor = ClipboardMonitor::new();
        let mut clipboard = MockClipboard::with_text("a");

        monitor.poll(&mut clipboard, &mut store);
        clipboard.text = Some("b".to_string());
        monitor.poll(&mut clipboard, &mut store);
        clipboard.text = Some("a".to_string());
        monitor.poll(&mut clipboard, &mut store);

        assert_eq!(store.history().to_vec(), vec!["b", "a"]);
    }

    #[test]
    fn test_run_stops_on_shutdown_flag() {
        let (_dir, mut store) = temp_store();
        let mut monitor = ClipboardMonitor::new();
        let mut clipboard = MockClipboard::with_text("loop");
        let shutdown = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&shutdown);
        let mut captured = Vec::new();
        monitor
            .run(&mut clipboard, &mut store, shutdown, |text| {
                captured.push(text.to_string());
                flag.store(true, Ordering::Relaxed);
            })
            .unwrap();

        assert_eq!(captured, vec!["loop".to_string()]);
    }
}
