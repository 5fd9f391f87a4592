use anyhow::{Context, Result};
use arboard::Clipboard;

/// Maximum clipboard size (10MB) accepted when copying out of history
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Clipboard access (allows mocking in tests)
pub trait ClipboardProvider {
    fn get_text(&mut self) -> Result<String>;
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard implementation using arboard
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn get_text(&mut self) -> Result<String> {
        self.clipboard.get_text().context("Failed to read clipboard contents")
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// Validates clipboard text without accessing system clipboard
fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Cannot copy empty text to clipboard");
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Text too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }

    Ok(())
}

/// Validate and copy `text` through any provider
pub fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)?;
    Ok(())
}

/// Copy text to the system clipboard.
///
/// # Errors
/// Returns error if:
/// - Text is empty
/// - Text is too large for clipboard (>10MB)
/// - Clipboard is locked by another process
/// - System clipboard is unavailable (headless environment)
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    // Validate first, before initializing clipboard (for better error messages in CI)
    validate_clipboard_text(text)?;

    let mut clipboard = SystemClipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Read the current text contents of the system clipboard
pub fn read_clipboard() -> Result<String> {
    SystemClipboard::new()?.get_text()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory clipboard for tests
    #[derive(Default)]
    pub(crate) struct MockClipboard {
        pub(crate) text: Option<String>,
        pub(crate) should_fail: bool,
    }

    impl MockClipboard {
        pub(crate) fn with_text(text: &str) -> Self {
            Self { text: Some(text.to_string()), should_fail: false }
        }

        pub(crate) fn with_failure() -> Self {
            Self { text: None, should_fail: true }
        }
    }

    impl ClipboardProvider for MockClipboard {
        fn get_text(&mut self) -> Result<String> {
            if self.should_fail {
                anyhow::bail!("Mock clipboard error");
            }
            self.text.clone().context("Mock clipboard is empty")
        }

        fn set_text(&mut self, text: &str) -> Result<()> {
            if self.should_fail {
                anyhow::bail!("Mock clipboard error");
            }
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_copy_valid_text_with_mock() {
        let mut mock = MockClipboard::default();
        let text = "Hello, clipboard!";

        assert!(copy_with_provider(text, &mut mock).is_ok());
        assert_eq!(mock.text.as_deref(), Some(text));
    }

    #[test]
    fn test_copy_unicode_with_mock() {
        let mut mock = MockClipboard::default();
        let text = "Hello 世界 🚀 émojis";

        assert!(copy_with_provider(text, &mut mock).is_ok());
        assert_eq!(mock.text.as_deref(), Some(text));
    }

    #[test]
    fn test_clipboard_provider_failure() {
        let mut mock = MockClipboard::with_failure();

        let result = copy_with_provider("This should fail", &mut mock);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Mock clipboard error"));
    }

    #[test]
    fn test_copy_empty_text() {
        let mut mock = MockClipboard::default();
        let result = copy_with_provider("", &mut mock);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
        assert!(mock.text.is_none());
    }

    #[test]
    fn test_copy_exactly_at_limit() {
        let mut mock = MockClipboard::default();
        let text_at_limit = "a".repeat(10 * 1024 * 1024);

        assert!(copy_with_provider(&text_at_limit, &mut mock).is_ok());
    }

    #[test]
    fn test_copy_one_byte_over_limit() {
        let mut mock = MockClipboard::default();
        let text_over_limit = "a".repeat(10 * 1024 * 1024 + 1);
        let result = copy_with_provider(&text_over_limit, &mut mock);

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("too large"));
        assert!(err_msg.contains("bytes"));
    }

    #[test]
    fn test_multibyte_unicode_size_calculation() {
        // "🚀" is 4 bytes in UTF-8
        let mut mock = MockClipboard::default();
        let text = "🚀".repeat(3 * 1024 * 1024);

        assert!(copy_with_provider(&text, &mut mock).is_err());
    }

    #[test]
    fn test_mock_get_text() {
        let mut mock = MockClipboard::with_text("current");
        assert_eq!(mock.get_text().unwrap(), "current");
    }

    #[test]
    fn test_copy_to_clipboard_validates_before_clipboard_access() {
        let result = copy_to_clipboard("");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }
}
