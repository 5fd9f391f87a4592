use std::borrow::Cow;
use std::path::Path;

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use copy2::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/.local/share/copy2");
/// // Returns "~/.local/share/copy2" if the home directory is /Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    let home = dirs::home_dir();
    format_path_with_tilde_internal(path, home.as_deref())
}

/// Internal helper for path formatting with explicit home (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home
        && !home.as_os_str().is_empty()
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", std::path::MAIN_SEPARATOR, rest.display());
    }

    // Avoid double allocation when converting Cow to String
    match path.to_string_lossy() {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_format_path_under_home() {
        let home = PathBuf::from("/home/tester");
        let path = home.join(".local").join("share").join("copy2");
        let formatted = format_path_with_tilde_internal(&path, Some(&home));
        assert_eq!(
            formatted,
            format!("~{}{}", std::path::MAIN_SEPARATOR, Path::new(".local/share/copy2").display())
        );
    }

    #[test]
    fn test_format_path_is_home() {
        let home = PathBuf::from("/home/tester");
        assert_eq!(format_path_with_tilde_internal(&home, Some(&home)), "~");
    }

    #[test]
    fn test_format_path_outside_home() {
        let home = PathBuf::from("/home/tester");
        let path = PathBuf::from("/opt/copy2");
        assert_eq!(format_path_with_tilde_internal(&path, Some(&home)), "/opt/copy2");
    }

    #[test]
    fn test_format_path_prefix_is_not_component_match() {
        let home = PathBuf::from("/home/test");
        let path = PathBuf::from("/home/tester/data");
        assert_eq!(format_path_with_tilde_internal(&path, Some(&home)), "/home/tester/data");
    }

    #[test]
    fn test_format_path_without_home() {
        let path = PathBuf::from("/some/random/path");
        assert_eq!(format_path_with_tilde_internal(&path, None), "/some/random/path");
    }
}
