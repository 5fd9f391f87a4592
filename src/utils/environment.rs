use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Overrides the data directory (used by tests and portable setups)
pub const DATA_DIR_ENV: &str = "COPY2_DATA_DIR";

pub const APP_ID: &str = "copy2";
pub const VENDOR: &str = "MellowsLab";

/// Get the per-user data directory
///
/// Resolution order: `COPY2_DATA_DIR`, the platform local data directory, then
/// the roaming data directory. Windows nests the app under the vendor folder
/// (`%LOCALAPPDATA%\MellowsLab\copy2`).
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .context("Failed to locate a per-user data directory")?;
    Ok(app_dir_under(base))
}

fn app_dir_under(base: PathBuf) -> PathBuf {
    if cfg!(windows) { base.join(VENDOR).join(APP_ID) } else { base.join(APP_ID) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_dir_under_layout() {
        let dir = app_dir_under(PathBuf::from("/base"));
        if cfg!(windows) {
            assert_eq!(dir, PathBuf::from("/base").join("MellowsLab").join("copy2"));
        } else {
            assert_eq!(dir, PathBuf::from("/base/copy2"));
        }
    }

    #[test]
    fn test_get_data_dir_env_override() {
        let original = env::var_os(DATA_DIR_ENV);

        // SAFETY: Setting environment variables in tests is safe as long as:
        // 1. No other test reads this variable concurrently
        // 2. We restore the original value afterwards
        unsafe {
            env::set_var(DATA_DIR_ENV, "/tmp/copy2-test-data");
        }

        let result = get_data_dir();
        assert_eq!(result.unwrap(), PathBuf::from("/tmp/copy2-test-data"));

        unsafe {
            match original {
                Some(value) => env::set_var(DATA_DIR_ENV, value),
                None => env::remove_var(DATA_DIR_ENV),
            }
        }
    }
}
