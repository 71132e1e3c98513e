mod config;

pub use config::{Config, QuizConfig, ThresholdsConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the learnpath configuration directory, creating it if needed.
///
/// `LEARNPATH_CONFIG_DIR` overrides the location outright. Otherwise the
/// directory is `~/.config/learnpath`, or `~/.config/learnpath-dev` when
/// `LEARNPATH_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("LEARNPATH_CONFIG_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("LEARNPATH_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("learnpath-dev")
            } else {
                base_dir.join("learnpath")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
