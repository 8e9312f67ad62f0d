mod config;
pub mod database;

pub use config::{AdvisoryConfig, AmbienceConfig, Config, TimerConfig, UiConfig};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/vibesync[-dev]/` based on VIBESYNC_ENV.
///
/// Set VIBESYNC_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("VIBESYNC_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("vibesync-dev")
    } else {
        base_dir.join("vibesync")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
