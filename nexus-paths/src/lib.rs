//! XDG Base Directory paths for nexus.
//!
//! CLI tools should use XDG paths for cross-platform consistency,
//! not platform-native paths.

use std::path::PathBuf;

/// File name of the layered TOML configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Get the nexus config directory.
///
/// Returns `$XDG_CONFIG_HOME/nexus` if set, otherwise `~/.config/nexus`.
///
/// # Examples
///
/// ```
/// use nexus_paths::{CONFIG_FILE_NAME, config_dir};
///
/// let config = config_dir();
/// let user_config = config.join(CONFIG_FILE_NAME);
/// assert!(user_config.ends_with("nexus/config.toml"));
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("nexus")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/nexus")
    } else {
        PathBuf::from(".config/nexus")
    }
}

/// Path of the user-level configuration file.
pub fn user_config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}
