// Managed favorites platform abstraction
// Provides the platform-specific configuration directory for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::env;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "MANAGED_FAVS_CONFIG_DIR";

/// Returns the configuration directory for managed-favs.
///
/// `$MANAGED_FAVS_CONFIG_DIR` wins when set and non-empty. Otherwise:
/// - **Linux**: `~/.config/managed-favs` (or `$XDG_CONFIG_HOME/managed-favs`)
/// - **macOS**: `~/Library/Application Support/ManagedFavs`
/// - **Windows**: `%APPDATA%/ManagedFavs`
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    os_config_dir()
}

fn os_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}
