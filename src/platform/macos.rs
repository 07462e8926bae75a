// Managed favorites config path for macOS
// Config: ~/Library/Application Support/ManagedFavs

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory on macOS.
/// `~/Library/Application Support/ManagedFavs`
pub fn get_config_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
    PathBuf::from(home)
        .join("Library")
        .join("Application Support")
        .join("ManagedFavs")
}
