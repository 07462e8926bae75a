//! App Core for managed-favs.
//!
//! Central struct holding the favorites collection and the settings engine.

use tracing::warn;

use crate::managers::favorites_manager::FavoritesManager;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Central application struct.
pub struct App {
    pub favorites: FavoritesManager,
    pub settings_engine: SettingsEngine,
}

impl App {
    /// Creates a new App.
    ///
    /// `settings_path` overrides the settings file location; `None` uses the
    /// platform config directory. Unreadable settings fall back to defaults.
    /// The favorites collection starts empty, named after the configured
    /// default toplevel name.
    pub fn new(settings_path: Option<String>) -> Self {
        let mut settings_engine = SettingsEngine::new(settings_path);
        if let Err(e) = settings_engine.load() {
            warn!(error = %e, "Failed to load settings, using defaults");
        }

        let favorites =
            FavoritesManager::new(&settings_engine.get_settings().general.default_toplevel_name);

        Self {
            favorites,
            settings_engine,
        }
    }
}
