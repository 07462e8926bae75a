use serde::{Deserialize, Serialize};

use super::parsed::DEFAULT_TOPLEVEL_NAME;

/// Top-level application settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppSettings {
    pub general: GeneralSettings,
    pub export: ExportSettings,
    pub import: ImportSettings,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// Toplevel name used for new sessions.
    pub default_toplevel_name: String,
    pub favicon_provider: FaviconProvider,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            default_toplevel_name: DEFAULT_TOPLEVEL_NAME.to_string(),
            favicon_provider: FaviconProvider::Google,
        }
    }
}

/// Service used by the UI to preview favicons.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FaviconProvider {
    Google,
    DuckDuckGo,
}

/// Export-related settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExportSettings {
    pub default_format: FileFormat,
}

/// One of the two interchange formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Json,
    Plist,
}

impl FileFormat {
    /// Matches a file extension case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "plist" => Some(FileFormat::Plist),
            _ => None,
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Plist => "plist",
        }
    }

    /// The other interchange format.
    pub fn counterpart(&self) -> Self {
        match self {
            FileFormat::Json => FileFormat::Plist,
            FileFormat::Plist => FileFormat::Json,
        }
    }

    /// Default file name offered by save dialogs.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            FileFormat::Json => "ManagedFavorites.json",
            FileFormat::Plist => "ManagedFavorites.plist",
        }
    }
}

/// Import-related settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ImportSettings {
    pub policy: ImportPolicy,
}

/// How an imported configuration is applied to the current collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImportPolicy {
    /// Discard the current entries and take the imported ones.
    #[default]
    Replace,
    /// Append the imported entries after the current root entries.
    Merge,
}
