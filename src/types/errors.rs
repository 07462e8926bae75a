use std::fmt;

// === ImportError ===

/// Errors raised while parsing a JSON or plist export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The file extension is neither `json` nor `plist`.
    UnsupportedFormat(String),
    /// The payload decoded but does not have the expected shape.
    InvalidFormat(String),
    /// The source could not be read.
    Read(String),
    /// The payload is not valid UTF-8, JSON or XML.
    Decode(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnsupportedFormat(ext) => {
                write!(f, "Unsupported import format: {}", ext)
            }
            ImportError::InvalidFormat(msg) => write!(f, "Invalid import format: {}", msg),
            ImportError::Read(msg) => write!(f, "Import read error: {}", msg),
            ImportError::Decode(msg) => write!(f, "Import decode error: {}", msg),
        }
    }
}

impl std::error::Error for ImportError {}

impl ImportError {
    /// Returns a short hint for the user on how to recover.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImportError::UnsupportedFormat(_) => "Choose a .json or .plist file.",
            ImportError::InvalidFormat(_) => {
                "Check that the file contains a managed favorites array."
            }
            ImportError::Read(_) => "Check that the file exists and is readable.",
            ImportError::Decode(_) => "Check the file for JSON or XML syntax errors.",
        }
    }
}

// === TreeError ===

/// Errors related to moving entries within the favorites tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Entry with the given ID was not found.
    NotFound(String),
    /// An entry cannot become its own parent.
    SelfParent(String),
    /// Folders cannot be placed inside another entry.
    NestedFolder(String),
    /// The target parent is not a folder.
    ParentNotFolder(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::NotFound(id) => write!(f, "Entry not found: {}", id),
            TreeError::SelfParent(id) => write!(f, "Entry cannot be its own parent: {}", id),
            TreeError::NestedFolder(id) => write!(f, "Folders cannot be nested: {}", id),
            TreeError::ParentNotFolder(id) => write!(f, "Parent is not a folder: {}", id),
        }
    }
}

impl std::error::Error for TreeError {}

// === FavoritesError ===

/// Errors related to editing the favorites collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesError {
    /// Entry with the given ID was not found.
    NotFound(String),
    /// The operation only applies to favorites, not folders.
    NotAFavorite(String),
    /// A move violated the tree rules.
    Tree(TreeError),
}

impl fmt::Display for FavoritesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoritesError::NotFound(id) => write!(f, "Favorite not found: {}", id),
            FavoritesError::NotAFavorite(id) => write!(f, "Entry is a folder: {}", id),
            FavoritesError::Tree(err) => write!(f, "Move rejected: {}", err),
        }
    }
}

impl std::error::Error for FavoritesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FavoritesError::Tree(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TreeError> for FavoritesError {
    fn from(err: TreeError) -> Self {
        FavoritesError::Tree(err)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
