use serde::{Deserialize, Serialize};

/// Toplevel name used when an import does not carry one.
pub const DEFAULT_TOPLEVEL_NAME: &str = "managedFavs";

/// Result of parsing a JSON or plist export.
///
/// Independent of live `Entry` values: ids and parent links are assigned by
/// whoever materializes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedConfiguration {
    pub toplevel_name: String,
    pub entries: Vec<ParsedEntry>,
}

/// A parsed favorite or folder with its position among its siblings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedEntry {
    pub name: String,
    pub kind: ParsedKind,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParsedKind {
    Favorite { url: String },
    Folder { children: Vec<ParsedEntry> },
}

impl ParsedEntry {
    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            ParsedKind::Favorite { url } => Some(url.as_str()),
            ParsedKind::Folder { .. } => None,
        }
    }

    /// Children of a folder; empty for favorites.
    pub fn children(&self) -> &[ParsedEntry] {
        match &self.kind {
            ParsedKind::Folder { children } => children,
            ParsedKind::Favorite { .. } => &[],
        }
    }
}

impl ParsedConfiguration {
    /// Total number of favorites, counting those nested in folders.
    pub fn favorite_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| match &e.kind {
                ParsedKind::Favorite { .. } => 1,
                ParsedKind::Folder { children } => children.len(),
            })
            .sum()
    }

    pub fn folder_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.kind, ParsedKind::Folder { .. }))
            .count()
    }
}
