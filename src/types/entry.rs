use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// What an entry is: a folder holding favorites, or a favorite pointing at a URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    Folder,
    Favorite { url: String },
}

/// A node in the favorites tree.
///
/// Folders live at root level only; favorites may sit at root or inside a
/// folder referenced by `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub kind: EntryKind,
    pub parent_id: Option<String>,
    pub order: i32,
    pub created_at: i64,
}

impl Entry {
    /// Creates a favorite with a fresh id.
    pub fn favorite(name: &str, url: &str, parent_id: Option<&str>, order: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            kind: EntryKind::Favorite {
                url: url.to_string(),
            },
            parent_id: parent_id.map(str::to_string),
            order,
            created_at: now(),
        }
    }

    /// Creates a root-level folder with a fresh id.
    pub fn folder(name: &str, order: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            kind: EntryKind::Folder,
            parent_id: None,
            order,
            created_at: now(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, EntryKind::Folder)
    }

    /// Returns the URL of a favorite, or `None` for folders.
    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Favorite { url } => Some(url.as_str()),
            EntryKind::Folder => None,
        }
    }

    /// Returns the URL only when it is non-empty, i.e. when the favorite is exportable.
    pub fn exportable_url(&self) -> Option<&str> {
        self.url().filter(|u| !u.is_empty())
    }
}

/// Returns the current UNIX timestamp in seconds.
pub(crate) fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Returns the entries whose `parent_id` equals `parent_id`, sorted by `order`.
///
/// The sort is stable, so ties keep their collection order.
pub fn siblings<'a>(entries: &'a [Entry], parent_id: Option<&str>) -> Vec<&'a Entry> {
    let mut result: Vec<&Entry> = entries
        .iter()
        .filter(|e| e.parent_id.as_deref() == parent_id)
        .collect();
    result.sort_by_key(|e| e.order);
    result
}
