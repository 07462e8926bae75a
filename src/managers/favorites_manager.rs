//! Favorites Manager.
//!
//! Implements `FavoritesManagerTrait`: the editing operations an external UI
//! performs on the in-memory entry collection, plus applying an imported
//! `ParsedConfiguration` and exporting the collection.

use tracing::{debug, info};

use crate::services::format_generator::{generate_json, generate_plist};
use crate::services::tree_operations::{next_order, normalize_order, reparent, sibling_count};
use crate::types::entry::{siblings, Entry, EntryKind};
use crate::types::errors::{FavoritesError, TreeError};
use crate::types::parsed::{ParsedConfiguration, ParsedKind, DEFAULT_TOPLEVEL_NAME};
use crate::types::settings::{FileFormat, ImportPolicy};

/// Trait defining favorites editing operations.
pub trait FavoritesManagerTrait {
    fn add_favorite(&mut self, name: &str, url: &str, parent_id: Option<&str>) -> Result<String, FavoritesError>;
    fn add_folder(&mut self, name: &str) -> String;
    fn rename(&mut self, id: &str, name: &str) -> Result<(), FavoritesError>;
    fn set_url(&mut self, id: &str, url: &str) -> Result<(), FavoritesError>;
    fn move_entry(&mut self, id: &str, parent_id: Option<&str>, index: usize) -> Result<(), FavoritesError>;
    fn remove(&mut self, id: &str) -> Result<(), FavoritesError>;
    fn list(&self, parent_id: Option<&str>) -> Vec<&Entry>;
    fn apply_import(&mut self, config: &ParsedConfiguration, policy: ImportPolicy) -> usize;
    fn export(&self, format: FileFormat) -> String;
}

/// In-memory favorites collection with its toplevel name.
#[derive(Debug, Clone)]
pub struct FavoritesManager {
    toplevel_name: String,
    entries: Vec<Entry>,
}

impl Default for FavoritesManager {
    fn default() -> Self {
        Self::new(DEFAULT_TOPLEVEL_NAME)
    }
}

impl FavoritesManager {
    /// Creates an empty collection.
    pub fn new(toplevel_name: &str) -> Self {
        Self {
            toplevel_name: toplevel_name.to_string(),
            entries: Vec::new(),
        }
    }

    /// Wraps an existing collection, e.g. one restored by the caller.
    pub fn with_entries(toplevel_name: &str, entries: Vec<Entry>) -> Self {
        Self {
            toplevel_name: toplevel_name.to_string(),
            entries,
        }
    }

    pub fn toplevel_name(&self) -> &str {
        &self.toplevel_name
    }

    pub fn set_toplevel_name(&mut self, name: &str) {
        self.toplevel_name = name.to_string();
    }

    /// All entries in collection order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// True when no favorite would be exported.
    pub fn is_empty(&self) -> bool {
        !self
            .entries
            .iter()
            .any(|e| !e.name.is_empty() && e.exportable_url().is_some())
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Entry, FavoritesError> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| FavoritesError::NotFound(id.to_string()))
    }

    /// Checks that `parent_id` names an existing folder.
    fn ensure_folder(&self, parent_id: &str) -> Result<(), FavoritesError> {
        match self.get(parent_id) {
            Some(parent) if parent.is_folder() => Ok(()),
            Some(_) => Err(TreeError::ParentNotFolder(parent_id.to_string()).into()),
            None => Err(TreeError::NotFound(parent_id.to_string()).into()),
        }
    }
}

impl FavoritesManagerTrait for FavoritesManager {
    /// Adds a favorite at the end of its sibling list. Returns the generated ID.
    fn add_favorite(
        &mut self,
        name: &str,
        url: &str,
        parent_id: Option<&str>,
    ) -> Result<String, FavoritesError> {
        if let Some(pid) = parent_id {
            self.ensure_folder(pid)?;
        }

        let order = next_order(&self.entries, parent_id);
        let entry = Entry::favorite(name, url, parent_id, order);
        let id = entry.id.clone();
        self.entries.push(entry);

        debug!(id = %id, parent = ?parent_id, order, "Favorite added");
        Ok(id)
    }

    /// Adds a root-level folder. Returns the generated ID.
    fn add_folder(&mut self, name: &str) -> String {
        let order = next_order(&self.entries, None);
        let entry = Entry::folder(name, order);
        let id = entry.id.clone();
        self.entries.push(entry);

        debug!(id = %id, order, "Folder added");
        id
    }

    fn rename(&mut self, id: &str, name: &str) -> Result<(), FavoritesError> {
        self.get_mut(id)?.name = name.to_string();
        Ok(())
    }

    /// Sets the URL of a favorite. Folders have no URL.
    fn set_url(&mut self, id: &str, url: &str) -> Result<(), FavoritesError> {
        let entry = self.get_mut(id)?;
        match &mut entry.kind {
            EntryKind::Favorite { url: current } => {
                *current = url.to_string();
                Ok(())
            }
            EntryKind::Folder => Err(FavoritesError::NotAFavorite(id.to_string())),
        }
    }

    fn move_entry(
        &mut self,
        id: &str,
        parent_id: Option<&str>,
        index: usize,
    ) -> Result<(), FavoritesError> {
        reparent(&mut self.entries, id, parent_id, index)?;
        debug!(id, parent = ?parent_id, index, "Entry moved");
        Ok(())
    }

    /// Removes an entry.
    ///
    /// Favorites inside a removed folder are moved to root, appended after
    /// the remaining root entries in their previous relative order.
    fn remove(&mut self, id: &str) -> Result<(), FavoritesError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| FavoritesError::NotFound(id.to_string()))?;
        let removed = self.entries.remove(pos);

        if removed.is_folder() {
            let mut next = next_order(&self.entries, None);
            let children: Vec<String> = siblings(&self.entries, Some(id))
                .into_iter()
                .map(|e| e.id.clone())
                .collect();
            for child_id in &children {
                let child = self.get_mut(child_id)?;
                child.parent_id = None;
                child.order = next;
                next += 1;
            }
            info!(id, promoted = children.len(), "Folder removed, children moved to root");
        } else {
            debug!(id, "Favorite removed");
        }
        Ok(())
    }

    /// Entries directly under `parent_id`, sorted by order.
    fn list(&self, parent_id: Option<&str>) -> Vec<&Entry> {
        siblings(&self.entries, parent_id)
    }

    /// Materializes an imported configuration into live entries with fresh ids.
    ///
    /// `Replace` discards the current entries and adopts the imported toplevel
    /// name; `Merge` renumbers the current root entries densely and appends the
    /// imported ones after them. Returns the number of entries created.
    fn apply_import(&mut self, config: &ParsedConfiguration, policy: ImportPolicy) -> usize {
        match policy {
            ImportPolicy::Replace => {
                self.entries.clear();
                self.toplevel_name = config.toplevel_name.clone();
            }
            ImportPolicy::Merge => normalize_order(&mut self.entries, None),
        }

        let base = sibling_count(&self.entries, None) as i32;
        let before = self.entries.len();

        let mut parsed: Vec<_> = config.entries.iter().collect();
        parsed.sort_by_key(|p| p.order);

        for (offset, item) in parsed.into_iter().enumerate() {
            let order = base + offset as i32;
            match &item.kind {
                ParsedKind::Favorite { url } => {
                    self.entries.push(Entry::favorite(&item.name, url, None, order));
                }
                ParsedKind::Folder { children } => {
                    let folder = Entry::folder(&item.name, order);
                    let folder_id = folder.id.clone();
                    self.entries.push(folder);
                    for child in children {
                        if let ParsedKind::Favorite { url } = &child.kind {
                            self.entries
                                .push(Entry::favorite(&child.name, url, Some(&folder_id), child.order));
                        }
                    }
                }
            }
        }

        let created = self.entries.len() - before;
        info!(?policy, created, toplevel = %self.toplevel_name, "Import applied");
        created
    }

    fn export(&self, format: FileFormat) -> String {
        match format {
            FileFormat::Json => generate_json(&self.toplevel_name, &self.entries),
            FileFormat::Plist => generate_plist(&self.toplevel_name, &self.entries),
        }
    }
}
