//! Tree operations on the entry collection.
//!
//! Moving an entry renumbers its new sibling list densely from 0. The list it
//! left is not touched, so its `order` values may end up sparse; sorting by
//! relative order keeps that harmless.

use crate::types::entry::Entry;
use crate::types::errors::TreeError;

/// Moves `moved_id` under `new_parent_id` (or to root) at `target_index`.
///
/// The index is clamped to the number of destination siblings. Folders may
/// only live at root and the parent must be an existing folder. On error the
/// collection is left unchanged.
pub fn reparent(
    entries: &mut [Entry],
    moved_id: &str,
    new_parent_id: Option<&str>,
    target_index: usize,
) -> Result<(), TreeError> {
    let moved_pos = entries
        .iter()
        .position(|e| e.id == moved_id)
        .ok_or_else(|| TreeError::NotFound(moved_id.to_string()))?;

    if let Some(parent_id) = new_parent_id {
        if parent_id == moved_id {
            return Err(TreeError::SelfParent(moved_id.to_string()));
        }
        if entries[moved_pos].is_folder() {
            return Err(TreeError::NestedFolder(moved_id.to_string()));
        }
        let parent = entries
            .iter()
            .find(|e| e.id == parent_id)
            .ok_or_else(|| TreeError::NotFound(parent_id.to_string()))?;
        if !parent.is_folder() {
            return Err(TreeError::ParentNotFolder(parent_id.to_string()));
        }
    }

    // Destination siblings in their current order, without the moved entry.
    let mut destination: Vec<usize> = (0..entries.len())
        .filter(|&i| i != moved_pos && entries[i].parent_id.as_deref() == new_parent_id)
        .collect();
    destination.sort_by_key(|&i| entries[i].order);

    let insert_at = target_index.min(destination.len());
    destination.insert(insert_at, moved_pos);

    entries[moved_pos].parent_id = new_parent_id.map(str::to_string);
    for (order, &i) in destination.iter().enumerate() {
        entries[i].order = order as i32;
    }

    Ok(())
}

/// Renumbers the children of `parent_id` densely from 0, keeping their
/// relative order.
pub fn normalize_order(entries: &mut [Entry], parent_id: Option<&str>) {
    let mut indices: Vec<usize> = (0..entries.len())
        .filter(|&i| entries[i].parent_id.as_deref() == parent_id)
        .collect();
    indices.sort_by_key(|&i| entries[i].order);
    for (order, &i) in indices.iter().enumerate() {
        entries[i].order = order as i32;
    }
}

/// Order value that places a new entry after every current child of
/// `parent_id`. Sibling lists may be sparse, so this is not the count.
pub fn next_order(entries: &[Entry], parent_id: Option<&str>) -> i32 {
    entries
        .iter()
        .filter(|e| e.parent_id.as_deref() == parent_id)
        .map(|e| e.order.saturating_add(1))
        .max()
        .unwrap_or(0)
}

/// Number of entries directly under `parent_id`.
pub fn sibling_count(entries: &[Entry], parent_id: Option<&str>) -> usize {
    entries
        .iter()
        .filter(|e| e.parent_id.as_deref() == parent_id)
        .count()
}
