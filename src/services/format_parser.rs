//! Format Parser.
//!
//! Recovers a `ParsedConfiguration` from a JSON or plist export. Both formats
//! share one classification pass over their records:
//!
//! - the first record may carry `toplevel_name`, otherwise the default name
//!   is used and the record is treated as content;
//! - a record with a `children` array and a `name` is a folder, and each child
//!   must have `name` and `url`;
//! - a record with `name` and `url` is a favorite;
//! - anything else is skipped.
//!
//! Plist input is either a binary (`bplist00`) document or XML text. XML may
//! be a fragment without the `<plist>` envelope, and may hold the records
//! either under `ManagedFavorites` or as a bare array.

use std::borrow::Cow;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::services::format_generator::{MANAGED_FAVORITES_KEY, TOPLEVEL_NAME_KEY};
use crate::types::errors::ImportError;
use crate::types::parsed::{ParsedConfiguration, ParsedEntry, ParsedKind, DEFAULT_TOPLEVEL_NAME};
use crate::types::settings::FileFormat;

const BINARY_PLIST_MAGIC: &[u8] = b"bplist";

/// Read-only view of a record, implemented for both JSON and plist values.
trait Record: Sized {
    fn str_field(&self, key: &str) -> Option<&str>;
    fn array_field(&self, key: &str) -> Option<&[Self]>;
}

impl Record for Value {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn array_field(&self, key: &str) -> Option<&[Self]> {
        self.get(key).and_then(Value::as_array).map(Vec::as_slice)
    }
}

impl Record for plist::Value {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.as_dictionary()
            .and_then(|dict| dict.get(key))
            .and_then(plist::Value::as_string)
    }

    fn array_field(&self, key: &str) -> Option<&[Self]> {
        self.as_dictionary()
            .and_then(|dict| dict.get(key))
            .and_then(plist::Value::as_array)
            .map(Vec::as_slice)
    }
}

/// Picks the format for a path from its extension, case-insensitively.
pub fn format_for_path(path: &Path) -> Result<FileFormat, ImportError> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    FileFormat::from_extension(&extension).ok_or(ImportError::UnsupportedFormat(extension))
}

/// Parses a file, choosing the format from its extension.
pub fn parse_file(path: &Path) -> Result<ParsedConfiguration, ImportError> {
    let format = format_for_path(path)?;

    let data = fs::read(path)
        .map_err(|e| ImportError::Read(format!("{}: {}", path.display(), e)))?;

    debug!(path = %path.display(), bytes = data.len(), "Read import file");
    parse(&data, format)
}

/// Parses raw bytes in the given format.
pub fn parse(data: &[u8], format: FileFormat) -> Result<ParsedConfiguration, ImportError> {
    match format {
        FileFormat::Json => parse_json(data),
        FileFormat::Plist => parse_plist(data),
    }
}

/// Parses JSON text, e.g. a configuration pasted from the clipboard.
pub fn parse_json_text(text: &str) -> Result<ParsedConfiguration, ImportError> {
    parse_json(text.as_bytes())
}

fn parse_json(data: &[u8]) -> Result<ParsedConfiguration, ImportError> {
    let value: Value = serde_json::from_slice(data)
        .map_err(|e| ImportError::Decode(format!("invalid JSON: {}", e)))?;

    let items = value
        .as_array()
        .ok_or_else(|| ImportError::InvalidFormat("JSON must be an array".to_string()))?;
    if items.is_empty() {
        return Err(ImportError::InvalidFormat("JSON array is empty".to_string()));
    }

    let config = classify(items)?;
    info!(
        toplevel = %config.toplevel_name,
        items = config.entries.len(),
        "JSON parsed"
    );
    Ok(config)
}

fn parse_plist(data: &[u8]) -> Result<ParsedConfiguration, ImportError> {
    let root = decode_plist(data)?;

    let items = resolve_favorites_array(&root)?;
    if items.is_empty() {
        return Err(ImportError::InvalidFormat(format!(
            "{} array is empty",
            MANAGED_FAVORITES_KEY
        )));
    }

    let config = classify(items)?;
    info!(
        toplevel = %config.toplevel_name,
        items = config.entries.len(),
        "Plist parsed"
    );
    Ok(config)
}

/// Decodes a binary document as is, or XML text after fragment wrapping.
fn decode_plist(data: &[u8]) -> Result<plist::Value, ImportError> {
    if data.starts_with(BINARY_PLIST_MAGIC) {
        debug!(bytes = data.len(), "Decoding binary plist");
        return plist::Value::from_reader(Cursor::new(data))
            .map_err(|e| ImportError::Decode(format!("invalid binary plist: {}", e)));
    }

    let text = std::str::from_utf8(data)
        .map_err(|e| ImportError::Decode(format!("plist is not valid UTF-8: {}", e)))?;
    let document = wrap_fragment(text)?;

    plist::Value::from_reader_xml(document.as_bytes())
        .map_err(|e| ImportError::Decode(format!("invalid plist: {}", e)))
}

/// Adds the missing envelope around a plist fragment.
///
/// Full documents (XML declaration, doctype or `<plist>` root) pass through
/// unchanged. A bare `<array>` is wrapped in `<plist>`, bare `<key>`/value
/// pairs become a dictionary, and a run of `<dict>` elements becomes an array.
fn wrap_fragment(text: &str) -> Result<Cow<'_, str>, ImportError> {
    let trimmed = text.trim_start_matches('\u{feff}').trim();

    if trimmed.starts_with("<?xml") || trimmed.starts_with("<!DOCTYPE") || trimmed.starts_with("<plist") {
        return Ok(Cow::Borrowed(trimmed));
    }

    let wrapped = if trimmed.starts_with("<array") {
        format!("<plist version=\"1.0\">{}</plist>", trimmed)
    } else if trimmed.starts_with("<key") {
        format!("<plist version=\"1.0\"><dict>{}</dict></plist>", trimmed)
    } else if trimmed.starts_with("<dict") {
        format!("<plist version=\"1.0\"><array>{}</array></plist>", trimmed)
    } else {
        return Err(ImportError::InvalidFormat(
            "plist fragment must start with <array>, <dict> or <key>".to_string(),
        ));
    };

    debug!("Wrapped plist fragment in a full envelope");
    Ok(Cow::Owned(wrapped))
}

/// Finds the favorites array: either `ManagedFavorites` inside a dictionary or
/// a bare top-level array.
fn resolve_favorites_array(root: &plist::Value) -> Result<&[plist::Value], ImportError> {
    match root {
        plist::Value::Dictionary(_) => root.array_field(MANAGED_FAVORITES_KEY).ok_or_else(|| {
            ImportError::InvalidFormat(format!(
                "plist must contain a '{}' array",
                MANAGED_FAVORITES_KEY
            ))
        }),
        plist::Value::Array(items) => {
            // A wrapped `<dict>` fragment holding the whole configuration.
            if let [single] = items.as_slice() {
                if let Some(inner) = single.array_field(MANAGED_FAVORITES_KEY) {
                    return Ok(inner);
                }
            }
            Ok(items.as_slice())
        }
        _ => Err(ImportError::InvalidFormat(
            "plist must be a dictionary or an array".to_string(),
        )),
    }
}

/// Shared classification of records into a configuration.
fn classify<R: Record>(items: &[R]) -> Result<ParsedConfiguration, ImportError> {
    let mut toplevel_name = DEFAULT_TOPLEVEL_NAME.to_string();
    let mut entries: Vec<ParsedEntry> = Vec::new();

    for (index, item) in items.iter().enumerate() {
        if index == 0 {
            if let Some(name) = item.str_field(TOPLEVEL_NAME_KEY) {
                toplevel_name = name.to_string();
                continue;
            }
        }

        let order = entries.len() as i32;
        if let (Some(children), Some(name)) = (item.array_field("children"), item.str_field("name")) {
            entries.push(ParsedEntry {
                name: name.to_string(),
                kind: ParsedKind::Folder {
                    children: classify_children(children)?,
                },
                order,
            });
        } else if let (Some(name), Some(url)) = (item.str_field("name"), item.str_field("url")) {
            entries.push(ParsedEntry {
                name: name.to_string(),
                kind: ParsedKind::Favorite {
                    url: url.to_string(),
                },
                order,
            });
        } else {
            debug!(index, "Skipping unrecognized record");
        }
    }

    Ok(ParsedConfiguration {
        toplevel_name,
        entries,
    })
}

fn classify_children<R: Record>(children: &[R]) -> Result<Vec<ParsedEntry>, ImportError> {
    children
        .iter()
        .enumerate()
        .map(|(index, child)| match (child.str_field("name"), child.str_field("url")) {
            (Some(name), Some(url)) => Ok(ParsedEntry {
                name: name.to_string(),
                kind: ParsedKind::Favorite {
                    url: url.to_string(),
                },
                order: index as i32,
            }),
            _ => Err(ImportError::InvalidFormat(format!(
                "child {} must contain 'name' and 'url'",
                index
            ))),
        })
        .collect()
}
