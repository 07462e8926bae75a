//! RPC method handler for the managed-favs JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! favorites manager, the format engine and the settings engine via `App`.

use std::path::Path;
use std::sync::Mutex;

use serde_json::{json, Value};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::app::App;
use crate::managers::favorites_manager::FavoritesManagerTrait;
use crate::services::format_parser;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::entry::Entry;
use crate::types::errors::ImportError;
use crate::types::parsed::ParsedConfiguration;
use crate::types::settings::{FileFormat, ImportPolicy};

/// Encode bytes to base64 string.
pub fn base64_encode(data: &[u8]) -> String {
    BASE64.encode(data)
}

/// Decode base64 string to bytes.
pub fn base64_decode(input: &str) -> Result<Vec<u8>, String> {
    BASE64.decode(input).map_err(|e| format!("base64 decode error: {}", e))
}

fn entry_json(e: &Entry) -> Value {
    json!({
        "id": e.id,
        "name": e.name,
        "url": e.url(),
        "is_folder": e.is_folder(),
        "parent_id": e.parent_id,
        "order": e.order,
        "created_at": e.created_at,
    })
}

fn import_error_message(e: &ImportError) -> String {
    format!("{} ({})", e, e.recovery_suggestion())
}

/// Reads an optional `format` param, falling back to `default`.
fn format_param(params: &Value, default: FileFormat) -> Result<FileFormat, String> {
    match params.get("format").and_then(|v| v.as_str()) {
        Some(ext) => FileFormat::from_extension(ext).ok_or_else(|| format!("unsupported format: {}", ext)),
        None => Ok(default),
    }
}

/// Reads an optional `policy` param, falling back to the configured policy.
fn policy_param(params: &Value, default: ImportPolicy) -> Result<ImportPolicy, String> {
    match params.get("policy") {
        Some(v) => serde_json::from_value(v.clone()).map_err(|e| format!("invalid policy: {}", e)),
        None => Ok(default),
    }
}

/// Applies a parsed configuration unless `preview` is set; returns the summary.
fn finish_import(app: &Mutex<App>, params: &Value, config: ParsedConfiguration) -> Result<Value, String> {
    let preview = params.get("preview").and_then(|v| v.as_bool()).unwrap_or(false);
    let mut a = app.lock().map_err(|e| e.to_string())?;
    let policy = policy_param(params, a.settings_engine.get_settings().import.policy)?;

    let created = if preview {
        0
    } else {
        a.favorites.apply_import(&config, policy)
    };
    let parsed = serde_json::to_value(&config).map_err(|e| e.to_string())?;
    Ok(json!({
        "toplevel_name": config.toplevel_name,
        "favorites": config.favorite_count(),
        "folders": config.folder_count(),
        "created": created,
        "parsed": parsed,
    }))
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Favorites ───
        "favorites.list" => {
            let parent = params.get("parent_id").and_then(|v| v.as_str());
            let a = app.lock().map_err(|e| e.to_string())?;
            let items: Vec<Value> = a.favorites.list(parent).into_iter().map(entry_json).collect();
            Ok(json!({"toplevel_name": a.favorites.toplevel_name(), "items": items}))
        }
        "favorites.all" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let items: Vec<Value> = a.favorites.entries().iter().map(entry_json).collect();
            Ok(json!({"toplevel_name": a.favorites.toplevel_name(), "items": items}))
        }
        "favorites.add" => {
            let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
            let url = params.get("url").and_then(|v| v.as_str()).unwrap_or("");
            let parent = params.get("parent_id").and_then(|v| v.as_str());
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let id = a.favorites.add_favorite(name, url, parent).map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }
        "folder.add" => {
            let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let id = a.favorites.add_folder(name);
            Ok(json!({"id": id}))
        }
        "favorites.update" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            if let Some(name) = params.get("name").and_then(|v| v.as_str()) {
                a.favorites.rename(id, name).map_err(|e| e.to_string())?;
            }
            if let Some(url) = params.get("url").and_then(|v| v.as_str()) {
                a.favorites.set_url(id, url).map_err(|e| e.to_string())?;
            }
            Ok(json!({"ok": true}))
        }
        "favorites.delete" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.favorites.remove(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "favorites.move" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let parent = params.get("parent_id").and_then(|v| v.as_str());
            let index = params.get("index").and_then(|v| v.as_u64()).unwrap_or(u64::MAX);
            let index = usize::try_from(index).unwrap_or(usize::MAX);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.favorites.move_entry(id, parent, index).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "toplevel.set" => {
            let name = params.get("name").and_then(|v| v.as_str()).ok_or("missing name")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.favorites.set_toplevel_name(name);
            Ok(json!({"ok": true}))
        }

        // ─── Export ───
        "export.json" | "export.plist" => {
            let format = if method == "export.json" { FileFormat::Json } else { FileFormat::Plist };
            let a = app.lock().map_err(|e| e.to_string())?;
            if a.favorites.is_empty() {
                return Err("no favorites to export".to_string());
            }
            let content = a.favorites.export(format);
            Ok(json!({"content": content, "file_name": format.default_file_name()}))
        }

        // ─── Import ───
        "import.text" => {
            let text = params.get("text").and_then(|v| v.as_str()).ok_or("missing text")?;
            if text.trim().is_empty() {
                return Err("missing text".to_string());
            }
            let config = format_parser::parse_json_text(text).map_err(|e| import_error_message(&e))?;
            finish_import(app, params, config)
        }
        "import.bytes" => {
            let data = params.get("data").and_then(|v| v.as_str()).ok_or("missing data")?;
            let bytes = base64_decode(data)?;
            let format = format_param(params, FileFormat::Json)?;
            let config = format_parser::parse(&bytes, format).map_err(|e| import_error_message(&e))?;
            finish_import(app, params, config)
        }
        "import.file" => {
            let path = params.get("path").and_then(|v| v.as_str()).ok_or("missing path")?;
            let config = format_parser::parse_file(Path::new(path)).map_err(|e| import_error_message(&e))?;
            finish_import(app, params, config)
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let settings = a.settings_engine.get_settings();
            let json_val = serde_json::to_value(settings).map_err(|e| e.to_string())?;
            Ok(json_val)
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.reset().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
