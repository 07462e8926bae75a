//! Format Generator.
//!
//! Renders a toplevel name and the current entry collection as either the
//! JSON array consumed by Group Policy / the Intune Settings Catalog, or the
//! XML property list consumed by Intune macOS profiles.
//!
//! Both renderers share the same selection rules: root entries sorted by
//! `order`, unnamed entries dropped, favorites without a URL dropped, and a
//! folder's children filtered the same way. Generation never fails.

use serde_json::{json, Value};

use crate::types::entry::{siblings, Entry};

/// Reserved key of the first record in both formats.
pub const TOPLEVEL_NAME_KEY: &str = "toplevel_name";

/// Root key of the plist dictionary.
pub const MANAGED_FAVORITES_KEY: &str = "ManagedFavorites";

const PLIST_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";
const PLIST_DOCTYPE: &str = "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">";

/// An exportable record after filtering.
enum Record<'a> {
    Favorite { name: &'a str, url: &'a str },
    Folder { name: &'a str, children: Vec<(&'a str, &'a str)> },
}

/// Applies the shared selection rules and returns the records in output order.
fn collect_records(entries: &[Entry]) -> Vec<Record<'_>> {
    let mut records = Vec::new();

    for item in siblings(entries, None) {
        if item.name.is_empty() {
            continue;
        }

        if item.is_folder() {
            let children = siblings(entries, Some(&item.id))
                .into_iter()
                .filter(|child| !child.name.is_empty())
                .filter_map(|child| child.exportable_url().map(|url| (child.name.as_str(), url)))
                .collect();
            records.push(Record::Folder {
                name: &item.name,
                children,
            });
        } else if let Some(url) = item.exportable_url() {
            records.push(Record::Favorite {
                name: &item.name,
                url,
            });
        }
    }

    records
}

/// Renders the entries as a pretty-printed JSON array.
///
/// Object keys come out sorted alphabetically and forward slashes are left
/// unescaped.
pub fn generate_json(toplevel_name: &str, entries: &[Entry]) -> String {
    let mut items: Vec<Value> = vec![json!({ "toplevel_name": toplevel_name })];

    for record in collect_records(entries) {
        match record {
            Record::Favorite { name, url } => items.push(json!({ "name": name, "url": url })),
            Record::Folder { name, children } => {
                let children: Vec<Value> = children
                    .into_iter()
                    .map(|(name, url)| json!({ "name": name, "url": url }))
                    .collect();
                items.push(json!({ "name": name, "children": children }));
            }
        }
    }

    // Serializing a `Value` tree cannot fail.
    serde_json::to_string_pretty(&Value::Array(items)).unwrap_or_else(|_| "[]".to_string())
}

/// Renders the entries as an XML property list document.
///
/// Folder dictionaries list their `children` array before their `name` key;
/// the consuming profile format expects exactly that order.
pub fn generate_plist(toplevel_name: &str, entries: &[Entry]) -> String {
    let mut lines: Vec<String> = vec![
        PLIST_HEADER.to_string(),
        PLIST_DOCTYPE.to_string(),
        "<plist version=\"1.0\">".to_string(),
        "<dict>".to_string(),
        format!("\t<key>{}</key>", MANAGED_FAVORITES_KEY),
        "\t<array>".to_string(),
        "\t\t<dict>".to_string(),
        format!("\t\t\t<key>{}</key>", TOPLEVEL_NAME_KEY),
        format!("\t\t\t<string>{}</string>", xml_escape(toplevel_name)),
        "\t\t</dict>".to_string(),
    ];

    for record in collect_records(entries) {
        match record {
            Record::Favorite { name, url } => push_favorite_dict(&mut lines, "\t\t", name, url),
            Record::Folder { name, children } => {
                lines.push("\t\t<dict>".to_string());
                lines.push("\t\t\t<key>children</key>".to_string());
                lines.push("\t\t\t<array>".to_string());
                for (child_name, child_url) in children {
                    push_favorite_dict(&mut lines, "\t\t\t\t", child_name, child_url);
                }
                lines.push("\t\t\t</array>".to_string());
                lines.push("\t\t\t<key>name</key>".to_string());
                lines.push(format!("\t\t\t<string>{}</string>", xml_escape(name)));
                lines.push("\t\t</dict>".to_string());
            }
        }
    }

    lines.push("\t</array>".to_string());
    lines.push("</dict>".to_string());
    lines.push("</plist>".to_string());

    lines.join("\n")
}

fn push_favorite_dict(lines: &mut Vec<String>, indent: &str, name: &str, url: &str) {
    lines.push(format!("{indent}<dict>"));
    lines.push(format!("{indent}\t<key>name</key>"));
    lines.push(format!("{indent}\t<string>{}</string>", xml_escape(name)));
    lines.push(format!("{indent}\t<key>url</key>"));
    lines.push(format!("{indent}\t<string>{}</string>", xml_escape(url)));
    lines.push(format!("{indent}</dict>"));
}

/// Escapes the five XML special characters. `&` goes first so entities
/// introduced by the later replacements are not escaped twice.
pub fn xml_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
