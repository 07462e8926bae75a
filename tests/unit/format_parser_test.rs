//! Unit tests for the JSON and plist parsers.
//!
//! Cover the toplevel-name sentinel, folder/favorite classification, silent
//! skipping of unknown records, plist fragment handling, extension dispatch,
//! and the separation between shape errors and decode errors.

use std::fs;
use std::path::Path;

use managed_favs::services::format_parser::{format_for_path, parse, parse_file, parse_json_text};
use managed_favs::types::errors::ImportError;
use managed_favs::types::parsed::{ParsedConfiguration, ParsedEntry, ParsedKind};
use managed_favs::types::settings::FileFormat;
use rstest::rstest;
use tempfile::TempDir;

fn favorite(name: &str, url: &str, order: i32) -> ParsedEntry {
    ParsedEntry {
        name: name.to_string(),
        kind: ParsedKind::Favorite { url: url.to_string() },
        order,
    }
}

const FULL_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>ManagedFavorites</key>
	<array>
		<dict>
			<key>toplevel_name</key>
			<string>Corp</string>
		</dict>
		<dict>
			<key>children</key>
			<array>
				<dict>
					<key>name</key>
					<string>Wiki</string>
					<key>url</key>
					<string>https://wiki.corp</string>
				</dict>
			</array>
			<key>name</key>
			<string>Work</string>
		</dict>
		<dict>
			<key>name</key>
			<string>Google</string>
			<key>url</key>
			<string>https://google.com</string>
		</dict>
	</array>
</dict>
</plist>"#;

fn expected_corp() -> ParsedConfiguration {
    ParsedConfiguration {
        toplevel_name: "Corp".to_string(),
        entries: vec![
            ParsedEntry {
                name: "Work".to_string(),
                kind: ParsedKind::Folder {
                    children: vec![favorite("Wiki", "https://wiki.corp", 0)],
                },
                order: 0,
            },
            favorite("Google", "https://google.com", 1),
        ],
    }
}

// ─── JSON ───

#[test]
fn test_json_full_configuration() {
    let text = r#"[
        {"toplevel_name": "Corp"},
        {"name": "Work", "children": [{"name": "Wiki", "url": "https://wiki.corp"}]},
        {"name": "Google", "url": "https://google.com"}
    ]"#;
    assert_eq!(parse_json_text(text).unwrap(), expected_corp());
}

#[test]
fn test_json_without_toplevel_name_keeps_first_record() {
    let config = parse_json_text(r#"[{"name": "A", "url": "https://a"}, {"name": "B", "url": "https://b"}]"#).unwrap();
    assert_eq!(config.toplevel_name, "managedFavs");
    assert_eq!(
        config.entries,
        vec![favorite("A", "https://a", 0), favorite("B", "https://b", 1)]
    );
}

#[test]
fn test_json_unrecognized_records_are_skipped() {
    let text = r#"[
        {"toplevel_name": "T"},
        {"name": "NoUrl"},
        42,
        "text",
        {"url": "https://nameless"},
        {"name": "Kept", "url": "https://kept"}
    ]"#;
    let config = parse_json_text(text).unwrap();
    assert_eq!(config.entries, vec![favorite("Kept", "https://kept", 0)]);
}

#[test]
fn test_json_child_missing_url_is_invalid() {
    let text = r#"[{"toplevel_name": "T"}, {"name": "F", "children": [{"name": "X"}]}]"#;
    match parse_json_text(text) {
        Err(ImportError::InvalidFormat(msg)) => assert!(msg.contains("'name' and 'url'")),
        other => panic!("expected InvalidFormat, got {:?}", other),
    }
}

#[test]
fn test_json_folder_with_empty_children() {
    let config = parse_json_text(r#"[{"toplevel_name": "T"}, {"name": "F", "children": []}]"#).unwrap();
    assert_eq!(config.entries.len(), 1);
    assert!(config.entries[0].children().is_empty());
    assert_eq!(config.folder_count(), 1);
}

#[test]
fn test_json_toplevel_only_yields_no_entries() {
    let config = parse_json_text(r#"[{"toplevel_name": "Only"}]"#).unwrap();
    assert_eq!(config.toplevel_name, "Only");
    assert!(config.entries.is_empty());
}

#[rstest]
#[case(r#"{"toplevel_name": "T"}"#, "must be an array")]
#[case("[]", "is empty")]
#[case("\"text\"", "must be an array")]
fn test_json_shape_errors(#[case] text: &str, #[case] detail: &str) {
    match parse_json_text(text) {
        Err(ImportError::InvalidFormat(msg)) => assert!(msg.contains(detail), "got: {}", msg),
        other => panic!("expected InvalidFormat, got {:?}", other),
    }
}

#[rstest]
#[case("")]
#[case("[{\"name\": ")]
#[case("not json")]
fn test_json_syntax_errors_are_decode_errors(#[case] text: &str) {
    assert!(matches!(parse_json_text(text), Err(ImportError::Decode(_))));
}

#[test]
fn test_json_invalid_utf8_is_decode_error() {
    assert!(matches!(
        parse(&[0x5b, 0xff, 0x5d], FileFormat::Json),
        Err(ImportError::Decode(_))
    ));
}

// ─── Plist ───

#[test]
fn test_plist_full_document() {
    assert_eq!(parse(FULL_PLIST.as_bytes(), FileFormat::Plist).unwrap(), expected_corp());
}

#[test]
fn test_plist_bare_array_fragment_matches_full_document() {
    let start = FULL_PLIST.find("<array>").unwrap();
    let end = FULL_PLIST.rfind("</array>").unwrap() + "</array>".len();
    let fragment = &FULL_PLIST[start..end];

    let from_fragment = parse(fragment.as_bytes(), FileFormat::Plist).unwrap();
    let from_document = parse(FULL_PLIST.as_bytes(), FileFormat::Plist).unwrap();
    assert_eq!(from_fragment, from_document);
}

#[test]
fn test_plist_dict_sequence_fragment() {
    let fragment = "<dict><key>toplevel_name</key><string>Frag</string></dict>\n\
                    <dict><key>name</key><string>A</string><key>url</key><string>https://a</string></dict>";
    let config = parse(fragment.as_bytes(), FileFormat::Plist).unwrap();
    assert_eq!(config.toplevel_name, "Frag");
    assert_eq!(config.entries, vec![favorite("A", "https://a", 0)]);
}

#[test]
fn test_plist_single_dict_fragment_with_managed_favorites() {
    let fragment = "<dict><key>ManagedFavorites</key><array>\
                    <dict><key>toplevel_name</key><string>Inner</string></dict>\
                    <dict><key>name</key><string>B</string><key>url</key><string>https://b</string></dict>\
                    </array></dict>";
    let config = parse(fragment.as_bytes(), FileFormat::Plist).unwrap();
    assert_eq!(config.toplevel_name, "Inner");
    assert_eq!(config.entries, vec![favorite("B", "https://b", 0)]);
}

#[test]
fn test_plist_key_value_fragment() {
    let fragment = "<key>ManagedFavorites</key><array>\
                    <dict><key>name</key><string>C</string><key>url</key><string>https://c</string></dict>\
                    </array>";
    let config = parse(fragment.as_bytes(), FileFormat::Plist).unwrap();
    assert_eq!(config.toplevel_name, "managedFavs");
    assert_eq!(config.entries, vec![favorite("C", "https://c", 0)]);
}

#[test]
fn test_plist_unescapes_entities() {
    let fragment = "<array><dict><key>toplevel_name</key><string>R&amp;D</string></dict>\
                    <dict><key>name</key><string>&lt;A&gt; &quot;B&quot; &apos;C&apos;</string>\
                    <key>url</key><string>https://x/?a=1&amp;b=2</string></dict></array>";
    let config = parse(fragment.as_bytes(), FileFormat::Plist).unwrap();
    assert_eq!(config.toplevel_name, "R&D");
    assert_eq!(config.entries[0].name, "<A> \"B\" 'C'");
    assert_eq!(config.entries[0].url(), Some("https://x/?a=1&b=2"));
}

#[test]
fn test_plist_dict_without_managed_favorites_is_invalid() {
    let doc = "<?xml version=\"1.0\"?><plist version=\"1.0\"><dict><key>Other</key><array/></dict></plist>";
    match parse(doc.as_bytes(), FileFormat::Plist) {
        Err(ImportError::InvalidFormat(msg)) => assert!(msg.contains("ManagedFavorites")),
        other => panic!("expected InvalidFormat, got {:?}", other),
    }
}

#[test]
fn test_plist_empty_array_is_invalid() {
    let doc = "<?xml version=\"1.0\"?><plist version=\"1.0\"><dict><key>ManagedFavorites</key><array/></dict></plist>";
    assert!(matches!(
        parse(doc.as_bytes(), FileFormat::Plist),
        Err(ImportError::InvalidFormat(_))
    ));
}

#[test]
fn test_plist_string_root_is_invalid() {
    let doc = "<?xml version=\"1.0\"?><plist version=\"1.0\"><string>x</string></plist>";
    assert!(matches!(
        parse(doc.as_bytes(), FileFormat::Plist),
        Err(ImportError::InvalidFormat(_))
    ));
}

#[test]
fn test_plist_non_xml_fragment_is_invalid() {
    assert!(matches!(
        parse(b"toplevel_name = Corp", FileFormat::Plist),
        Err(ImportError::InvalidFormat(_))
    ));
}

#[test]
fn test_plist_malformed_xml_is_decode_error() {
    let doc = "<?xml version=\"1.0\"?><plist version=\"1.0\"><array><dict><key>name</key></array></plist>";
    assert!(matches!(
        parse(doc.as_bytes(), FileFormat::Plist),
        Err(ImportError::Decode(_))
    ));
}

fn to_binary(value: &plist::Value) -> Vec<u8> {
    let mut data = Vec::new();
    value.to_writer_binary(&mut data).unwrap();
    data
}

#[test]
fn test_plist_binary_document() {
    let mut toplevel = plist::Dictionary::new();
    toplevel.insert("toplevel_name".to_string(), plist::Value::String("Corp".to_string()));
    let mut google = plist::Dictionary::new();
    google.insert("name".to_string(), plist::Value::String("Google".to_string()));
    google.insert("url".to_string(), plist::Value::String("https://google.com".to_string()));
    let mut root = plist::Dictionary::new();
    root.insert(
        "ManagedFavorites".to_string(),
        plist::Value::Array(vec![
            plist::Value::Dictionary(toplevel),
            plist::Value::Dictionary(google),
        ]),
    );

    let data = to_binary(&plist::Value::Dictionary(root));
    assert!(data.starts_with(b"bplist00"));

    let config = parse(&data, FileFormat::Plist).unwrap();
    assert_eq!(config.toplevel_name, "Corp");
    assert_eq!(config.entries, vec![favorite("Google", "https://google.com", 0)]);
}

#[test]
fn test_plist_binary_matches_xml_form() {
    let value = plist::Value::from_reader_xml(FULL_PLIST.as_bytes()).unwrap();
    let data = to_binary(&value);

    assert_eq!(
        parse(&data, FileFormat::Plist).unwrap(),
        parse(FULL_PLIST.as_bytes(), FileFormat::Plist).unwrap()
    );
}

#[test]
fn test_plist_truncated_binary_is_decode_error() {
    let mut data = b"bplist00".to_vec();
    data.extend_from_slice(&[0xd1, 0x01, 0x02]);
    match parse(&data, FileFormat::Plist) {
        Err(ImportError::Decode(msg)) => assert!(msg.contains("binary"), "got: {}", msg),
        other => panic!("expected Decode, got {:?}", other),
    }
}

#[test]
fn test_plist_unsigned_integer_under_other_key() {
    let doc = "<?xml version=\"1.0\"?><plist version=\"1.0\"><dict>\
               <key>PayloadVersion</key><integer>18446744073709551615</integer>\
               <key>ManagedFavorites</key><array>\
               <dict><key>name</key><string>A</string><key>url</key><string>https://a</string></dict>\
               </array></dict></plist>";
    let config = parse(doc.as_bytes(), FileFormat::Plist).unwrap();
    assert_eq!(config.entries, vec![favorite("A", "https://a", 0)]);
}

#[test]
fn test_plist_other_value_types_are_ignored() {
    let fragment = "<key>Enabled</key><true/>\
                    <key>Ratio</key><real>0.5</real>\
                    <key>Since</key><date>2024-01-01T00:00:00Z</date>\
                    <key>Blob</key><data>AAEC</data>\
                    <key>ManagedFavorites</key><array>\
                    <dict><key>name</key><string>  padded  </string><key>url</key><string>https://p</string></dict>\
                    </array>";
    let config = parse(fragment.as_bytes(), FileFormat::Plist).unwrap();
    assert_eq!(config.entries, vec![favorite("  padded  ", "https://p", 0)]);
}

#[test]
fn test_plist_child_missing_name_is_invalid() {
    let fragment = "<array><dict><key>children</key><array>\
                    <dict><key>url</key><string>https://x</string></dict>\
                    </array><key>name</key><string>F</string></dict></array>";
    assert!(matches!(
        parse(fragment.as_bytes(), FileFormat::Plist),
        Err(ImportError::InvalidFormat(_))
    ));
}

// ─── File dispatch ───

#[rstest]
#[case("favorites.json", r#"[{"toplevel_name": "Corp"}, {"name": "Work", "children": [{"name": "Wiki", "url": "https://wiki.corp"}]}, {"name": "Google", "url": "https://google.com"}]"#)]
#[case("favorites.JSON", r#"[{"toplevel_name": "Corp"}, {"name": "Work", "children": [{"name": "Wiki", "url": "https://wiki.corp"}]}, {"name": "Google", "url": "https://google.com"}]"#)]
#[case("favorites.plist", FULL_PLIST)]
#[case("favorites.PList", FULL_PLIST)]
fn test_parse_file_dispatches_on_extension(#[case] file_name: &str, #[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(file_name);
    fs::write(&path, content).unwrap();

    assert_eq!(parse_file(&path).unwrap(), expected_corp());
}

#[test]
fn test_parse_file_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("favorites.xml");
    fs::write(&path, FULL_PLIST).unwrap();

    assert_eq!(
        parse_file(&path),
        Err(ImportError::UnsupportedFormat("xml".to_string()))
    );
}

#[test]
fn test_parse_file_missing_is_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");
    assert!(matches!(parse_file(&path), Err(ImportError::Read(_))));
}

#[rstest]
#[case("favorites.json", FileFormat::Json, FileFormat::Plist)]
#[case("dir/favorites.PLIST", FileFormat::Plist, FileFormat::Json)]
fn test_format_for_path_and_counterpart(
    #[case] path: &str,
    #[case] format: FileFormat,
    #[case] counterpart: FileFormat,
) {
    let detected = format_for_path(Path::new(path)).unwrap();
    assert_eq!(detected, format);
    assert_eq!(detected.counterpart(), counterpart);
}

#[test]
fn test_format_for_path_without_extension() {
    assert_eq!(
        format_for_path(Path::new("favorites")),
        Err(ImportError::UnsupportedFormat(String::new()))
    );
}
