//! Conformance tests for the KeyValues text layout as Steam writes and reads it.

use serde::{Deserialize, Serialize};
use serde_vdf::{from_str, parse, to_string, to_value, Category, Error, Value, VdfMap};

const APP_MANIFEST: &str = "\"AppState\"\r\n{\r\n\t\"appid\"\t\t\"400\"\r\n\t\"Universe\"\t\t\"1\"\r\n\
\t\"name\"\t\t\"Portal\"\r\n\t\"StateFlags\"\t\t\"4\"\r\n\t\"installdir\"\t\t\"Portal\"\r\n\
\t\"SizeOnDisk\"\t\t\"4735231593\"\r\n\t\"InstalledDepots\"\r\n\t{\r\n\t\t\"401\"\r\n\t\t{\r\n\
\t\t\t\"manifest\"\t\t\"5045413012574834513\"\r\n\t\t\t\"size\"\t\t\"4735231593\"\r\n\t\t}\r\n\
\t}\r\n\t\"UserConfig\"\r\n\t{\r\n\t}\r\n}\r\n";

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Depot {
    manifest: u64,
    size: u64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct AppState {
    #[serde(rename = "appid")]
    app_id: u32,
    universe: u8,
    #[serde(rename = "name")]
    name: String,
    state_flags: u32,
    #[serde(rename = "installdir")]
    install_dir: String,
    size_on_disk: u64,
    installed_depots: indexmap::IndexMap<u32, Depot>,
    user_config: indexmap::IndexMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct Manifest {
    app_state: AppState,
}

#[test]
fn test_app_manifest_reads() {
    let manifest: Manifest = from_str(APP_MANIFEST).unwrap();
    let app = &manifest.app_state;
    assert_eq!(app.app_id, 400);
    assert_eq!(app.size_on_disk, 4_735_231_593);
    assert_eq!(app.installed_depots[&401].manifest, 5_045_413_012_574_834_513);
    assert!(app.user_config.is_empty());
}

#[test]
fn test_app_manifest_writes_byte_for_byte() {
    let manifest: Manifest = from_str(APP_MANIFEST).unwrap();
    assert_eq!(to_string(&manifest).unwrap(), APP_MANIFEST);

    let tree = parse(APP_MANIFEST).unwrap();
    assert_eq!(to_string(&tree).unwrap(), APP_MANIFEST);
}

#[test]
fn test_whitespace_variants_separate_tokens() {
    let spaced = parse("\"a\" \"1\" \"b\"\t\"2\"\n\"c\"\r\n\"3\"").unwrap();
    let packed = parse("\"a\"\"1\"\"b\"\"2\"\"c\"\"3\"").unwrap();
    assert_eq!(spaced, packed);
    assert_eq!(spaced.as_object().unwrap().len(), 3);
}

#[test]
fn test_bare_tokens_end_at_whitespace() {
    let root = parse("apps\n{\n\t400 Portal\n\t620\t\"Portal 2\"\n}").unwrap();
    assert_eq!(root.get_path(&["apps", "400"]).and_then(Value::as_str), Some("Portal"));
    assert_eq!(root.get_path(&["apps", "620"]).and_then(Value::as_str), Some("Portal 2"));
}

#[test]
fn test_anonymous_root_object() {
    let braced = parse("{\n\t\"a\"\t\"1\"\n}\n").unwrap();
    let bare = parse("\"a\"\t\"1\"\n").unwrap();
    assert_eq!(braced, bare);
}

#[test]
fn test_strings_keep_unicode_and_braces() {
    let root = parse("\"name\" \"Ōkami {HD}\" \"empty\" \"\"").unwrap();
    assert_eq!(root.get("name").and_then(Value::as_str), Some("Ōkami {HD}"));
    assert_eq!(root.get("empty").and_then(Value::as_str), Some(""));
}

#[test]
fn test_escape_asymmetry() {
    // the reader understands \" but the writer does not produce it
    let root = parse(r#""desc" "say \"hi\"""#).unwrap();
    let written = to_string(&root).unwrap();
    assert_eq!(written, "\"desc\"\t\t\"say \"hi\"\"\r\n");
    assert!(parse(&written).map_or(true, |back| back != root));
}

#[test]
fn test_sequences_use_index_keys() {
    #[derive(Serialize)]
    struct Tagged {
        tags: Vec<&'static str>,
        pair: (u8, bool),
    }

    let text = to_string(&Tagged {
        tags: vec!["Indie", "Strategy"],
        pair: (7, false),
    })
    .unwrap();
    assert_eq!(
        text,
        concat!(
            "\"tags\"\r\n{\r\n\t\"0\"\t\t\"Indie\"\r\n\t\"1\"\t\t\"Strategy\"\r\n}\r\n",
            "\"pair\"\r\n{\r\n\t\"0\"\t\t\"7\"\r\n\t\"1\"\t\t\"0\"\r\n}\r\n",
        )
    );
}

#[test]
fn test_enums_are_externally_tagged() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Update {
        None,
        Queued(u32),
        Running { progress: u8 },
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Job {
        a: Update,
        b: Update,
        c: Update,
    }

    let job = Job {
        a: Update::None,
        b: Update::Queued(3),
        c: Update::Running { progress: 40 },
    };
    let text = to_string(&job).unwrap();
    assert!(text.starts_with("\"a\"\t\t\"None\"\r\n"));
    assert_eq!(from_str::<Job>(&text).unwrap(), job);

    // variant names match ignoring case
    let lower: Job = from_str("a none b { queued 3 } c { running { progress 40 } }").unwrap();
    assert_eq!(lower, job);
}

#[test]
fn test_unit_writes_empty_leaf() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Marker;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Row {
        marker: Marker,
        nothing: (),
    }

    let row = Row {
        marker: Marker,
        nothing: (),
    };
    let text = to_string(&row).unwrap();
    assert_eq!(text, "\"marker\"\t\t\"\"\r\n\"nothing\"\t\t\"\"\r\n");
    assert_eq!(from_str::<Row>(&text).unwrap(), row);
}

#[test]
fn test_top_level_shapes() {
    assert!(matches!(to_string(&42u32), Err(Error::UnsupportedType(_))));
    assert_eq!(to_string(&Value::Object(VdfMap::new())).unwrap(), "");
    assert_eq!(to_value(&Option::<u8>::None).unwrap(), Value::Object(VdfMap::new()));
}

#[test]
fn test_error_categories() {
    let cases: [(&str, Category); 4] = [
        ("\"a\" {", Category::Format),
        ("\"a\" \"unterminated", Category::Format),
        ("}", Category::Format),
        ("\"a\"", Category::Format),
    ];
    for (text, category) in cases {
        assert_eq!(parse(text).unwrap_err().category(), category, "{:?}", text);
    }

    #[derive(Debug, Deserialize)]
    struct Count {
        #[allow(dead_code)]
        count: u32,
    }
    let err = from_str::<Count>("\"count\" \"many\"").unwrap_err();
    assert_eq!(err.category(), Category::TypeBind);
    assert!(err.to_string().contains("count"), "{}", err);
}

#[test]
fn test_syntax_error_reports_position() {
    let err = parse("\"a\"\r\n{\r\n}\r\n\t}").unwrap_err();
    match err {
        Error::Syntax { line, col, .. } => {
            assert_eq!(line, 4);
            assert!(col >= 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
