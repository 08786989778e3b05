use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_vdf::{
    from_reader, from_slice, from_str, from_str_with_options, parse, to_string, Category, Error,
    Hybrid, Value, VdfOptions,
};

const SHARED_CONFIG: &str = r##""UserRoamingConfigStore"
{
	"Software"
	{
		"Valve"
		{
			"Steam"
			{
				"StartMenuShortcutCheck"		"0"
				"DesktopShortcutCheck"		"1"
				"SurveyDate"		"2017-07-03"
				"SurveyDateVersion"		"2586173360812765888"
				"SteamDefaultDialog"		"#app_games"
				"apps"
				{
					"434460"
					{
						"tags"
						{
							"0"		"Indie"
							"1"		"Strategy"
						}
					}
				}
			}
		}
	}
}
"##;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct App {
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Steam {
    start_menu_shortcut_check: bool,
    desktop_shortcut_check: bool,
    #[serde(with = "serde_vdf::date")]
    survey_date: NaiveDate,
    survey_date_version: String,
    steam_default_dialog: String,
    apps: IndexMap<String, App>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct Valve {
    steam: Steam,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct Software {
    valve: Valve,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct Store {
    software: Software,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct SharedConfig {
    user_roaming_config_store: Store,
}

#[test]
fn test_duplicate_key_overwrites() {
    let root = parse("{ \"a\" \"1\" \"a\" \"2\" }").unwrap();
    let object = root.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(object.get("a"), Some(&Value::from("2")));
}

#[test]
fn test_escaped_quote() {
    let root = parse(r#""desc" "a \"quoted\" word""#).unwrap();
    assert_eq!(root.get("desc").and_then(Value::as_str), Some("a \"quoted\" word"));
}

#[test]
fn test_case_insensitive_field_match() {
    #[derive(Deserialize)]
    struct Survey {
        #[serde(rename = "surveyDate", with = "serde_vdf::date")]
        survey_date: NaiveDate,
    }

    let survey: Survey = from_str("\"SurveyDate\" \"2017-07-03\"").unwrap();
    assert_eq!(survey.survey_date, NaiveDate::from_ymd_opt(2017, 7, 3).unwrap());
}

#[test]
fn test_boolean_coercion() {
    #[derive(Deserialize)]
    struct Flag {
        flag: bool,
    }

    let cases = [("1", true), ("0", false), ("yes", false), ("", false), ("true", false)];
    for (leaf, expected) in cases {
        let text = format!("\"flag\" \"{}\"", leaf);
        let flag: Flag = from_str(&text).unwrap();
        assert_eq!(flag.flag, expected, "leaf {:?}", leaf);
    }
}

#[test]
fn test_sequence_binding_keeps_key_order() {
    #[derive(Deserialize)]
    struct Tagged {
        tags: Vec<String>,
    }

    let tagged: Tagged = from_str("\"tags\" { \"0\" \"a\" \"1\" \"b\" \"2\" \"c\" }").unwrap();
    assert_eq!(tagged.tags, vec!["a", "b", "c"]);

    let shuffled: Tagged = from_str("\"tags\" { \"2\" \"c\" \"0\" \"a\" \"1\" \"b\" }").unwrap();
    assert_eq!(shuffled.tags, vec!["c", "a", "b"]);
}

#[derive(Deserialize, Debug)]
struct AppList {
    name: String,
    #[serde(default)]
    apps: IndexMap<String, String>,
}

#[test]
fn test_strict_mode_rejects_scalar_for_map() {
    let text = "\"name\" \"library\" \"apps\" \"none\"";
    let err = from_str::<AppList>(text).unwrap_err();
    assert_eq!(err.category(), Category::TypeBind);
    match err {
        Error::TypeMismatch { key, .. } => assert_eq!(key.as_deref(), Some("apps")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_lenient_mode_skips_mismatched_key() {
    let text = "\"name\" \"library\" \"apps\" \"none\"";
    let list: AppList = from_str_with_options(text, VdfOptions::lenient()).unwrap();
    assert_eq!(list.name, "library");
    assert!(list.apps.is_empty());
}

fn seven() -> u32 {
    7
}

#[derive(Deserialize, Debug)]
struct Server {
    apps: Option<IndexMap<String, String>>,
    #[serde(default = "seven")]
    port: u32,
    #[serde(default)]
    ids: Vec<u32>,
}

#[test]
fn test_lenient_skipped_field_takes_declared_default() {
    let text = "\"apps\" \"none\" \"port\" \"abc\" \"ids\" { \"0\" \"1\" \"1\" \"x\" \"2\" \"3\" }";
    assert!(from_str::<Server>(text).is_err());

    let server: Server = from_str_with_options(text, VdfOptions::lenient()).unwrap();
    assert!(server.apps.is_none());
    assert_eq!(server.port, 7);
    assert_eq!(server.ids, vec![1, 3]);
}

#[test]
fn test_lenient_mode_drops_misfit_map_entry() {
    #[derive(Deserialize, Debug)]
    struct Folder {
        path: String,
    }

    #[derive(Deserialize, Debug)]
    struct Library {
        libraryfolders: IndexMap<u32, Folder>,
    }

    let text = "\"libraryfolders\" { \"0\" { \"path\" \"C:\\Steam\" } \"1\" \"broken\" }";
    let err = from_str::<Library>(text).unwrap_err();
    assert!(err.is_type_bind());

    let library: Library = from_str_with_options(text, VdfOptions::lenient()).unwrap();
    assert_eq!(library.libraryfolders.len(), 1);
    assert_eq!(library.libraryfolders[&0].path, "C:\\Steam");
}

#[test]
fn test_lenient_mode_drops_misfit_sequence_elements() {
    #[derive(Deserialize, Debug)]
    struct Tagged {
        tags: Vec<String>,
        sizes: Vec<u64>,
    }

    let text = "\"tags\" { \"0\" \"Indie\" \"1\" { \"nested\" \"x\" } \"2\" \"Strategy\" }\n\
                \"sizes\" { \"0\" \"-1\" \"1\" \"4735231593\" }";
    let err = from_str::<Tagged>(text).unwrap_err();
    assert!(err.is_type_bind());

    let tagged: Tagged = from_str_with_options(text, VdfOptions::lenient()).unwrap();
    assert_eq!(tagged.tags, vec!["Indie", "Strategy"]);
    assert_eq!(tagged.sizes, vec![4_735_231_593]);
}

#[test]
fn test_end_to_end_steam_scenario() {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Basic {
        desktop_shortcut_check: bool,
        survey_date_version: String,
    }

    // "Steam" in the text, "steam" here
    #[derive(Deserialize)]
    struct Excerpt {
        steam: Basic,
    }

    let text = "\"Steam\"\n{\n\t\"DesktopShortcutCheck\"\t\"1\"\n\
                \t\"SurveyDateVersion\"\t\"42\"\n}";
    let excerpt: Excerpt = from_str(text).unwrap();
    assert!(excerpt.steam.desktop_shortcut_check);
    assert_eq!(excerpt.steam.survey_date_version, "42");
}

#[test]
fn test_shared_config_document() {
    let config: SharedConfig = from_str(SHARED_CONFIG).unwrap();
    let steam = &config.user_roaming_config_store.software.valve.steam;

    assert!(!steam.start_menu_shortcut_check);
    assert!(steam.desktop_shortcut_check);
    assert_eq!(steam.survey_date, NaiveDate::from_ymd_opt(2017, 7, 3).unwrap());
    assert_eq!(steam.survey_date_version, "2586173360812765888");
    assert_eq!(steam.steam_default_dialog, "#app_games");
    assert_eq!(steam.apps["434460"].tags[1], "Strategy");
}

#[test]
fn test_shared_config_untyped() {
    let root = parse(SHARED_CONFIG).unwrap();
    let tag = root.get_path(&[
        "UserRoamingConfigStore",
        "Software",
        "Valve",
        "Steam",
        "apps",
        "434460",
        "tags",
        "1",
    ]);
    assert_eq!(tag.and_then(Value::as_str), Some("Strategy"));

    // untyped access is case-sensitive
    assert!(root.get("userroamingconfigstore").is_none());
}

#[test]
fn test_round_trip_law() {
    let config: SharedConfig = from_str(SHARED_CONFIG).unwrap();
    let written = to_string(&config).unwrap();
    let back: SharedConfig = from_str(&written).unwrap();
    assert_eq!(back, config);

    let tree = parse(&written).unwrap();
    assert_eq!(parse(&tree.to_string()).unwrap(), tree);
}

#[test]
fn test_serializer_layout() {
    let mut apps = IndexMap::new();
    apps.insert(
        "400".to_string(),
        App {
            tags: vec!["Puzzle".to_string()],
        },
    );

    let text = to_string(&apps).unwrap();
    assert_eq!(
        text,
        "\"400\"\r\n{\r\n\t\"tags\"\r\n\t{\r\n\t\t\"0\"\t\t\"Puzzle\"\r\n\t}\r\n}\r\n"
    );
}

#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
struct LibraryStats {
    #[serde(default)]
    contentstatsid: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct LibraryFolder {
    path: String,
    #[serde(default)]
    label: String,
}

#[derive(Deserialize, Debug)]
struct LibraryFolders {
    libraryfolders: Hybrid<LibraryStats, LibraryFolder>,
}

const LIBRARY_FOLDERS: &str = r#""libraryfolders"
{
	"contentstatsid"		"-1882263624787241560"
	"0"
	{
		"path"		"C:\Program Files (x86)\Steam"
		"label"		""
	}
	"1"
	{
		"path"		"D:\SteamLibrary"
		"label"		"games"
	}
}
"#;

#[test]
fn test_library_folders_hybrid() {
    let library: LibraryFolders = from_str(LIBRARY_FOLDERS).unwrap();
    let folders = &library.libraryfolders;

    assert_eq!(folders.fields.contentstatsid, "-1882263624787241560");
    assert_eq!(folders.len(), 2);
    assert_eq!(folders["0"].path, "C:\\Program Files (x86)\\Steam");
    assert_eq!(folders["1"].label, "games");
}

#[test]
fn test_library_folders_hybrid_misfit_entry() {
    let text = r#""libraryfolders"
{
	"ContentStatsId"		"7"
	"0"		{ "path" "C:\Steam" }
	"1"		"broken"
}
"#;

    let err = from_str::<LibraryFolders>(text).unwrap_err();
    assert!(err.is_type_bind());

    let library: LibraryFolders = from_str_with_options(text, VdfOptions::lenient()).unwrap();
    let folders = &library.libraryfolders;
    assert_eq!(folders.fields.contentstatsid, "7");
    assert_eq!(folders.len(), 1);
    assert_eq!(folders["0"].path, "C:\\Steam");
}

#[test]
fn test_hybrid_writes_fields_before_entries() {
    let mut folders: Hybrid<LibraryStats, LibraryFolder> = Hybrid::new(LibraryStats {
        contentstatsid: "7".to_string(),
    });
    folders.insert(
        "0".to_string(),
        LibraryFolder {
            path: "C:\\Steam".to_string(),
            label: String::new(),
        },
    );

    let text = to_string(&folders).unwrap();
    assert_eq!(
        text,
        concat!(
            "\"contentstatsid\"\t\t\"7\"\r\n",
            "\"0\"\r\n{\r\n",
            "\t\"path\"\t\t\"C:\\Steam\"\r\n",
            "\t\"label\"\t\t\"\"\r\n",
            "}\r\n",
        )
    );

    let back: Hybrid<LibraryStats, LibraryFolder> = from_str(&text).unwrap();
    assert_eq!(back, folders);
}

#[test]
fn test_hybrid_entry_named_like_a_field_is_written_twice() {
    let mut stats: Hybrid<LibraryStats, String> = Hybrid::new(LibraryStats {
        contentstatsid: "7".to_string(),
    });
    stats.insert("contentstatsid".to_string(), "8".to_string());
    stats.insert("1".to_string(), "D:\\SteamLibrary".to_string());

    let text = to_string(&stats).unwrap();
    assert_eq!(
        text,
        concat!(
            "\"contentstatsid\"\t\t\"7\"\r\n",
            "\"contentstatsid\"\t\t\"8\"\r\n",
            "\"1\"\t\t\"D:\\SteamLibrary\"\r\n",
        )
    );

    // Reading collapses the duplicate, and the key binds as a field.
    let back: Hybrid<LibraryStats, String> = from_str(&text).unwrap();
    assert_eq!(back.fields.contentstatsid, "8");
    assert_eq!(back.len(), 1);
}

#[test]
fn test_unterminated_object_is_format_error() {
    let err = from_str::<Value>("\"root\"\n{\n\t\"key\" \"value\"\n").unwrap_err();
    assert!(err.is_format());
    match err {
        Error::UnexpectedEof { expected, context, .. } => {
            assert!(expected.contains("unterminated object"));
            assert!(context.contains("root"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_from_reader_and_slice() {
    let config: SharedConfig = from_reader(SHARED_CONFIG.as_bytes()).unwrap();
    assert!(config.user_roaming_config_store.software.valve.steam.desktop_shortcut_check);

    let mut bytes = vec![0xef, 0xbb, 0xbf];
    bytes.extend_from_slice(LIBRARY_FOLDERS.as_bytes());
    let library: LibraryFolders = from_slice(&bytes).unwrap();
    assert_eq!(library.libraryfolders.len(), 2);
}

#[test]
fn test_optional_fields_are_omitted() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Shortcut {
        appname: String,
        icon: Option<String>,
    }

    let shortcut = Shortcut {
        appname: "Portal".to_string(),
        icon: None,
    };
    let text = to_string(&shortcut).unwrap();
    assert_eq!(text, "\"appname\"\t\t\"Portal\"\r\n");
    assert_eq!(from_str::<Shortcut>(&text).unwrap(), shortcut);
}
