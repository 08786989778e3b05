//! Strict versus lenient binding of hand-edited files.
//!
//! Run with: cargo run --example lenient

use indexmap::IndexMap;
use serde::Deserialize;
use serde_vdf::{from_str, from_str_with_options, VdfOptions};
use std::error::Error;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Steam {
    desktop_shortcut_check: bool,
    #[serde(default)]
    apps: IndexMap<String, App>,
}

#[derive(Debug, Deserialize)]
struct App {
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Config {
    steam: Steam,
}

const DAMAGED: &str = r#""Steam"
{
	"DesktopShortcutCheck"		"1"
	"Apps"		"removed by hand"
}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    match from_str::<Config>(DAMAGED) {
        Ok(config) => println!("strict: {:?}", config),
        Err(err) => println!("strict: {}", err),
    }

    let config: Config = from_str_with_options(DAMAGED, VdfOptions::lenient())?;
    println!("lenient: {:?}", config);
    assert!(config.steam.desktop_shortcut_check);
    assert!(config.steam.apps.is_empty());

    Ok(())
}
