//! Basic VDF serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_vdf::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct Steam {
    desktop_shortcut_check: bool,
    start_menu_shortcut_check: bool,
    survey_date_version: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct Config {
    steam: Steam,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        steam: Steam {
            desktop_shortcut_check: true,
            start_menu_shortcut_check: false,
            survey_date_version: "2586173360812765888".to_string(),
        },
    };

    // Serialize to VDF
    let vdf = to_string(&config)?;
    println!("VDF output:\n{}", vdf);

    // Deserialize back to struct
    let config_back: Config = from_str(&vdf)?;
    assert_eq!(config, config_back);
    println!("✓ Round-trip successful");

    // Field names match regardless of case
    let lowercase: Config = from_str(&vdf.to_lowercase())?;
    assert!(lowercase.steam.desktop_shortcut_check);
    println!("✓ Lower-cased keys bind to the same fields");

    Ok(())
}
