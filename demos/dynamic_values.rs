//! Working with the untyped Value tree.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_vdf::{from_value, parse, to_string, to_value, vdf, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct App {
    name: String,
    tags: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build a tree with the vdf! macro
    let apps = vdf!({
        "apps": {
            "400": { "name": "Portal", "tags": ["Puzzle", "Sci-fi"] },
            "620": { "name": "Portal 2", "tags": ["Puzzle", "Co-op"] }
        }
    });

    println!("Apps as VDF:\n{}", to_string(&apps)?);

    // Walk it without a schema
    if let Some(Value::Object(by_id)) = apps.get("apps") {
        for (appid, app) in by_id {
            let name = app.get("name").and_then(Value::as_str).unwrap_or("?");
            println!("{} => {}", appid, name);
        }
    }

    // Parsed text gives the same tree
    let reparsed = parse(&to_string(&apps)?)?;
    assert_eq!(reparsed, apps);

    // Bind part of the tree to a type
    let portal: App = from_value(apps.get_path(&["apps", "400"]).cloned().unwrap_or_default())?;
    println!("\nBound: {:?}", portal);

    // And go back the other way
    let value = to_value(&portal)?;
    println!("\nPortal as Value:\n{}", value);

    Ok(())
}
