//! Reading Steam's libraryfolders.vdf, an object with both named fields and
//! numbered entries.
//!
//! Run with: cargo run --example library_folders

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_vdf::{from_str, to_string, Hybrid};
use std::error::Error;

const LIBRARY_FOLDERS: &str = r#""libraryfolders"
{
	"contentstatsid"		"-1882263624787241560"
	"0"
	{
		"path"		"C:\Program Files (x86)\Steam"
		"label"		""
		"totalsize"		"0"
		"apps"
		{
			"228980"		"345446035"
			"400"		"4735231593"
		}
	}
	"1"
	{
		"path"		"D:\SteamLibrary"
		"label"		"Games"
		"totalsize"		"1000203087872"
		"apps"
		{
			"620"		"12729646223"
		}
	}
}
"#;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Stats {
    #[serde(default)]
    contentstatsid: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Folder {
    path: String,
    label: String,
    totalsize: u64,
    apps: IndexMap<u32, u64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Library {
    libraryfolders: Hybrid<Stats, Folder, u32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let library: Library = from_str(LIBRARY_FOLDERS)?;
    let folders = &library.libraryfolders;

    println!("contentstatsid: {}", folders.fields.contentstatsid);
    for (index, folder) in folders.iter() {
        let installed: u64 = folder.apps.values().sum();
        println!(
            "library {} at {} holds {} apps ({} bytes)",
            index,
            folder.path,
            folder.apps.len(),
            installed
        );
    }

    // Named fields are written before the entries
    println!("\nWritten back:\n{}", to_string(&library)?);

    Ok(())
}
