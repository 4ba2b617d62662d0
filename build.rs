//! Build script for monthsync.
//!
//! Copies the `.env.example` template into the user's configuration directory so
//! the expected settings are discoverable next to where the tool reads them.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root to `<config dir>/monthsync/`.
///
/// # Destination
///
/// - Linux: `~/.config/monthsync/.env.example`
/// - macOS: `~/Library/Application Support/monthsync/.env.example`
/// - Windows: `%APPDATA%/monthsync/.env.example`
///
/// A missing template only produces a cargo warning. Directory creation and
/// write failures abort the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("monthsync");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
