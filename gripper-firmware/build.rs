//! Build script for gripper-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates gripper.toml and embeds it as postcard binary data

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use gripper_core::config::GripperConfig;

/// File name of the embedded config blob in OUT_DIR
const CONFIG_BLOB: &str = "gripper_config.bin";

fn main() {
    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => fail("OUT_DIR not set", &e.to_string()),
    };

    setup_linker(&out_dir);
    embed_config(&out_dir);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let written = File::create(out_dir.join("memory.x")).and_then(|mut f| f.write_all(memory_x));
    if let Err(e) = written {
        fail("Failed to place memory.x", &e.to_string());
    }

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse, validate and serialize gripper.toml
fn embed_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=gripper.toml");

    let config_path = Path::new("gripper.toml");
    if !config_path.exists() {
        fail(
            "gripper.toml not found!",
            "The firmware embeds gripper.toml from the gripper-firmware\n\
             directory. Create it, or copy the one from version control.",
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read gripper.toml", &e.to_string()),
    };

    let config: GripperConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail("Invalid gripper.toml", &e.to_string()),
    };

    if let Err(e) = config.validate() {
        fail("gripper.toml failed validation", &e.to_string());
    }

    let blob = match postcard::to_stdvec(&config) {
        Ok(blob) => blob,
        Err(e) => fail("Failed to serialize configuration", &e.to_string()),
    };

    if let Err(e) = fs::write(out_dir.join(CONFIG_BLOB), &blob) {
        fail("Failed to write configuration blob", &e.to_string());
    }

    println!(
        "cargo:warning=gripper.toml validated successfully ({} bytes embedded)",
        blob.len()
    );
}

/// Abort the build with a boxed error message
fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                let head: String = line.chars().take(61).collect();
                format!("{}...", head)
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
