use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CATALOG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawRect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawShell {
    taskbar_height: i32,
    min_window_width: i32,
    min_window_height: i32,
    transition_timeout_ms: u32,
    deferred_maximize_ms: u32,
    long_press_ms: u32,
    initial_z_index: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawWindow {
    id: String,
    title: String,
    icon_label: String,
    content: String,
    show_on_desktop: bool,
    show_in_start_menu: bool,
    rect: RawRect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawProject {
    id: String,
    title: String,
    summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCatalog {
    schema_version: u32,
    shell: RawShell,
    windows: Vec<RawWindow>,
    #[serde(default)]
    projects: Vec<RawProject>,
}

fn validate(catalog: &RawCatalog, path: &str) {
    if catalog.schema_version != CATALOG_SCHEMA_VERSION {
        panic!(
            "catalog schema mismatch in {path}: expected {CATALOG_SCHEMA_VERSION} found {}",
            catalog.schema_version
        );
    }
    if catalog.shell.min_window_width <= 0 || catalog.shell.min_window_height <= 0 {
        panic!("minimum window size in {path} must be positive");
    }

    let mut seen = BTreeSet::new();
    let ids = catalog
        .windows
        .iter()
        .map(|w| w.id.as_str())
        .chain(catalog.projects.iter().map(|p| p.id.as_str()));
    for id in ids {
        if id.trim().is_empty() {
            panic!("empty window id in {path}");
        }
        if !seen.insert(id) {
            panic!("duplicate window id `{id}` in {path}");
        }
    }

    for window in &catalog.windows {
        if window.rect.w < catalog.shell.min_window_width
            || window.rect.h < catalog.shell.min_window_height
        {
            panic!(
                "window `{}` in {path} is smaller than the minimum window size",
                window.id
            );
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("desktop.catalog.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: RawCatalog = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&catalog, &path.display().to_string());

    let json = serde_json::to_string_pretty(&catalog).expect("serialize desktop catalog");
    let generated = format!(
        "/// Build-time generated desktop catalog JSON.\n\
pub const DESKTOP_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("desktop_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
