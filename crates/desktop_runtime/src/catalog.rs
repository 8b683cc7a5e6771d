//! Build-time desktop catalog: shell tunables, declared windows, and project templates.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::model::{
    DesktopState, DynamicWindowRequest, ShellConfig, WindowContent, WindowId, WindowRect,
};

include!(concat!(env!("OUT_DIR"), "/desktop_catalog_generated.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogWindow {
    pub id: String,
    pub title: String,
    pub icon_label: String,
    pub content: String,
    pub show_on_desktop: bool,
    pub show_in_start_menu: bool,
    pub rect: WindowRect,
}

/// Project card rendered in the projects pane; opening one instantiates a document window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogProject {
    pub id: String,
    pub title: String,
    pub summary: String,
}

impl CatalogProject {
    pub fn window_request(&self) -> DynamicWindowRequest {
        DynamicWindowRequest::document(
            self.id.as_str(),
            self.title.as_str(),
            self.title.as_str(),
            self.summary.as_str(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DesktopCatalog {
    pub schema_version: u32,
    pub shell: ShellConfig,
    pub windows: Vec<CatalogWindow>,
    #[serde(default)]
    pub projects: Vec<CatalogProject>,
}

/// Returns the parsed desktop catalog.
pub fn desktop_catalog() -> &'static DesktopCatalog {
    static CATALOG: OnceLock<DesktopCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        serde_json::from_str(DESKTOP_CATALOG_JSON)
            .expect("generated desktop catalog should parse")
    })
}

pub fn shell_config() -> ShellConfig {
    desktop_catalog().shell
}

pub fn desktop_icon_windows() -> impl Iterator<Item = &'static CatalogWindow> {
    desktop_catalog()
        .windows
        .iter()
        .filter(|window| window.show_on_desktop)
}

pub fn start_menu_windows() -> impl Iterator<Item = &'static CatalogWindow> {
    desktop_catalog()
        .windows
        .iter()
        .filter(|window| window.show_in_start_menu)
}

pub fn projects() -> &'static [CatalogProject] {
    &desktop_catalog().projects
}

impl DesktopState {
    /// Builds the boot state: every declared window exists, closed, at its catalog geometry.
    pub fn from_catalog(catalog: &DesktopCatalog) -> Self {
        let mut state = Self::with_config(&catalog.shell);
        for entry in &catalog.windows {
            if let Ok(window) =
                state
                    .windows
                    .create(WindowId::new(entry.id.as_str()), entry.title.as_str(), entry.rect)
            {
                window.content = WindowContent::Builtin(entry.content.clone());
            }
        }
        state
    }
}
