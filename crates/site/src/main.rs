//! Binary entrypoint for the browser-hosted `site` application.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    site::mount();
}

/// Native builds only summarize the embedded catalog; the desktop itself needs a browser.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let catalog = desktop_runtime::catalog::desktop_catalog();
    let windows: Vec<&str> = catalog.windows.iter().map(|w| w.id.as_str()).collect();
    eprintln!(
        "portfolio desktop catalog v{}: windows [{}], {} project pages",
        catalog.schema_version,
        windows.join(", "),
        catalog.projects.len()
    );
    eprintln!("Serve the wasm32 build of `site_app` (feature `csr`) with `trunk serve` from crates/site.");
}
