use crate::model::WindowRect;

#[cfg(target_arch = "wasm32")]
fn inner_size() -> Option<(i32, i32)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()? as i32;
    let height = window.inner_height().ok()?.as_f64()? as i32;
    Some((width, height))
}

#[cfg(not(target_arch = "wasm32"))]
fn inner_size() -> Option<(i32, i32)> {
    None
}

/// Full browser viewport. The taskbar strip is subtracted later by the work-area calculation.
pub(super) fn viewport_rect() -> WindowRect {
    let (w, h) = inner_size().unwrap_or((1024, 768));
    WindowRect {
        x: 0,
        y: 0,
        w: w.max(320),
        h: h.max(220),
    }
}

/// Shows a blocking browser notice.
#[cfg(target_arch = "wasm32")]
pub(super) fn show_notice(message: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.alert_with_message(message) {
        leptos::logging::warn!("notice failed: {err:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub(super) fn show_notice(message: &str) {
    leptos::logging::log!("{message}");
}

/// Portrait viewports at most `max_width` wide get the rotate-device hint.
pub(super) fn is_narrow_portrait(viewport: WindowRect, max_width: i32) -> bool {
    viewport.w < viewport.h && viewport.w <= max_width
}
