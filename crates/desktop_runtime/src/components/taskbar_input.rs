//! Taskbar button input helpers: keyboard shortcuts, long-press, and button geometry.

use std::time::Duration;

use leptos::*;
use leptos::leptos_dom::helpers::TimeoutHandle;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::model::WindowRect;

/// Returns whether the keyboard event should open a window's task menu.
pub(super) fn is_context_menu_shortcut(ev: &web_sys::KeyboardEvent) -> bool {
    is_context_menu_key(&ev.key(), ev.shift_key())
}

/// Returns whether the keyboard event should activate a taskbar entry.
pub(super) fn is_activation_key(ev: &web_sys::KeyboardEvent) -> bool {
    matches!(ev.key().as_str(), "Enter" | " " | "Spacebar")
}

fn is_context_menu_key(key: &str, shift: bool) -> bool {
    key == "ContextMenu" || (shift && key == "F10")
}

/// Viewport rectangle of the element an event was bound to.
#[cfg(target_arch = "wasm32")]
pub(super) fn current_target_rect(ev: &web_sys::Event) -> Option<WindowRect> {
    let element = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = element.get_bounding_client_rect();
    Some(WindowRect {
        x: rect.x().round() as i32,
        y: rect.y().round() as i32,
        w: rect.width().round() as i32,
        h: rect.height().round() as i32,
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub(super) fn current_target_rect(_: &web_sys::Event) -> Option<WindowRect> {
    None
}

/// Pending touch long-press. At most one is armed at a time.
#[derive(Clone, Copy)]
pub(super) struct LongPress {
    pending: StoredValue<Option<TimeoutHandle>>,
    fired: StoredValue<bool>,
}

impl LongPress {
    pub(super) fn new() -> Self {
        let press = Self {
            pending: store_value(None),
            fired: store_value(false),
        };
        on_cleanup(move || press.cancel());
        press
    }

    /// Arms `on_fire` to run after `delay_ms` unless the press is cancelled first.
    pub(super) fn arm(&self, delay_ms: u32, on_fire: impl FnOnce() + 'static) {
        self.cancel();
        self.fired.set_value(false);
        let fired = self.fired;
        let pending = self.pending;
        let scheduled = set_timeout_with_handle(
            move || {
                pending.set_value(None);
                fired.set_value(true);
                on_fire();
            },
            Duration::from_millis(u64::from(delay_ms)),
        );
        match scheduled {
            Ok(handle) => self.pending.set_value(Some(handle)),
            Err(err) => logging::warn!("long-press timer failed: {err:?}"),
        }
    }

    pub(super) fn cancel(&self) {
        if let Some(handle) = self.pending.try_update_value(Option::take).flatten() {
            handle.clear();
        }
    }

    /// Returns whether the last press fired, resetting the flag. The click that follows a
    /// long-press is swallowed with this.
    pub(super) fn take_fired(&self) -> bool {
        let fired = self.fired.get_value();
        self.fired.set_value(false);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_menu_keys() {
        assert!(is_context_menu_key("ContextMenu", false));
        assert!(is_context_menu_key("F10", true));
        assert!(!is_context_menu_key("F10", false));
        assert!(!is_context_menu_key("Enter", true));
    }
}
