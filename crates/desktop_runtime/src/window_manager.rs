//! Z-order/focus manager and geometry helpers shared by the lifecycle and interaction code.

use serde::{Deserialize, Serialize};

use crate::{
    model::{ResizeEdge, WindowId, WindowRect},
    reducer::ReducerError,
    window_store::WindowStore,
};

/// Monotonic stacking counter. [`FocusStack::bring_to_front`] is the only writer of `z_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusStack {
    highest_z: u64,
}

impl FocusStack {
    pub fn new(initial_z: u64) -> Self {
        Self {
            highest_z: initial_z,
        }
    }

    pub fn highest_z(&self) -> u64 {
        self.highest_z
    }

    /// Raises `window_id` above every other window and makes it the sole focused window.
    ///
    /// Returns the newly assigned stacking value.
    pub fn bring_to_front(
        &mut self,
        store: &mut WindowStore,
        window_id: &WindowId,
    ) -> Result<u64, ReducerError> {
        store.get(window_id)?;
        self.highest_z = self.highest_z.saturating_add(1);
        let z_index = self.highest_z;
        for window in store.iter_mut() {
            window.is_focused = window.id == *window_id;
            if window.is_focused {
                window.z_index = z_index;
            }
        }
        Ok(z_index)
    }

    /// Clears focus from `window_id` without handing it to another window.
    pub fn blur(&self, store: &mut WindowStore, window_id: &WindowId) -> Result<(), ReducerError> {
        store.get_mut(window_id)?.is_focused = false;
        Ok(())
    }
}

/// Applies anchor-relative resize deltas for an edge/corner drag.
///
/// Width and height floor at the given minimums. When a west or north edge is clamped, the origin
/// moves only as far as the clamped size allows, so the opposite edge stays put.
pub fn resize_rect(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    min_w: i32,
    min_h: i32,
) -> WindowRect {
    let (x, w) = if edge.moves_west_edge() {
        let w = (start.w - dx).max(min_w);
        (start.x + (start.w - w), w)
    } else if edge.moves_east_edge() {
        (start.x, (start.w + dx).max(min_w))
    } else {
        (start.x, start.w)
    };

    let (y, h) = if edge.moves_north_edge() {
        let h = (start.h - dy).max(min_h);
        (start.y + (start.h - h), h)
    } else if edge.moves_south_edge() {
        (start.y, (start.h + dy).max(min_h))
    } else {
        (start.y, start.h)
    };

    WindowRect { x, y, w, h }
}

/// Default cascade position for the `index`-th on-demand window.
pub fn cascade_rect(index: usize) -> WindowRect {
    let offset = (index % 8) as i32 * 24;
    WindowRect {
        x: 100 + offset,
        y: 120 + offset,
        ..WindowRect::default()
    }
}
