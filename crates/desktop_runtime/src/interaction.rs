//! Pointer-driven drag and resize gestures.
//!
//! Deltas are always measured from the gesture's starting pointer position and applied to the
//! geometry captured at gesture start, so repeated moves never accumulate rounding drift.

use crate::{
    lifecycle,
    model::{
        DesktopEnvironment, DesktopState, DragSession, InteractionState, LifecycleState,
        PointerPosition, ResizeEdge, ResizeSession, WindowId,
    },
    reducer::ReducerError,
    window_manager::resize_rect,
};

/// Converts a pointer gesture into deltas relative to its pointer-down position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerTracker {
    origin: PointerPosition,
}

impl PointerTracker {
    pub fn start(origin: PointerPosition) -> Self {
        Self { origin }
    }

    pub fn delta(&self, pointer: PointerPosition) -> (i32, i32) {
        (pointer.x - self.origin.x, pointer.y - self.origin.y)
    }
}

/// Starts dragging `window_id` by its title bar. The window is raised either way; maximized
/// windows do not start a drag session.
pub fn begin_move(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    window_id: &WindowId,
    pointer: PointerPosition,
) -> Result<(), ReducerError> {
    ensure_no_gesture(interaction)?;
    let lifecycle_state = ensure_visible(state, window_id, "move")?;
    state.stack.bring_to_front(&mut state.windows, window_id)?;
    if lifecycle_state == LifecycleState::Maximized {
        return Ok(());
    }

    let rect_start = state.windows.get(window_id)?.rect;
    interaction.dragging = Some(DragSession {
        window_id: window_id.clone(),
        tracker: PointerTracker::start(pointer),
        rect_start,
    });
    Ok(())
}

/// Applies the current pointer position to the active drag, if any.
pub fn update_move(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    pointer: PointerPosition,
) -> Result<(), ReducerError> {
    let Some(session) = interaction.dragging.as_ref() else {
        return Ok(());
    };
    let Ok(window) = state.windows.get_mut(&session.window_id) else {
        interaction.dragging = None;
        return Ok(());
    };
    if window.state != LifecycleState::Normal {
        return Ok(());
    }
    let (dx, dy) = session.tracker.delta(pointer);
    window.rect = session.rect_start.offset(dx, dy);
    Ok(())
}

pub fn end_move(interaction: &mut InteractionState) {
    interaction.dragging = None;
}

/// Starts resizing `window_id` from `edge`. A maximized window is restored first so the gesture
/// starts from its saved normal geometry.
pub fn begin_resize(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    window_id: &WindowId,
    edge: ResizeEdge,
    pointer: PointerPosition,
) -> Result<(), ReducerError> {
    ensure_no_gesture(interaction)?;
    ensure_visible(state, window_id, "resize")?;
    state.stack.bring_to_front(&mut state.windows, window_id)?;

    let window = state.windows.get_mut(window_id)?;
    if window.state == LifecycleState::Maximized {
        lifecycle::leave_maximized(window);
    }
    interaction.resizing = Some(ResizeSession {
        window_id: window_id.clone(),
        edge,
        tracker: PointerTracker::start(pointer),
        rect_start: window.rect,
    });
    Ok(())
}

/// Applies the current pointer position to the active resize, if any.
pub fn update_resize(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    env: &DesktopEnvironment,
    pointer: PointerPosition,
) -> Result<(), ReducerError> {
    let Some(session) = interaction.resizing.as_ref() else {
        return Ok(());
    };
    let Ok(window) = state.windows.get_mut(&session.window_id) else {
        interaction.resizing = None;
        return Ok(());
    };
    if window.state != LifecycleState::Normal {
        return Ok(());
    }
    let (dx, dy) = session.tracker.delta(pointer);
    window.rect = resize_rect(
        session.rect_start,
        session.edge,
        dx,
        dy,
        env.config.min_window_width,
        env.config.min_window_height,
    );
    Ok(())
}

pub fn end_resize(interaction: &mut InteractionState) {
    interaction.resizing = None;
}

fn ensure_no_gesture(interaction: &InteractionState) -> Result<(), ReducerError> {
    if interaction.has_active_gesture() {
        return Err(ReducerError::GestureInProgress);
    }
    Ok(())
}

fn ensure_visible(
    state: &DesktopState,
    window_id: &WindowId,
    operation: &'static str,
) -> Result<LifecycleState, ReducerError> {
    let window = state.windows.get(window_id)?;
    match window.state {
        LifecycleState::Normal | LifecycleState::Maximized => Ok(window.state),
        LifecycleState::Minimized | LifecycleState::Closed => {
            Err(ReducerError::InvalidTransition {
                window_id: window_id.clone(),
                state: window.state,
                operation,
            })
        }
    }
}
