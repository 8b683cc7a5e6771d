//! Taskbar task menu: Restore / Maximize / Close for a single window.

use serde::{Deserialize, Serialize};

use crate::{
    lifecycle,
    model::{DesktopEnvironment, DesktopState, LifecycleState, TaskMenuState, WindowId, WindowRect},
    reducer::{DesktopAction, ReducerError, RuntimeEffect},
};

/// Vertical gap between the task menu and its taskbar button.
pub const TASK_MENU_GAP: i32 = 8;
/// Rendered height of the three-item task menu.
pub const TASK_MENU_HEIGHT: i32 = 96;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskMenuItem {
    Restore,
    Maximize,
    Close,
}

impl TaskMenuItem {
    pub const ALL: [TaskMenuItem; 3] = [Self::Restore, Self::Maximize, Self::Close];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Restore => "Restore",
            Self::Maximize => "Maximize",
            Self::Close => "Close",
        }
    }
}

/// Places the menu's left edge on the button's left edge and its bottom just above the button.
pub fn menu_position(button: WindowRect, menu_height: i32) -> (i32, i32) {
    (
        button.x.max(0),
        (button.y - menu_height - TASK_MENU_GAP).max(0),
    )
}

/// Opens the task menu for an open window, replacing any menu already shown.
pub fn open(
    state: &mut DesktopState,
    window_id: &WindowId,
    button: WindowRect,
) -> Result<(), ReducerError> {
    let window = state.windows.get(window_id)?;
    if !window.is_open() {
        return Err(ReducerError::InvalidTransition {
            window_id: window_id.clone(),
            state: window.state,
            operation: "open task menu",
        });
    }
    let (x, y) = menu_position(button, TASK_MENU_HEIGHT);
    state.start_menu_open = false;
    state.task_menu = Some(TaskMenuState {
        window_id: window_id.clone(),
        x,
        y,
    });
    Ok(())
}

pub fn dismiss(state: &mut DesktopState) {
    state.task_menu = None;
}

/// Dismisses the menu if it is bound to `window_id`.
pub fn dismiss_for_window(state: &mut DesktopState, window_id: &WindowId) {
    if state
        .task_menu
        .as_ref()
        .is_some_and(|menu| menu.window_id == *window_id)
    {
        state.task_menu = None;
    }
}

/// Runs `item` against the menu's window. The menu is always dismissed first.
///
/// Maximizing a minimized window restores it now and defers the maximize, since maximize
/// snapshots the visible geometry.
pub fn activate(
    state: &mut DesktopState,
    env: &DesktopEnvironment,
    item: TaskMenuItem,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let Some(menu) = state.task_menu.take() else {
        return Ok(());
    };
    let window_id = menu.window_id;

    match item {
        TaskMenuItem::Restore => lifecycle::restore_window(state, &window_id),
        TaskMenuItem::Close => lifecycle::close_window(state, env, &window_id, effects),
        TaskMenuItem::Maximize => {
            let current = state.windows.get(&window_id)?.state;
            if current == LifecycleState::Minimized {
                lifecycle::restore_window(state, &window_id)?;
                effects.push(RuntimeEffect::DispatchAfter {
                    action: Box::new(DesktopAction::MaximizeWindow { window_id }),
                    delay_ms: env.config.deferred_maximize_ms,
                });
                Ok(())
            } else {
                lifecycle::toggle_maximize(state, env, &window_id)
            }
        }
    }
}
