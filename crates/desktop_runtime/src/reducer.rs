//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use leptos::logging;
use thiserror::Error;

use crate::{
    interaction, lifecycle,
    model::{
        DesktopEnvironment, DesktopState, DynamicWindowRequest, InteractionState, LifecycleState,
        PointerPosition, ResizeEdge, WindowControl, WindowId, WindowOrigin, WindowRect,
    },
    task_menu::{self, TaskMenuItem},
    taskbar_binding, transition,
    window_manager::cascade_rect,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a declared or previously instantiated window.
    OpenWindow {
        /// Window to open.
        window_id: WindowId,
    },
    /// Create (on first request) and open a template-instantiated window.
    OpenDynamicWindow(DynamicWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Restore a minimized or maximized window.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Maximize a normal window, or restore a maximized one.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Maximize a window unless it already is.
    MaximizeWindow {
        /// Window to maximize.
        window_id: WindowId,
    },
    /// Title-bar control addressed to a window.
    WindowControl {
        /// Target window.
        window_id: WindowId,
        /// Control that was activated.
        control: WindowControl,
    },
    /// Taskbar entry click: restore a minimized window, minimize anything else.
    ActivateTaskbarEntry {
        /// Window bound to the entry.
        window_id: WindowId,
    },
    /// Open the task menu for a window above its taskbar button.
    OpenTaskMenu {
        /// Window bound to the menu.
        window_id: WindowId,
        /// Taskbar button rectangle in viewport coordinates.
        button: WindowRect,
    },
    /// Run a task menu item against the menu's window.
    ActivateTaskMenuItem {
        /// Selected item.
        item: TaskMenuItem,
    },
    /// Dismiss the task menu if open.
    DismissTaskMenu,
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Power the desktop off. Every later action is ignored.
    ShutDown,
    /// Begin dragging a window.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
    /// Finalize an open/close transition (animation end or timeout fallback).
    CompleteTransition {
        /// Window whose transition finished.
        window_id: WindowId,
        /// Token of the transition being finalized.
        token: u64,
        /// Whether the timeout fallback fired (as opposed to the UI completion signal).
        timed_out: bool,
    },
    /// Escape: dismiss the focused or topmost window without animation.
    DismissTopmost,
}

impl WindowControl {
    /// Maps a title-bar control to the reducer action it triggers.
    pub fn into_action(self, window_id: WindowId) -> DesktopAction {
        match self {
            Self::Minimize => DesktopAction::MinimizeWindow { window_id },
            Self::Maximize => DesktopAction::ToggleMaximize { window_id },
            Self::Close => DesktopAction::CloseWindow { window_id },
            Self::Restore => DesktopAction::RestoreWindow { window_id },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Notify the content host that a window was opened for the first time.
    InitializeContent(WindowId),
    /// Play the open chime (only emitted when the notifier is armed).
    PlayOpenChime,
    /// Arm the fallback timer that force-completes a transition.
    ScheduleTransitionTimeout {
        /// Window in transition.
        window_id: WindowId,
        /// Transition token to complete.
        token: u64,
        /// Timeout in milliseconds.
        delay_ms: u32,
    },
    /// Cancel a fallback timer whose transition already completed.
    ClearTransitionTimer {
        /// Window whose transition completed.
        window_id: WindowId,
        /// Completed transition token.
        token: u64,
    },
    /// Dispatch `action` after `delay_ms`.
    DispatchAfter {
        /// Deferred action.
        action: Box<DesktopAction>,
        /// Delay in milliseconds.
        delay_ms: u32,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors. None of them is fatal: the runtime logs and discards the rejected action.
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("window `{0}` not found")]
    WindowNotFound(WindowId),
    /// A window with this id is already open.
    #[error("window `{0}` already exists")]
    DuplicateWindow(WindowId),
    /// The operation is not valid in the window's current lifecycle state.
    #[error("cannot {operation} window `{window_id}` while {state}")]
    InvalidTransition {
        /// Target window.
        window_id: WindowId,
        /// Lifecycle state at the time of the request.
        state: LifecycleState,
        /// Rejected operation.
        operation: &'static str,
    },
    /// An open/close transition is still in flight for the window.
    #[error("window `{0}` is still animating")]
    TransitionInFlight(WindowId),
    /// Another drag or resize gesture holds the pointer.
    #[error("another pointer gesture is active")]
    GestureInProgress,
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// This function is the authoritative state transition engine for desktop window management.
/// `env` carries read-only inputs (viewport, notifier flag, shell config).
///
/// # Errors
///
/// Returns a [`ReducerError`] when the action is rejected. State may be partially mutated in that
/// case; callers apply the new state only on `Ok`.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    env: &DesktopEnvironment,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    if state.shut_down {
        return Ok(effects);
    }
    match action {
        DesktopAction::OpenWindow { window_id } => {
            lifecycle::open_window(state, env, &window_id, &mut effects)?;
        }
        DesktopAction::OpenDynamicWindow(req) => {
            if !state.windows.contains(&req.id) {
                let rect = req
                    .rect
                    .unwrap_or_else(|| cascade_rect(instantiated_count(state)))
                    .clamped_min(env.config.min_window_width, env.config.min_window_height);
                let window = state.windows.create(req.id.clone(), req.title, rect)?;
                window.origin = WindowOrigin::Instantiated;
                window.content = req.content;
            }
            lifecycle::open_window(state, env, &req.id, &mut effects)?;
        }
        DesktopAction::CloseWindow { window_id } => {
            lifecycle::close_window(state, env, &window_id, &mut effects)?;
            interaction.cancel_for_window(&window_id);
            task_menu::dismiss_for_window(state, &window_id);
        }
        DesktopAction::FocusWindow { window_id } => {
            lifecycle::focus_window(state, &window_id)?;
            state.start_menu_open = false;
        }
        DesktopAction::MinimizeWindow { window_id } => {
            lifecycle::minimize_window(state, &window_id)?;
            interaction.cancel_for_window(&window_id);
        }
        DesktopAction::RestoreWindow { window_id } => {
            lifecycle::restore_window(state, &window_id)?;
        }
        DesktopAction::ToggleMaximize { window_id } => {
            lifecycle::toggle_maximize(state, env, &window_id)?;
            interaction.cancel_for_window(&window_id);
        }
        DesktopAction::MaximizeWindow { window_id } => {
            lifecycle::maximize_window(state, env, &window_id)?;
            interaction.cancel_for_window(&window_id);
        }
        DesktopAction::WindowControl { window_id, control } => {
            return reduce_desktop(state, interaction, env, control.into_action(window_id));
        }
        DesktopAction::ActivateTaskbarEntry { window_id } => {
            let current = state.windows.get(&window_id)?.state;
            if current == LifecycleState::Minimized {
                lifecycle::restore_window(state, &window_id)?;
            } else {
                lifecycle::minimize_window(state, &window_id)?;
                interaction.cancel_for_window(&window_id);
            }
        }
        DesktopAction::OpenTaskMenu { window_id, button } => {
            task_menu::open(state, &window_id, button)?;
        }
        DesktopAction::ActivateTaskMenuItem { item } => {
            let window_id = state.task_menu.as_ref().map(|menu| menu.window_id.clone());
            // The menu stays dismissed even when the item itself is rejected.
            if let Err(err) = task_menu::activate(state, env, item, &mut effects) {
                logging::warn!("task menu item rejected: {err}");
            } else if let Some(window_id) = window_id {
                if item == TaskMenuItem::Close {
                    interaction.cancel_for_window(&window_id);
                }
            }
        }
        DesktopAction::DismissTaskMenu => task_menu::dismiss(state),
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
            if state.start_menu_open {
                task_menu::dismiss(state);
            }
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::ShutDown => {
            state.start_menu_open = false;
            task_menu::dismiss(state);
            interaction.dragging = None;
            interaction.resizing = None;
            state.shut_down = true;
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            interaction::begin_move(state, interaction, &window_id, pointer)?;
        }
        DesktopAction::UpdateMove { pointer } => {
            interaction::update_move(state, interaction, pointer)?;
        }
        DesktopAction::EndMove => interaction::end_move(interaction),
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            interaction::begin_resize(state, interaction, &window_id, edge, pointer)?;
        }
        DesktopAction::UpdateResize { pointer } => {
            interaction::update_resize(state, interaction, env, pointer)?;
        }
        DesktopAction::EndResize => interaction::end_resize(interaction),
        DesktopAction::CompleteTransition {
            window_id,
            token,
            timed_out,
        } => {
            let finished = transition::finish(state, &window_id, token)?;
            if finished.is_some() && !timed_out {
                effects.push(RuntimeEffect::ClearTransitionTimer { window_id, token });
            }
        }
        DesktopAction::DismissTopmost => {
            if let Some(window_id) = lifecycle::dismiss_topmost(state)? {
                interaction.cancel_for_window(&window_id);
                task_menu::dismiss_for_window(state, &window_id);
            }
        }
    }

    taskbar_binding::sync_all(state);
    Ok(effects)
}

fn instantiated_count(state: &DesktopState) -> usize {
    state
        .windows
        .iter()
        .filter(|w| w.origin == WindowOrigin::Instantiated)
        .count()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{TransitionKind, WindowContent};

    const W1_RECT: WindowRect = WindowRect {
        x: 100,
        y: 100,
        w: 400,
        h: 300,
    };

    struct Harness {
        state: DesktopState,
        interaction: InteractionState,
        env: DesktopEnvironment,
    }

    impl Harness {
        fn new(ids: &[&str]) -> Self {
            let mut state = DesktopState::default();
            for id in ids {
                state
                    .windows
                    .create(WindowId::new(*id), id.to_uppercase(), W1_RECT)
                    .expect("create window");
            }
            Self {
                state,
                interaction: InteractionState::default(),
                env: DesktopEnvironment::default(),
            }
        }

        fn dispatch(&mut self, action: DesktopAction) -> Result<Vec<RuntimeEffect>, ReducerError> {
            // Mirror the runtime: a rejected action leaves the committed state untouched.
            let mut state = self.state.clone();
            let mut interaction = self.interaction.clone();
            let effects = reduce_desktop(&mut state, &mut interaction, &self.env, action)?;
            self.state = state;
            self.interaction = interaction;
            Ok(effects)
        }

        fn open(&mut self, id: &WindowId) {
            let effects = self
                .dispatch(DesktopAction::OpenWindow {
                    window_id: id.clone(),
                })
                .expect("open");
            self.settle(&effects);
        }

        fn settle(&mut self, effects: &[RuntimeEffect]) {
            for effect in effects {
                if let RuntimeEffect::ScheduleTransitionTimeout {
                    window_id, token, ..
                } = effect
                {
                    self.dispatch(DesktopAction::CompleteTransition {
                        window_id: window_id.clone(),
                        token: *token,
                        timed_out: true,
                    })
                    .expect("complete transition");
                }
            }
        }

        fn window(&self, id: &WindowId) -> &crate::model::WindowRecord {
            self.state.windows.get(id).expect("window")
        }

        fn assert_taskbar_matches_open_windows(&self) {
            let entries: BTreeSet<_> = self
                .state
                .taskbar
                .iter()
                .map(|entry| entry.window_id.clone())
                .collect();
            let open: BTreeSet<_> = self
                .state
                .windows
                .iter()
                .filter(|w| w.is_open())
                .map(|w| w.id.clone())
                .collect();
            assert_eq!(entries.len(), self.state.taskbar.len());
            assert_eq!(entries, open);
        }
    }

    #[test]
    fn open_maximize_restore_scenario() {
        let mut h = Harness::new(&["w1"]);
        let w1 = WindowId::new("w1");

        h.open(&w1);
        assert_eq!(h.window(&w1).state, LifecycleState::Normal);
        assert_eq!(h.state.taskbar.len(), 1);
        assert_eq!(h.state.focused_window_id(), Some(w1.clone()));

        h.dispatch(DesktopAction::ToggleMaximize {
            window_id: w1.clone(),
        })
        .unwrap();
        assert_eq!(h.window(&w1).restore_rect, Some(W1_RECT));
        assert_eq!(h.window(&w1).rect, h.env.work_area());
        assert_eq!(h.window(&w1).state, LifecycleState::Maximized);

        h.dispatch(DesktopAction::ToggleMaximize {
            window_id: w1.clone(),
        })
        .unwrap();
        assert_eq!(h.window(&w1).rect, W1_RECT);
        assert_eq!(h.window(&w1).restore_rect, None);
        assert_eq!(h.window(&w1).state, LifecycleState::Normal);
    }

    #[test]
    fn minimize_then_taskbar_click_restores_and_raises() {
        let mut h = Harness::new(&["w1"]);
        let w1 = WindowId::new("w1");
        h.open(&w1);

        h.dispatch(DesktopAction::MinimizeWindow {
            window_id: w1.clone(),
        })
        .unwrap();
        assert_eq!(h.window(&w1).state, LifecycleState::Minimized);
        assert!(!h.state.taskbar_entry(&w1).unwrap().is_active);
        let z_before = h.window(&w1).z_index;

        h.dispatch(DesktopAction::ActivateTaskbarEntry {
            window_id: w1.clone(),
        })
        .unwrap();
        assert_eq!(h.window(&w1).state, LifecycleState::Normal);
        assert!(h.state.taskbar_entry(&w1).unwrap().is_active);
        assert!(h.window(&w1).z_index > z_before);

        h.dispatch(DesktopAction::ActivateTaskbarEntry {
            window_id: w1.clone(),
        })
        .unwrap();
        assert_eq!(h.window(&w1).state, LifecycleState::Minimized);
    }

    #[test]
    fn double_close_is_idempotent_while_animating() {
        let mut h = Harness::new(&["w1"]);
        let w1 = WindowId::new("w1");
        h.open(&w1);

        let effects = h
            .dispatch(DesktopAction::CloseWindow {
                window_id: w1.clone(),
            })
            .unwrap();
        let after_first = h.state.clone();
        assert!(h
            .dispatch(DesktopAction::CloseWindow {
                window_id: w1.clone(),
            })
            .is_err());
        assert_eq!(h.state, after_first);

        h.settle(&effects);
        assert!(!h.window(&w1).is_rendered());
        assert!(h.state.taskbar.is_empty());
    }

    #[test]
    fn completion_signal_clears_timer_and_late_timeout_is_noop() {
        let mut h = Harness::new(&["w1"]);
        let w1 = WindowId::new("w1");
        let effects = h
            .dispatch(DesktopAction::OpenWindow {
                window_id: w1.clone(),
            })
            .unwrap();
        let token = h.window(&w1).transition.unwrap().token;
        assert!(effects.contains(&RuntimeEffect::ScheduleTransitionTimeout {
            window_id: w1.clone(),
            token,
            delay_ms: 340,
        }));

        let signal = h
            .dispatch(DesktopAction::CompleteTransition {
                window_id: w1.clone(),
                token,
                timed_out: false,
            })
            .unwrap();
        assert_eq!(
            signal,
            vec![RuntimeEffect::ClearTransitionTimer {
                window_id: w1.clone(),
                token,
            }]
        );

        let before = h.state.clone();
        let late = h
            .dispatch(DesktopAction::CompleteTransition {
                window_id: w1.clone(),
                token,
                timed_out: true,
            })
            .unwrap();
        assert!(late.is_empty());
        assert_eq!(h.state, before);
    }

    #[test]
    fn open_is_rejected_while_close_animation_runs() {
        let mut h = Harness::new(&["w1"]);
        let w1 = WindowId::new("w1");
        h.open(&w1);
        h.dispatch(DesktopAction::CloseWindow {
            window_id: w1.clone(),
        })
        .unwrap();

        assert_eq!(
            h.dispatch(DesktopAction::OpenWindow {
                window_id: w1.clone(),
            })
            .unwrap_err(),
            ReducerError::TransitionInFlight(w1.clone())
        );
        assert_eq!(
            h.window(&w1).transition.map(|t| t.kind),
            Some(TransitionKind::Closing)
        );
    }

    #[test]
    fn dynamic_windows_are_memoized_by_id() {
        let mut h = Harness::new(&[]);
        let req = DynamicWindowRequest::document("proj-a", "Project A", "Project A", "Demo");
        let id = req.id.clone();

        let first = h.dispatch(DesktopAction::OpenDynamicWindow(req.clone())).unwrap();
        h.settle(&first);
        assert!(first.contains(&RuntimeEffect::InitializeContent(id.clone())));

        let second = h.dispatch(DesktopAction::OpenDynamicWindow(req.clone())).unwrap();
        assert!(second.is_empty());
        assert_eq!(h.state.windows.len(), 1);

        h.dispatch(DesktopAction::MinimizeWindow {
            window_id: id.clone(),
        })
        .unwrap();
        h.dispatch(DesktopAction::OpenDynamicWindow(req)).unwrap();
        assert_eq!(h.state.windows.len(), 1);
        assert_eq!(h.state.taskbar.len(), 1);
        assert_eq!(h.window(&id).origin, WindowOrigin::Instantiated);
        assert!(matches!(
            h.window(&id).content,
            WindowContent::Document { .. }
        ));
    }

    #[test]
    fn escape_deletes_dynamic_window_so_content_is_initialized_again() {
        let mut h = Harness::new(&[]);
        let req = DynamicWindowRequest::document("proj-a", "Project A", "Project A", "Demo");
        let id = req.id.clone();
        let effects = h.dispatch(DesktopAction::OpenDynamicWindow(req.clone())).unwrap();
        h.settle(&effects);

        h.dispatch(DesktopAction::DismissTopmost).unwrap();
        assert!(!h.state.windows.contains(&id));
        assert!(h.state.taskbar.is_empty());

        let effects = h.dispatch(DesktopAction::OpenDynamicWindow(req)).unwrap();
        assert!(effects.contains(&RuntimeEffect::InitializeContent(id)));
    }

    #[test]
    fn task_menu_maximize_on_minimized_window_restores_then_defers() {
        let mut h = Harness::new(&["w1"]);
        let w1 = WindowId::new("w1");
        h.open(&w1);
        h.dispatch(DesktopAction::MinimizeWindow {
            window_id: w1.clone(),
        })
        .unwrap();
        h.dispatch(DesktopAction::OpenTaskMenu {
            window_id: w1.clone(),
            button: WindowRect {
                x: 120,
                y: 720,
                w: 160,
                h: 40,
            },
        })
        .unwrap();
        assert!(h.state.task_menu.is_some());

        let effects = h
            .dispatch(DesktopAction::ActivateTaskMenuItem {
                item: TaskMenuItem::Maximize,
            })
            .unwrap();

        assert!(h.state.task_menu.is_none());
        assert_eq!(h.window(&w1).state, LifecycleState::Normal);
        let deferred = effects
            .iter()
            .find_map(|effect| match effect {
                RuntimeEffect::DispatchAfter { action, delay_ms } => Some((action.clone(), *delay_ms)),
                _ => None,
            })
            .expect("deferred maximize");
        assert_eq!(deferred.1, 260);

        h.dispatch(*deferred.0).unwrap();
        assert_eq!(h.window(&w1).state, LifecycleState::Maximized);
        assert_eq!(h.window(&w1).restore_rect, Some(W1_RECT));
    }

    #[test]
    fn task_menu_close_removes_entry_and_dismisses_menu() {
        let mut h = Harness::new(&["w1"]);
        let w1 = WindowId::new("w1");
        h.open(&w1);
        h.dispatch(DesktopAction::OpenTaskMenu {
            window_id: w1.clone(),
            button: WindowRect::default(),
        })
        .unwrap();

        h.dispatch(DesktopAction::ActivateTaskMenuItem {
            item: TaskMenuItem::Close,
        })
        .unwrap();

        assert!(h.state.task_menu.is_none());
        assert!(h.state.taskbar.is_empty());
        assert_eq!(h.window(&w1).state, LifecycleState::Closed);
    }

    #[test]
    fn window_controls_dispatch_through_typed_commands() {
        let mut h = Harness::new(&["w1"]);
        let w1 = WindowId::new("w1");
        h.open(&w1);

        h.dispatch(DesktopAction::WindowControl {
            window_id: w1.clone(),
            control: WindowControl::Maximize,
        })
        .unwrap();
        assert_eq!(h.window(&w1).state, LifecycleState::Maximized);

        h.dispatch(DesktopAction::WindowControl {
            window_id: w1.clone(),
            control: WindowControl::Restore,
        })
        .unwrap();
        assert_eq!(h.window(&w1).state, LifecycleState::Normal);

        h.dispatch(DesktopAction::WindowControl {
            window_id: w1.clone(),
            control: WindowControl::Minimize,
        })
        .unwrap();
        assert_eq!(h.window(&w1).state, LifecycleState::Minimized);
    }

    #[test]
    fn unknown_window_ids_are_rejected_without_side_effects() {
        let mut h = Harness::new(&["w1"]);
        let before = h.state.clone();
        let ghost = WindowId::new("ghost");

        assert_eq!(
            h.dispatch(DesktopAction::CloseWindow {
                window_id: ghost.clone(),
            })
            .unwrap_err(),
            ReducerError::WindowNotFound(ghost)
        );
        assert_eq!(h.state, before);
    }

    #[test]
    fn taskbar_tracks_open_windows_across_mixed_operations() {
        let mut h = Harness::new(&["a", "b", "c"]);
        let a = WindowId::new("a");
        let b = WindowId::new("b");
        let c = WindowId::new("c");

        h.open(&a);
        h.assert_taskbar_matches_open_windows();
        h.open(&b);
        h.open(&c);
        h.assert_taskbar_matches_open_windows();

        let actions = vec![
            DesktopAction::MinimizeWindow {
                window_id: b.clone(),
            },
            DesktopAction::ToggleMaximize {
                window_id: c.clone(),
            },
            DesktopAction::CloseWindow {
                window_id: a.clone(),
            },
            DesktopAction::ActivateTaskbarEntry {
                window_id: b.clone(),
            },
            DesktopAction::DismissTopmost,
            DesktopAction::CloseWindow {
                window_id: c.clone(),
            },
        ];
        for action in actions {
            let effects = h.dispatch(action).unwrap_or_default();
            h.assert_taskbar_matches_open_windows();
            h.settle(&effects);
            h.assert_taskbar_matches_open_windows();
        }
        assert!(h.state.taskbar.is_empty());
    }

    #[test]
    fn focused_window_holds_highest_z_among_open_windows() {
        let mut h = Harness::new(&["a", "b"]);
        let a = WindowId::new("a");
        let b = WindowId::new("b");
        h.open(&a);
        h.open(&b);

        h.dispatch(DesktopAction::FocusWindow {
            window_id: a.clone(),
        })
        .unwrap();

        let focused = h.window(&a);
        assert!(focused.is_focused);
        assert!(focused.z_index > h.window(&b).z_index);
        assert!(h.state.taskbar_entry(&a).unwrap().is_active);
        assert!(!h.state.taskbar_entry(&b).unwrap().is_active);
    }

    #[test]
    fn drag_scenario_through_reducer() {
        let mut h = Harness::new(&["w1"]);
        let w1 = WindowId::new("w1");
        h.open(&w1);
        h.state.windows.get_mut(&w1).unwrap().rect = WindowRect {
            x: 50,
            y: 50,
            w: 400,
            h: 300,
        };

        h.dispatch(DesktopAction::BeginMove {
            window_id: w1.clone(),
            pointer: PointerPosition { x: 10, y: 10 },
        })
        .unwrap();
        for (x, y) in [(40, 0), (60, 15)] {
            h.dispatch(DesktopAction::UpdateMove {
                pointer: PointerPosition { x, y },
            })
            .unwrap();
        }
        h.dispatch(DesktopAction::EndMove).unwrap();

        let rect = h.window(&w1).rect;
        assert_eq!((rect.y, rect.x), (55, 100));
    }

    #[test]
    fn closing_window_cancels_its_drag() {
        let mut h = Harness::new(&["w1"]);
        let w1 = WindowId::new("w1");
        h.open(&w1);
        h.dispatch(DesktopAction::BeginMove {
            window_id: w1.clone(),
            pointer: PointerPosition { x: 0, y: 0 },
        })
        .unwrap();

        h.dispatch(DesktopAction::CloseWindow {
            window_id: w1.clone(),
        })
        .unwrap();

        assert!(h.interaction.dragging.is_none());
    }

    #[test]
    fn opening_window_closes_start_menu() {
        let mut h = Harness::new(&["w1"]);
        h.dispatch(DesktopAction::ToggleStartMenu).unwrap();
        assert!(h.state.start_menu_open);

        h.open(&WindowId::new("w1"));

        assert!(!h.state.start_menu_open);
    }

    #[test]
    fn resize_handle_on_maximized_window_resizes_from_saved_geometry() {
        let mut h = Harness::new(&["w1"]);
        let w1 = WindowId::new("w1");
        h.open(&w1);
        h.dispatch(DesktopAction::WindowControl {
            window_id: w1.clone(),
            control: WindowControl::Maximize,
        })
        .unwrap();
        assert_eq!(h.window(&w1).state, LifecycleState::Maximized);

        h.dispatch(DesktopAction::BeginResize {
            window_id: w1.clone(),
            edge: ResizeEdge::East,
            pointer: PointerPosition { x: 900, y: 300 },
        })
        .unwrap();
        assert_eq!(h.window(&w1).state, LifecycleState::Normal);
        assert_eq!(h.window(&w1).rect, W1_RECT);

        h.dispatch(DesktopAction::UpdateResize {
            pointer: PointerPosition { x: 920, y: 300 },
        })
        .unwrap();
        h.dispatch(DesktopAction::EndResize).unwrap();

        let window = h.window(&w1);
        assert_eq!(window.rect, WindowRect { w: 420, ..W1_RECT });
        assert_eq!(window.restore_rect, None);
    }

    #[test]
    fn shut_down_closes_menus_and_freezes_the_desktop() {
        let mut h = Harness::new(&["w1"]);
        let w1 = WindowId::new("w1");
        h.open(&w1);
        h.dispatch(DesktopAction::ToggleStartMenu).unwrap();

        h.dispatch(DesktopAction::ShutDown).unwrap();
        assert!(h.state.shut_down);
        assert!(!h.state.start_menu_open);

        let effects = h
            .dispatch(DesktopAction::CloseWindow {
                window_id: w1.clone(),
            })
            .unwrap();
        assert!(effects.is_empty());
        assert_eq!(h.window(&w1).state, LifecycleState::Normal);
    }
}
