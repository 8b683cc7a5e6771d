//! Window lifecycle state machine: open, close, minimize, restore, maximize, dismiss.
//!
//! Every transition keeps the store, the focus stack, and the taskbar binding consistent before
//! returning. Invalid requests return an error and are expected to be discarded by the caller.

use crate::{
    model::{
        DesktopEnvironment, DesktopState, LifecycleState, TransitionKind, WindowId, WindowOrigin,
        WindowRecord,
    },
    reducer::{ReducerError, RuntimeEffect},
    taskbar_binding, transition,
    window_store::WindowPatch,
};

/// `Closed → Normal`. A no-op for windows that are already open.
pub fn open_window(
    state: &mut DesktopState,
    env: &DesktopEnvironment,
    window_id: &WindowId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let window = state.windows.get(window_id)?;
    if window.is_animating() {
        return Err(ReducerError::TransitionInFlight(window_id.clone()));
    }
    if window.is_open() {
        return Ok(());
    }

    transition::begin(
        state,
        window_id,
        TransitionKind::Opening,
        env.config.transition_timeout_ms,
        effects,
    )?;
    let window = state.windows.get_mut(window_id)?;
    window.state = LifecycleState::Normal;
    let first_open = !window.content_ready;
    window.content_ready = true;

    taskbar_binding::sync(state, window_id);
    state.stack.bring_to_front(&mut state.windows, window_id)?;
    state.start_menu_open = false;

    if first_open {
        effects.push(RuntimeEffect::InitializeContent(window_id.clone()));
    }
    if env.notifier_armed {
        effects.push(RuntimeEffect::PlayOpenChime);
    }
    Ok(())
}

/// `non-Closed → Closed`, overriding minimized and maximized states.
pub fn close_window(
    state: &mut DesktopState,
    env: &DesktopEnvironment,
    window_id: &WindowId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let window = state.windows.get(window_id)?;
    if window.is_animating() {
        return Err(ReducerError::TransitionInFlight(window_id.clone()));
    }
    ensure_open(window, "close")?;

    transition::begin(
        state,
        window_id,
        TransitionKind::Closing,
        env.config.transition_timeout_ms,
        effects,
    )?;
    hide(state, window_id)?;
    taskbar_binding::remove(state, window_id);
    Ok(())
}

/// `Normal|Maximized → Minimized`. Leaves geometry and stacking untouched and does not hand focus
/// to another window.
pub fn minimize_window(state: &mut DesktopState, window_id: &WindowId) -> Result<(), ReducerError> {
    let window = state.windows.get_mut(window_id)?;
    ensure_open(window, "minimize")?;
    if window.state == LifecycleState::Minimized {
        return Ok(());
    }
    window.state = LifecycleState::Minimized;
    state.stack.blur(&mut state.windows, window_id)?;
    taskbar_binding::sync(state, window_id);
    Ok(())
}

/// `Minimized|Maximized → Normal`, then raises the window. Restoring a normal window only raises
/// it.
pub fn restore_window(state: &mut DesktopState, window_id: &WindowId) -> Result<(), ReducerError> {
    let window = state.windows.get_mut(window_id)?;
    ensure_open(window, "restore")?;
    match window.state {
        LifecycleState::Maximized => leave_maximized(window),
        LifecycleState::Minimized => window.state = LifecycleState::Normal,
        LifecycleState::Normal | LifecycleState::Closed => {}
    }
    state.stack.bring_to_front(&mut state.windows, window_id)?;
    taskbar_binding::sync(state, window_id);
    Ok(())
}

/// Maximized windows restore; normal and minimized windows maximize into the work area.
pub fn toggle_maximize(
    state: &mut DesktopState,
    env: &DesktopEnvironment,
    window_id: &WindowId,
) -> Result<(), ReducerError> {
    let window = state.windows.get_mut(window_id)?;
    ensure_open(window, "toggle maximize")?;
    if window.state == LifecycleState::Maximized {
        leave_maximized(window);
    } else {
        enter_maximized(window, env);
    }
    state.stack.bring_to_front(&mut state.windows, window_id)?;
    taskbar_binding::sync(state, window_id);
    Ok(())
}

/// Maximizes `window_id` unless it already is.
pub fn maximize_window(
    state: &mut DesktopState,
    env: &DesktopEnvironment,
    window_id: &WindowId,
) -> Result<(), ReducerError> {
    let window = state.windows.get(window_id)?;
    ensure_open(window, "maximize")?;
    if window.state == LifecycleState::Maximized {
        return Ok(());
    }
    toggle_maximize(state, env, window_id)
}

/// Raises a visible window (click on its frame).
pub fn focus_window(state: &mut DesktopState, window_id: &WindowId) -> Result<(), ReducerError> {
    let window = state.windows.get(window_id)?;
    ensure_open(window, "focus")?;
    if window.state == LifecycleState::Minimized {
        return Err(ReducerError::InvalidTransition {
            window_id: window_id.clone(),
            state: window.state,
            operation: "focus",
        });
    }
    if window.is_focused && window.z_index == state.stack.highest_z() {
        return Ok(());
    }
    state.stack.bring_to_front(&mut state.windows, window_id)?;
    Ok(())
}

/// Immediately dismisses the focused window (or the topmost open one), skipping the close
/// animation. Instantiated windows are deleted; declared windows are hidden in place.
///
/// Returns the dismissed window id, if any window was open.
pub fn dismiss_topmost(state: &mut DesktopState) -> Result<Option<WindowId>, ReducerError> {
    let target = state
        .windows
        .iter()
        .find(|w| w.is_focused && w.state.is_visible())
        .or_else(|| state.topmost_visible_window())
        .map(|w| (w.id.clone(), w.origin));

    let Some((window_id, origin)) = target else {
        return Ok(None);
    };

    match origin {
        WindowOrigin::Instantiated => {
            state.windows.remove(&window_id)?;
        }
        WindowOrigin::Declared => {
            transition::cancel(state, &window_id)?;
            hide(state, &window_id)?;
        }
    }
    taskbar_binding::remove(state, &window_id);
    Ok(Some(window_id))
}

/// Leaves maximized state, reapplying and clearing the saved geometry.
pub(crate) fn leave_maximized(window: &mut WindowRecord) {
    if let Some(restore_rect) = window.restore_rect.take() {
        window.rect = restore_rect;
    }
    window.state = LifecycleState::Normal;
}

fn enter_maximized(window: &mut WindowRecord, env: &DesktopEnvironment) {
    // An existing snapshot is kept: it is the normal geometry from before the first maximize
    // (a minimized-while-maximized window still carries full-screen geometry in `rect`).
    if window.restore_rect.is_none() {
        window.restore_rect = Some(window.rect);
    }
    window.rect = env.work_area();
    window.state = LifecycleState::Maximized;
}

fn hide(state: &mut DesktopState, window_id: &WindowId) -> Result<(), ReducerError> {
    let initial_rect = state.windows.get(window_id)?.initial_rect;
    state.windows.update(
        window_id,
        WindowPatch {
            state: Some(LifecycleState::Closed),
            rect: Some(initial_rect),
            restore_rect: Some(None),
            ..WindowPatch::default()
        },
    )?;
    state.stack.blur(&mut state.windows, window_id)
}

fn ensure_open(window: &WindowRecord, operation: &'static str) -> Result<(), ReducerError> {
    if window.is_open() {
        Ok(())
    } else {
        Err(ReducerError::InvalidTransition {
            window_id: window.id.clone(),
            state: window.state,
            operation,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowRect;

    const W1_RECT: WindowRect = WindowRect {
        x: 100,
        y: 100,
        w: 400,
        h: 300,
    };

    fn setup(ids: &[&str]) -> (DesktopState, DesktopEnvironment) {
        let mut state = DesktopState::default();
        for id in ids {
            state
                .windows
                .create(WindowId::new(*id), *id, W1_RECT)
                .expect("create");
        }
        (state, DesktopEnvironment::default())
    }

    fn open_settled(state: &mut DesktopState, env: &DesktopEnvironment, id: &WindowId) {
        open_window(state, env, id, &mut Vec::new()).expect("open");
        transition::cancel(state, id).expect("settle");
    }

    #[test]
    fn open_creates_entry_focuses_and_requests_content_once() {
        let (mut state, env) = setup(&["w1"]);
        let id = WindowId::new("w1");
        let mut effects = Vec::new();

        open_window(&mut state, &env, &id, &mut effects).expect("open");

        let window = state.windows.get(&id).unwrap();
        assert_eq!(window.state, LifecycleState::Normal);
        assert!(window.is_focused);
        assert_eq!(state.taskbar.len(), 1);
        assert!(effects.contains(&RuntimeEffect::InitializeContent(id.clone())));
        assert!(!effects.contains(&RuntimeEffect::PlayOpenChime));

        let token = window.transition.unwrap().token;
        transition::finish(&mut state, &id, token).unwrap();
        close_window(&mut state, &env, &id, &mut Vec::new()).unwrap();
        transition::cancel(&mut state, &id).unwrap();

        let mut reopen_effects = Vec::new();
        open_window(&mut state, &env, &id, &mut reopen_effects).unwrap();
        assert!(!reopen_effects.contains(&RuntimeEffect::InitializeContent(id.clone())));
    }

    #[test]
    fn open_plays_chime_only_when_notifier_is_armed() {
        let (mut state, mut env) = setup(&["w1"]);
        env.notifier_armed = true;
        let mut effects = Vec::new();

        open_window(&mut state, &env, &WindowId::new("w1"), &mut effects).unwrap();

        assert!(effects.contains(&RuntimeEffect::PlayOpenChime));
    }

    #[test]
    fn open_on_open_window_is_noop() {
        let (mut state, env) = setup(&["w1"]);
        let id = WindowId::new("w1");
        open_settled(&mut state, &env, &id);
        let before = state.clone();
        let mut effects = Vec::new();

        open_window(&mut state, &env, &id, &mut effects).unwrap();

        assert_eq!(state, before);
        assert!(effects.is_empty());
    }

    #[test]
    fn maximize_round_trip_restores_geometry() {
        let (mut state, env) = setup(&["w1"]);
        let id = WindowId::new("w1");
        open_settled(&mut state, &env, &id);

        toggle_maximize(&mut state, &env, &id).unwrap();
        let window = state.windows.get(&id).unwrap();
        assert_eq!(window.state, LifecycleState::Maximized);
        assert_eq!(window.restore_rect, Some(W1_RECT));
        assert_eq!(window.rect, env.work_area());
        assert_eq!(
            window.rect,
            WindowRect {
                x: 0,
                y: 0,
                w: 1024,
                h: 768 - 54,
            }
        );

        toggle_maximize(&mut state, &env, &id).unwrap();
        let window = state.windows.get(&id).unwrap();
        assert_eq!(window.state, LifecycleState::Normal);
        assert_eq!(window.rect, W1_RECT);
        assert_eq!(window.restore_rect, None);
    }

    #[test]
    fn existing_snapshot_is_not_clobbered() {
        let (mut state, env) = setup(&["w1"]);
        let id = WindowId::new("w1");
        open_settled(&mut state, &env, &id);

        toggle_maximize(&mut state, &env, &id).unwrap();
        minimize_window(&mut state, &id).unwrap();
        restore_window(&mut state, &id).unwrap();
        // Minimized → Normal keeps the full-screen rect; the pre-maximize snapshot must survive.
        toggle_maximize(&mut state, &env, &id).unwrap();
        toggle_maximize(&mut state, &env, &id).unwrap();

        assert_eq!(state.windows.get(&id).unwrap().rect, W1_RECT);
    }

    #[test]
    fn minimize_twice_is_noop() {
        let (mut state, env) = setup(&["w1"]);
        let id = WindowId::new("w1");
        open_settled(&mut state, &env, &id);

        minimize_window(&mut state, &id).unwrap();
        let once = state.clone();
        minimize_window(&mut state, &id).unwrap();

        assert_eq!(state, once);
        let window = state.windows.get(&id).unwrap();
        assert_eq!(window.state, LifecycleState::Minimized);
        assert!(!state.taskbar_entry(&id).unwrap().is_active);
    }

    #[test]
    fn minimize_does_not_reassign_focus() {
        let (mut state, env) = setup(&["a", "b"]);
        let a = WindowId::new("a");
        let b = WindowId::new("b");
        open_settled(&mut state, &env, &a);
        open_settled(&mut state, &env, &b);

        minimize_window(&mut state, &b).unwrap();

        assert_eq!(state.focused_window_id(), None);
    }

    #[test]
    fn restore_minimized_raises_window() {
        let (mut state, env) = setup(&["w1"]);
        let id = WindowId::new("w1");
        open_settled(&mut state, &env, &id);
        minimize_window(&mut state, &id).unwrap();
        let z_before = state.windows.get(&id).unwrap().z_index;

        restore_window(&mut state, &id).unwrap();

        let window = state.windows.get(&id).unwrap();
        assert_eq!(window.state, LifecycleState::Normal);
        assert!(window.z_index > z_before);
        assert!(state.taskbar_entry(&id).unwrap().is_active);
    }

    #[test]
    fn close_from_maximized_clears_snapshot_and_entry() {
        let (mut state, env) = setup(&["w1"]);
        let id = WindowId::new("w1");
        open_settled(&mut state, &env, &id);
        toggle_maximize(&mut state, &env, &id).unwrap();

        close_window(&mut state, &env, &id, &mut Vec::new()).unwrap();

        let window = state.windows.get(&id).unwrap();
        assert_eq!(window.state, LifecycleState::Closed);
        assert_eq!(window.restore_rect, None);
        assert_eq!(window.rect, W1_RECT);
        assert!(!window.is_focused);
        assert!(window.is_rendered());
        assert!(state.taskbar.is_empty());
    }

    #[test]
    fn double_close_while_closing_is_rejected() {
        let (mut state, env) = setup(&["w1"]);
        let id = WindowId::new("w1");
        open_settled(&mut state, &env, &id);
        close_window(&mut state, &env, &id, &mut Vec::new()).unwrap();
        let after_first = state.clone();

        let err = close_window(&mut state, &env, &id, &mut Vec::new()).unwrap_err();

        assert_eq!(err, ReducerError::TransitionInFlight(id));
        assert_eq!(state, after_first);
    }

    #[test]
    fn lifecycle_ops_on_closed_window_are_invalid() {
        let (mut state, env) = setup(&["w1"]);
        let id = WindowId::new("w1");

        assert!(matches!(
            minimize_window(&mut state, &id),
            Err(ReducerError::InvalidTransition { .. })
        ));
        assert!(matches!(
            toggle_maximize(&mut state, &env, &id),
            Err(ReducerError::InvalidTransition { .. })
        ));
        assert!(matches!(
            restore_window(&mut state, &id),
            Err(ReducerError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn dismiss_topmost_deletes_instantiated_and_hides_declared() {
        let (mut state, env) = setup(&["about"]);
        let about = WindowId::new("about");
        let proj = WindowId::new("proj-x");
        state
            .windows
            .create(proj.clone(), "Project", W1_RECT)
            .unwrap()
            .origin = WindowOrigin::Instantiated;
        open_settled(&mut state, &env, &about);
        open_window(&mut state, &env, &proj, &mut Vec::new()).unwrap();

        assert_eq!(dismiss_topmost(&mut state).unwrap(), Some(proj.clone()));
        assert!(!state.windows.contains(&proj));
        assert_eq!(state.taskbar.len(), 1);

        focus_window(&mut state, &about).unwrap();
        assert_eq!(dismiss_topmost(&mut state).unwrap(), Some(about.clone()));
        let window = state.windows.get(&about).unwrap();
        assert_eq!(window.state, LifecycleState::Closed);
        assert!(!window.is_rendered());
        assert!(state.taskbar.is_empty());

        assert_eq!(dismiss_topmost(&mut state).unwrap(), None);
    }

    #[test]
    fn dismiss_topmost_skips_minimized_windows() {
        let (mut state, env) = setup(&["a", "b"]);
        let a = WindowId::new("a");
        let b = WindowId::new("b");
        open_settled(&mut state, &env, &a);
        open_settled(&mut state, &env, &b);
        minimize_window(&mut state, &b).unwrap();
        assert!(state.windows.iter().all(|w| !w.is_focused));

        assert_eq!(dismiss_topmost(&mut state).unwrap(), Some(a.clone()));
        assert_eq!(state.windows.get(&a).unwrap().state, LifecycleState::Closed);
        assert_eq!(state.windows.get(&b).unwrap().state, LifecycleState::Minimized);

        assert_eq!(dismiss_topmost(&mut state).unwrap(), None);
        assert_eq!(state.taskbar.len(), 1);
    }
}
