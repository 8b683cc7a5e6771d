//! Keeps taskbar entries in one-to-one correspondence with open windows.

use crate::model::{DesktopState, LifecycleState, TaskbarEntry, WindowId};

/// Ensures `window_id` has exactly one entry while open and none otherwise, and refreshes the
/// entry's label and active flag. Idempotent; unknown ids only lose their stale entry.
pub fn sync(state: &mut DesktopState, window_id: &WindowId) {
    let window = state
        .windows
        .get(window_id)
        .ok()
        .filter(|w| w.is_open())
        .map(|w| (w.title.clone(), entry_is_active(w.is_focused, w.state)));

    let Some((label, is_active)) = window else {
        state.taskbar.retain(|entry| entry.window_id != *window_id);
        return;
    };

    let mut seen = false;
    state.taskbar.retain(|entry| {
        if entry.window_id != *window_id {
            return true;
        }
        let keep = !seen;
        seen = true;
        keep
    });

    match state
        .taskbar
        .iter_mut()
        .find(|entry| entry.window_id == *window_id)
    {
        Some(entry) => {
            entry.label = label;
            entry.is_active = is_active;
        }
        None => state.taskbar.push(TaskbarEntry {
            window_id: window_id.clone(),
            label,
            is_active,
        }),
    }
}

/// Re-syncs every known window and drops entries whose window no longer exists.
pub fn sync_all(state: &mut DesktopState) {
    let ids: Vec<WindowId> = state.windows.iter().map(|w| w.id.clone()).collect();
    state
        .taskbar
        .retain(|entry| ids.iter().any(|id| *id == entry.window_id));
    for id in &ids {
        sync(state, id);
    }
}

/// Drops the entry for `window_id`, whether or not the window still exists.
pub fn remove(state: &mut DesktopState, window_id: &WindowId) {
    state.taskbar.retain(|entry| entry.window_id != *window_id);
}

fn entry_is_active(is_focused: bool, lifecycle: LifecycleState) -> bool {
    is_focused && lifecycle != LifecycleState::Minimized
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowRect;

    fn state_with(ids: &[&str]) -> DesktopState {
        let mut state = DesktopState::default();
        for id in ids {
            state
                .windows
                .create(WindowId::new(*id), id.to_uppercase(), WindowRect::default())
                .expect("create");
        }
        state
    }

    #[test]
    fn sync_is_idempotent_for_open_windows() {
        let mut state = state_with(&["a"]);
        let id = WindowId::new("a");
        state.windows.get_mut(&id).unwrap().state = LifecycleState::Normal;

        sync(&mut state, &id);
        sync(&mut state, &id);

        assert_eq!(
            state.taskbar,
            vec![TaskbarEntry {
                window_id: id,
                label: "A".to_string(),
                is_active: false,
            }]
        );
    }

    #[test]
    fn sync_removes_entry_for_closed_window() {
        let mut state = state_with(&["a"]);
        let id = WindowId::new("a");
        state.windows.get_mut(&id).unwrap().state = LifecycleState::Normal;
        sync(&mut state, &id);

        state.windows.get_mut(&id).unwrap().state = LifecycleState::Closed;
        sync(&mut state, &id);

        assert!(state.taskbar.is_empty());
    }

    #[test]
    fn minimized_focused_window_is_not_active() {
        let mut state = state_with(&["a"]);
        let id = WindowId::new("a");
        {
            let window = state.windows.get_mut(&id).unwrap();
            window.state = LifecycleState::Minimized;
            window.is_focused = true;
        }

        sync(&mut state, &id);

        assert!(!state.taskbar_entry(&id).unwrap().is_active);
    }

    #[test]
    fn sync_all_drops_entries_of_removed_windows() {
        let mut state = state_with(&["a", "b"]);
        for window in state.windows.iter_mut() {
            window.state = LifecycleState::Normal;
        }
        sync_all(&mut state);
        assert_eq!(state.taskbar.len(), 2);

        state.windows.remove(&WindowId::new("a")).unwrap();
        sync_all(&mut state);

        assert_eq!(state.taskbar.len(), 1);
        assert_eq!(state.taskbar[0].window_id, WindowId::new("b"));
    }
}
