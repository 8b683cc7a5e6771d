//! Timed guard for in-flight open/close transitions.
//!
//! Entering a transition stores a fresh token on the window and asks the host to arm a timeout.
//! Whichever completion arrives first (the UI `animationend` signal or the timeout) finalizes
//! the transition; the second finds no matching token and does nothing.

use crate::{
    model::{DesktopState, Transition, TransitionKind, WindowId},
    reducer::{ReducerError, RuntimeEffect},
};

/// Starts a transition on `window_id` and queues its fallback timeout.
pub fn begin(
    state: &mut DesktopState,
    window_id: &WindowId,
    kind: TransitionKind,
    timeout_ms: u32,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<Transition, ReducerError> {
    let token = state.next_transition_token;
    let window = state.windows.get_mut(window_id)?;
    if window.is_animating() {
        return Err(ReducerError::TransitionInFlight(window_id.clone()));
    }
    let transition = Transition { kind, token };
    window.transition = Some(transition);
    state.next_transition_token = token.saturating_add(1);
    effects.push(RuntimeEffect::ScheduleTransitionTimeout {
        window_id: window_id.clone(),
        token,
        delay_ms: timeout_ms,
    });
    Ok(transition)
}

/// Consumes the transition identified by `token`.
///
/// Returns the finished kind, or `None` when the token is stale (already finalized, cancelled, or
/// superseded).
pub fn finish(
    state: &mut DesktopState,
    window_id: &WindowId,
    token: u64,
) -> Result<Option<TransitionKind>, ReducerError> {
    let window = state.windows.get_mut(window_id)?;
    match window.transition {
        Some(transition) if transition.token == token => {
            window.transition = None;
            Ok(Some(transition.kind))
        }
        _ => Ok(None),
    }
}

/// Drops any in-flight transition without finalizing it.
pub fn cancel(state: &mut DesktopState, window_id: &WindowId) -> Result<(), ReducerError> {
    state.windows.get_mut(window_id)?.transition = None;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowRect;

    fn state_with_window(id: &WindowId) -> DesktopState {
        let mut state = DesktopState::default();
        state
            .windows
            .create(id.clone(), "W", WindowRect::default())
            .expect("create");
        state
    }

    #[test]
    fn finalize_happens_exactly_once() {
        let id = WindowId::new("w");
        let mut state = state_with_window(&id);
        let mut effects = Vec::new();

        let transition =
            begin(&mut state, &id, TransitionKind::Closing, 340, &mut effects).expect("begin");
        assert_eq!(
            effects,
            vec![RuntimeEffect::ScheduleTransitionTimeout {
                window_id: id.clone(),
                token: transition.token,
                delay_ms: 340,
            }]
        );

        assert_eq!(
            finish(&mut state, &id, transition.token).unwrap(),
            Some(TransitionKind::Closing)
        );
        assert_eq!(finish(&mut state, &id, transition.token).unwrap(), None);
        assert!(!state.windows.get(&id).unwrap().is_animating());
    }

    #[test]
    fn stale_token_cannot_finish_newer_transition() {
        let id = WindowId::new("w");
        let mut state = state_with_window(&id);
        let mut effects = Vec::new();

        let first = begin(&mut state, &id, TransitionKind::Opening, 340, &mut effects).unwrap();
        finish(&mut state, &id, first.token).unwrap();
        let second = begin(&mut state, &id, TransitionKind::Closing, 340, &mut effects).unwrap();

        assert_ne!(first.token, second.token);
        assert_eq!(finish(&mut state, &id, first.token).unwrap(), None);
        assert!(state.windows.get(&id).unwrap().is_animating());
    }

    #[test]
    fn begin_while_in_flight_fails_closed() {
        let id = WindowId::new("w");
        let mut state = state_with_window(&id);
        let mut effects = Vec::new();

        begin(&mut state, &id, TransitionKind::Opening, 340, &mut effects).unwrap();
        assert_eq!(
            begin(&mut state, &id, TransitionKind::Closing, 340, &mut effects).unwrap_err(),
            ReducerError::TransitionInFlight(id.clone())
        );
        assert_eq!(effects.len(), 1);
    }
}
