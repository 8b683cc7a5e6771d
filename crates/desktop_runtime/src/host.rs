//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! The reducer never touches the browser. It emits [`RuntimeEffect`] intents that this module
//! runs against the content host, the notifier, and browser timers.

mod chime;
mod host_ui;

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeSet, HashMap},
    rc::Rc,
    time::Duration,
};

use leptos::{
    create_rw_signal, logging, set_timeout_with_handle, RwSignal, SignalUpdate, SignalWith,
    SignalWithUntracked,
};
use leptos::leptos_dom::helpers::TimeoutHandle;

use crate::{
    catalog,
    model::{DesktopEnvironment, ShellConfig, WindowId, WindowRect},
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

/// External owner of a window's inner content.
pub trait ContentHost {
    /// Called once per window entity on its first open.
    fn on_first_open(&self, window_id: &WindowId);
    /// Whether `window_id` has been prepared by [`ContentHost::on_first_open`]. Panes wait on this
    /// before mounting surfaces such as the paint canvas.
    fn is_initialized(&self, window_id: &WindowId) -> bool;
}

/// Audio cue played when windows open.
pub trait Notifier {
    fn is_armed(&self) -> bool;
    /// Arms the notifier after a user gesture. Returns `true` on the first call only.
    fn arm(&self) -> bool;
    fn play_open_chime(&self);
}

/// Browser content host. Tracks prepared ids reactively so panes mount their surfaces on first
/// open, and a re-created entity is prepared once.
pub struct WebContentHost {
    initialized: RwSignal<BTreeSet<WindowId>>,
}

impl Default for WebContentHost {
    fn default() -> Self {
        Self {
            initialized: create_rw_signal(BTreeSet::new()),
        }
    }
}

impl ContentHost for WebContentHost {
    fn on_first_open(&self, window_id: &WindowId) {
        if self
            .initialized
            .with_untracked(|ids| ids.contains(window_id))
        {
            return;
        }
        self.initialized.update(|ids| {
            ids.insert(window_id.clone());
        });
        logging::log!("content initialized for `{window_id}`");
    }

    fn is_initialized(&self, window_id: &WindowId) -> bool {
        self.initialized.with(|ids| ids.contains(window_id))
    }
}

/// Web Audio notifier. Browsers only allow audio after a user gesture, so it starts disarmed.
#[derive(Debug, Default)]
pub struct WebNotifier {
    armed: Cell<bool>,
}

impl Notifier for WebNotifier {
    fn is_armed(&self) -> bool {
        self.armed.get()
    }

    fn arm(&self) -> bool {
        !self.armed.replace(true)
    }

    fn play_open_chime(&self) {
        if let Err(err) = chime::play() {
            logging::warn!("open chime failed: {err:?}");
        }
    }
}

type TimerKey = (WindowId, u64);

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    content: Rc<dyn ContentHost>,
    notifier: Rc<dyn Notifier>,
    transition_timers: Rc<RefCell<HashMap<TimerKey, TimeoutHandle>>>,
    config: ShellConfig,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self::new(
            Rc::new(WebContentHost::default()),
            Rc::new(WebNotifier::default()),
            catalog::shell_config(),
        )
    }
}

impl DesktopHostContext {
    pub fn new(
        content: Rc<dyn ContentHost>,
        notifier: Rc<dyn Notifier>,
        config: ShellConfig,
    ) -> Self {
        Self {
            content,
            notifier,
            transition_timers: Rc::new(RefCell::new(HashMap::new())),
            config,
        }
    }

    pub fn config(&self) -> ShellConfig {
        self.config
    }

    /// Whether the content host has prepared `window_id`. Reactive in the browser host.
    pub fn content_initialized(&self, window_id: &WindowId) -> bool {
        self.content.is_initialized(window_id)
    }

    /// Arms the notifier on the first pointer gesture and plays the chime once as confirmation.
    pub fn arm_notifier(&self) {
        if self.notifier.arm() {
            self.notifier.play_open_chime();
        }
    }

    /// Snapshot of the read-only inputs handed to the reducer.
    pub fn environment(&self) -> DesktopEnvironment {
        DesktopEnvironment {
            notifier_armed: self.notifier.is_armed(),
            ..DesktopEnvironment::new(self.desktop_viewport_rect(), self.config)
        }
    }

    /// Returns the current browser viewport, including the taskbar strip.
    pub fn desktop_viewport_rect(&self) -> WindowRect {
        host_ui::viewport_rect()
    }

    /// Shows a short notice for start-menu items that have no window of their own.
    pub fn show_notice(&self, message: &str) {
        host_ui::show_notice(message);
    }

    /// Whether the rotate-device hint should be shown for the current viewport.
    pub fn prefers_landscape_hint(&self) -> bool {
        host_ui::is_narrow_portrait(self.desktop_viewport_rect(), 900)
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::InitializeContent(window_id) => self.content.on_first_open(&window_id),
            RuntimeEffect::PlayOpenChime => self.notifier.play_open_chime(),
            RuntimeEffect::ScheduleTransitionTimeout {
                window_id,
                token,
                delay_ms,
            } => self.schedule_transition_timeout(runtime, window_id, token, delay_ms),
            RuntimeEffect::ClearTransitionTimer { window_id, token } => {
                if let Some(handle) = self
                    .transition_timers
                    .borrow_mut()
                    .remove(&(window_id, token))
                {
                    handle.clear();
                }
            }
            RuntimeEffect::DispatchAfter { action, delay_ms } => {
                let action = *action;
                if let Err(err) = set_timeout_with_handle(
                    move || runtime.dispatch_action(action),
                    Duration::from_millis(u64::from(delay_ms)),
                ) {
                    logging::warn!("deferred dispatch timer failed: {err:?}");
                }
            }
        }
    }

    fn schedule_transition_timeout(
        &self,
        runtime: DesktopRuntimeContext,
        window_id: WindowId,
        token: u64,
        delay_ms: u32,
    ) {
        let timers = self.transition_timers.clone();
        let key = (window_id.clone(), token);
        let fired_key = key.clone();
        let scheduled = set_timeout_with_handle(
            move || {
                timers.borrow_mut().remove(&fired_key);
                runtime.dispatch_action(DesktopAction::CompleteTransition {
                    window_id,
                    token,
                    timed_out: true,
                });
            },
            Duration::from_millis(u64::from(delay_ms)),
        );
        match scheduled {
            Ok(handle) => {
                self.transition_timers.borrow_mut().insert(key, handle);
            }
            Err(err) => logging::warn!("transition timeout failed to schedule: {err:?}"),
        }
    }
}
