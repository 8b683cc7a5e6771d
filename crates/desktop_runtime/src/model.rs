use std::fmt;

use serde::{Deserialize, Serialize};

use crate::window_manager::FocusStack;
use crate::window_store::WindowStore;

pub const DEFAULT_WINDOW_WIDTH: i32 = 420;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 300;

/// Stable identifier of a managed window (for example `about` or `proj-weather`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// On-screen rectangle. `x` is the left edge and `y` the top edge, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 48,
            y: 48,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LifecycleState {
    Normal,
    Minimized,
    Maximized,
    #[default]
    Closed,
}

impl LifecycleState {
    /// Returns `true` for every state that owns a taskbar entry.
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Returns `true` when the frame is on screen.
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Normal | Self::Maximized)
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Minimized => "minimized",
            Self::Maximized => "maximized",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    Opening,
    Closing,
}

/// An in-flight open/close transition. `token` is unique per transition so a late completion
/// signal can never finalize a newer transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub kind: TransitionKind,
    pub token: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowOrigin {
    /// Pre-declared in the desktop catalog; survives close and escape dismissal.
    Declared,
    /// Created on demand from a content template.
    Instantiated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowContent {
    /// Built-in pane rendered by catalog content key.
    Builtin(String),
    /// Template-instantiated document pane.
    Document { heading: String, body: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub origin: WindowOrigin,
    pub content: WindowContent,
    pub state: LifecycleState,
    pub rect: WindowRect,
    pub initial_rect: WindowRect,
    pub restore_rect: Option<WindowRect>,
    pub z_index: u64,
    pub is_focused: bool,
    pub transition: Option<Transition>,
    pub content_ready: bool,
}

impl WindowRecord {
    pub fn new(id: WindowId, title: impl Into<String>, rect: WindowRect) -> Self {
        let title = title.into();
        Self {
            content: WindowContent::Builtin(id.0.clone()),
            id,
            title,
            origin: WindowOrigin::Declared,
            state: LifecycleState::Closed,
            rect,
            initial_rect: rect,
            restore_rect: None,
            z_index: 0,
            is_focused: false,
            transition: None,
            content_ready: false,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Whether the frame should be mounted: open windows plus windows fading out after close.
    pub fn is_rendered(&self) -> bool {
        match self.state {
            LifecycleState::Closed => matches!(
                self.transition,
                Some(Transition {
                    kind: TransitionKind::Closing,
                    ..
                })
            ),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarEntry {
    pub window_id: WindowId,
    pub label: String,
    pub is_active: bool,
}

/// Task menu popup bound to one window, positioned in viewport coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMenuState {
    pub window_id: WindowId,
    pub x: i32,
    pub y: i32,
}

/// Title-bar and menu commands addressed to a single window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowControl {
    Minimize,
    Maximize,
    Close,
    Restore,
}

/// Tunables loaded from the `[shell]` table of the desktop catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    pub taskbar_height: i32,
    pub min_window_width: i32,
    pub min_window_height: i32,
    pub transition_timeout_ms: u32,
    pub deferred_maximize_ms: u32,
    pub long_press_ms: u32,
    pub initial_z_index: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            taskbar_height: 54,
            min_window_width: 260,
            min_window_height: 120,
            transition_timeout_ms: 340,
            deferred_maximize_ms: 260,
            long_press_ms: 600,
            initial_z_index: 10,
        }
    }
}

/// Read-only inputs the reducer consults but never mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopEnvironment {
    /// Full browser viewport, including the taskbar strip.
    pub viewport: WindowRect,
    /// Whether the notifier has been armed by a prior user gesture.
    pub notifier_armed: bool,
    pub config: ShellConfig,
}

impl DesktopEnvironment {
    pub fn new(viewport: WindowRect, config: ShellConfig) -> Self {
        Self {
            viewport,
            notifier_armed: false,
            config,
        }
    }

    /// Desktop rectangle available to maximized windows (viewport minus the taskbar margin).
    pub fn work_area(&self) -> WindowRect {
        WindowRect {
            h: (self.viewport.h - self.config.taskbar_height).max(0),
            ..self.viewport
        }
    }
}

impl Default for DesktopEnvironment {
    fn default() -> Self {
        Self::new(
            WindowRect {
                x: 0,
                y: 0,
                w: 1024,
                h: 768,
            },
            ShellConfig::default(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub windows: WindowStore,
    pub stack: FocusStack,
    pub taskbar: Vec<TaskbarEntry>,
    pub start_menu_open: bool,
    pub task_menu: Option<TaskMenuState>,
    pub next_transition_token: u64,
    /// Set by the start menu's Shut Down item; the shell fades to black.
    #[serde(default)]
    pub shut_down: bool,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::with_config(&ShellConfig::default())
    }
}

impl DesktopState {
    pub fn with_config(config: &ShellConfig) -> Self {
        Self {
            windows: WindowStore::default(),
            stack: FocusStack::new(config.initial_z_index),
            taskbar: Vec::new(),
            start_menu_open: false,
            task_menu: None,
            next_transition_token: 1,
            shut_down: false,
        }
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .find(|w| w.is_focused)
            .map(|w| w.id.clone())
    }

    pub fn taskbar_entry(&self, window_id: &WindowId) -> Option<&TaskbarEntry> {
        self.taskbar.iter().find(|entry| entry.window_id == *window_id)
    }

    /// On-screen window with the highest stacking value, if any. Minimized windows are skipped.
    pub fn topmost_visible_window(&self) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .filter(|w| w.state.is_visible())
            .max_by_key(|w| w.z_index)
    }
}

/// Request to open a window created on demand from a content template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicWindowRequest {
    pub id: WindowId,
    pub title: String,
    pub content: WindowContent,
    pub rect: Option<WindowRect>,
}

impl DynamicWindowRequest {
    pub fn document(
        id: impl Into<String>,
        title: impl Into<String>,
        heading: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: WindowId::new(id),
            title: title.into(),
            content: WindowContent::Document {
                heading: heading.into(),
                body: body.into(),
            },
            rect: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    pub const fn moves_west_edge(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    pub const fn moves_east_edge(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub const fn moves_north_edge(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub const fn moves_south_edge(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub tracker: crate::interaction::PointerTracker,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub tracker: crate::interaction::PointerTracker,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

impl InteractionState {
    pub fn has_active_gesture(&self) -> bool {
        self.dragging.is_some() || self.resizing.is_some()
    }

    /// Drops any gesture bound to `window_id`.
    pub fn cancel_for_window(&mut self, window_id: &WindowId) {
        if self
            .dragging
            .as_ref()
            .is_some_and(|session| session.window_id == *window_id)
        {
            self.dragging = None;
        }
        if self
            .resizing
            .as_ref()
            .is_some_and(|session| session.window_id == *window_id)
        {
            self.resizing = None;
        }
    }
}
