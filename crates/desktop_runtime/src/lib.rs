pub mod apps;
pub mod catalog;
pub mod components;
mod effect_executor;
pub mod host;
pub mod interaction;
pub mod lifecycle;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod task_menu;
pub mod taskbar_binding;
pub mod transition;
pub mod window_manager;
pub mod window_store;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use host::{ContentHost, DesktopHostContext, Notifier};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use task_menu::TaskMenuItem;
