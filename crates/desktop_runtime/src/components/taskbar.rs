use std::time::Duration;

use super::{
    taskbar_input::{current_target_rect, is_activation_key, is_context_menu_shortcut, LongPress},
    *,
};
use crate::model::{LifecycleState, WindowRect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaskbarClockSnapshot {
    hour: u32,
    minute: u32,
}

impl TaskbarClockSnapshot {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                hour: date.get_hours(),
                minute: date.get_minutes(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self { hour: 0, minute: 0 }
        }
    }
}

fn format_taskbar_clock_time(snapshot: TaskbarClockSnapshot) -> String {
    let mut hour = snapshot.hour % 12;
    if hour == 0 {
        hour = 12;
    }
    let suffix = if snapshot.hour >= 12 { "PM" } else { "AM" };
    format!("{:02}:{:02} {}", hour, snapshot.minute, suffix)
}

fn taskbar_button_class(is_active: bool, is_minimized: bool) -> &'static str {
    match (is_active, is_minimized) {
        (_, true) => "task-btn minimized",
        (true, false) => "task-btn active",
        (false, false) => "task-btn",
    }
}

/// Fallback anchor for keyboard-opened menus: a button-sized box at the taskbar's left edge.
fn fallback_button_rect(viewport: WindowRect, taskbar_height: i32) -> WindowRect {
    WindowRect {
        x: 0,
        y: viewport.h - taskbar_height,
        w: 160,
        h: taskbar_height,
    }
}

fn open_task_menu(runtime: DesktopRuntimeContext, window_id: WindowId, button: Option<WindowRect>) {
    let button = button.unwrap_or_else(|| {
        runtime.host.with_value(|host| {
            fallback_button_rect(host.desktop_viewport_rect(), host.config().taskbar_height)
        })
    });
    runtime.dispatch_action(DesktopAction::OpenTaskMenu { window_id, button });
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let clock_now = create_rw_signal(TaskbarClockSnapshot::now());
    let long_press = LongPress::new();
    let long_press_ms = runtime.host.with_value(|host| host.config().long_press_ms);

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(TaskbarClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    view! {
        <footer
            class="taskbar"
            role="toolbar"
            aria-label="Desktop taskbar"
            on:click=move |ev| {
                ev.stop_propagation();
                if state.get_untracked().task_menu.is_some() {
                    runtime.dispatch_action(DesktopAction::DismissTaskMenu);
                }
            }
        >
            <button
                id="taskbar-start-button"
                class="start-button"
                aria-haspopup="menu"
                aria-controls="start-menu"
                aria-expanded=move || state.get().start_menu_open
                on:click=move |ev| {
                    ev.stop_propagation();
                    runtime.dispatch_action(DesktopAction::ToggleStartMenu);
                }
            >
                "Start"
            </button>

            <div class="task-buttons" role="group" aria-label="Open windows">
                <For
                    each=move || state.get().taskbar
                    key=|entry| (entry.window_id.clone(), entry.label.clone(), entry.is_active)
                    let:entry
                >
                    {{
                        let window_id = entry.window_id.clone();
                        let is_minimized = move || {
                            state
                                .get()
                                .windows
                                .get(&window_id)
                                .is_ok_and(|win| win.state == LifecycleState::Minimized)
                        };
                        let click_id = entry.window_id.clone();
                        let menu_id = entry.window_id.clone();
                        let key_id = entry.window_id.clone();
                        let press_id = entry.window_id.clone();
                        let is_active = entry.is_active;
                        view! {
                            <button
                                class=move || taskbar_button_class(is_active, is_minimized())
                                data-for=entry.window_id.to_string()
                                aria-pressed=is_active
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    if long_press.take_fired() {
                                        return;
                                    }
                                    runtime.dispatch_action(DesktopAction::DismissTaskMenu);
                                    runtime.dispatch_action(DesktopAction::CloseStartMenu);
                                    runtime.dispatch_action(DesktopAction::ActivateTaskbarEntry {
                                        window_id: click_id.clone(),
                                    });
                                }
                                on:contextmenu=move |ev| {
                                    ev.prevent_default();
                                    ev.stop_propagation();
                                    open_task_menu(runtime, menu_id.clone(), current_target_rect(&ev));
                                }
                                on:keydown=move |ev: web_sys::KeyboardEvent| {
                                    if is_context_menu_shortcut(&ev) {
                                        ev.prevent_default();
                                        open_task_menu(runtime, key_id.clone(), current_target_rect(&ev));
                                    } else if is_activation_key(&ev) {
                                        ev.prevent_default();
                                        runtime.dispatch_action(DesktopAction::ActivateTaskbarEntry {
                                            window_id: key_id.clone(),
                                        });
                                    }
                                }
                                on:pointerdown=move |ev: web_sys::PointerEvent| {
                                    if ev.pointer_type() != "touch" {
                                        return;
                                    }
                                    let window_id = press_id.clone();
                                    let button = current_target_rect(&ev);
                                    long_press.arm(long_press_ms, move || {
                                        open_task_menu(runtime, window_id, button);
                                    });
                                }
                                on:pointerup=move |_| long_press.cancel()
                                on:pointercancel=move |_| long_press.cancel()
                                on:pointerleave=move |_| long_press.cancel()
                            >
                                {entry.label.clone()}
                            </button>
                        }
                    }}
                </For>
            </div>

            <div class="taskbar-clock" aria-live="off">
                {move || format_taskbar_clock_time(clock_now.get())}
            </div>
        </footer>
    }
}
