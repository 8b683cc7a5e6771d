use super::*;
use crate::{
    apps::WindowContentView,
    model::{LifecycleState, TransitionKind, WindowControl, WindowRecord},
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn window_frame_class(win: &WindowRecord) -> String {
    let mut class = String::from("window");
    if win.is_focused {
        class.push_str(" focused");
    }
    match win.state {
        LifecycleState::Minimized => class.push_str(" minimized"),
        LifecycleState::Maximized => class.push_str(" maximized"),
        LifecycleState::Normal | LifecycleState::Closed => {}
    }
    match win.transition.map(|transition| transition.kind) {
        Some(TransitionKind::Opening) => class.push_str(" opening"),
        Some(TransitionKind::Closing) => class.push_str(" closing"),
        None => {}
    }
    class
}

fn window_frame_style(win: &WindowRecord, taskbar_height: i32) -> String {
    if win.state == LifecycleState::Maximized {
        return format!(
            "left:0;top:0;width:100%;height:calc(100% - {taskbar_height}px);z-index:{};",
            win.z_index
        );
    }
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        win.rect.x, win.rect.y, win.rect.w, win.rect.h, win.z_index
    )
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let taskbar_height = runtime.host.with_value(|host| host.config().taskbar_height);

    let window = {
        let window_id = window_id.clone();
        create_memo(move |_| runtime.state.get().windows.get(&window_id).ok().cloned())
    };
    // Content is mounted once per frame so pane-local state survives moves and restores.
    let content = window.get_untracked().map(|win| win.content);

    let control = {
        let window_id = window_id.clone();
        move |control: WindowControl| {
            runtime.dispatch_action(DesktopAction::WindowControl {
                window_id: window_id.clone(),
                control,
            })
        }
    };

    let focus = {
        let window_id = window_id.clone();
        move |_| {
            let should_focus = window
                .get_untracked()
                .map(|w| w.is_open() && !w.is_focused)
                .unwrap_or(false);
            if should_focus {
                runtime.dispatch_action(DesktopAction::FocusWindow {
                    window_id: window_id.clone(),
                });
            }
        }
    };
    let begin_move = {
        let window_id = window_id.clone();
        move |ev: web_sys::PointerEvent| {
            if !is_primary_press(&ev) {
                return;
            }
            try_set_pointer_capture(&ev);
            ev.prevent_default();
            ev.stop_propagation();
            runtime.dispatch_action(DesktopAction::BeginMove {
                window_id: window_id.clone(),
                pointer: pointer_from_pointer_event(&ev),
            });
        }
    };
    let titlebar_double_click = {
        let control = control.clone();
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            control(WindowControl::Maximize);
        }
    };
    let on_animation_end = {
        let window_id = window_id.clone();
        move |ev: web_sys::AnimationEvent| {
            if ev.target() != ev.current_target() {
                return;
            }
            if let Some(transition) = window.get_untracked().and_then(|w| w.transition) {
                runtime.dispatch_action(DesktopAction::CompleteTransition {
                    window_id: window_id.clone(),
                    token: transition.token,
                    timed_out: false,
                });
            }
        }
    };

    let control_button = move |label: &'static str, glyph: &'static str, kind: WindowControl| {
        let control = control.clone();
        view! {
            <button
                type="button"
                class="title-control"
                aria-label=label
                on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                on:dblclick=move |ev| stop_mouse_event(&ev)
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    control(kind);
                }
            >
                {glyph}
            </button>
        }
    };
    let maximize_button = {
        let control_button = control_button.clone();
        move || {
            if window.get().is_some_and(|w| w.state == LifecycleState::Maximized) {
                control_button("Restore window", "❐", WindowControl::Restore)
            } else {
                control_button("Maximize window", "▢", WindowControl::Maximize)
            }
        }
    };

    // Handles stay live while maximized: a resize from there starts at the saved geometry.
    let resize_handles = ResizeEdge::ALL
        .into_iter()
        .map(|edge| view! { <WindowResizeHandle window_id=window_id.clone() edge=edge /> })
        .collect_view();
    let body = content.map(|content| {
        view! { <WindowContentView window_id=window_id.clone() content=content /> }
    });

    view! {
        <section
            class=move || window.get().map(|w| window_frame_class(&w)).unwrap_or_default()
            style=move || {
                window
                    .get()
                    .map(|w| window_frame_style(&w, taskbar_height))
                    .unwrap_or_default()
            }
            role="dialog"
            aria-label=move || window.get().map(|w| w.title).unwrap_or_default()
            on:pointerdown=focus
            on:animationend=on_animation_end
        >
            <header
                class="title-bar"
                on:pointerdown=begin_move
                on:dblclick=titlebar_double_click
            >
                <div class="title-left">
                    <span class="icon-mini" aria-hidden="true"></span>
                    <span>{move || window.get().map(|w| w.title).unwrap_or_default()}</span>
                </div>
                <div class="title-controls">
                    {control_button("Minimize window", "_", WindowControl::Minimize)}
                    {maximize_button}
                    {control_button("Close window", "✕", WindowControl::Close)}
                </div>
            </header>
            <div class="window-body">{body}</div>
            {resize_handles}
        </section>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle {}", resize_edge_class(edge));

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id: window_id.clone(),
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class=class_name
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Transition, WindowRect};

    fn record() -> WindowRecord {
        let mut win = WindowRecord::new(
            WindowId::new("about"),
            "About",
            WindowRect {
                x: 10,
                y: 20,
                w: 300,
                h: 200,
            },
        );
        win.state = LifecycleState::Normal;
        win.z_index = 12;
        win
    }

    #[test]
    fn frame_class_reflects_state_and_transition() {
        let mut win = record();
        win.is_focused = true;
        win.transition = Some(Transition {
            kind: TransitionKind::Opening,
            token: 1,
        });
        assert_eq!(window_frame_class(&win), "window focused opening");

        win.is_focused = false;
        win.state = LifecycleState::Minimized;
        win.transition = None;
        assert_eq!(window_frame_class(&win), "window minimized");
    }

    #[test]
    fn maximized_frames_fill_the_desktop_above_the_taskbar() {
        let mut win = record();
        assert_eq!(
            window_frame_style(&win, 54),
            "left:10px;top:20px;width:300px;height:200px;z-index:12;"
        );

        win.state = LifecycleState::Maximized;
        assert_eq!(
            window_frame_style(&win, 54),
            "left:0;top:0;width:100%;height:calc(100% - 54px);z-index:12;"
        );
    }
}
