//! Desktop shell UI composition and interaction surfaces.

mod menus;
mod taskbar;
mod taskbar_input;
mod window;

use leptos::*;

use self::{menus::StartMenu, menus::TaskMenu, taskbar::Taskbar, window::DesktopWindow};

use crate::{
    catalog,
    model::{DesktopState, PointerPosition, ResizeEdge, WindowId},
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

/// Windows that currently need a frame, in stable catalog/creation order.
fn rendered_window_ids(state: &DesktopState) -> Vec<WindowId> {
    state
        .windows
        .iter()
        .filter(|win| win.is_rendered())
        .map(|win| win.id.clone())
        .collect()
}

#[component]
/// Renders the full desktop shell UI.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let landscape_hint = create_rw_signal(runtime.host.with_value(|host| host.prefers_landscape_hint()));

    let resize_listener = window_event_listener(ev::resize, move |_| {
        landscape_hint.set(runtime.host.with_value(|host| host.prefers_landscape_hint()));
    });
    on_cleanup(move || resize_listener.remove());

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || ev.key() != "Escape" {
            return;
        }
        ev.prevent_default();
        let desktop = state.get_untracked();
        if desktop.task_menu.is_some() {
            runtime.dispatch_action(DesktopAction::DismissTaskMenu);
        } else if desktop.start_menu_open {
            runtime.dispatch_action(DesktopAction::CloseStartMenu);
        } else {
            runtime.dispatch_action(DesktopAction::DismissTopmost);
        }
    });
    on_cleanup(move || escape_listener.remove());

    let arm_listener = window_event_listener(ev::pointerdown, move |_| runtime.arm_notifier());
    on_cleanup(move || arm_listener.remove());

    // Gestures follow the pointer on the global window so a lost capture cannot strand them.
    let move_listener = window_event_listener(ev::pointermove, move |ev| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();

        if interaction.dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateMove { pointer });
        }
        if interaction.resizing.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
        }
    });
    on_cleanup(move || move_listener.remove());

    let up_listener = window_event_listener(ev::pointerup, move |_| {
        end_active_pointer_interaction(runtime)
    });
    on_cleanup(move || up_listener.remove());

    let cancel_listener = window_event_listener(ev::pointercancel, move |_| {
        end_active_pointer_interaction(runtime)
    });
    on_cleanup(move || cancel_listener.remove());

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            on:click=move |_| {
                let desktop = state.get_untracked();
                if desktop.task_menu.is_some() {
                    runtime.dispatch_action(DesktopAction::DismissTaskMenu);
                }
                if desktop.start_menu_open {
                    runtime.dispatch_action(DesktopAction::CloseStartMenu);
                }
            }
        >
            <div class="desktop" role="main">
                <ul class="desktop-icons" aria-label="Desktop">
                    <For
                        each={move || catalog::desktop_icon_windows().collect::<Vec<_>>()}
                        key=|entry| entry.id.clone()
                        let:entry
                    >
                        {{
                            let window_id = WindowId::new(entry.id.as_str());
                            let open = move || {
                                runtime.dispatch_action(DesktopAction::OpenWindow {
                                    window_id: window_id.clone(),
                                })
                            };
                            let open_on_key = open.clone();
                            view! {
                                <li
                                    class="desktop-icon"
                                    tabindex="0"
                                    role="button"
                                    data-target=entry.id.clone()
                                    on:click=move |_| open()
                                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                                        if ev.key() == "Enter" {
                                            ev.prevent_default();
                                            open_on_key();
                                        }
                                    }
                                >
                                    <span class="desktop-icon-glyph" aria-hidden="true"></span>
                                    <span class="desktop-icon-label">{entry.icon_label.clone()}</span>
                                </li>
                            }
                        }}
                    </For>
                </ul>

                <For
                    each=move || rendered_window_ids(&state.get())
                    key=|window_id| window_id.clone()
                    let:window_id
                >
                    <DesktopWindow window_id=window_id />
                </For>
            </div>

            <StartMenu />
            <TaskMenu />
            <Taskbar />

            <Show when=move || landscape_hint.get() fallback=|| ()>
                <div class="orientation-hint" role="status">
                    "Rotate your device to landscape for the best experience."
                </div>
            </Show>

            <Show when=move || state.get().shut_down fallback=|| ()>
                <div class="shutdown-overlay" aria-label="Shut down" role="presentation"></div>
            </Show>
        </div>
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.dragging.is_some() {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
    if interaction.resizing.is_some() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::North => "edge-n",
        ResizeEdge::South => "edge-s",
        ResizeEdge::East => "edge-e",
        ResizeEdge::West => "edge-w",
        ResizeEdge::NorthEast => "edge-ne",
        ResizeEdge::NorthWest => "edge-nw",
        ResizeEdge::SouthEast => "edge-se",
        ResizeEdge::SouthWest => "edge-sw",
    }
}
