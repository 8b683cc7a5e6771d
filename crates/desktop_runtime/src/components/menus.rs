use super::*;
use crate::task_menu::TaskMenuItem;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

const START_MENU_ID: &str = "start-menu";
const TASK_MENU_ID: &str = "task-menu";

/// Start-menu entries that are not backed by a catalog window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SystemMenuItem {
    MyComputer,
    ControlPanel,
    ShutDown,
}

impl SystemMenuItem {
    const ALL: [Self; 3] = [Self::MyComputer, Self::ControlPanel, Self::ShutDown];

    fn dom_id(self) -> &'static str {
        match self {
            Self::MyComputer => "start-item-my-computer",
            Self::ControlPanel => "start-item-control-panel",
            Self::ShutDown => "start-item-shut-down",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::MyComputer => "My Computer",
            Self::ControlPanel => "Control Panel",
            Self::ShutDown => "Shut Down...",
        }
    }

    /// Notice shown instead of an action. `None` for items that change desktop state.
    fn notice(self) -> Option<&'static str> {
        match self {
            Self::MyComputer => Some("My Computer (this is a demo)."),
            Self::ControlPanel => Some("Control Panel (demo)."),
            Self::ShutDown => None,
        }
    }

    fn activate(self, runtime: DesktopRuntimeContext) {
        runtime.dispatch_action(DesktopAction::CloseStartMenu);
        match self.notice() {
            Some(message) => runtime.host.with_value(|host| host.show_notice(message)),
            None => runtime.dispatch_action(DesktopAction::ShutDown),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn menu_items(menu_id: &str) -> Vec<web_sys::HtmlElement> {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return Vec::new();
    };
    let Some(menu) = document.get_element_by_id(menu_id) else {
        return Vec::new();
    };
    let Ok(nodes) = menu.query_selector_all(r#"[role="menuitem"]"#) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn focus_menu_item(menu_id: &str, delta: i32) {
    let items = menu_items(menu_id);
    if items.is_empty() {
        return;
    }
    let active_id = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.active_element())
        .map(|element| element.id())
        .unwrap_or_default();
    let next = match items.iter().position(|item| item.id() == active_id) {
        Some(current) => (current as i32 + delta).rem_euclid(items.len() as i32) as usize,
        None => 0,
    };
    let _ = items[next].focus();
}

#[cfg(not(target_arch = "wasm32"))]
fn focus_menu_item(_: &str, _: i32) {}

/// Arrow-key navigation inside an open menu. Returns whether the key was consumed.
fn handle_menu_keydown(ev: &web_sys::KeyboardEvent, menu_id: &str) -> bool {
    let delta = match ev.key().as_str() {
        "ArrowDown" => 1,
        "ArrowUp" => -1,
        _ => return false,
    };
    ev.prevent_default();
    ev.stop_propagation();
    focus_menu_item(menu_id, delta);
    true
}

#[component]
pub(super) fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    create_effect(move |was_open: Option<bool>| {
        let is_open = state.get().start_menu_open;
        if is_open && was_open != Some(true) {
            focus_menu_item(START_MENU_ID, 0);
        }
        is_open
    });

    view! {
        <Show when=move || state.get().start_menu_open fallback=|| ()>
            <nav
                id=START_MENU_ID
                class="start-menu"
                role="menu"
                aria-label="Start menu"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    handle_menu_keydown(&ev, START_MENU_ID);
                }
            >
                <For
                    each={move || catalog::start_menu_windows().collect::<Vec<_>>()}
                    key=|entry| entry.id.clone()
                    let:entry
                >
                    {{
                        let window_id = WindowId::new(entry.id.as_str());
                        view! {
                            <button
                                id=format!("start-item-{}", entry.id)
                                class="start-item"
                                role="menuitem"
                                data-open=entry.id.clone()
                                on:click=move |_| {
                                    runtime.dispatch_action(DesktopAction::CloseStartMenu);
                                    runtime.dispatch_action(DesktopAction::OpenWindow {
                                        window_id: window_id.clone(),
                                    });
                                }
                            >
                                {entry.title.clone()}
                            </button>
                        }
                    }}
                </For>
                <hr class="start-separator" aria-hidden="true" />
                {SystemMenuItem::ALL
                    .into_iter()
                    .map(|item| {
                        view! {
                            <button
                                id=item.dom_id()
                                class="start-item"
                                role="menuitem"
                                on:click=move |_| item.activate(runtime)
                            >
                                {item.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
        </Show>
    }
}

#[component]
pub(super) fn TaskMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let menu = create_memo(move |_| state.get().task_menu);

    create_effect(move |was_open: Option<bool>| {
        let is_open = menu.get().is_some();
        if is_open && was_open != Some(true) {
            focus_menu_item(TASK_MENU_ID, 0);
        }
        is_open
    });

    view! {
        <Show when=move || menu.get().is_some() fallback=|| ()>
            <div
                id=TASK_MENU_ID
                class="task-menu"
                role="menu"
                style=move || {
                    menu.get()
                        .map(|menu| format!("left:{}px;top:{}px;", menu.x, menu.y))
                        .unwrap_or_default()
                }
                on:click=move |ev| ev.stop_propagation()
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    handle_menu_keydown(&ev, TASK_MENU_ID);
                }
            >
                {TaskMenuItem::ALL
                    .into_iter()
                    .map(|item| {
                        view! {
                            <button
                                id=format!("task-menu-{}", item.label().to_lowercase())
                                class="item"
                                role="menuitem"
                                on:click=move |_| {
                                    runtime.dispatch_action(DesktopAction::ActivateTaskMenuItem { item });
                                }
                            >
                                {item.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </Show>
    }
}
