//! Built-in content panes mounted inside desktop windows.

use leptos::{html, *};
use wasm_bindgen::JsCast;

use crate::{
    catalog,
    model::{WindowContent, WindowId},
    reducer::DesktopAction,
    runtime_context::use_desktop_runtime,
};

/// Built-in pane selected by a catalog `content` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinPane {
    About,
    Projects,
    Paint,
    Contact,
}

impl BuiltinPane {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "about" => Some(Self::About),
            "projects" => Some(Self::Projects),
            "paint" => Some(Self::Paint),
            "contact" => Some(Self::Contact),
            _ => None,
        }
    }
}

#[component]
/// Renders the inner content of `window_id`.
pub fn WindowContentView(window_id: WindowId, content: WindowContent) -> impl IntoView {
    match content {
        WindowContent::Builtin(key) => match BuiltinPane::from_key(&key) {
            Some(BuiltinPane::About) => view! { <AboutPane /> }.into_view(),
            Some(BuiltinPane::Projects) => view! { <ProjectsPane /> }.into_view(),
            Some(BuiltinPane::Paint) => view! { <PaintPane window_id=window_id /> }.into_view(),
            Some(BuiltinPane::Contact) => view! { <ContactPane /> }.into_view(),
            None => {
                logging::debug_warn!("window `{window_id}` has unknown content key `{key}`");
                view! { <p class="pane-empty">"Nothing to show here yet."</p> }.into_view()
            }
        },
        WindowContent::Document { heading, body } => view! {
            <article class="pane pane-document">
                <h1>{heading}</h1>
                <p>{body}</p>
                <p class="pane-muted">
                    "A demo page for this project. Screenshots, links or an embedded demo go here."
                </p>
            </article>
        }
        .into_view(),
    }
}

#[component]
fn AboutPane() -> impl IntoView {
    view! {
        <section class="pane pane-about">
            <h1>"Hello there"</h1>
            <p>
                "This desktop is a small portfolio. Open windows from the desktop icons or the "
                "start menu, drag them by the title bar and resize them from any edge."
            </p>
            <ul>
                <li>"Double-click a title bar to maximize."</li>
                <li>"Right-click or long-press a taskbar button for its menu."</li>
                <li>"Escape closes the window in front."</li>
            </ul>
        </section>
    }
}

#[component]
fn ProjectsPane() -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <section class="pane pane-projects">
            <p>"Pick a project to open its page."</p>
            <div class="file-list" role="list">
                <For
                    each=move || catalog::projects().to_vec()
                    key=|project| project.id.clone()
                    let:project
                >
                    {{
                        let request = project.window_request();
                        view! {
                            <button
                                type="button"
                                class="file-card"
                                role="listitem"
                                data-project=project.id.clone()
                                on:click=move |_| {
                                    runtime.dispatch_action(DesktopAction::OpenDynamicWindow(
                                        request.clone(),
                                    ));
                                }
                            >
                                <span class="file-card-icon" aria-hidden="true"></span>
                                <span class="file-card-title">{project.title.clone()}</span>
                            </button>
                        }
                    }}
                </For>
            </div>
        </section>
    }
}

const PAINT_SURFACE_WIDTH: u32 = 640;
const PAINT_SURFACE_HEIGHT: u32 = 360;
const PAINT_BACKGROUND: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaintTool {
    Brush,
    Eraser,
}

impl PaintTool {
    fn from_key(key: &str) -> Self {
        match key {
            "eraser" => Self::Eraser,
            _ => Self::Brush,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Brush => "brush",
            Self::Eraser => "eraser",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PaintToolState {
    tool: PaintTool,
    brush_size: u8,
    color_hex: String,
    strokes: u32,
}

impl Default for PaintToolState {
    fn default() -> Self {
        Self {
            tool: PaintTool::Brush,
            brush_size: 6,
            color_hex: "#0b5fff".to_string(),
            strokes: 0,
        }
    }
}

impl PaintToolState {
    fn stroke_color(&self) -> &str {
        match self.tool {
            PaintTool::Brush => &self.color_hex,
            PaintTool::Eraser => PAINT_BACKGROUND,
        }
    }
}

/// Maps a pointer offset in CSS pixels onto the fixed-size backing surface.
fn surface_point(offset: (i32, i32), client_size: (i32, i32)) -> (f64, f64) {
    let scale = |offset: i32, client: i32, surface: u32| {
        f64::from(offset) * f64::from(surface) / f64::from(client.max(1))
    };
    (
        scale(offset.0, client_size.0, PAINT_SURFACE_WIDTH),
        scale(offset.1, client_size.1, PAINT_SURFACE_HEIGHT),
    )
}

fn paint_context(canvas: &web_sys::HtmlCanvasElement) -> Option<web_sys::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|context| context.dyn_into::<web_sys::CanvasRenderingContext2d>().ok())
}

fn clear_surface(context: &web_sys::CanvasRenderingContext2d) {
    context.set_fill_style_str(PAINT_BACKGROUND);
    context.fill_rect(
        0.0,
        0.0,
        f64::from(PAINT_SURFACE_WIDTH),
        f64::from(PAINT_SURFACE_HEIGHT),
    );
}

#[component]
fn PaintPane(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = create_rw_signal(PaintToolState::default());
    let canvas_ref = create_node_ref::<html::Canvas>();
    let surface = store_value(None::<web_sys::CanvasRenderingContext2d>);
    let drawing = store_value(false);

    // The surface is created only after the content host prepared this window.
    let ready = move || runtime.host.with_value(|host| host.content_initialized(&window_id));

    canvas_ref.on_load(move |canvas| match paint_context(&canvas) {
        Some(context) => {
            context.set_line_cap("round");
            context.set_line_join("round");
            clear_surface(&context);
            surface.set_value(Some(context));
        }
        None => logging::warn!("paint surface has no 2d context"),
    });

    let stroke_to = move |ev: &web_sys::PointerEvent, begin: bool| {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let (x, y) = surface_point(
            (ev.offset_x(), ev.offset_y()),
            (canvas.client_width(), canvas.client_height()),
        );
        surface.with_value(|context| {
            let Some(context) = context else {
                return;
            };
            if begin {
                context.begin_path();
                context.move_to(x, y);
            }
            state.with_untracked(|tool| {
                context.set_stroke_style_str(tool.stroke_color());
                context.set_line_width(f64::from(tool.brush_size));
            });
            context.line_to(x, y);
            context.stroke();
        });
    };

    view! {
        <section class="pane pane-paint">
            <div class="app-toolbar" role="group" aria-label="Paint tools">
                <label>
                    "Tool "
                    <select
                        prop:value=move || state.get().tool.key()
                        on:change=move |ev| {
                            let tool = PaintTool::from_key(&event_target_value(&ev));
                            state.update(|s| s.tool = tool);
                        }
                    >
                        <option value="brush">"Brush"</option>
                        <option value="eraser">"Eraser"</option>
                    </select>
                </label>
                <label>
                    "Size "
                    <input
                        type="range"
                        min="1"
                        max="64"
                        prop:value=move || state.get().brush_size.to_string()
                        on:input=move |ev| {
                            let value = event_target_value(&ev)
                                .parse::<u8>()
                                .unwrap_or(6)
                                .clamp(1, 64);
                            state.update(|s| s.brush_size = value);
                        }
                    />
                </label>
                <label>
                    "Color "
                    <input
                        type="color"
                        prop:value=move || state.get().color_hex
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| s.color_hex = value);
                        }
                    />
                </label>
                <button
                    type="button"
                    on:click=move |_| {
                        surface.with_value(|context| {
                            if let Some(context) = context {
                                clear_surface(context);
                            }
                        });
                        state.update(|s| s.strokes = 0);
                    }
                >
                    "Clear"
                </button>
            </div>
            <Show
                when=ready
                fallback=|| view! { <div class="paint-canvas paint-loading">"Preparing canvas..."</div> }
            >
                <canvas
                    node_ref=canvas_ref
                    class="paint-canvas"
                    width=PAINT_SURFACE_WIDTH
                    height=PAINT_SURFACE_HEIGHT
                    on:pointerdown=move |ev: web_sys::PointerEvent| {
                        drawing.set_value(true);
                        stroke_to(&ev, true);
                    }
                    on:pointermove=move |ev: web_sys::PointerEvent| {
                        if drawing.get_value() {
                            stroke_to(&ev, false);
                        }
                    }
                    on:pointerup=move |_| {
                        if drawing.get_value() {
                            drawing.set_value(false);
                            state.update(|s| s.strokes += 1);
                        }
                    }
                    on:pointerleave=move |_| drawing.set_value(false)
                ></canvas>
            </Show>
            <div class="app-statusbar">
                <span>{move || {
                    let snapshot = state.get();
                    format!(
                        "{} | {}px | {}",
                        snapshot.tool.key(),
                        snapshot.brush_size,
                        snapshot.color_hex
                    )
                }}</span>
                <span>{move || format!("{} strokes", state.get().strokes)}</span>
            </div>
        </section>
    }
}

#[component]
fn ContactPane() -> impl IntoView {
    view! {
        <section class="pane pane-contact">
            <h1>"Say hi"</h1>
            <p>"The quickest way to reach me is by email."</p>
            <p><a href="mailto:hello@example.com">"hello@example.com"</a></p>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn every_catalog_content_key_maps_to_a_pane() {
        for window in &catalog::desktop_catalog().windows {
            assert!(
                BuiltinPane::from_key(&window.content).is_some(),
                "no pane for `{}`",
                window.content
            );
        }
    }

    #[test]
    fn unknown_keys_have_no_pane() {
        assert_eq!(BuiltinPane::from_key("terminal"), None);
    }

    #[test]
    fn eraser_paints_with_the_background() {
        let mut tool = PaintToolState::default();
        assert_eq!(tool.stroke_color(), "#0b5fff");

        tool.tool = PaintTool::from_key("eraser");
        assert_eq!(tool.stroke_color(), PAINT_BACKGROUND);
        assert_eq!(PaintTool::from_key("unknown"), PaintTool::Brush);
    }

    #[test]
    fn pointer_offsets_scale_onto_the_surface() {
        assert_eq!(surface_point((320, 180), (640, 360)), (320.0, 180.0));
        assert_eq!(surface_point((160, 90), (320, 180)), (320.0, 180.0));
        assert_eq!(surface_point((5, 5), (0, 0)), (3200.0, 1800.0));
    }
}
