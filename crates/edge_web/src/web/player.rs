//! The engine view: canvas lifecycle, DOM listeners, and the boot call.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use edge_launch::args::{build_engine_args, normalize_custom_args, wants_menu_on_boot};

use super::cookies;
use super::engine::{start_engine, EdgeModule};
use super::upload::WadHandler;

/// Shared slot for the engine handle. Filled once the factory resolves;
/// read by the resize and pointer-lock listeners, which may fire before
/// boot finishes.
type EngineSlot = Rc<RefCell<Option<EdgeModule>>>;

#[component]
pub(super) fn EngineScreen(handler: WadHandler) -> impl IntoView {
    let canvas_ref: NodeRef<leptos::html::Canvas> = NodeRef::new();
    let container_ref: NodeRef<leptos::html::Div> = NodeRef::new();
    let (loading, set_loading) = signal(true);
    let booted = StoredValue::new(false);

    Effect::new(move |_| {
        // Re-runs as each node ref loads; boot exactly once when both
        // are in the DOM.
        let (Some(canvas), Some(container)) = (canvas_ref.get(), container_ref.get()) else {
            return;
        };
        if booted.get_value() {
            return;
        }
        booted.set_value(true);

        if let Err(error) = boot(handler, canvas, container, set_loading) {
            super::report_error(&format!("Unable to start the engine: {error}"));
        }
    });

    let request_pointer_lock = move |_| {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let canvas: web_sys::Element = canvas.unchecked_into();
        let locked = document
            .pointer_lock_element()
            .is_some_and(|el| el == canvas);
        if !locked {
            canvas.request_pointer_lock();
        }
    };

    view! {
        <div class="canvas-container" node_ref=container_ref>
            <canvas
                id="canvas"
                node_ref=canvas_ref
                style:visibility=move || if loading.get() { "hidden" } else { "visible" }
                on:click=request_pointer_lock
            ></canvas>
            <Show when=move || loading.get()>
                <div class="loading-overlay">
                    <span class="loading-text">"LOADING..."</span>
                </div>
            </Show>
        </div>
    }
}

/// Wires the canvas up and kicks the engine off. Runs once per mount;
/// the listeners it registers live for the rest of the session.
fn boot(
    handler: WadHandler,
    canvas: web_sys::HtmlCanvasElement,
    container: web_sys::HtmlDivElement,
    set_loading: WriteSignal<bool>,
) -> Result<(), String> {
    let (width, height) = sync_canvas_size(&canvas, &container);

    let custom =
        cookies::get(super::CUSTOM_ARGS_COOKIE).and_then(|raw| normalize_custom_args(&raw));
    let args = build_engine_args(&handler.selection(), width, height, custom.as_deref());
    log::info!("engine args: {args:?}");

    let engine: EngineSlot = Rc::new(RefCell::new(None));

    install_context_lost_hook(&canvas)?;
    install_resize_hook(canvas.clone(), container, engine.clone())?;
    install_pointer_lock_hook(canvas.clone(), engine.clone())?;

    let open_menu = wants_menu_on_boot(&args);
    spawn_local(async move {
        match start_engine(&args, &canvas, move || set_loading.set(false)).await {
            Ok(module) => {
                if open_menu {
                    module.open_game_menu(1);
                }
                *engine.borrow_mut() = Some(module);
            }
            Err(error) => super::report_error(&format!("Unable to start the engine: {error}")),
        }
    });

    Ok(())
}

/// Sizes the canvas to its container, both the CSS box and the pixel
/// buffer, and returns the dimensions. The engine only re-reads them on
/// an explicit resync.
fn sync_canvas_size(
    canvas: &web_sys::HtmlCanvasElement,
    container: &web_sys::HtmlDivElement,
) -> (u32, u32) {
    let width = container.offset_width().max(0) as u32;
    let height = container.offset_height().max(0) as u32;
    log::debug!("canvas size {width}x{height}");

    let style = canvas.style();
    let _ = style.set_property("width", &format!("{width}px"));
    let _ = style.set_property("height", &format!("{height}px"));
    canvas.set_width(width);
    canvas.set_height(height);
    (width, height)
}

/// The GL context is gone for good when this fires; the engine has no
/// restore path, so tell the user to reload.
fn install_context_lost_hook(canvas: &web_sys::HtmlCanvasElement) -> Result<(), String> {
    let on_lost = Closure::wrap(Box::new(move |ev: web_sys::Event| {
        super::report_error("WebGL context lost, please reload the page");
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    canvas
        .add_event_listener_with_callback("webglcontextlost", on_lost.as_ref().unchecked_ref())
        .map_err(|_| "canvas: failed to attach webglcontextlost listener".to_string())?;
    on_lost.forget();
    Ok(())
}

/// Debounced window-resize handling: resize the canvas, then ask the
/// engine to pick the new dimensions up.
fn install_resize_hook(
    canvas: web_sys::HtmlCanvasElement,
    container: web_sys::HtmlDivElement,
    engine: EngineSlot,
) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window".to_string())?;

    let resync = Closure::wrap(Box::new(move || {
        sync_canvas_size(&canvas, &container);
        if let Some(module) = engine.borrow().as_ref() {
            module.sync_screen_size();
        }
    }) as Box<dyn FnMut()>);
    let resync_fn = resync.as_ref().unchecked_ref::<js_sys::Function>().clone();
    resync.forget();

    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let on_resize = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
        let Some(window) = web_sys::window() else {
            return;
        };
        // A burst of resize events collapses into one resync.
        if let Some(id) = pending.take() {
            window.clear_timeout_with_handle(id);
        }
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            &resync_fn,
            super::RESIZE_DEBOUNCE_MS,
        ) {
            Ok(id) => pending.set(Some(id)),
            Err(_) => log::error!("failed to schedule canvas resync"),
        }
    }) as Box<dyn FnMut(_)>);
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(|_| "window: failed to attach resize listener".to_string())?;
    on_resize.forget();
    Ok(())
}

/// Couples pointer lock to the engine: fullscreen intent follows the
/// lock, and releasing it surfaces the game menu.
fn install_pointer_lock_hook(
    canvas: web_sys::HtmlCanvasElement,
    engine: EngineSlot,
) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document".to_string())?;

    let canvas: web_sys::Element = canvas.unchecked_into();
    let doc = document.clone();
    let on_change = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
        let locked = doc.pointer_lock_element().is_some_and(|el| el == canvas);
        if let Some(module) = engine.borrow().as_ref() {
            module.set_fullscreen(if locked { 1 } else { 0 });
            if !locked {
                module.open_game_menu(1);
            }
        }
    }) as Box<dyn FnMut(_)>);
    document
        .add_event_listener_with_callback("pointerlockchange", on_change.as_ref().unchecked_ref())
        .map_err(|_| "document: failed to attach pointerlockchange listener".to_string())?;
    on_change.forget();
    Ok(())
}
