//! Bindings to the precompiled engine build and the boot call.
//!
//! The engine ships as Emscripten output; the page loads its script,
//! which exposes a module factory on the global scope. We hand the
//! factory a config object (arguments, canvas, lifecycle hooks, log
//! sinks) and get a promise for the running module back.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// Module factory exported by the engine script.
    #[wasm_bindgen(catch, js_name = "createEdgeModule")]
    fn create_edge_module(config: &JsValue) -> Result<js_sys::Promise, JsValue>;

    /// Handle to a running engine, resolved by the factory.
    pub(super) type EdgeModule;

    /// Tells the engine to re-read the canvas dimensions.
    #[wasm_bindgen(method, js_name = "_WebSyncScreenSize")]
    pub(super) fn sync_screen_size(this: &EdgeModule);

    /// Pushes fullscreen intent into the engine (1 on, 0 off).
    #[wasm_bindgen(method, js_name = "_WebSetFullscreen")]
    pub(super) fn set_fullscreen(this: &EdgeModule, fullscreen: i32);

    /// Opens (1) or closes (0) the in-game menu.
    #[wasm_bindgen(method, js_name = "_WebOpenGameMenu")]
    pub(super) fn open_game_menu(this: &EdgeModule, open: i32);
}

/// Boots the engine against `canvas` with the given command line.
///
/// `on_post_init` fires once the engine has finished its own init and
/// is about to enter the main loop; the caller uses it to drop the
/// loading overlay. Resolves to the module handle, which is also
/// published as the global `Module` the engine-side helpers look for.
pub(super) async fn start_engine(
    args: &[String],
    canvas: &web_sys::HtmlCanvasElement,
    on_post_init: impl Fn() + 'static,
) -> Result<EdgeModule, String> {
    let config = js_sys::Object::new();

    let arguments = js_sys::Array::new();
    for arg in args {
        arguments.push(&JsValue::from_str(arg));
    }
    set_field(&config, "arguments", arguments.into())?;
    set_field(&config, "canvas", canvas.clone().into())?;
    set_field(&config, "preRun", js_sys::Array::new().into())?;
    set_field(&config, "postRun", js_sys::Array::new().into())?;

    set_hook(&config, "preInit", || log::debug!("engine pre-init"))?;
    set_hook(&config, "edgePostInit", move || {
        log::debug!("engine post-init");
        on_post_init();
    })?;
    set_hook(&config, "preEdgeSyncFS", || {
        log::debug!("engine filesystem sync starting");
    })?;
    set_hook(&config, "postEdgeSyncFS", || {
        log::debug!("engine filesystem sync finished");
    })?;
    set_hook(&config, "onFullscreen", || {
        log::debug!("engine fullscreen changed");
    })?;

    set_text_sink(&config, "print", |text| log::info!("engine: {text}"))?;
    set_text_sink(&config, "printErr", |text| log::error!("engine: {text}"))?;
    set_text_sink(&config, "setStatus", |text| {
        if !text.is_empty() {
            log::info!("engine status: {text}");
        }
    })?;

    let monitor = Closure::wrap(Box::new(|left: u32| {
        log::debug!("engine run dependencies outstanding: {left}");
    }) as Box<dyn FnMut(u32)>);
    set_field(&config, "monitorRunDependencies", monitor.as_ref().clone())?;
    monitor.forget();

    let promise = create_edge_module(&config.into())
        .map_err(|_| "engine: factory is not loaded".to_string())?;
    let resolved = wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|_| "engine: failed to start".to_string())?;
    let module: EdgeModule = resolved.unchecked_into();

    // Engine-side helpers find the module through the global scope and
    // expect the canvas pinned on it.
    let _ = js_sys::Reflect::set(&module, &JsValue::from_str("canvas"), canvas);
    let _ = js_sys::Reflect::set(&js_sys::global(), &JsValue::from_str("Module"), &module);

    Ok(module)
}

fn set_field(config: &js_sys::Object, key: &str, value: JsValue) -> Result<(), String> {
    js_sys::Reflect::set(config, &JsValue::from_str(key), &value)
        .map(|_| ())
        .map_err(|_| format!("engine: failed to set config field {key}"))
}

/// Installs a no-argument lifecycle hook. The engine may call it at any
/// point for the rest of the session, so the closure is leaked.
fn set_hook(config: &js_sys::Object, key: &str, hook: impl Fn() + 'static) -> Result<(), String> {
    let hook = Closure::wrap(Box::new(hook) as Box<dyn Fn()>);
    let out = set_field(config, key, hook.as_ref().clone());
    hook.forget();
    out
}

/// Installs a one-string sink for the engine's stdout/stderr/status.
fn set_text_sink(
    config: &js_sys::Object,
    key: &str,
    sink: impl Fn(String) + 'static,
) -> Result<(), String> {
    let sink = Closure::wrap(Box::new(sink) as Box<dyn Fn(String)>);
    let out = set_field(config, key, sink.as_ref().clone());
    sink.forget();
    out
}
