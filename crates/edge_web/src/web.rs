use leptos::prelude::*;

use crate::catalog;
use chooser::WadChooser;
use player::EngineScreen;
use upload::WadHandler;

mod chooser;
mod cookies;
mod engine;
mod files;
mod player;
mod upload;
mod wad_store;

/// Object store inside the engine's file database.
const FILE_STORE: &str = "FILE_DATA";

/// Secondary index the engine-side filesystem keeps on its records.
/// Never queried here; created so the schema matches what the engine
/// writes into the same database.
const TIMESTAMP_INDEX: &str = "timestamp";

/// Mode bits stored with every record: a regular file, read/write for
/// everyone (0o100666), same as the engine's own filesystem uses.
const IDBFS_FILE_MODE: u32 = 33206;

/// Cookie holding the user's custom command line.
const CUSTOM_ARGS_COOKIE: &str = "customCommandLineCookie";

/// Window resizes within this span collapse into one engine resync.
const RESIZE_DEBOUNCE_MS: i32 = 250;

pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    mount_to_body(|| view! { <App /> });
}

/// Surfaces a failure to the user and to the console. Every failure in
/// this app is terminal at its point of detection; nothing retries.
fn report_error(message: &str) {
    log::error!("{message}");
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[component]
fn App() -> impl IntoView {
    view! {
        <div id="app">
            <Header />
            <main>
                <Player />
            </main>
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    view! {
        <header class="app-header">
            <a class="logo" href="./">
                <img src=catalog::LOGO_IMAGE height="48" />
            </a>
            <nav class="app-header-links">
                <a href=catalog::DISCORD_URL target="_blank">
                    <img src=catalog::DISCORD_ICON height="32" />
                </a>
                <a href=catalog::GITHUB_URL target="_blank">
                    <img src=catalog::GITHUB_ICON height="32" />
                </a>
            </nav>
        </header>
    }
}

#[component]
fn Player() -> impl IntoView {
    // One handler for the whole session, owned here and handed to the
    // views by value.
    let handler = WadHandler::new();

    view! {
        <div class="player">
            <Show
                when=move || handler.has_selection()
                fallback=move || view! { <WadChooser handler=handler /> }
            >
                <EngineScreen handler=handler />
            </Show>
        </div>
    }
}
