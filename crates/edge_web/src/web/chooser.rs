//! The pre-launch screen: quick starts, the file picker, the custom
//! command line, and suggested projects.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use edge_launch::args::normalize_custom_args;
use edge_launch::wad::{find_unsupported, LoadedWad};

use crate::catalog::{QuickStart, SUGGESTED_PROJECTS};

use super::cookies;
use super::upload::WadHandler;

#[component]
pub(super) fn WadChooser(handler: WadHandler) -> impl IntoView {
    let file_input_ref: NodeRef<leptos::html::Input> = NodeRef::new();

    let quick_start = move |option: QuickStart| match option.iwad() {
        // Built-in games skip ingest entirely; the engine ships them.
        Some(name) => handler.set_wads(Some(vec![LoadedWad::loaded(name, true)])),
        None => {
            if let Some(input) = file_input_ref.get_untracked() {
                input.click();
            }
        }
    };

    let on_files_picked = move |_ev: web_sys::Event| {
        let Some(input) = file_input_ref.get_untracked() else {
            return;
        };
        let Some(list) = input.files() else {
            return;
        };
        let files: Vec<web_sys::File> = (0..list.length()).filter_map(|i| list.get(i)).collect();
        if files.is_empty() {
            return;
        }

        let names: Vec<String> = files.iter().map(|file| file.name()).collect();
        if let Some(bad) = find_unsupported(names.iter().map(String::as_str)) {
            // One bad name rejects the whole batch; nothing is stored.
            super::report_error(&format!(
                "Please select wad, epk, or zip files, {bad} is invalid"
            ));
            return;
        }

        spawn_local(async move {
            handler.upload_wads(files).await;
        });
    };

    let saved_custom = cookies::get(super::CUSTOM_ARGS_COOKIE).unwrap_or_default();
    let on_custom_changed = move |ev: web_sys::Event| {
        let value = normalize_custom_args(&event_target_value(&ev)).unwrap_or_default();
        cookies::set(super::CUSTOM_ARGS_COOKIE, &value);
    };

    view! {
        <div class="chooser">
            <div class="chooser-actions">
                <p class="chooser-lead">
                    "Play EDGE-Classic in your browser by selecting an option below:"
                </p>
                <For
                    each=move || QuickStart::all().iter().copied()
                    key=|option| option.label()
                    children=move |option| {
                        view! {
                            <button class="btn chooser-btn" on:click=move |_| quick_start(option)>
                                {option.label()}
                            </button>
                        }
                    }
                />
                <textarea
                    class="chooser-custom-args"
                    placeholder="Enter custom command line"
                    spellcheck="false"
                    prop:value=saved_custom
                    on:change=on_custom_changed
                ></textarea>
                <input
                    node_ref=file_input_ref
                    type="file"
                    multiple=true
                    style="display: none"
                    on:change=on_files_picked
                />
            </div>
            <div class="chooser-projects">
                <h2 class="chooser-projects-title">"Suggested Projects"</h2>
                <For
                    each=move || SUGGESTED_PROJECTS.iter()
                    key=|project| project.name
                    children=move |project| {
                        view! {
                            <a class="project-card" href=project.link target="_blank">
                                <span class="project-name">{project.name}</span>
                                <img class="project-image" src=project.image alt=project.name />
                            </a>
                        }
                    }
                />
            </div>
        </div>
    }
}
