//! `document.cookie` access for the saved custom command line.

use wasm_bindgen::JsCast;

use edge_launch::cookie;

/// Reads one cookie's value; `None` in pre-render contexts or when the
/// cookie was never written.
pub(super) fn get(name: &str) -> Option<String> {
    let document = html_document()?;
    let header = document.cookie().ok()?;
    cookie::value_from_header(&header, name)
}

/// Writes one cookie. A blocked write is logged and otherwise ignored;
/// the override cookie being absent is a normal state.
pub(super) fn set(name: &str, value: &str) {
    let Some(document) = html_document() else {
        return;
    };
    if document.set_cookie(&cookie::set_string(name, value)).is_err() {
        log::warn!("cookie {name} could not be written");
    }
}

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}
