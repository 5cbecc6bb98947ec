use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Reads a picked file fully into memory. Wad archives run to a few tens
/// of megabytes at most, so one contiguous buffer is fine.
pub(super) async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let reader =
        web_sys::FileReader::new().map_err(|_| "file: FileReader::new failed".to_string())?;

    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        let reject_error = reject.clone();

        let on_load = Closure::wrap(Box::new(move |ev: web_sys::ProgressEvent| {
            match loaded_buffer(&ev) {
                Some(buffer) => {
                    let _ = resolve.call1(&JsValue::UNDEFINED, &buffer);
                }
                None => {
                    let _ = reject.call1(
                        &JsValue::UNDEFINED,
                        &JsValue::from_str("file: load event carried no buffer"),
                    );
                }
            }
        }) as Box<dyn FnMut(_)>);
        reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
        on_load.forget();

        let on_error = Closure::wrap(Box::new(move |_ev: web_sys::ProgressEvent| {
            let _ = reject_error.call1(&JsValue::UNDEFINED, &JsValue::from_str("file: read error"));
        }) as Box<dyn FnMut(_)>);
        reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    });

    // Handlers are wired; start the read.
    reader
        .read_as_array_buffer(file)
        .map_err(|_| "file: read_as_array_buffer threw".to_string())?;

    let buffer = wasm_bindgen_futures::JsFuture::from(loaded)
        .await
        .map_err(|_| "file: read failed".to_string())?;

    let bytes = js_sys::Uint8Array::new(&buffer);
    let mut out = vec![0u8; bytes.length() as usize];
    bytes.copy_to(&mut out);
    Ok(out)
}

/// The finished reader's buffer, pulled back out of the load event.
fn loaded_buffer(ev: &web_sys::ProgressEvent) -> Option<JsValue> {
    let reader = ev.target()?.dyn_into::<web_sys::FileReader>().ok()?;
    let result = reader.result().ok()?;
    if result.is_null() || result.is_undefined() {
        None
    } else {
        Some(result)
    }
}
