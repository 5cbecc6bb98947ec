//! IndexedDB gateway for uploaded game files.
//!
//! The database is not ours alone: the engine mounts its persistent
//! filesystem over the same store, so the database name, the record shape
//! `{timestamp, mode, contents}`, and the `timestamp` index all have to
//! match what the engine itself reads and writes.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use edge_launch::wad::ENGINE_HOME;

/// Open connection to the engine's file database.
///
/// One handle serves one ingestion batch; dropping it closes the
/// connection, which covers every exit path of the batch exactly once.
pub(super) struct WadStore {
    db: web_sys::IdbDatabase,
}

impl WadStore {
    /// Opens (creating on first use) the engine's file database.
    ///
    /// `Ok(None)` means the environment has no usable IndexedDB, as in a
    /// pre-render pass or a locked-down browser. Callers report that and
    /// skip ingestion; it is not a crash.
    pub(super) async fn open() -> Result<Option<WadStore>, String> {
        let Some(window) = web_sys::window() else {
            return Ok(None);
        };
        let factory = match window.indexed_db() {
            Ok(Some(factory)) => factory,
            // Missing, or present but access to it throws.
            Ok(None) | Err(_) => return Ok(None),
        };

        let request = factory
            .open(ENGINE_HOME)
            .map_err(|_| "indexeddb: open() threw".to_string())?;

        let opened = wasm_bindgen_futures::JsFuture::from(open_promise(&request))
            .await
            .map_err(|_| format!("indexeddb: unable to open {ENGINE_HOME}"))?;
        let db = opened
            .dyn_into::<web_sys::IdbDatabase>()
            .map_err(|_| "indexeddb: open() resolved to a non-database".to_string())?;

        log::debug!("wad database open");
        Ok(Some(WadStore { db }))
    }

    /// Stores one file's bytes under `path`, silently overwriting any
    /// previous record. The write is one readwrite transaction and is
    /// acknowledged on the transaction's `complete` event, so it either
    /// commits whole or not at all.
    pub(super) async fn put_file(&self, path: &str, bytes: &[u8]) -> Result<(), String> {
        let tx = self
            .db
            .transaction_with_str_and_mode(
                super::FILE_STORE,
                web_sys::IdbTransactionMode::Readwrite,
            )
            .map_err(|_| "indexeddb: failed to open transaction".to_string())?;
        let store = tx
            .object_store(super::FILE_STORE)
            .map_err(|_| "indexeddb: failed to open object store".to_string())?;

        let record = file_record(bytes)?;
        let request = store
            .put_with_key(&record, &JsValue::from_str(path))
            .map_err(|_| "indexeddb: put() threw".to_string())?;

        wasm_bindgen_futures::JsFuture::from(commit_promise(&tx, &request))
            .await
            .map(|_| ())
            .map_err(|_| format!("indexeddb: write for {path} failed"))
    }
}

impl Drop for WadStore {
    fn drop(&mut self) {
        // Connections do not close themselves when leaked.
        self.db.close();
        log::debug!("wad database closed");
    }
}

/// Builds the `{timestamp: now, mode, contents}` record the engine's
/// filesystem layer expects.
fn file_record(bytes: &[u8]) -> Result<JsValue, String> {
    let record = js_sys::Object::new();
    set_field(&record, "timestamp", js_sys::Date::new_0().into())?;
    set_field(&record, "mode", JsValue::from(super::IDBFS_FILE_MODE))?;
    set_field(&record, "contents", js_sys::Uint8Array::from(bytes).into())?;
    Ok(record.into())
}

fn set_field(record: &js_sys::Object, key: &str, value: JsValue) -> Result<(), String> {
    js_sys::Reflect::set(record, &JsValue::from_str(key), &value)
        .map(|_| ())
        .map_err(|_| format!("indexeddb: failed to set record field `{key}`"))
}

/// Pulls the opened database out of an open-request event.
fn request_database(ev: &web_sys::Event) -> Option<web_sys::IdbDatabase> {
    let request = ev.target()?.dyn_into::<web_sys::IdbOpenDbRequest>().ok()?;
    request
        .result()
        .ok()?
        .dyn_into::<web_sys::IdbDatabase>()
        .ok()
}

fn open_promise(request: &web_sys::IdbOpenDbRequest) -> js_sys::Promise {
    js_sys::Promise::new(&mut |resolve, reject| {
        let reject_success = reject.clone();
        let reject_error = reject;

        // First open: create the store and the index the engine expects.
        // Creating an existing store throws; treat that as already done.
        let on_upgrade = Closure::wrap(Box::new(move |ev: web_sys::Event| {
            let Some(db) = request_database(&ev) else {
                // Schema trouble surfaces through the error handler as an
                // open failure; nothing to do here.
                return;
            };
            log::debug!("wad database upgrade");
            if let Ok(store) = db.create_object_store(super::FILE_STORE) {
                let _ =
                    store.create_index_with_str(super::TIMESTAMP_INDEX, super::TIMESTAMP_INDEX);
            }
        }) as Box<dyn FnMut(_)>);
        request.set_onupgradeneeded(Some(on_upgrade.as_ref().unchecked_ref()));
        on_upgrade.forget();

        let on_success = Closure::wrap(Box::new(move |ev: web_sys::Event| {
            match request_database(&ev) {
                Some(db) => {
                    let _ = resolve.call1(&JsValue::UNDEFINED, &db);
                }
                None => {
                    let _ = reject_success.call1(
                        &JsValue::UNDEFINED,
                        &JsValue::from_str("indexeddb: open resolved without a database"),
                    );
                }
            }
        }) as Box<dyn FnMut(_)>);
        request.set_onsuccess(Some(on_success.as_ref().unchecked_ref()));
        on_success.forget();

        let on_error = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            let _ = reject_error.call1(
                &JsValue::UNDEFINED,
                &JsValue::from_str("indexeddb: open error"),
            );
        }) as Box<dyn FnMut(_)>);
        request.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    })
}

/// Resolves when the transaction commits; rejects when the write request
/// errors. Waiting on the transaction rather than the request is what
/// keeps the all-or-nothing guarantee observable.
fn commit_promise(
    tx: &web_sys::IdbTransaction,
    request: &web_sys::IdbRequest,
) -> js_sys::Promise {
    js_sys::Promise::new(&mut |resolve, reject| {
        let on_complete = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            let _ = resolve.call0(&JsValue::UNDEFINED);
        }) as Box<dyn FnMut(_)>);
        tx.set_oncomplete(Some(on_complete.as_ref().unchecked_ref()));
        on_complete.forget();

        let on_error = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            let _ = reject.call1(
                &JsValue::UNDEFINED,
                &JsValue::from_str("indexeddb: write request failed"),
            );
        }) as Box<dyn FnMut(_)>);
        request.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    })
}
