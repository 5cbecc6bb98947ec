//! Wad ingestion and the session's selection state.

use leptos::prelude::*;

use edge_launch::wad::{is_iwad_bytes, selection_from_ingest, stored_path, LoadedWad};

use super::files::read_file_bytes;
use super::wad_store::WadStore;

/// Owner of the session's wad selection.
///
/// Constructed once by the `Player` shell and handed by value to the
/// scopes that need it. The wrapped signal is the only state shared
/// across the UI tree: the chooser and the upload batch write it, the
/// view switch and the engine launch read it.
#[derive(Clone, Copy)]
pub(super) struct WadHandler {
    wads: RwSignal<Option<Vec<LoadedWad>>>,
}

impl WadHandler {
    pub(super) fn new() -> Self {
        Self {
            wads: RwSignal::new(None),
        }
    }

    /// `None` keeps the chooser up; there is no way back once a
    /// selection is made (no eject).
    pub(super) fn set_wads(&self, wads: Option<Vec<LoadedWad>>) {
        self.wads.set(wads);
    }

    pub(super) fn has_selection(&self) -> bool {
        self.wads.with(|wads| wads.is_some())
    }

    /// Snapshot of the selection for the engine launch; deliberately
    /// untracked, the launch happens once.
    pub(super) fn selection(&self) -> Vec<LoadedWad> {
        self.wads.get_untracked().unwrap_or_default()
    }

    /// Ingests one picked batch: reads, classifies, and stores each file
    /// in input order, one store transaction at a time, then publishes
    /// the surviving records as the new selection.
    ///
    /// Per-file failures are reported and skipped; the batch carries on.
    /// Failing to reach the store at all aborts before any file is
    /// touched.
    pub(super) async fn upload_wads(self, files: Vec<web_sys::File>) {
        let store = match WadStore::open().await {
            Ok(Some(store)) => store,
            Ok(None) => {
                super::report_error("Persistent storage is unavailable in this browser");
                return;
            }
            Err(error) => {
                log::error!("{error}");
                super::report_error("Unable to open database");
                return;
            }
        };

        let mut wads = Vec::with_capacity(files.len());
        for file in &files {
            let wad = ingest_one(&store, file).await;
            match &wad.error {
                Some(error) => super::report_error(error),
                None => wads.push(wad),
            }
        }

        // Release the batch's database handle before announcing the new
        // selection; the engine reopens the database itself on boot.
        drop(store);
        self.set_wads(selection_from_ingest(wads));
    }
}

async fn ingest_one(store: &WadStore, file: &web_sys::File) -> LoadedWad {
    let name = file.name();

    let bytes = match read_file_bytes(file).await {
        Ok(bytes) => bytes,
        Err(error) => {
            log::error!("reading {name} failed: {error}");
            return LoadedWad::failed(&name, "Error reading wad");
        }
    };

    let iwad = is_iwad_bytes(&bytes);
    if let Err(error) = store.put_file(&stored_path(&name), &bytes).await {
        log::error!("storing {name} failed: {error}");
        return LoadedWad::failed(&name, "Error storing wad data");
    }

    log::debug!("stored {name} ({} bytes, iwad: {iwad})", bytes.len());
    LoadedWad::loaded(&name, iwad)
}
