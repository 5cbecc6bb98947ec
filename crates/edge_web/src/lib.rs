//! Browser front-end for the EDGE-Classic WASM engine.
//!
//! This crate is intentionally a stub by default so the workspace builds
//! (and its unit tests run) on native targets without a wasm toolchain.
//!
//! Enable the real app with `--features web` on a wasm32 target.

// Chooser metadata lives outside the wasm-only `web` module so the
// catalog inventory is unit-tested on the host.
pub mod catalog;

/// Placeholder function for non-web (or non-wasm) builds.
#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
pub fn placeholder() {
    // No-op.
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
