//! Launch planning for the EDGE-Classic web player.
//!
//! The web front-end is thin event plumbing over browser APIs. Everything
//! it decides by plain string and byte logic lives here instead: archive
//! classification, storage paths, the engine command line, and the
//! saved-override cookie format. No `wasm32` gating anywhere, so all of it
//! is unit-tested on the host.

pub mod args;
pub mod cookie;
pub mod wad;
