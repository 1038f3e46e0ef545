//! Starfield - animated background for a portfolio site
//!
//! - Point field: drifting points joined by proximity edges, redrawn every frame
//! - Cursor trail: short-lived markers spawned at the pointer
//!
//! The simulation lives in [`core`] and is shared by the browser host
//! (`--features wasm`, canvas + DOM) and the native preview window
//! (`--features native`, egui).

pub mod core;
pub mod page;
pub mod time;

#[cfg(feature = "native")]
mod theme;
#[cfg(feature = "native")]
pub mod viewer;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web;
