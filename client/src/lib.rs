//! # client
//!
//! Leptos + WASM browser front-end for CityConnect. Pages, guards, and the
//! toast host sit on top of the `cityconnect` session and API layers; the
//! session persists to `localStorage`.

pub mod app;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
