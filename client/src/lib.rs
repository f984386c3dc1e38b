//! # client
//!
//! Leptos + WASM front-end for the app download portal.
//!
//! This crate contains the session guard and route gates, the REST client
//! for the portal backend, pages, modals, and shared UI state. It renders on
//! the server under the `ssr` feature and hydrates in the browser under
//! `hydrate`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// Browser entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
