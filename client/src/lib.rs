//! # client
//!
//! Leptos + WASM frontend for the companion app.
//!
//! This crate contains pages, components, client state, REST helpers and URL
//! utilities. Domain types and the companion form rules come from the shared
//! `companions` crate so the browser and the server agree on both.
#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered `App`.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
