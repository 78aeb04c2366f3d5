//! Halaqa Academy public web client.
//!
//! SYSTEM CONTEXT
//! ==============
//! A Leptos front-end over the academy's REST backend. The reusable core is
//! two pieces of cross-cutting logic:
//! - `state`: loading/error/pagination controllers for backend calls, safe
//!   against out-of-order responses and unmounts.
//! - `net::auth_handshake`: a cross-origin probe asking the admin panel
//!   whether the visitor is already signed in.
//!
//! Everything browser-specific sits behind the `hydrate` feature; the rest
//! builds and tests natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs panic/console logging and hydrates the body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
