//! Networking: REST client, wire types, and the admin-origin auth handshake.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the only module that touches HTTP. `resources` binds it to the
//! backend's endpoints for the data-fetch controllers. `auth_handshake` talks
//! to the admin origin through a `CrossOriginChannel`, which `iframe_channel`
//! implements in the browser.

pub mod api;
pub mod auth_handshake;
pub mod error;
#[cfg(feature = "hydrate")]
pub mod iframe_channel;
pub mod query;
pub mod resources;
pub mod types;
