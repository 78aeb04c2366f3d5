//! Data-fetch state machines and their Leptos hooks.
//!
//! SYSTEM CONTEXT
//! ==============
//! `fetch`, `mutation` and `paginated` are plain controllers over a
//! [`cell::StateCell`]; `hooks` binds them to reactive signals and component
//! lifetimes. `sequence` decides which in-flight response is allowed to
//! settle.

pub mod cell;
pub mod fetch;
pub mod hooks;
pub mod mutation;
pub mod paginated;
pub mod sequence;

#[cfg(test)]
mod test_support;
