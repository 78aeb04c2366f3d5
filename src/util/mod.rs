//! Browser storage helpers.

pub mod token_storage;
