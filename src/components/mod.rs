//! Reusable UI components shared by pages.

pub mod error_banner;
pub mod page_controls;
