//! Core module for `techtree`

pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod importer;
pub mod models;
pub mod stats;
pub mod store;

/// Returns the current version of the `techtree` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
