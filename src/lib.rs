//! Shared library for `techtree`
//! Contains the import pipeline and interaction store used by the CLI
//! and any embedding front end.

pub mod core;
pub mod logger;

pub use self::core::config;
