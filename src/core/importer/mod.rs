//! Import pipeline: tolerant JSON normalization into a [`crate::core::models::GraphDocument`]

pub mod coerce;
pub mod derive;
mod json_parser;
pub mod serialize;

pub use derive::derive_edges;
pub use json_parser::{normalize, ImportOptions};
pub use serialize::to_import_json;
