//! Export formats for normalized tree documents
//!
//! Rendering to pixels is out of scope; these exporters emit text
//! formats (currently Mermaid) that external viewers draw.

pub mod mermaid;
