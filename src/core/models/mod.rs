//! Data models for `techtree`

pub mod document;
pub mod edge;
pub mod localized;
pub mod node;

pub use document::{CanvasSize, GraphDocument, LayoutDirection, LayoutType, Metadata};
pub use edge::{Edge, EdgeType};
pub use localized::LocalizedText;
pub use node::{Node, NodeState, NodeType, Position};
