//! Graph document model

use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::node::{Node, Position};

/// Hard-coded fallback language used when a single-string title is
/// duplicated and when lookups miss the default language.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Layout algorithm hint
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    /// Layered tree layout (default)
    #[default]
    Tree,
}

impl LayoutType {
    /// Canonical lowercase literal for the authoring format
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tree => "tree",
        }
    }

    /// Parse from a raw literal, case-insensitive; unknown falls back to `Tree`.
    #[must_use]
    pub const fn parse(_raw: &str) -> Self {
        Self::Tree
    }
}

/// Main axis of the layout
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    /// Left-to-right (default)
    #[default]
    Horizontal,
    /// Top-to-bottom
    Vertical,
}

impl LayoutDirection {
    /// Canonical lowercase literal for the authoring format
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    /// Parse from a raw literal, case-insensitive; unknown falls back to `Horizontal`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("vertical") {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }
}

/// Canvas dimensions in logical pixels
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Canvas width
    pub width: u32,
    /// Canvas height
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Document-level presentation metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Language used when an author writes plain strings
    pub default_language: String,
    /// Languages the document claims to provide
    pub available_languages: Vec<String>,
    /// Layout algorithm hint
    #[serde(default)]
    pub layout_type: LayoutType,
    /// Main layout axis
    #[serde(default)]
    pub layout_direction: LayoutDirection,
    /// Canvas dimensions
    #[serde(default)]
    pub canvas_size: CanvasSize,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            default_language: "ru".to_string(),
            available_languages: vec!["ru".to_string()],
            layout_type: LayoutType::Tree,
            layout_direction: LayoutDirection::Horizontal,
            canvas_size: CanvasSize::default(),
        }
    }
}

/// The normalized result of an import: the single source of truth for
/// what the graph currently contains.
///
/// A `GraphDocument` is never mutated in place. Every logical change
/// produces a new document; see [`GraphDocument::with_node_position`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Document id
    pub id: String,
    /// Advisory schema version
    pub version: u32,
    /// Course this tree belongs to
    pub course_id: String,
    /// Creation timestamp (verbatim string from the source, or "now")
    pub created_at: String,
    /// Last-update timestamp (verbatim string from the source, or "now")
    pub updated_at: String,
    /// Nodes in source iteration order
    pub nodes: Vec<Node>,
    /// Edges, either authored or derived from requirements
    pub edges: Vec<Edge>,
    /// Presentation metadata
    pub metadata: Metadata,
}

impl GraphDocument {
    /// Look up a node by id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Return a new document with exactly the matching node's position
    /// replaced. All other nodes and all edges are carried over
    /// unchanged. An unknown id yields a structurally equal document.
    #[must_use]
    pub fn with_node_position(&self, id: &str, position: Position) -> Self {
        let nodes = self
            .nodes
            .iter()
            .map(|n| {
                if n.id == id {
                    n.with_position(position)
                } else {
                    n.clone()
                }
            })
            .collect();

        Self {
            nodes,
            ..self.clone()
        }
    }
}
