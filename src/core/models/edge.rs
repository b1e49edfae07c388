//! Edge model

use serde::{Deserialize, Serialize};

/// Strength of a prerequisite relationship
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// Must be completed first (default)
    #[default]
    Required,
    /// Suggested but not enforced
    Recommended,
    /// Purely informational
    Optional,
}

impl EdgeType {
    /// Canonical lowercase literal for the authoring format
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Recommended => "recommended",
            Self::Optional => "optional",
        }
    }

    /// Parse from a raw literal, case-insensitive.
    /// Unknown literals fall back to `Required`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "recommended" => Self::Recommended,
            "optional" => Self::Optional,
            _ => Self::Required,
        }
    }
}

/// A directed relationship between two nodes.
///
/// Endpoints are not validated against the node set; a dangling edge is
/// a rendering concern, not an import failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge id
    pub id: String,

    /// Source node id (the prerequisite)
    pub from: String,

    /// Target node id (the dependent)
    pub to: String,

    /// Relationship strength
    #[serde(default)]
    pub edge_type: EdgeType,

    /// Free-form visual hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Optional display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    /// Create a required edge between two nodes
    #[must_use]
    pub fn required(id: String, from: String, to: String) -> Self {
        Self {
            id,
            from,
            to,
            edge_type: EdgeType::Required,
            style: None,
            label: None,
        }
    }

    /// The id synthesized for a derived prerequisite edge
    #[must_use]
    pub fn derived_id(from: &str, to: &str) -> String {
        format!("conn_{from}_{to}")
    }
}
