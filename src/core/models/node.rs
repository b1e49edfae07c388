//! Node model

use serde::{Deserialize, Serialize};

use super::localized::LocalizedText;

/// Kind of learning unit a node represents
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A single topic (default)
    #[default]
    Topic,
    /// A practical skill
    Skill,
    /// A grouping module
    Module,
    /// A linked article
    Article,
}

impl NodeType {
    /// Canonical lowercase literal for the authoring format
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::Skill => "skill",
            Self::Module => "module",
            Self::Article => "article",
        }
    }

    /// Parse from a raw literal, case-insensitive.
    /// Unknown literals fall back to `Topic`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "skill" => Self::Skill,
            "module" => Self::Module,
            "article" => Self::Article,
            _ => Self::Topic,
        }
    }
}

/// Progress state of a node
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// Ready to be started (default)
    #[default]
    Available,
    /// Blocked by unmet prerequisites
    Locked,
    /// Finished
    Completed,
    /// Started but not finished
    InProgress,
}

impl NodeState {
    /// Canonical lowercase literal for the authoring format
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Locked => "locked",
            Self::Completed => "completed",
            Self::InProgress => "inprogress",
        }
    }

    /// Parse from a raw literal, case-insensitive.
    /// Unknown literals (including the legacy `"published"`) fall back to `Available`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "locked" => Self::Locked,
            "completed" => Self::Completed,
            "inprogress" | "in_progress" => Self::InProgress,
            _ => Self::Available,
        }
    }
}

/// A 2D canvas position
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Position {
    /// Create a position
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single learning unit in the tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node id (non-empty)
    pub id: String,

    /// Display title, per language
    pub title: LocalizedText,

    /// Longer description, per language
    #[serde(default)]
    pub description: LocalizedText,

    /// Kind of learning unit
    #[serde(default)]
    pub node_type: NodeType,

    /// Canvas position
    #[serde(default)]
    pub position: Position,

    /// Free-form visual hint (e.g., shape name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Optional link to external content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,

    /// Ids of the nodes this node depends on, in authoring order
    #[serde(default)]
    pub requirements: Vec<String>,

    /// Progress state
    #[serde(default)]
    pub state: NodeState,

    /// Difficulty rating, 1 or higher
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,

    /// Estimated time in minutes
    #[serde(default)]
    pub estimated_time: u32,
}

const fn default_difficulty() -> u32 {
    1
}

impl Node {
    /// Create a node with the given id and defaults everywhere else
    #[must_use]
    pub fn new(id: String) -> Self {
        Self {
            id,
            difficulty: 1,
            ..Self::default()
        }
    }

    /// Return a copy of this node with a different position
    #[must_use]
    pub fn with_position(&self, position: Position) -> Self {
        let mut node = self.clone();
        node.position = position;
        node
    }
}
