//! Tolerant JSON importer for technology-tree documents
//!
//! Accepts two incompatible authoring shapes:
//!   1. a bare object with a `nodes` map (or flat array) at the top, and
//!   2. an outer wrapper carrying `course_id` plus a `data` object that
//!      holds the actual tree.
//!
//! Only two conditions abort an import: the text is not JSON, or no
//! `nodes` collection can be located. Everything else is absorbed via
//! per-field defaulting so hand-edited trees stay importable even when
//! partially wrong.

use serde_json::{Map, Value};

use super::coerce;
use super::derive::derive_edges;
use crate::core::error::ParseError;
use crate::core::models::{
    CanvasSize, Edge, EdgeType, GraphDocument, LayoutDirection, LayoutType, Metadata, Node,
    NodeState, NodeType,
};

/// Context injected into an import run.
///
/// The default language, fallback language, and "now" timestamp are
/// parameters rather than globals so tests control them exactly.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Language assumed when the document metadata names none
    pub default_language: String,
    /// Language a single-string title is additionally duplicated into
    pub fallback_language: String,
    /// Timestamp string used when the document carries none
    pub now: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            default_language: "ru".to_string(),
            fallback_language: crate::core::models::document::FALLBACK_LANGUAGE.to_string(),
            now: "now".to_string(),
        }
    }
}

/// Normalize raw JSON text into a [`GraphDocument`].
///
/// # Arguments
/// * `raw_json` - UTF-8 JSON text in either accepted shape
/// * `fallback_course_id` - course id used when the document names none
/// * `options` - injected locale and timestamp context
///
/// # Errors
/// `ParseError::Syntax` when the text is not valid JSON,
/// `ParseError::NotAnObject` when the root is not an object, and
/// `ParseError::MissingField("nodes")` when no nodes collection exists.
pub fn normalize(
    raw_json: &str,
    fallback_course_id: &str,
    options: &ImportOptions,
) -> Result<GraphDocument, ParseError> {
    let root: Value =
        serde_json::from_str(raw_json).map_err(|e| ParseError::Syntax(e.to_string()))?;

    let Value::Object(root) = root else {
        return Err(ParseError::NotAnObject);
    };

    // Outer-wrapper shape: course_id + data at the top level
    let (working, course_id) = if root.contains_key("course_id") && root.contains_key("data") {
        let course_id = coerce::read_string(&root, &["course_id"])
            .unwrap_or_else(|| fallback_course_id.to_string());
        let working = match root.get("data") {
            Some(Value::Object(data)) => data.clone(),
            _ => root.clone(),
        };
        (working, course_id)
    } else {
        (root.clone(), fallback_course_id.to_string())
    };

    // Metadata may sit inside the working object or, when the wrapper
    // shape was used, at the very top level.
    let metadata_value = working
        .get("metadata")
        .or_else(|| root.get("metadata"))
        .and_then(Value::as_object);
    let metadata = parse_metadata(metadata_value, options);

    let nodes = parse_nodes(&working, &metadata, options)?;

    let edges = working.get("connections").map_or_else(
        || derive_edges(&nodes),
        |connections| parse_connections(connections, &nodes),
    );

    Ok(GraphDocument {
        id: coerce::read_string(&working, &["id"]).unwrap_or_else(|| format!("{course_id}_tree")),
        version: coerce::read_u32(&working, &["version"], 1),
        course_id,
        created_at: coerce::read_string(&working, &["createdAt", "created_at"])
            .unwrap_or_else(|| options.now.clone()),
        updated_at: coerce::read_string(&working, &["updatedAt", "updated_at"])
            .unwrap_or_else(|| options.now.clone()),
        nodes,
        edges,
        metadata,
    })
}

/// Locate and parse the nodes collection.
///
/// The canonical shape is a map keyed by node id. A flat array is also
/// accepted; each element's own `id` (or its index) stands in for the
/// key. Duplicate ids overwrite the earlier entry in place.
fn parse_nodes(
    working: &Map<String, Value>,
    metadata: &Metadata,
    options: &ImportOptions,
) -> Result<Vec<Node>, ParseError> {
    let entries: Vec<(String, &Value)> = match working.get("nodes") {
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let id = item
                    .as_object()
                    .and_then(|o| coerce::read_string(o, &["id"]))
                    .unwrap_or_else(|| idx.to_string());
                (id, item)
            })
            .collect(),
        _ => return Err(ParseError::MissingField("nodes")),
    };

    let mut nodes: Vec<Node> = Vec::with_capacity(entries.len());
    for (id, value) in entries {
        let node = parse_node(id, value, metadata, options);
        if let Some(existing) = nodes.iter_mut().find(|n| n.id == node.id) {
            *existing = node;
        } else {
            nodes.push(node);
        }
    }

    Ok(nodes)
}

/// Build one node, defaulting every field independently.
/// A non-object entry yields a node with just its id and defaults.
fn parse_node(id: String, value: &Value, metadata: &Metadata, options: &ImportOptions) -> Node {
    let Some(map) = value.as_object() else {
        return Node::new(id);
    };

    let default_language = metadata.default_language.as_str();
    let fallback_language = options.fallback_language.as_str();

    Node {
        id,
        title: coerce::read_localized(map, &["title"], default_language, fallback_language),
        description: coerce::read_localized(
            map,
            &["description"],
            default_language,
            fallback_language,
        ),
        node_type: coerce::read_string(map, &["type", "node_type"])
            .map(|raw| NodeType::parse(&raw))
            .unwrap_or_default(),
        position: coerce::read_position(map),
        style: coerce::read_string(map, &["style"]),
        content_id: coerce::read_string(map, &["contentId", "content_id"]),
        requirements: coerce::read_requirements(map, &["requirements", "prerequisites"]),
        state: coerce::read_string(map, &["state", "status"])
            .map(|raw| NodeState::parse(&raw))
            .unwrap_or_default(),
        difficulty: coerce::read_u32(map, &["difficulty"], 1).max(1),
        estimated_time: coerce::read_u32(map, &["estimatedTime", "estimated_time"], 0),
    }
}

/// Parse an explicit connections list. An empty list is respected as-is
/// (no derivation); a malformed list degrades to derivation.
fn parse_connections(connections: &Value, nodes: &[Node]) -> Vec<Edge> {
    let Some(items) = connections.as_array() else {
        return derive_edges(nodes);
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| parse_edge(idx, item))
        .collect()
}

fn parse_edge(index: usize, value: &Value) -> Edge {
    let Some(map) = value.as_object() else {
        return Edge::required(format!("conn{index}"), String::new(), String::new());
    };

    Edge {
        id: coerce::read_string(map, &["id"]).unwrap_or_else(|| format!("conn{index}")),
        from: coerce::read_string(map, &["from", "source"]).unwrap_or_default(),
        to: coerce::read_string(map, &["to", "target"]).unwrap_or_default(),
        edge_type: coerce::read_string(map, &["type", "edge_type"])
            .map(|raw| EdgeType::parse(&raw))
            .unwrap_or_default(),
        style: coerce::read_string(map, &["style"]),
        label: coerce::read_string(map, &["label"]),
    }
}

/// Parse document metadata, defaulting every sub-field independently
fn parse_metadata(value: Option<&Map<String, Value>>, options: &ImportOptions) -> Metadata {
    let Some(map) = value else {
        return Metadata {
            default_language: options.default_language.clone(),
            available_languages: vec![options.default_language.clone()],
            ..Metadata::default()
        };
    };

    let default_language = coerce::read_string(map, &["defaultLanguage", "default_language"])
        .unwrap_or_else(|| options.default_language.clone());

    let available_languages = match coerce::first_present(
        map,
        &["availableLanguages", "available_languages"],
    ) {
        Some(Value::Array(items)) => {
            let languages: Vec<String> = items.iter().filter_map(coerce::as_string).collect();
            if languages.is_empty() {
                vec![default_language.clone()]
            } else {
                languages
            }
        }
        _ => vec![default_language.clone()],
    };

    Metadata {
        default_language,
        available_languages,
        layout_type: coerce::read_string(map, &["layoutType", "layout_type"])
            .map(|raw| LayoutType::parse(&raw))
            .unwrap_or_default(),
        layout_direction: coerce::read_string(map, &["layoutDirection", "layout_direction"])
            .map(|raw| LayoutDirection::parse(&raw))
            .unwrap_or_default(),
        canvas_size: parse_canvas_size(map),
    }
}

fn parse_canvas_size(map: &Map<String, Value>) -> CanvasSize {
    let defaults = CanvasSize::default();
    let Some(Value::Object(size)) = coerce::first_present(map, &["canvasSize", "canvas_size"])
    else {
        return defaults;
    };

    CanvasSize {
        width: coerce::read_u32(size, &["width"], defaults.width),
        height: coerce::read_u32(size, &["height"], defaults.height),
    }
}
