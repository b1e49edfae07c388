//! Serializer for the keyed-map authoring shape
//!
//! Emits the canonical import format so that normalizing the output of
//! `to_import_json` reproduces the same node and edge sets. Optional
//! fields are omitted rather than written as null.

use serde_json::{json, Map, Value};

use crate::core::models::{Edge, GraphDocument, LocalizedText, Node};

/// Render a document back into the keyed-map authoring shape
#[must_use]
pub fn to_import_json(document: &GraphDocument) -> Value {
    let mut nodes = Map::new();
    for node in &document.nodes {
        nodes.insert(node.id.clone(), node_to_json(node));
    }

    json!({
        "id": document.id,
        "version": document.version,
        "createdAt": document.created_at,
        "updatedAt": document.updated_at,
        "nodes": Value::Object(nodes),
        "connections": document.edges.iter().map(edge_to_json).collect::<Vec<_>>(),
        "metadata": {
            "defaultLanguage": document.metadata.default_language,
            "availableLanguages": document.metadata.available_languages,
            "layoutType": document.metadata.layout_type.as_str(),
            "layoutDirection": document.metadata.layout_direction.as_str(),
            "canvasSize": {
                "width": document.metadata.canvas_size.width,
                "height": document.metadata.canvas_size.height,
            },
        },
    })
}

fn localized_to_json(text: &LocalizedText) -> Value {
    let mut map = Map::new();
    for (lang, value) in &text.values {
        map.insert(lang.clone(), Value::String(value.clone()));
    }
    Value::Object(map)
}

fn node_to_json(node: &Node) -> Value {
    let mut map = Map::new();
    map.insert("title".to_string(), localized_to_json(&node.title));
    if !node.description.is_empty() {
        map.insert(
            "description".to_string(),
            localized_to_json(&node.description),
        );
    }
    map.insert(
        "type".to_string(),
        Value::String(node.node_type.as_str().to_string()),
    );
    map.insert(
        "position".to_string(),
        json!({"x": node.position.x, "y": node.position.y}),
    );
    if let Some(style) = &node.style {
        map.insert("style".to_string(), Value::String(style.clone()));
    }
    if let Some(content_id) = &node.content_id {
        map.insert("contentId".to_string(), Value::String(content_id.clone()));
    }
    map.insert(
        "requirements".to_string(),
        Value::Array(
            node.requirements
                .iter()
                .map(|r| Value::String(r.clone()))
                .collect(),
        ),
    );
    map.insert(
        "state".to_string(),
        Value::String(node.state.as_str().to_string()),
    );
    map.insert("difficulty".to_string(), json!(node.difficulty));
    map.insert("estimatedTime".to_string(), json!(node.estimated_time));
    Value::Object(map)
}

fn edge_to_json(edge: &Edge) -> Value {
    let mut map = Map::new();
    map.insert("id".to_string(), Value::String(edge.id.clone()));
    map.insert("from".to_string(), Value::String(edge.from.clone()));
    map.insert("to".to_string(), Value::String(edge.to.clone()));
    map.insert(
        "type".to_string(),
        Value::String(edge.edge_type.as_str().to_string()),
    );
    if let Some(style) = &edge.style {
        map.insert("style".to_string(), Value::String(style.clone()));
    }
    if let Some(label) = &edge.label {
        map.insert("label".to_string(), Value::String(label.clone()));
    }
    Value::Object(map)
}
