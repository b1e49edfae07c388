//! Mermaid diagram generator for tree documents
//!
//! Generates Mermaid flowchart syntax that can be embedded in Markdown
//! files and rendered by GitHub, GitLab, and other Markdown viewers.

use std::fmt::Write;

use crate::core::models::{EdgeType, GraphDocument, LayoutDirection, Node};

/// Generator for Mermaid diagram syntax
pub struct MermaidGenerator;

impl MermaidGenerator {
    /// Generate a Mermaid flowchart from a document.
    ///
    /// Flow direction follows the document's layout metadata. Required
    /// edges are solid arrows, optional edges dashed; recommended edges
    /// carry a label.
    #[must_use]
    pub fn generate(document: &GraphDocument, language: &str) -> String {
        let direction = match document.metadata.layout_direction {
            LayoutDirection::Horizontal => "LR",
            LayoutDirection::Vertical => "TB",
        };

        let mut output = format!("```mermaid\nflowchart {direction}\n");

        for node in &document.nodes {
            let label = Self::node_label(node, language);
            let safe_id = Self::sanitize_id(&node.id);
            let _ = writeln!(output, "    {safe_id}[\"{label}\"]");
        }

        output.push('\n');

        for edge in &document.edges {
            let from = Self::sanitize_id(&edge.from);
            let to = Self::sanitize_id(&edge.to);
            let _ = match edge.edge_type {
                EdgeType::Required => writeln!(output, "    {from} --> {to}"),
                EdgeType::Optional => writeln!(output, "    {from} -.-> {to}"),
                EdgeType::Recommended => writeln!(output, "    {from} -->|recommended| {to}"),
            };
        }

        output.push_str("```\n");
        output
    }

    /// Get a display label for a node
    fn node_label(node: &Node, language: &str) -> String {
        let title = node
            .title
            .get(language, "en")
            .unwrap_or(node.id.as_str());

        // Truncate long titles
        let title = if title.chars().count() > 20 {
            let short: String = title.chars().take(17).collect();
            format!("{short}...")
        } else {
            title.to_string()
        };

        format!("{}<br/>{title}", node.id)
    }

    /// Sanitize a node id for use as a Mermaid identifier
    fn sanitize_id(id: &str) -> String {
        id.chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }
}
