//! Document statistics
//!
//! Read-only analysis over a normalized document. The importer accepts
//! dangling edges by design; this is where they become visible to an
//! author who wants to find them.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::core::models::{GraphDocument, NodeState, NodeType};

/// Summary counts for one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// Total node count
    pub node_count: usize,
    /// Total edge count
    pub edge_count: usize,
    /// Node count per type literal
    pub nodes_by_type: BTreeMap<&'static str, usize>,
    /// Node count per state literal
    pub nodes_by_state: BTreeMap<&'static str, usize>,
    /// Sum of estimated minutes across all nodes
    pub total_estimated_time: u64,
    /// Ids referenced by edges but missing from the node set
    pub dangling_ids: Vec<String>,
    /// Nodes with no incoming required edge (entry points)
    pub root_ids: Vec<String>,
}

/// Compute summary statistics for a document
#[must_use]
pub fn compute(document: &GraphDocument) -> DocumentStats {
    let known: HashSet<&str> = document.nodes.iter().map(|n| n.id.as_str()).collect();

    let mut nodes_by_type: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut nodes_by_state: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut total_estimated_time: u64 = 0;
    for node in &document.nodes {
        *nodes_by_type.entry(node.node_type.as_str()).or_default() += 1;
        *nodes_by_state.entry(node.state.as_str()).or_default() += 1;
        total_estimated_time += u64::from(node.estimated_time);
    }

    let mut dangling_ids: Vec<String> = Vec::new();
    let mut seen_dangling: HashSet<&str> = HashSet::new();
    let mut targets: HashSet<&str> = HashSet::new();
    for edge in &document.edges {
        targets.insert(edge.to.as_str());
        for endpoint in [edge.from.as_str(), edge.to.as_str()] {
            if !endpoint.is_empty()
                && !known.contains(endpoint)
                && seen_dangling.insert(endpoint)
            {
                dangling_ids.push(endpoint.to_string());
            }
        }
    }

    let root_ids = document
        .nodes
        .iter()
        .filter(|n| !targets.contains(n.id.as_str()))
        .map(|n| n.id.clone())
        .collect();

    DocumentStats {
        node_count: document.nodes.len(),
        edge_count: document.edges.len(),
        nodes_by_type,
        nodes_by_state,
        total_estimated_time,
        dangling_ids,
        root_ids,
    }
}

impl fmt::Display for DocumentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes: {}", self.node_count)?;
        for (kind, count) in &self.nodes_by_type {
            writeln!(f, "  {kind}: {count}")?;
        }
        writeln!(f, "Edges: {}", self.edge_count)?;
        writeln!(f, "Estimated time: {} min", self.total_estimated_time)?;
        if !self.root_ids.is_empty() {
            writeln!(f, "Entry points: {}", self.root_ids.join(", "))?;
        }
        if !self.dangling_ids.is_empty() {
            writeln!(
                f,
                "Dangling references: {}",
                self.dangling_ids.join(", ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::importer::{normalize, ImportOptions};

    fn import(raw: &str) -> GraphDocument {
        normalize(raw, "c1", &ImportOptions::default()).expect("test document normalizes")
    }

    #[test]
    fn test_counts_and_time() {
        let document = import(
            r#"{"nodes": {
                "a": {"type": "topic", "estimatedTime": 30},
                "b": {"type": "skill", "state": "completed", "estimatedTime": 15, "requirements": ["a"]},
                "c": {"type": "skill", "requirements": ["a"]}
            }}"#,
        );

        let stats = compute(&document);
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.nodes_by_type.get("skill"), Some(&2));
        assert_eq!(stats.nodes_by_type.get("topic"), Some(&1));
        assert_eq!(stats.nodes_by_state.get("completed"), Some(&1));
        assert_eq!(stats.nodes_by_state.get("available"), Some(&2));
        assert_eq!(stats.total_estimated_time, 45);
        assert_eq!(stats.root_ids, vec!["a".to_string()]);
        assert!(stats.dangling_ids.is_empty());
    }

    #[test]
    fn test_dangling_edges_are_reported_not_rejected() {
        let document = import(
            r#"{"nodes": {"a": {}},
                "connections": [{"from": "ghost", "to": "a"}, {"from": "a", "to": "phantom"}]}"#,
        );

        let stats = compute(&document);
        assert_eq!(
            stats.dangling_ids,
            vec!["ghost".to_string(), "phantom".to_string()]
        );
    }

    #[test]
    fn test_display_renders_sections() {
        let document = import(r#"{"nodes": {"a": {"estimatedTime": 5}}}"#);
        let rendered = compute(&document).to_string();
        assert!(rendered.contains("Nodes: 1"));
        assert!(rendered.contains("Estimated time: 5 min"));
        assert!(rendered.contains("Entry points: a"));
    }
}
