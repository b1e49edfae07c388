//! Edge derivation from node requirements
//!
//! When an author writes no `connections` list, structure is taken from
//! each node's `requirements` instead: one required edge per
//! (prerequisite -> node) pair.

use std::collections::HashSet;

use crate::core::models::{Edge, Node};

/// Synthesize edges from the nodes' requirement lists.
///
/// Pure and deterministic: identical node lists always yield identical
/// edge sequences. Duplicate (prerequisite, node) pairs collapse to the
/// first occurrence, keyed by the synthesized edge id.
#[must_use]
pub fn derive_edges(nodes: &[Node]) -> Vec<Edge> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut edges = Vec::new();

    for node in nodes {
        for requirement in &node.requirements {
            let id = Edge::derived_id(requirement, &node.id);
            if seen.insert(id.clone()) {
                edges.push(Edge::required(id, requirement.clone(), node.id.clone()));
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::EdgeType;

    fn node_with_requirements(id: &str, requirements: &[&str]) -> Node {
        let mut node = Node::new(id.to_string());
        node.requirements = requirements.iter().map(|r| (*r).to_string()).collect();
        node
    }

    #[test]
    fn test_one_edge_per_requirement() {
        let nodes = vec![
            node_with_requirements("a", &[]),
            node_with_requirements("b", &["a"]),
            node_with_requirements("c", &["a", "b"]),
        ];

        let edges = derive_edges(&nodes);
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].id, "conn_a_b");
        assert_eq!(edges[0].from, "a");
        assert_eq!(edges[0].to, "b");
        assert_eq!(edges[1].id, "conn_a_c");
        assert_eq!(edges[2].id, "conn_b_c");
        assert!(edges.iter().all(|e| e.edge_type == EdgeType::Required));
    }

    #[test]
    fn test_duplicate_requirement_collapses() {
        let nodes = vec![node_with_requirements("b", &["a", "a"])];
        let edges = derive_edges(&nodes);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].id, "conn_a_b");
    }

    #[test]
    fn test_deterministic_and_order_preserving() {
        let nodes = vec![
            node_with_requirements("z", &["m", "a"]),
            node_with_requirements("a", &["m"]),
        ];

        let first = derive_edges(&nodes);
        let second = derive_edges(&nodes);
        assert_eq!(first, second);

        // Authoring order wins over any id ordering
        assert_eq!(first[0].id, "conn_m_z");
        assert_eq!(first[1].id, "conn_a_z");
        assert_eq!(first[2].id, "conn_m_a");
    }

    #[test]
    fn test_no_requirements_no_edges() {
        let nodes = vec![node_with_requirements("a", &[])];
        assert!(derive_edges(&nodes).is_empty());
    }

    #[test]
    fn test_dangling_requirement_still_emits_edge() {
        // Requirements are not validated against the node set
        let nodes = vec![node_with_requirements("b", &["ghost"])];
        let edges = derive_edges(&nodes);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].from, "ghost");
    }
}
