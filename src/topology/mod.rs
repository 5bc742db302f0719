//! Coupling-map helpers.
//!
//! A coupling map is a list of `[control, target]` qubit pairs, e.g.
//! [[0, 1], [1, 0], [1, 2]]  =>  {0: [1], 1: [0, 2]}
//!
//! Nodes of the graph are ordered by qubit index, not by first appearance in
//! the map, so printed graphs are stable across equivalent coupling maps.

use crate::error::TopologyError;
use crate::Result;

use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Adjacency list keyed by qubit (sorted); neighbours keep coupling-map order.
pub type Graph = BTreeMap<u32, Vec<u32>>;

/// Turn a coupling map into an adjacency list. Every edge must have exactly
/// two entries.
pub fn coupling_map_to_graph(coupling_map: &[Vec<u32>]) -> std::result::Result<Graph, TopologyError> {
    let mut graph = Graph::new();
    for (index, edge) in coupling_map.iter().enumerate() {
        let [node, neighbor] = edge.as_slice() else {
            return Err(TopologyError::BadEdge {
                index,
                len: edge.len(),
            });
        };
        graph.entry(*node).or_default().push(*neighbor);
    }
    Ok(graph)
}

/// Read a coupling map from a JSON file holding a list of pairs.
pub fn load_coupling_map(path: impl AsRef<Path>) -> Result<Vec<Vec<u32>>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("read coupling map {}", path.display()))?;
    let map = serde_json::from_str(&text)
        .with_context(|| format!("parse coupling map {}", path.display()))?;
    Ok(map)
}

/// True when both lists hold the same elements: equal length and every
/// element of `first` present in `second`.
pub fn same_elements<T: PartialEq>(first: &[T], second: &[T]) -> bool {
    first.len() == second.len() && first.iter().all(|s| second.contains(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    #[test]
    fn graph_from_pairs() {
        let graph = coupling_map_to_graph(&[vec![0, 1], vec![1, 0], vec![1, 2], vec![0, 3]]).unwrap();
        assert_eq!(graph, Graph::from([(0, vec![1, 3]), (1, vec![0, 2])]));
    }

    #[test]
    fn nodes_sorted_regardless_of_first_appearance() {
        let graph = coupling_map_to_graph(&[vec![4, 2], vec![1, 4], vec![4, 0]]).unwrap();
        let nodes: Vec<u32> = graph.keys().copied().collect();
        assert_eq!(nodes, vec![1, 4]);
        assert_eq!(graph[&4], vec![2, 0]);
    }

    #[test]
    fn bad_edge_is_rejected() {
        let err = coupling_map_to_graph(&[vec![0, 1], vec![2]]).unwrap_err();
        assert!(matches!(err, TopologyError::BadEdge { index: 1, len: 1 }));
    }

    #[test]
    fn sets_in_any_order() {
        let a = vec![BTreeSet::from([0, 1]), BTreeSet::from([2, 3])];
        let b = vec![BTreeSet::from([3, 2]), BTreeSet::from([1, 0])];
        assert!(same_elements(&a, &b));
        assert!(!same_elements(&a, &b[..1]));
        assert!(!same_elements(&a, &[BTreeSet::from([0, 1]), BTreeSet::from([4])]));
    }
}
