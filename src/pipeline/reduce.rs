//! Branch reduction
//!
//! Collapses chains of degree-2 voxels so that only endpoints and junctions
//! remain, each edge carrying the number of voxel steps along its chain.
//!
//! Nodes are visited once, in ascending id order. Eligibility is decided by
//! the neighbour count stored at construction time, not by live degrees, so
//! the result can depend on visiting order.

use crate::graph::{GraphError, GraphResult, SkeletonGraph};
use tracing::{debug, info};

/// Remove every chain node and bridge its two edges with their summed length
///
/// A node is removed when its stored neighbour count is 2 and it still has
/// exactly two incident edges. If its two neighbours are already connected,
/// that edge is overwritten with the summed length. Nodes whose live degree
/// dropped below two because of earlier removals are kept. The result is
/// renumbered to `1..=m`.
pub fn reduce_branches(mut graph: SkeletonGraph) -> GraphResult<SkeletonGraph> {
    let mut removed = 0usize;

    for id in graph.node_ids() {
        let node = graph.get_node(id).ok_or(GraphError::NodeNotFound(id))?;
        if node.neighbor_count != 2 {
            continue;
        }

        let incident: Vec<_> = graph.incident_edges(id)?.collect();
        let &[(u, first), (v, second)] = incident.as_slice() else {
            debug!(
                "Keeping chain node {} with {} incident edges",
                id,
                incident.len()
            );
            continue;
        };

        graph.add_edge(u.min(v), u.max(v), first + second)?;
        graph.remove_node(id)?;
        removed += 1;
    }

    info!(
        "Removed {} chain nodes, {} nodes and {} edges remain",
        removed,
        graph.node_count(),
        graph.edge_count()
    );
    graph.compact()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Coordinate, NodeId};

    fn line(counts: &[u8]) -> SkeletonGraph {
        let mut graph = SkeletonGraph::new();
        let ids: Vec<_> = counts
            .iter()
            .enumerate()
            .map(|(z, &c)| graph.add_node(Coordinate::new(0, 0, z), c))
            .collect();
        for pair in ids.windows(2) {
            graph.add_edge(pair[0], pair[1], 1).unwrap();
        }
        graph
    }

    #[test]
    fn test_line_collapses_to_single_edge() {
        let graph = reduce_branches(line(&[1, 2, 2, 2, 1])).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_length(NodeId::new(1), NodeId::new(2)), Some(4));
        assert_eq!(graph.get_node(NodeId::new(2)).unwrap().coordinate.z, 4);
    }

    #[test]
    fn test_existing_lengths_are_summed() {
        let mut graph = line(&[1, 2, 1]);
        graph.add_edge(NodeId::new(1), NodeId::new(2), 5).unwrap();

        let graph = reduce_branches(graph).unwrap();

        assert_eq!(graph.edge_length(NodeId::new(1), NodeId::new(2)), Some(6));
    }

    #[test]
    fn test_junctions_and_endpoints_survive() {
        // Star: junction 1 with three arms of different lengths
        let mut graph = SkeletonGraph::new();
        let hub = graph.add_node(Coordinate::new(5, 5, 5), 3);
        let mut tips = Vec::new();
        for (axis, arm) in [2usize, 3, 1].iter().enumerate() {
            let mut prev = hub;
            for step in 1..=*arm {
                let mut c = [5, 5, 5];
                c[axis] += step;
                let count = if step == *arm { 1 } else { 2 };
                let next = graph.add_node(Coordinate::from(c), count);
                graph.add_edge(prev, next, 1).unwrap();
                prev = next;
            }
            tips.push(prev);
        }

        let reduced = reduce_branches(graph).unwrap();

        assert_eq!(reduced.node_count(), 4);
        assert_eq!(reduced.edge_count(), 3);
        let hub = NodeId::new(1);
        let mut lengths: Vec<_> = reduced.incident_edges(hub).unwrap().map(|(_, l)| l).collect();
        lengths.sort_unstable();
        assert_eq!(lengths, vec![1, 2, 3]);
        assert!(reduced.nodes().all(|n| n.neighbor_count != 2));
    }

    #[test]
    fn test_triangle_of_chain_nodes() {
        // Three mutually touching voxels, each with neighbour count 2
        let mut graph = SkeletonGraph::new();
        let a = graph.add_node(Coordinate::new(0, 0, 0), 2);
        let b = graph.add_node(Coordinate::new(0, 1, 0), 2);
        let c = graph.add_node(Coordinate::new(1, 0, 0), 2);
        graph.add_edge(a, b, 1).unwrap();
        graph.add_edge(a, c, 1).unwrap();
        graph.add_edge(b, c, 1).unwrap();

        let reduced = reduce_branches(graph).unwrap();

        // Removing a overwrites (b, c) with length 2; b and c drop to degree 1
        assert_eq!(reduced.node_count(), 2);
        assert_eq!(reduced.edge_length(NodeId::new(1), NodeId::new(2)), Some(2));
    }

    #[test]
    fn test_empty_graph() {
        let reduced = reduce_branches(SkeletonGraph::new()).unwrap();
        assert!(reduced.is_empty());
    }
}
