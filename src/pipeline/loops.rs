//! Artificial loop merging
//!
//! Diagonal adjacency can leave small triangles between junction nodes that
//! do not correspond to a real loop in the structure. Every node on such a
//! triangle is merged with its short-linked junction neighbours.

use super::LoopMergeConfig;
use crate::graph::{GraphError, GraphResult, NodeId, SkeletonGraph};
use tracing::{debug, info};

/// Collapse triangles among junction nodes
///
/// Nodes are visited in ascending id order while the graph shrinks and grows
/// under the merges, so attributes and edges are re-read on every step. For a
/// node `i` lying on at least one triangle, `i` and every neighbour `k` with
/// `neighbor_count(k) >= config.min_neighbor_count` and
/// `length(i, k) <= config.max_edge_length` are merged into a new node that
/// inherits the coordinate and neighbour count of `i`.
///
/// The scan stops once the current id equals the live node count. The result
/// is renumbered to `1..=k`.
pub fn merge_loops(mut graph: SkeletonGraph, config: &LoopMergeConfig) -> GraphResult<SkeletonGraph> {
    let mut merges = 0usize;

    for id in graph.node_ids() {
        if graph.has_node(id) && graph.triangles(id)? > 0 {
            let members = loop_members(&graph, id, config)?;
            let node = graph.get_node(id).ok_or(GraphError::NodeNotFound(id))?;
            let (coordinate, neighbor_count) = (node.coordinate, node.neighbor_count);

            let merged = graph.merge_nodes(&members, coordinate, neighbor_count)?;
            debug!("Collapsed loop at {} into {} ({} members)", id, merged, members.len());
            merges += 1;
        }

        if id.as_u64() == graph.node_count() as u64 {
            break;
        }
    }

    info!(
        "Merged {} artificial loops, {} nodes and {} edges remain",
        merges,
        graph.node_count(),
        graph.edge_count()
    );
    graph.compact()
}

/// `id` followed by its neighbours that qualify for merging with it
fn loop_members(
    graph: &SkeletonGraph,
    id: NodeId,
    config: &LoopMergeConfig,
) -> GraphResult<Vec<NodeId>> {
    let mut members = vec![id];
    for (nbr, length) in graph.incident_edges(id)? {
        let neighbor = graph.get_node(nbr).ok_or(GraphError::NodeNotFound(nbr))?;
        if neighbor.neighbor_count >= config.min_neighbor_count && length <= config.max_edge_length {
            members.push(nbr);
        }
    }
    Ok(members)
}
