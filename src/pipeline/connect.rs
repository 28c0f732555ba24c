//! Edge instantiation
//!
//! Every adjacent node pair becomes one edge representing a single
//! voxel-to-voxel step.

use super::adjacency::Adjacency;
use crate::graph::{GraphResult, SkeletonGraph};
use tracing::info;

/// Length of an edge between two touching voxels
pub const VOXEL_STEP_LENGTH: u32 = 1;

/// Add one edge of length [`VOXEL_STEP_LENGTH`] per adjacent pair
///
/// Pairs are visited in ascending `(i, j)` order, so each node's edges are
/// inserted in ascending neighbour order.
pub fn connect_edges(mut graph: SkeletonGraph, adjacency: &Adjacency) -> GraphResult<SkeletonGraph> {
    for (a, b) in adjacency.pairs() {
        graph.add_edge(a, b, VOXEL_STEP_LENGTH)?;
    }

    info!(
        "Connected {} nodes with {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
