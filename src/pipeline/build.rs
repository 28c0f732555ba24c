//! Voxel graph construction
//!
//! Turns every set voxel into one node. Voxels are enumerated in row-major
//! order over `(x, y, z)`, so node `1` is the set voxel with the smallest
//! x, then y, then z, and ids follow that order densely. No edges are created
//! here.

use crate::graph::SkeletonGraph;
use crate::volume::{dims, NeighborCounts, Volume, VolumeError, VolumeResult};
use tracing::info;

/// Create one node per set voxel, carrying its coordinate and neighbour count
pub fn build_voxel_graph(volume: &Volume, counts: &NeighborCounts) -> VolumeResult<SkeletonGraph> {
    let expected = volume.shape();
    let actual = dims(counts);
    if expected != actual {
        return Err(VolumeError::ShapeMismatch { expected, actual });
    }

    let mut graph = SkeletonGraph::with_capacity(volume.voxel_count());
    for coordinate in volume.voxels() {
        graph.add_node(coordinate, counts[coordinate.as_array()]);
    }

    info!("Built voxel graph with {} nodes", graph.node_count());
    Ok(graph)
}
