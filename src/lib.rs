//! Skelgraph
//!
//! Converts a binary 3D skeleton volume (a one-voxel-wide thinning of a
//! tubular or filamentary structure) into a simplified topological graph:
//! nodes are junctions and endpoints, edges carry the number of voxel steps
//! between them.
//!
//! # Pipeline
//!
//! - Neighbour counting with 26-connectivity
//! - One node per set voxel, numbered in row-major order
//! - Adjacency resolved from node coordinates
//! - Unit-length edges between touching voxels
//! - Branch reduction: chains of degree-2 voxels become single edges
//! - Loop merging: artificial triangles between junctions become one node
//!
//! ## Example Usage
//!
//! ```rust
//! use skelgraph::{skeleton_to_graph, NodeId, Volume};
//!
//! // A straight line of five voxels along z
//! let volume = Volume::from_voxels([1, 1, 5], (0..5).map(|z| (0, 0, z))).unwrap();
//!
//! let graph = skeleton_to_graph(&volume).unwrap();
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_length(NodeId::new(1), NodeId::new(2)), Some(4));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod pipeline;
pub mod volume;

// Re-export main types for convenience
pub use graph::{
    Coordinate, Edge, GraphError, GraphResult, GraphStatistics, Node, NodeId, NodeKind,
    SkeletonGraph,
};

pub use pipeline::{
    skeleton_to_graph, Adjacency, LoopMergeConfig, PipelineConfig, PipelineError,
    PipelineReport, PipelineResult, SkeletonPipeline, Stage, StageSummary,
};

pub use volume::{count_neighbors, NeighborCounts, Volume, VolumeError, VolumeResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
