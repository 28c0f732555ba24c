//! Skeleton graph data model
//!
//! This module implements the graph the pipeline builds and simplifies:
//! - Nodes carrying the originating voxel and its neighbour count
//! - Undirected edges carrying a path length
//! - Arena storage with tombstones and dense renumbering
//! - The node merge primitive used to collapse artificial loops

pub mod edge;
pub mod merge;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::{Node, NodeKind};
pub use store::{GraphError, GraphResult, GraphStatistics, SkeletonGraph};
pub use types::{Coordinate, NodeId, NEIGHBOR_OFFSETS};
