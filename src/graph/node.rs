//! Node implementation for skeleton graphs
//!
//! A node stands for one voxel of the skeleton, or for a group of voxels
//! after loop merging. Its attributes are fixed when it is created and are
//! copied, never recomputed, when nodes are merged or renumbered.

use super::types::{Coordinate, NodeId};
use serde::{Deserialize, Serialize};

/// Topological role of a node, derived from its stored neighbour count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// No set voxel around it
    Isolated,
    /// End of a branch
    Endpoint,
    /// Interior voxel of a branch
    Chain,
    /// Branch point with three or more neighbours
    Junction,
}

impl NodeKind {
    pub fn from_neighbor_count(count: u8) -> Self {
        match count {
            0 => NodeKind::Isolated,
            1 => NodeKind::Endpoint,
            2 => NodeKind::Chain,
            _ => NodeKind::Junction,
        }
    }
}

/// A node in the skeleton graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier within the owning graph
    pub id: NodeId,

    /// Voxel the node originated from
    pub coordinate: Coordinate,

    /// Number of set voxels in the 26-neighbourhood of the originating voxel
    pub neighbor_count: u8,
}

impl Node {
    pub fn new(id: NodeId, coordinate: Coordinate, neighbor_count: u8) -> Self {
        Node {
            id,
            coordinate,
            neighbor_count,
        }
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::from_neighbor_count(self.neighbor_count)
    }

    /// Endpoints and junctions are the nodes that survive branch reduction
    pub fn is_junction_grade(&self) -> bool {
        self.neighbor_count != 2
    }
}
