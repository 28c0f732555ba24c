//! Edge implementation for skeleton graphs
//!
//! Edges are undirected. The graph stores each edge once per endpoint; this
//! type is the materialised view handed out by [`SkeletonGraph::edges`].
//!
//! [`SkeletonGraph::edges`]: super::store::SkeletonGraph::edges

use super::types::NodeId;
use serde::{Deserialize, Serialize};

/// An undirected edge between two distinct nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Endpoint the edge was enumerated from
    pub source: NodeId,

    /// The other endpoint
    pub target: NodeId,

    /// Number of original voxel-to-voxel steps this edge represents
    pub length: u32,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId, length: u32) -> Self {
        Edge {
            source,
            target,
            length,
        }
    }

    /// Check if this edge connects two specific nodes (in either order)
    pub fn connects(&self, node1: NodeId, node2: NodeId) -> bool {
        (self.source == node1 && self.target == node2)
            || (self.source == node2 && self.target == node1)
    }

    /// Check if a node is one of the endpoints
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    /// Endpoint opposite to `node`, if `node` is an endpoint at all
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }

    /// Endpoints ordered as `(min, max)`
    pub fn ordered(&self) -> (NodeId, NodeId) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}
