//! In-memory skeleton graph storage
//!
//! Nodes live in an arena indexed by their id. Removing a node leaves a
//! tombstone in its slot so that ids stay valid for the rest of a pass;
//! [`SkeletonGraph::compact`] renumbers the survivors to a dense range once
//! the pass is over.
//!
//! Each node keeps its incident edges in an insertion-ordered map from the
//! neighbour id to the edge length. Every enumeration the pipeline depends on
//! (neighbours, edges, compaction) follows that order, which keeps all stages
//! deterministic.

use super::edge::Edge;
use super::node::{Node, NodeKind};
use super::types::{Coordinate, NodeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during graph operations
///
/// Inside the pipeline any of these means an earlier stage produced an
/// inconsistent graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge between {0} and {1} not found")]
    EdgeNotFound(NodeId, NodeId),

    #[error("Invalid edge: {0} cannot be connected to itself")]
    SelfLoop(NodeId),

    #[error("Nodes {0} and {1} share coordinate {2}")]
    DuplicateCoordinate(NodeId, NodeId, Coordinate),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Summary counts over a graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub isolated_count: usize,
    pub endpoint_count: usize,
    pub chain_count: usize,
    pub junction_count: usize,
    /// Sum of all edge lengths
    pub total_length: u64,
}

/// Undirected, simple graph of skeleton nodes
///
/// - nodes: NodeId -> Node (slot 0 is never used)
/// - adjacency: NodeId -> (neighbour -> edge length), insertion ordered
#[derive(Debug, Clone)]
pub struct SkeletonGraph {
    /// Node arena, `None` marks a removed node
    nodes: Vec<Option<Node>>,

    /// Incident edges of each node
    adjacency: Vec<IndexMap<NodeId, u32>>,

    /// Number of live nodes
    node_count: usize,

    /// Number of undirected edges
    edge_count: usize,
}

impl Default for SkeletonGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SkeletonGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty graph with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        let mut adjacency = Vec::with_capacity(capacity + 1);
        nodes.push(None);
        adjacency.push(IndexMap::new());

        SkeletonGraph {
            nodes,
            adjacency,
            node_count: 0,
            edge_count: 0,
        }
    }

    /// Id the next created node will receive
    pub fn next_node_id(&self) -> NodeId {
        NodeId::new(self.nodes.len() as u64)
    }

    /// Create a node with the next free id
    pub fn add_node(&mut self, coordinate: Coordinate, neighbor_count: u8) -> NodeId {
        let id = self.next_node_id();
        self.nodes.push(Some(Node::new(id, coordinate, neighbor_count)));
        self.adjacency.push(IndexMap::new());
        self.node_count += 1;
        id
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: NodeId) -> bool {
        self.get_node(id).is_some()
    }

    fn require_node(&self, id: NodeId) -> GraphResult<&Node> {
        self.get_node(id).ok_or(GraphError::NodeNotFound(id))
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Live nodes in ascending id order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().flatten()
    }

    /// Snapshot of the live node ids in ascending order
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes().map(|n| n.id).collect()
    }

    /// Neighbours of a node in the order their edges were added
    pub fn neighbors(&self, id: NodeId) -> GraphResult<impl Iterator<Item = NodeId> + '_> {
        self.require_node(id)?;
        Ok(self.adjacency[id.index()].keys().copied())
    }

    /// Incident edges of a node as `(neighbour, length)` pairs
    pub fn incident_edges(
        &self,
        id: NodeId,
    ) -> GraphResult<impl Iterator<Item = (NodeId, u32)> + '_> {
        self.require_node(id)?;
        Ok(self.adjacency[id.index()]
            .iter()
            .map(|(&nbr, &length)| (nbr, length)))
    }

    /// Number of edges currently incident to a node
    pub fn degree(&self, id: NodeId) -> GraphResult<usize> {
        self.require_node(id)?;
        Ok(self.adjacency[id.index()].len())
    }

    /// Add an undirected edge
    ///
    /// Adding an edge that already exists overwrites its length and keeps
    /// its position in both neighbour orders.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, length: u32) -> GraphResult<()> {
        self.require_node(a)?;
        self.require_node(b)?;
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }

        let previous = self.adjacency[a.index()].insert(b, length);
        self.adjacency[b.index()].insert(a, length);
        if previous.is_none() {
            self.edge_count += 1;
        }
        Ok(())
    }

    /// Length of the edge between two nodes, if there is one
    pub fn edge_length(&self, a: NodeId, b: NodeId) -> Option<u32> {
        self.get_node(a)?;
        self.adjacency[a.index()].get(&b).copied()
    }

    /// Check if two nodes are connected
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_length(a, b).is_some()
    }

    /// Delete an edge and return its length
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> GraphResult<u32> {
        self.require_node(a)?;
        self.require_node(b)?;
        let length = self.adjacency[a.index()]
            .shift_remove(&b)
            .ok_or(GraphError::EdgeNotFound(a, b))?;
        self.adjacency[b.index()].shift_remove(&a);
        self.edge_count -= 1;
        Ok(length)
    }

    /// Delete a node and all its connected edges
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<Node> {
        let node = self
            .nodes
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(GraphError::NodeNotFound(id))?;

        let incident = std::mem::take(&mut self.adjacency[id.index()]);
        for nbr in incident.keys() {
            let removed = self
                .adjacency
                .get_mut(nbr.index())
                .and_then(|adj| adj.shift_remove(&id));
            if removed.is_none() {
                return Err(GraphError::EdgeNotFound(*nbr, id));
            }
        }

        self.edge_count -= incident.len();
        self.node_count -= 1;
        Ok(node)
    }

    /// Number of 3-cycles passing through a node
    pub fn triangles(&self, id: NodeId) -> GraphResult<usize> {
        self.require_node(id)?;
        let nbrs: Vec<NodeId> = self.adjacency[id.index()].keys().copied().collect();

        let mut count = 0;
        for (i, &u) in nbrs.iter().enumerate() {
            let u_adj = &self.adjacency[u.index()];
            count += nbrs[i + 1..].iter().filter(|v| u_adj.contains_key(*v)).count();
        }
        Ok(count)
    }

    /// All edges, each reported once
    ///
    /// Nodes are visited in ascending id order and each node's edges in
    /// insertion order; an edge is reported from the endpoint visited first.
    pub fn edges(&self) -> Vec<Edge> {
        let mut seen = vec![false; self.nodes.len()];
        let mut edges = Vec::with_capacity(self.edge_count);

        for node in self.nodes() {
            let idx = node.id.index();
            for (&nbr, &length) in &self.adjacency[idx] {
                if !seen.get(nbr.index()).copied().unwrap_or(false) {
                    edges.push(Edge::new(node.id, nbr, length));
                }
            }
            seen[idx] = true;
        }

        edges
    }

    /// Renumber the live nodes to `1..=n`, preserving their relative order
    ///
    /// Edges are re-inserted in [`edges`](Self::edges) order. Fails if an
    /// edge refers to a node that no longer exists.
    pub fn compact(self) -> GraphResult<SkeletonGraph> {
        let mut remap: Vec<Option<NodeId>> = vec![None; self.nodes.len()];
        let mut compacted = SkeletonGraph::with_capacity(self.node_count);

        for node in self.nodes() {
            remap[node.id.index()] = Some(compacted.add_node(node.coordinate, node.neighbor_count));
        }

        let lookup = |id: NodeId| {
            remap
                .get(id.index())
                .copied()
                .flatten()
                .ok_or(GraphError::NodeNotFound(id))
        };

        for edge in self.edges() {
            compacted.add_edge(lookup(edge.source)?, lookup(edge.target)?, edge.length)?;
        }

        Ok(compacted)
    }

    /// Count nodes by kind and sum edge lengths
    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics {
            node_count: self.node_count,
            edge_count: self.edge_count,
            ..GraphStatistics::default()
        };

        for node in self.nodes() {
            match node.kind() {
                NodeKind::Isolated => stats.isolated_count += 1,
                NodeKind::Endpoint => stats.endpoint_count += 1,
                NodeKind::Chain => stats.chain_count += 1,
                NodeKind::Junction => stats.junction_count += 1,
            }
        }

        stats.total_length = self.edges().iter().map(|e| u64::from(e.length)).sum();
        stats
    }
}
