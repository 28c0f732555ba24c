//! 26-connectivity adjacency between voxel nodes
//!
//! Adjacency is derived from node coordinates alone: each node probes its 26
//! surrounding positions in a coordinate -> node id map. Work and memory
//! scale with the number of nodes, not with the volume size.

use crate::graph::{Coordinate, GraphError, GraphResult, NodeId, SkeletonGraph, NEIGHBOR_OFFSETS};
use crate::volume::Volume;
use rustc_hash::FxHashMap;
use tracing::info;

/// Symmetric, irreflexive adjacency relation over the nodes of a graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    /// Sorted neighbours per node id (slot 0 unused)
    rows: Vec<Vec<NodeId>>,
}

impl Adjacency {
    /// Neighbours of a node in ascending id order
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.rows.get(id.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True iff `b` occupies a voxel in the 26-neighbourhood of `a`
    pub fn is_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        a != b && self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Each adjacent pair once, as `(i, j)` with `i < j`, in ascending order
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.rows.iter().enumerate().flat_map(|(idx, row)| {
            let id = NodeId::new(idx as u64);
            row.iter().filter(move |&&nbr| nbr > id).map(move |&nbr| (id, nbr))
        })
    }

    /// Number of adjacent pairs
    pub fn pair_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum::<usize>() / 2
    }
}

/// Find, for every node, the nodes whose voxels touch its own voxel
///
/// Fails if two nodes claim the same coordinate.
pub fn resolve_adjacency(graph: &SkeletonGraph, volume: &Volume) -> GraphResult<Adjacency> {
    let mut by_coordinate: FxHashMap<Coordinate, NodeId> = FxHashMap::default();
    by_coordinate.reserve(graph.node_count());
    for node in graph.nodes() {
        if let Some(other) = by_coordinate.insert(node.coordinate, node.id) {
            return Err(GraphError::DuplicateCoordinate(other, node.id, node.coordinate));
        }
    }

    let mut rows = vec![Vec::new(); graph.next_node_id().index()];
    for node in graph.nodes() {
        let row = &mut rows[node.id.index()];
        for delta in NEIGHBOR_OFFSETS {
            let Some(probe) = node.coordinate.offset(delta) else {
                continue;
            };
            if !volume.contains(probe) {
                continue;
            }
            if let Some(&nbr) = by_coordinate.get(&probe) {
                row.push(nbr);
            }
        }
        row.sort_unstable();
    }

    let adjacency = Adjacency { rows };
    info!("Resolved {} adjacent node pairs", adjacency.pair_count());
    Ok(adjacency)
}
