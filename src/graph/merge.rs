//! Node merging
//!
//! Collapses a set of nodes into one new node that takes over every edge
//! leading out of the set.

use super::store::{GraphError, GraphResult, SkeletonGraph};
use super::types::{Coordinate, NodeId};
use rustc_hash::FxHashSet;
use tracing::debug;

impl SkeletonGraph {
    /// Merge `members` into a freshly created node and return its id
    ///
    /// The new node gets the given attributes. For every edge with exactly one
    /// endpoint in `members`, an edge of the same length is added between the
    /// new node and the outside endpoint; afterwards all members are removed
    /// together with their original edges.
    ///
    /// Several members may share an outside neighbour. Only one edge to that
    /// neighbour survives and it keeps the length of the edge enumerated last
    /// by [`edges`](Self::edges). Callers that need another policy have to
    /// resolve such duplicates before merging.
    ///
    /// An empty `members` slice just creates an isolated node. Duplicate ids
    /// in `members` are ignored; an id that does not exist is an error and
    /// leaves the graph untouched.
    pub fn merge_nodes(
        &mut self,
        members: &[NodeId],
        coordinate: Coordinate,
        neighbor_count: u8,
    ) -> GraphResult<NodeId> {
        if let Some(&missing) = members.iter().find(|&&m| !self.has_node(m)) {
            return Err(GraphError::NodeNotFound(missing));
        }

        let merged = self.add_node(coordinate, neighbor_count);
        let member_set: FxHashSet<NodeId> = members.iter().copied().collect();

        for edge in self.edges() {
            let outside = match (
                member_set.contains(&edge.source),
                member_set.contains(&edge.target),
            ) {
                (true, true) | (false, false) => continue,
                (true, false) => edge.target,
                (false, true) => edge.source,
            };
            self.add_edge(merged, outside, edge.length)?;
        }

        let mut removed = FxHashSet::default();
        for &member in members {
            if removed.insert(member) {
                self.remove_node(member)?;
            }
        }

        debug!(
            "Merged {} nodes into {} at {}",
            removed.len(),
            merged,
            coordinate
        );
        Ok(merged)
    }
}
