//! Core type definitions for skeleton graphs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node
///
/// Ids are positive. After every compaction step the ids of a graph form the
/// dense range `1..=n`; they are not stable across pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Slot of this node in a graph arena
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Position of a voxel in the volume, indexed as `(x, y, z)` along the
/// volume's first, second and third axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Coordinate {
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Coordinate { x, y, z }
    }

    /// Coordinate shifted by a signed offset, or `None` when any axis would
    /// fall below zero.
    pub fn offset(&self, delta: [isize; 3]) -> Option<Coordinate> {
        Some(Coordinate {
            x: self.x.checked_add_signed(delta[0])?,
            y: self.y.checked_add_signed(delta[1])?,
            z: self.z.checked_add_signed(delta[2])?,
        })
    }

    /// Largest per-axis distance to `other`
    pub fn chebyshev_distance(&self, other: &Coordinate) -> usize {
        self.x
            .abs_diff(other.x)
            .max(self.y.abs_diff(other.y))
            .max(self.z.abs_diff(other.z))
    }

    /// True when `other` is one of the 26 voxels surrounding this one
    pub fn is_neighbor_of(&self, other: &Coordinate) -> bool {
        self.chebyshev_distance(other) == 1
    }

    pub fn as_array(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(usize, usize, usize)> for Coordinate {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Coordinate { x, y, z }
    }
}

impl From<[usize; 3]> for Coordinate {
    fn from([x, y, z]: [usize; 3]) -> Self {
        Coordinate { x, y, z }
    }
}

/// Offsets of the 26 voxels surrounding a voxel, in lexicographic order.
#[rustfmt::skip]
pub const NEIGHBOR_OFFSETS: [[isize; 3]; 26] = [
    [-1, -1, -1], [-1, -1, 0], [-1, -1, 1],
    [-1, 0, -1], [-1, 0, 0], [-1, 0, 1],
    [-1, 1, -1], [-1, 1, 0], [-1, 1, 1],
    [0, -1, -1], [0, -1, 0], [0, -1, 1],
    [0, 0, -1], [0, 0, 1],
    [0, 1, -1], [0, 1, 0], [0, 1, 1],
    [1, -1, -1], [1, -1, 0], [1, -1, 1],
    [1, 0, -1], [1, 0, 0], [1, 0, 1],
    [1, 1, -1], [1, 1, 0], [1, 1, 1],
];
