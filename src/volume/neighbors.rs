//! 26-connectivity neighbour counting
//!
//! The volume is padded by one unset voxel on every side, so the 3×3×3 window
//! around any voxel of the original volume is always in range and boundary
//! voxels need no special handling.

use super::Volume;
use ndarray::{s, Array3, Zip};

/// Per-voxel neighbour counts, same shape as the volume
///
/// A cell holds the number of set voxels among the 26 surrounding positions
/// when the voxel itself is set, and 0 otherwise.
pub type NeighborCounts = Array3<u8>;

/// Count the set neighbours of every set voxel
pub fn count_neighbors(volume: &Volume) -> NeighborCounts {
    let [nx, ny, nz] = volume.shape();

    let mut padded = Array3::<u8>::zeros((nx + 2, ny + 2, nz + 2));
    padded
        .slice_mut(s![1..nx + 1, 1..ny + 1, 1..nz + 1])
        .zip_mut_with(volume.mask(), |cell, &set| *cell = u8::from(set));

    let mut counts = NeighborCounts::zeros((nx, ny, nz));
    Zip::indexed(&mut counts)
        .and(volume.mask())
        .for_each(|(x, y, z), count, &set| {
            if set {
                // Window centred on padded (x + 1, y + 1, z + 1); the centre is set
                let window = padded.slice(s![x..x + 3, y..y + 3, z..z + 3]);
                *count = window.sum() - 1;
            }
        });

    counts
}
