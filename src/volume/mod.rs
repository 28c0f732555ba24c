//! Binary skeleton volumes
//!
//! A [`Volume`] is an immutable 3D mask of set voxels. Construction validates
//! the input so that every later stage can rely on exactly three non-empty
//! axes.

pub mod neighbors;

pub use neighbors::{count_neighbors, NeighborCounts};

use crate::graph::Coordinate;
use ndarray::{Array3, ArrayD, Ix3};
use thiserror::Error;

/// Errors raised while validating a volume
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VolumeError {
    #[error("Volume must be 3-dimensional, got {ndim} dimensions")]
    NotThreeDimensional { ndim: usize },

    #[error("Volume axis {axis} is empty (shape {shape:?})")]
    EmptyAxis { axis: usize, shape: [usize; 3] },

    #[error("Array shape {actual:?} does not match volume shape {expected:?}")]
    ShapeMismatch {
        expected: [usize; 3],
        actual: [usize; 3],
    },

    #[error("Voxel {coordinate} lies outside volume shape {shape:?}")]
    OutOfBounds {
        coordinate: Coordinate,
        shape: [usize; 3],
    },
}

pub type VolumeResult<T> = Result<T, VolumeError>;

/// Immutable binary skeleton volume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    mask: Array3<bool>,
}

impl Volume {
    /// Wrap a boolean mask, rejecting masks with an empty axis
    pub fn new(mask: Array3<bool>) -> VolumeResult<Self> {
        let shape = dims(&mask);
        if let Some(axis) = shape.iter().position(|&len| len == 0) {
            return Err(VolumeError::EmptyAxis { axis, shape });
        }
        Ok(Volume { mask })
    }

    /// Build a volume from an array of any dimensionality
    ///
    /// Every element different from `T::default()` (zero for numbers, `false`
    /// for booleans) counts as a set voxel.
    pub fn from_dyn<T>(array: ArrayD<T>) -> VolumeResult<Self>
    where
        T: Default + PartialEq,
    {
        let ndim = array.ndim();
        let array = array
            .into_dimensionality::<Ix3>()
            .map_err(|_| VolumeError::NotThreeDimensional { ndim })?;
        let zero = T::default();
        Self::new(array.map(|v| *v != zero))
    }

    /// Build a volume of the given shape with only `voxels` set
    pub fn from_voxels<I, C>(shape: [usize; 3], voxels: I) -> VolumeResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        let mut mask = Array3::from_elem(shape, false);
        for voxel in voxels {
            let coordinate = voxel.into();
            let cell = mask
                .get_mut(coordinate.as_array())
                .ok_or(VolumeError::OutOfBounds { coordinate, shape })?;
            *cell = true;
        }
        Self::new(mask)
    }

    /// Volume extent as `[x, y, z]`
    pub fn shape(&self) -> [usize; 3] {
        dims(&self.mask)
    }

    pub fn mask(&self) -> &Array3<bool> {
        &self.mask
    }

    /// Check whether a voxel is set; positions outside the volume are unset
    pub fn is_set(&self, coordinate: Coordinate) -> bool {
        self.mask
            .get(coordinate.as_array())
            .copied()
            .unwrap_or(false)
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        let [x, y, z] = self.shape();
        coordinate.x < x && coordinate.y < y && coordinate.z < z
    }

    /// Number of set voxels
    pub fn voxel_count(&self) -> usize {
        self.mask.iter().filter(|&&set| set).count()
    }

    /// Set voxels in row-major order (x slowest, z fastest)
    pub fn voxels(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.mask
            .indexed_iter()
            .filter(|(_, &set)| set)
            .map(|((x, y, z), _)| Coordinate::new(x, y, z))
    }
}

pub(crate) fn dims<T>(array: &Array3<T>) -> [usize; 3] {
    let (x, y, z) = array.dim();
    [x, y, z]
}
