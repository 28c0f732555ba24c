//! Volume and configuration files

use anyhow::{bail, Context, Result};
use ndarray::{ArrayD, IxDyn};
use serde::Deserialize;
use skelgraph::{PipelineConfig, Volume};
use std::fs;
use std::path::Path;

/// On-disk volume, either as a list of set voxels or as a dense 0/1 grid
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum VolumeFile {
    Sparse {
        shape: [usize; 3],
        #[serde(default)]
        voxels: Vec<[usize; 3]>,
    },
    Dense {
        data: Vec<Vec<Vec<u8>>>,
    },
}

impl VolumeFile {
    pub fn into_volume(self) -> Result<Volume> {
        match self {
            VolumeFile::Sparse { shape, voxels } => {
                Ok(Volume::from_voxels(shape, voxels).context("Invalid sparse volume")?)
            }
            VolumeFile::Dense { data } => {
                let shape = dense_shape(&data)?;
                let flat: Vec<u8> = data.into_iter().flatten().flatten().collect();
                let array = ArrayD::from_shape_vec(IxDyn(&shape), flat)
                    .context("Dense grid does not match its shape")?;
                Ok(Volume::from_dyn(array).context("Invalid dense volume")?)
            }
        }
    }
}

/// Shape of a nested grid, rejecting ragged rows
fn dense_shape(data: &[Vec<Vec<u8>>]) -> Result<[usize; 3]> {
    let ny = data.first().map_or(0, |plane| plane.len());
    let nz = data
        .first()
        .and_then(|plane| plane.first())
        .map_or(0, |row| row.len());

    for (x, plane) in data.iter().enumerate() {
        if plane.len() != ny {
            bail!("Plane {} has {} rows, expected {}", x, plane.len(), ny);
        }
        for (y, row) in plane.iter().enumerate() {
            if row.len() != nz {
                bail!("Row ({}, {}) has {} voxels, expected {}", x, y, row.len(), nz);
            }
        }
    }
    Ok([data.len(), ny, nz])
}

pub fn load_volume(path: &Path) -> Result<Volume> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read volume file {}", path.display()))?;
    let file: VolumeFile = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse volume file {}", path.display()))?;
    file.into_volume()
}

pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
