//! Skeleton-to-graph pipeline
//!
//! Stages, each consuming the previous stage's output:
//! 1. Neighbour counting over the volume
//! 2. One node per set voxel
//! 3. 26-connectivity adjacency from node coordinates
//! 4. One unit-length edge per adjacent pair
//! 5. Branch reduction (chains of degree-2 voxels become single edges)
//! 6. Artificial loop merging
//!
//! The graph is moved from stage to stage; no two stages ever hold it at the
//! same time.

pub mod adjacency;
pub mod build;
pub mod connect;
pub mod loops;
pub mod reduce;

pub use adjacency::{resolve_adjacency, Adjacency};
pub use build::build_voxel_graph;
pub use connect::{connect_edges, VOXEL_STEP_LENGTH};
pub use loops::merge_loops;
pub use reduce::reduce_branches;

use crate::graph::{GraphError, SkeletonGraph};
use crate::volume::{count_neighbors, Volume, VolumeError};
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::info;

/// Errors that abort a pipeline run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The input volume was rejected before any stage ran
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] VolumeError),

    /// A stage produced a graph that violates its own invariants
    #[error("Inconsistent graph attributes: {0}")]
    InconsistentAttributes(#[from] GraphError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Thresholds deciding which neighbours join a loop merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopMergeConfig {
    /// Longest edge (in voxel steps) that may be merged across
    pub max_edge_length: u32,
    /// Smallest neighbour count a node needs to be merged into a loop
    pub min_neighbor_count: u8,
}

impl Default for LoopMergeConfig {
    fn default() -> Self {
        Self {
            max_edge_length: 1,
            min_neighbor_count: 3,
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Run branch reduction (stage 5)
    pub reduce_branches: bool,
    /// Run loop merging (stage 6)
    pub merge_loops: bool,
    pub loop_merge: LoopMergeConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reduce_branches: true,
            merge_loops: true,
            loop_merge: LoopMergeConfig::default(),
        }
    }
}

/// Graph-producing pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    VoxelGraph,
    Connected,
    BranchReduced,
    LoopMerged,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::VoxelGraph => "voxel_graph",
            Stage::Connected => "connected",
            Stage::BranchReduced => "branch_reduced",
            Stage::LoopMerged => "loop_merged",
        };
        write!(f, "{}", name)
    }
}

/// Graph size after one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSummary {
    pub stage: Stage,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Per-stage graph sizes of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Number of set voxels in the input
    pub voxel_count: usize,
    pub stages: Vec<StageSummary>,
}

impl PipelineReport {
    fn record(&mut self, stage: Stage, graph: &SkeletonGraph) {
        info!(
            "Stage {}: {} nodes, {} edges",
            stage,
            graph.node_count(),
            graph.edge_count()
        );
        self.stages.push(StageSummary {
            stage,
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
        });
    }

    /// Summary of a stage, if it ran
    pub fn stage(&self, stage: Stage) -> Option<&StageSummary> {
        self.stages.iter().find(|s| s.stage == stage)
    }
}

/// Converts skeleton volumes into simplified graphs
#[derive(Debug, Clone, Default)]
pub struct SkeletonPipeline {
    config: PipelineConfig,
}

impl SkeletonPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every configured stage on a volume
    pub fn run(&self, volume: &Volume) -> PipelineResult<SkeletonGraph> {
        self.run_with_report(volume).map(|(graph, _)| graph)
    }

    /// Validate a raw array as a volume, then run the pipeline on it
    pub fn run_array<T>(&self, array: ArrayD<T>) -> PipelineResult<SkeletonGraph>
    where
        T: Default + PartialEq,
    {
        let volume = Volume::from_dyn(array)?;
        self.run(&volume)
    }

    /// Run the pipeline and report the graph size after every stage
    pub fn run_with_report(&self, volume: &Volume) -> PipelineResult<(SkeletonGraph, PipelineReport)> {
        let mut report = PipelineReport::default();

        let counts = count_neighbors(volume);
        let graph = build_voxel_graph(volume, &counts)?;
        drop(counts);
        report.voxel_count = graph.node_count();
        report.record(Stage::VoxelGraph, &graph);

        let adjacency = resolve_adjacency(&graph, volume)?;
        let mut graph = connect_edges(graph, &adjacency)?;
        report.record(Stage::Connected, &graph);

        if self.config.reduce_branches {
            graph = reduce_branches(graph)?;
            report.record(Stage::BranchReduced, &graph);
        }

        if self.config.merge_loops {
            graph = merge_loops(graph, &self.config.loop_merge)?;
            report.record(Stage::LoopMerged, &graph);
        }

        Ok((graph, report))
    }
}

/// Run the full pipeline with the default configuration
pub fn skeleton_to_graph(volume: &Volume) -> PipelineResult<SkeletonGraph> {
    SkeletonPipeline::default().run(volume)
}
