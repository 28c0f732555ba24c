//! Skelgraph CLI: converts skeleton volumes stored as JSON into graphs

mod input;
mod output;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use output::{GraphDocument, OutputFormat, StatsDocument};
use skelgraph::{PipelineConfig, PipelineReport, SkeletonGraph, SkeletonPipeline};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skelgraph", version, about = "Skeleton volume to graph converter")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PipelineArgs {
    /// Volume file: {"shape": [x, y, z], "voxels": [[x, y, z], ...]} or {"data": [[[0, 1, ...]]]}
    input: PathBuf,

    /// Pipeline configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip branch reduction
    #[arg(long)]
    no_reduce: bool,

    /// Skip loop merging
    #[arg(long)]
    no_merge: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the simplified graph
    Graph(PipelineArgs),
    /// Print per-stage sizes and graph statistics
    Stats(PipelineArgs),
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn pipeline_config(args: &PipelineArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => input::load_config(path)?,
        None => PipelineConfig::default(),
    };
    if args.no_reduce {
        config.reduce_branches = false;
    }
    if args.no_merge {
        config.merge_loops = false;
    }
    Ok(config)
}

fn run_pipeline(args: &PipelineArgs) -> Result<(SkeletonGraph, PipelineReport)> {
    let config = pipeline_config(args)?;
    let volume = input::load_volume(&args.input)?;
    info!(
        "Loaded {} voxels from {} (shape {:?})",
        volume.voxel_count(),
        args.input.display(),
        volume.shape()
    );

    SkeletonPipeline::new(config)
        .run_with_report(&volume)
        .with_context(|| format!("Pipeline failed on {}", args.input.display()))
}

fn run_graph(args: &PipelineArgs, format: OutputFormat) -> Result<()> {
    let (graph, _) = run_pipeline(args)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&GraphDocument::new(&graph))?);
        }
        OutputFormat::Csv => {
            print!("{}", output::edges_csv(&graph));
        }
        OutputFormat::Table => {
            if graph.is_empty() {
                println!("(empty graph)");
                return Ok(());
            }
            println!("{}", output::nodes_table(&graph));
            println!("{}", output::edges_table(&graph));
            println!("{} node(s), {} edge(s)", graph.node_count(), graph.edge_count());
        }
    }

    Ok(())
}

fn run_stats(args: &PipelineArgs, format: OutputFormat) -> Result<()> {
    let (graph, report) = run_pipeline(args)?;
    let statistics = graph.statistics();

    match format {
        OutputFormat::Json => {
            let doc = StatsDocument {
                report: &report,
                statistics,
            };
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Csv => {
            println!("stage,nodes,edges");
            for summary in &report.stages {
                println!("{},{},{}", summary.stage, summary.node_count, summary.edge_count);
            }
        }
        OutputFormat::Table => {
            println!("Voxels: {}", report.voxel_count);
            println!("{}", output::report_table(&report));
            println!("{}", output::statistics_table(&statistics));
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Graph(args) => run_graph(args, cli.format),
        Commands::Stats(args) => run_stats(args, cli.format),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
