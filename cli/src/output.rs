//! Rendering graphs and reports

use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use skelgraph::{Edge, GraphStatistics, Node, PipelineReport, SkeletonGraph};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Serializable view of a finished graph
#[derive(Debug, Serialize)]
pub struct GraphDocument<'a> {
    pub nodes: Vec<&'a Node>,
    pub edges: Vec<Edge>,
    pub statistics: GraphStatistics,
}

impl<'a> GraphDocument<'a> {
    pub fn new(graph: &'a SkeletonGraph) -> Self {
        Self {
            nodes: graph.nodes().collect(),
            edges: graph.edges(),
            statistics: graph.statistics(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsDocument<'a> {
    pub report: &'a PipelineReport,
    pub statistics: GraphStatistics,
}

pub fn nodes_table(graph: &SkeletonGraph) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["id", "x", "y", "z", "neighbours", "degree", "kind"]);

    for node in graph.nodes() {
        let degree = graph.degree(node.id).unwrap_or_default();
        let [x, y, z] = node.coordinate.as_array();
        table.add_row(vec![
            node.id.as_u64().to_string(),
            x.to_string(),
            y.to_string(),
            z.to_string(),
            node.neighbor_count.to_string(),
            degree.to_string(),
            format!("{:?}", node.kind()),
        ]);
    }
    table
}

pub fn edges_table(graph: &SkeletonGraph) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["source", "target", "length"]);

    for edge in graph.edges() {
        table.add_row(vec![
            edge.source.as_u64().to_string(),
            edge.target.as_u64().to_string(),
            edge.length.to_string(),
        ]);
    }
    table
}

pub fn report_table(report: &PipelineReport) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["stage", "nodes", "edges"]);

    for summary in &report.stages {
        table.add_row(vec![
            summary.stage.to_string(),
            summary.node_count.to_string(),
            summary.edge_count.to_string(),
        ]);
    }
    table
}

pub fn statistics_table(stats: &GraphStatistics) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["metric", "value"]);

    let rows = [
        ("nodes", stats.node_count as u64),
        ("edges", stats.edge_count as u64),
        ("endpoints", stats.endpoint_count as u64),
        ("junctions", stats.junction_count as u64),
        ("chain nodes", stats.chain_count as u64),
        ("isolated", stats.isolated_count as u64),
        ("total length", stats.total_length),
    ];
    for (name, value) in rows {
        table.add_row(vec![name.to_string(), value.to_string()]);
    }
    table
}

/// One `source,target,length` line per edge, with a header
pub fn edges_csv(graph: &SkeletonGraph) -> String {
    let mut out = String::from("source,target,length\n");
    for edge in graph.edges() {
        out.push_str(&format!("{},{},{}\n", edge.source.as_u64(), edge.target.as_u64(), edge.length));
    }
    out
}
