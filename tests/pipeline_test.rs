use ndarray::Array3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skelgraph::pipeline::{
    build_voxel_graph, connect_edges, merge_loops, reduce_branches, resolve_adjacency,
};
use skelgraph::{
    count_neighbors, skeleton_to_graph, Coordinate, LoopMergeConfig, NodeId, PipelineConfig,
    SkeletonGraph, SkeletonPipeline, Stage, Volume,
};
use std::collections::{BTreeMap, HashSet};

fn connected_graph(volume: &Volume) -> SkeletonGraph {
    let counts = count_neighbors(volume);
    let graph = build_voxel_graph(volume, &counts).unwrap();
    let adjacency = resolve_adjacency(&graph, volume).unwrap();
    connect_edges(graph, &adjacency).unwrap()
}

fn random_volume(rng: &mut StdRng, shape: (usize, usize, usize), density: f64) -> Volume {
    Volume::new(Array3::from_shape_simple_fn(shape, || rng.gen_bool(density))).unwrap()
}

fn node_at(graph: &SkeletonGraph, coordinate: Coordinate) -> NodeId {
    graph
        .nodes()
        .find(|n| n.coordinate == coordinate)
        .map(|n| n.id)
        .unwrap()
}

#[test]
fn test_straight_line() {
    let volume = Volume::from_voxels([1, 1, 5], (0..5).map(|z| (0, 0, z))).unwrap();

    let initial = connected_graph(&volume);
    assert_eq!(initial.node_count(), 5);
    assert_eq!(initial.edge_count(), 4);
    assert!(initial.edges().iter().all(|e| e.length == 1));
    let counts: Vec<u8> = initial.nodes().map(|n| n.neighbor_count).collect();
    assert_eq!(counts, vec![1, 2, 2, 2, 1]);

    let reduced = reduce_branches(initial).unwrap();
    assert_eq!(reduced.node_count(), 2);
    assert_eq!(reduced.edge_count(), 1);
    assert_eq!(reduced.edge_length(NodeId::new(1), NodeId::new(2)), Some(4));
    assert_eq!(reduced.get_node(NodeId::new(1)).unwrap().coordinate, Coordinate::new(0, 0, 0));
    assert_eq!(reduced.get_node(NodeId::new(2)).unwrap().coordinate, Coordinate::new(0, 0, 4));
}

#[test]
fn test_empty_volume() {
    let volume = Volume::new(Array3::from_elem((4, 3, 2), false)).unwrap();

    let graph = skeleton_to_graph(&volume).unwrap();

    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_diagonal_line_reduces_like_straight_line() {
    let volume = Volume::from_voxels([6, 6, 6], (0..6).map(|i| (i, i, i))).unwrap();

    let graph = skeleton_to_graph(&volume).unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_length(NodeId::new(1), NodeId::new(2)), Some(5));
}

#[test]
fn test_t_junction_in_plane() {
    // Bar along x at y = 0 with a stem of three voxels rising from x = 2.
    // The stem base touches both bar neighbours of the junction diagonally,
    // forming artificial triangles around (2, 0, 0).
    let mut voxels: Vec<(usize, usize, usize)> = (0..5).map(|x| (x, 0, 0)).collect();
    voxels.extend((1..4).map(|y| (2, y, 0)));
    let volume = Volume::from_voxels([5, 4, 1], voxels).unwrap();

    let (graph, report) = SkeletonPipeline::default().run_with_report(&volume).unwrap();

    let connected = report.stage(Stage::Connected).unwrap();
    assert_eq!((connected.node_count, connected.edge_count), (8, 9));
    let reduced = report.stage(Stage::BranchReduced).unwrap();
    assert_eq!((reduced.node_count, reduced.edge_count), (7, 8));

    // Visiting (1, 0, 0) merges it with (2, 0, 0) and (2, 1, 0)
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 4);
    let hub = node_at(&graph, Coordinate::new(1, 0, 0));
    assert_eq!(graph.get_node(hub).unwrap().neighbor_count, 3);
    assert_eq!(graph.degree(hub).unwrap(), 3);
    assert_eq!(graph.edge_length(hub, node_at(&graph, Coordinate::new(0, 0, 0))), Some(1));
    assert_eq!(graph.edge_length(hub, node_at(&graph, Coordinate::new(2, 3, 0))), Some(2));

    let right = node_at(&graph, Coordinate::new(3, 0, 0));
    assert_eq!(graph.edge_length(hub, right), Some(1));
    assert_eq!(graph.edge_length(right, node_at(&graph, Coordinate::new(4, 0, 0))), Some(1));
    assert_eq!(graph.statistics().total_length, 5);
}

#[test]
fn test_junction_triangle_keeps_external_branches() {
    // Three junction voxels touching each other, each with a branch leaving it
    let mut graph = SkeletonGraph::new();
    let high = graph.add_node(Coordinate::new(5, 5, 5), 4);
    let left = graph.add_node(Coordinate::new(5, 6, 5), 3);
    let right = graph.add_node(Coordinate::new(6, 5, 5), 3);
    let far = graph.add_node(Coordinate::new(5, 5, 0), 1);
    let up = graph.add_node(Coordinate::new(5, 9, 5), 1);
    let side = graph.add_node(Coordinate::new(9, 5, 5), 1);
    graph.add_edge(high, left, 1).unwrap();
    graph.add_edge(high, right, 1).unwrap();
    graph.add_edge(left, right, 1).unwrap();
    graph.add_edge(high, far, 5).unwrap();
    graph.add_edge(left, up, 3).unwrap();
    graph.add_edge(right, side, 3).unwrap();

    let merged = merge_loops(graph, &LoopMergeConfig::default()).unwrap();

    assert_eq!(merged.node_count(), 4);
    let hub = node_at(&merged, Coordinate::new(5, 5, 5));
    assert_eq!(merged.get_node(hub).unwrap().neighbor_count, 4);
    assert_eq!(merged.edge_length(hub, node_at(&merged, Coordinate::new(5, 5, 0))), Some(5));
    assert_eq!(merged.edge_length(hub, node_at(&merged, Coordinate::new(5, 9, 5))), Some(3));
    assert_eq!(merged.edge_length(hub, node_at(&merged, Coordinate::new(9, 5, 5))), Some(3));
    assert_eq!(merged.node_ids(), (1..=4).map(NodeId::new).collect::<Vec<_>>());
}

#[test]
fn test_voxel_graph_is_bijection() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..10 {
        let volume = random_volume(&mut rng, (6, 5, 4), 0.3);
        let graph = build_voxel_graph(&volume, &count_neighbors(&volume)).unwrap();

        assert_eq!(graph.node_count(), volume.voxel_count());
        let coordinates: HashSet<_> = graph.nodes().map(|n| n.coordinate).collect();
        assert_eq!(coordinates.len(), graph.node_count());
        assert!(coordinates.iter().all(|&c| volume.is_set(c)));
        assert_eq!(
            graph.node_ids(),
            (1..=graph.node_count() as u64).map(NodeId::new).collect::<Vec<_>>()
        );
    }
}

#[test]
fn test_edges_match_chebyshev_adjacency() {
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..10 {
        let volume = random_volume(&mut rng, (5, 5, 5), 0.25);
        let graph = connected_graph(&volume);
        let nodes: Vec<_> = graph.nodes().cloned().collect();

        for a in &nodes {
            for b in &nodes {
                let touching = a.coordinate.chebyshev_distance(&b.coordinate) == 1;
                assert_eq!(graph.has_edge(a.id, b.id), touching);
            }
            // Degree in the voxel graph equals the neighbour count
            assert_eq!(graph.degree(a.id).unwrap(), a.neighbor_count as usize);
        }
    }
}

#[test]
fn test_branch_lengths_match_voxel_paths() {
    // Junction at the origin corner with three axis-aligned arms
    let arms = [7usize, 4, 9];
    let mut voxels = vec![(0, 0, 0)];
    voxels.extend((1..=arms[0]).map(|i| (i, 0, 0)));
    voxels.extend((1..=arms[1]).map(|i| (0, i, 0)));
    voxels.extend((1..=arms[2]).map(|i| (0, 0, i)));
    let volume = Volume::from_voxels([10, 10, 10], voxels).unwrap();

    let config = PipelineConfig {
        merge_loops: false,
        ..PipelineConfig::default()
    };
    let graph = SkeletonPipeline::new(config).run(&volume).unwrap();

    // Arm bases touch each other diagonally, so the junction region is a
    // small clique; each tip still hangs off exactly one edge.
    let tips: BTreeMap<_, _> = graph
        .nodes()
        .filter(|n| n.neighbor_count == 1)
        .map(|n| (n.coordinate, n.id))
        .collect();
    assert_eq!(tips.len(), 3);
    for (coordinate, id) in tips {
        let edges: Vec<_> = graph.incident_edges(id).unwrap().collect();
        assert_eq!(edges.len(), 1);
        let reach = coordinate.x.max(coordinate.y).max(coordinate.z);
        let base = graph.get_node(edges[0].0).unwrap().coordinate;
        let base_reach = base.x.max(base.y).max(base.z);
        assert_eq!(edges[0].1 as usize, reach - base_reach);
    }
    assert!(graph.nodes().all(|n| n.neighbor_count != 2));
}

#[test]
fn test_random_volumes_never_fail() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..25 {
        let shape = (rng.gen_range(1..8), rng.gen_range(1..8), rng.gen_range(1..8));
        let volume = random_volume(&mut rng, shape, 0.2);

        let graph = skeleton_to_graph(&volume).unwrap();

        assert_eq!(
            graph.node_ids(),
            (1..=graph.node_count() as u64).map(NodeId::new).collect::<Vec<_>>()
        );
        for edge in graph.edges() {
            assert!(edge.length >= 1);
            assert!(graph.has_node(edge.source) && graph.has_node(edge.target));
        }
    }
}
