use std::collections::{BTreeSet, VecDeque};

use algo_trace::algorithms::graph::{Bfs, Dfs, Dijkstra, Edge, Graph, GraphRun};
use algo_trace::TraceEngine;
use proptest::prelude::*;

/// Vertex count, weighted edges and a start vertex.
fn graph_run() -> impl Strategy<Value = (usize, Vec<Edge>, usize)> {
    (1usize..12).prop_flat_map(|n| {
        let edge = (0..n, 0..n, 1u64..20).prop_map(|(u, v, w)| Edge::weighted(u, v, w));
        (Just(n), prop::collection::vec(edge, 0..30), 0..n)
    })
}

fn build(n: usize, edges: &[Edge], start: usize) -> GraphRun {
    GraphRun::new(Graph::new(n, edges.to_vec()).unwrap(), start).unwrap()
}

/// Hop counts from `start`, `None` when unreachable.
fn hops(n: usize, edges: &[Edge], start: usize) -> Vec<Option<usize>> {
    let mut adj = vec![Vec::new(); n];
    for e in edges {
        adj[e.from].push(e.to);
        adj[e.to].push(e.from);
    }
    let mut dist = vec![None; n];
    dist[start] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(u) = queue.pop_front() {
        for &v in &adj[u] {
            if dist[v].is_none() {
                dist[v] = dist[u].map(|d| d + 1);
                queue.push_back(v);
            }
        }
    }
    dist
}

proptest! {
    #[test]
    fn traversals_visit_each_reachable_vertex_once((n, edges, start) in graph_run()) {
        let run = build(n, &edges, start);
        let reachable: BTreeSet<usize> = hops(n, &edges, start)
            .iter()
            .enumerate()
            .filter_map(|(v, d)| d.map(|_| v))
            .collect();

        for order in [
            TraceEngine::new(Bfs).run(&run).result,
            TraceEngine::new(Dfs).run(&run).result,
        ] {
            prop_assert_eq!(order.first(), Some(&start));
            let seen: BTreeSet<usize> = order.iter().copied().collect();
            prop_assert_eq!(seen.len(), order.len(), "repeated vertex in {:?}", order);
            prop_assert_eq!(&seen, &reachable);
        }
    }

    #[test]
    fn bfs_order_is_by_hop_count((n, edges, start) in graph_run()) {
        let run = build(n, &edges, start);
        let order = TraceEngine::new(Bfs).run(&run).result;
        let dist = hops(n, &edges, start);
        let levels: Vec<usize> = order.iter().map(|&v| dist[v].unwrap()).collect();
        prop_assert!(levels.windows(2).all(|w| w[0] <= w[1]), "levels {:?}", levels);
    }

    #[test]
    fn traversals_are_deterministic((n, edges, start) in graph_run()) {
        let run = build(n, &edges, start);
        prop_assert_eq!(TraceEngine::new(Bfs).run(&run), TraceEngine::new(Bfs).run(&run));
        prop_assert_eq!(TraceEngine::new(Dfs).run(&run), TraceEngine::new(Dfs).run(&run));
    }

    #[test]
    fn dijkstra_satisfies_triangle_inequality((n, edges, start) in graph_run()) {
        let run = build(n, &edges, start);
        let paths = TraceEngine::new(Dijkstra).run(&run).result;
        prop_assert_eq!(paths.distances[start], Some(0));
        for e in &edges {
            if let (Some(du), Some(dv)) = (paths.distances[e.from], paths.distances[e.to]) {
                prop_assert!(dv <= du + e.weight, "edge {:?}", e);
                prop_assert!(du <= dv + e.weight, "edge {:?}", e);
            }
        }
        let dist = hops(n, &edges, start);
        for v in 0..n {
            prop_assert_eq!(paths.distances[v].is_some(), dist[v].is_some(), "vertex {}", v);
        }
    }

    #[test]
    fn dijkstra_paths_end_at_their_target((n, edges, start) in graph_run()) {
        let run = build(n, &edges, start);
        let paths = TraceEngine::new(Dijkstra).run(&run).result;
        for v in 0..n {
            match paths.path_to(v) {
                Some(path) => {
                    prop_assert_eq!(path.first(), Some(&start));
                    prop_assert_eq!(path.last(), Some(&v));
                }
                None => prop_assert!(paths.distances[v].is_none()),
            }
        }
    }

    #[test]
    fn visited_sets_only_grow((n, edges, start) in graph_run()) {
        let run = build(n, &edges, start);
        for trace in [
            TraceEngine::new(Bfs).run(&run).trace,
            TraceEngine::new(Dfs).run(&run).trace,
            TraceEngine::new(Dijkstra).run(&run).trace,
        ] {
            for pair in trace.records().windows(2) {
                prop_assert!(pair[0].state.visited.is_subset(&pair[1].state.visited));
            }
            prop_assert!(trace.last().unwrap().state.complete);
        }
    }
}

#[test]
fn disconnected_vertices_are_left_out() {
    let run = build(5, &[Edge::new(0, 1), Edge::new(3, 4)], 0);
    assert_eq!(TraceEngine::new(Bfs).run(&run).result, [0, 1]);
    assert_eq!(TraceEngine::new(Dfs).run(&run).result, [0, 1]);
    let paths = TraceEngine::new(Dijkstra).run(&run).result;
    assert_eq!(paths.distances, [Some(0), Some(1), None, None, None]);
}

#[test]
fn dfs_follows_first_listed_neighbour() {
    let run = build(
        4,
        &[Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 0), Edge::new(1, 3)],
        0,
    );
    assert_eq!(TraceEngine::new(Dfs).run(&run).result, [0, 1, 2, 3]);
    assert_eq!(TraceEngine::new(Bfs).run(&run).result, [0, 1, 3, 2]);
}

#[test]
fn empty_graph_is_one_step() {
    let run = GraphRun::new(Graph::new(0, Vec::new()).unwrap(), 7).unwrap();
    let traced = TraceEngine::new(Bfs).run(&run);
    assert!(traced.result.is_empty());
    assert_eq!(traced.trace.len(), 1);
}

#[test]
fn dijkstra_prefers_cheaper_detour() {
    let run = build(
        4,
        &[
            Edge::weighted(0, 1, 4),
            Edge::weighted(0, 2, 1),
            Edge::weighted(2, 1, 2),
            Edge::weighted(1, 3, 5),
            Edge::weighted(2, 3, 8),
        ],
        0,
    );
    let paths = TraceEngine::new(Dijkstra).run(&run).result;
    assert_eq!(paths.distances, [Some(0), Some(3), Some(1), Some(8)]);
    assert_eq!(paths.path_to(3).unwrap(), [0, 2, 1, 3]);
}
