//! Example: BFS, DFS and Dijkstra on the same small graph.
//!
//! Run with:
//! `cargo run --example graph`

use algo_trace::{
    algorithms::graph::{Bfs, Dfs, Dijkstra, Edge, Graph, GraphRun},
    InputError, TraceEngine,
};

fn main() -> Result<(), InputError> {
    let graph = Graph::new(
        5,
        vec![
            Edge::weighted(0, 1, 4),
            Edge::weighted(0, 2, 1),
            Edge::weighted(2, 1, 2),
            Edge::weighted(1, 3, 5),
            Edge::weighted(2, 3, 8),
            Edge::weighted(3, 4, 3),
        ],
    )?;
    let run = GraphRun::new(graph, 0)?;

    println!("BFS order: {:?}", TraceEngine::new(Bfs).run(&run).result);
    println!("DFS order: {:?}", TraceEngine::new(Dfs).run(&run).result);

    let traced = TraceEngine::new(Dijkstra).run(&run);
    for record in &traced.trace {
        println!("  {}", record.narration);
    }
    for v in 0..run.graph().vertex_count() {
        match traced.result.path_to(v) {
            Some(path) => println!("0 -> {v}: {path:?}"),
            None => println!("0 -> {v}: unreachable"),
        }
    }
    Ok(())
}
