//! Traversals and shortest paths over a small undirected graph.
//!
//! Edges are inserted symmetrically and each adjacency list keeps edge-list
//! order, which is what makes traversal orders reproducible.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::trace::Recorder;
use crate::traits::TracedAlgorithm;
use crate::utils::joined;

/// Weight given to an edge written without one.
pub const DEFAULT_WEIGHT: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: u64,
}

impl Edge {
    pub fn new(from: usize, to: usize) -> Self {
        Self::weighted(from, to, DEFAULT_WEIGHT)
    }

    pub fn weighted(from: usize, to: usize, weight: u64) -> Self {
        Self { from, to, weight }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub vertex: usize,
    pub weight: u64,
}

/// Undirected graph on vertices `0..vertex_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    vertices: usize,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<Neighbor>>,
}

impl Graph {
    /// Build the adjacency lists, rejecting edges that name a missing vertex.
    pub fn new(vertices: usize, edges: Vec<Edge>) -> Result<Self, InputError> {
        if let Some(vertex) = edges
            .iter()
            .flat_map(|e| [e.from, e.to])
            .find(|&v| v >= vertices)
        {
            return Err(InputError::VertexOutOfRange { vertex, vertices });
        }
        let mut adjacency = vec![Vec::new(); vertices];
        for edge in &edges {
            adjacency[edge.from].push(Neighbor {
                vertex: edge.to,
                weight: edge.weight,
            });
            adjacency[edge.to].push(Neighbor {
                vertex: edge.from,
                weight: edge.weight,
            });
        }
        Ok(Self {
            vertices,
            edges,
            adjacency,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbours of `vertex` in insertion order.
    pub fn neighbors(&self, vertex: usize) -> &[Neighbor] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// A graph together with a validated start vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRun {
    graph: Graph,
    start: usize,
}

impl GraphRun {
    /// A graph without vertices accepts any start and yields a one-step trace.
    pub fn new(graph: Graph, start: usize) -> Result<Self, InputError> {
        let vertices = graph.vertex_count();
        if vertices > 0 && start >= vertices {
            return Err(InputError::VertexOutOfRange {
                vertex: start,
                vertices,
            });
        }
        Ok(Self { graph, start })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn start(&self) -> usize {
        self.start
    }
}

/// Pending vertices of a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "vertices", rename_all = "lowercase")]
pub enum Frontier {
    /// Front first.
    Queue(Vec<usize>),
    /// Bottom first; the next vertex popped is the last one.
    Stack(Vec<usize>),
}

impl Frontier {
    pub fn vertices(&self) -> &[usize] {
        match self {
            Frontier::Queue(v) | Frontier::Stack(v) => v,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphStep {
    pub visited: BTreeSet<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontier: Option<Frontier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<usize>,
    /// Traversal order so far.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<usize>,
    /// Tentative distances; `None` is infinity. Empty for traversals.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub distances: Vec<Option<u64>>,
    /// Vertices pushed onto the frontier by this step.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<usize>,
    /// `(vertex, new distance)` pairs improved by this step.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relaxed: Vec<(usize, u64)>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub complete: bool,
}

fn no_vertices(rec: &mut Recorder<GraphStep>) {
    rec.record("Graph has no vertices, nothing to explore", GraphStep::default());
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Bfs;

impl TracedAlgorithm for Bfs {
    type Input = GraphRun;
    type Output = Vec<usize>;
    type Step = GraphStep;

    fn name(&self) -> &'static str {
        "breadth-first search"
    }

    fn execute(&self, run: &GraphRun, rec: &mut Recorder<GraphStep>) -> Vec<usize> {
        let graph = run.graph();
        let n = graph.vertex_count();
        if n == 0 {
            no_vertices(rec);
            return Vec::new();
        }

        let mut visited = BTreeSet::new();
        let mut queued = vec![false; n];
        let mut queue = VecDeque::from([run.start()]);
        queued[run.start()] = true;
        let mut order = Vec::new();

        rec.record(
            format!("Starting BFS from vertex {}", run.start()),
            GraphStep {
                frontier: Some(Frontier::Queue(vec![run.start()])),
                ..GraphStep::default()
            },
        );

        while let Some(current) = queue.pop_front() {
            queued[current] = false;
            if !visited.insert(current) {
                continue;
            }
            order.push(current);
            let snapshot = |queue: &VecDeque<usize>, visited: &BTreeSet<usize>| GraphStep {
                visited: visited.clone(),
                frontier: Some(Frontier::Queue(queue.iter().copied().collect())),
                current: Some(current),
                order: order.clone(),
                ..GraphStep::default()
            };
            rec.record(
                format!("Visiting vertex {current}"),
                snapshot(&queue, &visited),
            );

            let mut added = Vec::new();
            for neighbor in graph.neighbors(current) {
                let v = neighbor.vertex;
                if !visited.contains(&v) && !queued[v] {
                    queued[v] = true;
                    queue.push_back(v);
                    added.push(v);
                }
            }
            if !added.is_empty() {
                rec.record(
                    format!("Adding neighbors [{}] to queue", joined(&added, ", ")),
                    GraphStep {
                        added,
                        ..snapshot(&queue, &visited)
                    },
                );
            }
        }

        rec.record(
            format!("BFS traversal complete: [{}]", joined(&order, " → ")),
            GraphStep {
                visited,
                frontier: Some(Frontier::Queue(Vec::new())),
                order: order.clone(),
                complete: true,
                ..GraphStep::default()
            },
        );
        order
    }

    fn step_hint(&self, run: &GraphRun) -> usize {
        2 * run.graph().vertex_count() + 2
    }
}

/// Depth-first traversal with an explicit stack.
///
/// Unvisited neighbours are pushed in reverse adjacency order, so the first
/// listed neighbour is explored first. A vertex may sit on the stack more
/// than once; later copies are skipped when popped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dfs;

impl TracedAlgorithm for Dfs {
    type Input = GraphRun;
    type Output = Vec<usize>;
    type Step = GraphStep;

    fn name(&self) -> &'static str {
        "depth-first search"
    }

    fn execute(&self, run: &GraphRun, rec: &mut Recorder<GraphStep>) -> Vec<usize> {
        let graph = run.graph();
        if graph.vertex_count() == 0 {
            no_vertices(rec);
            return Vec::new();
        }

        let mut visited = BTreeSet::new();
        let mut stack = vec![run.start()];
        let mut order = Vec::new();

        rec.record(
            format!("Starting DFS from vertex {}", run.start()),
            GraphStep {
                frontier: Some(Frontier::Stack(stack.clone())),
                ..GraphStep::default()
            },
        );

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            order.push(current);
            rec.record(
                format!("Visiting vertex {current}"),
                GraphStep {
                    visited: visited.clone(),
                    frontier: Some(Frontier::Stack(stack.clone())),
                    current: Some(current),
                    order: order.clone(),
                    ..GraphStep::default()
                },
            );

            let mut added = Vec::new();
            for neighbor in graph.neighbors(current).iter().rev() {
                if !visited.contains(&neighbor.vertex) {
                    stack.push(neighbor.vertex);
                    added.push(neighbor.vertex);
                }
            }
            if !added.is_empty() {
                rec.record(
                    format!("Adding neighbors [{}] to stack", joined(&added, ", ")),
                    GraphStep {
                        visited: visited.clone(),
                        frontier: Some(Frontier::Stack(stack.clone())),
                        current: Some(current),
                        order: order.clone(),
                        added,
                        ..GraphStep::default()
                    },
                );
            }
        }

        rec.record(
            format!("DFS traversal complete: [{}]", joined(&order, " → ")),
            GraphStep {
                visited,
                frontier: Some(Frontier::Stack(Vec::new())),
                order: order.clone(),
                complete: true,
                ..GraphStep::default()
            },
        );
        order
    }

    fn step_hint(&self, run: &GraphRun) -> usize {
        2 * run.graph().vertex_count() + 2
    }
}

/// Single-source shortest distances plus the predecessor of every vertex on
/// its shortest path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPaths {
    /// `None` for unreachable vertices.
    pub distances: Vec<Option<u64>>,
    pub previous: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Vertices from the source to `target`, both included.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        self.distances.get(target).copied().flatten()?;
        let mut path = vec![target];
        let mut at = target;
        while let Some(prev) = self.previous[at] {
            path.push(prev);
            at = prev;
        }
        path.reverse();
        Some(path)
    }
}

fn render_distance(d: Option<u64>) -> String {
    d.map_or_else(|| "∞".to_owned(), |d| d.to_string())
}

/// Dijkstra with a linear scan for the closest unvisited vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl TracedAlgorithm for Dijkstra {
    type Input = GraphRun;
    type Output = ShortestPaths;
    type Step = GraphStep;

    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn execute(&self, run: &GraphRun, rec: &mut Recorder<GraphStep>) -> ShortestPaths {
        let graph = run.graph();
        let n = graph.vertex_count();
        if n == 0 {
            no_vertices(rec);
            return ShortestPaths {
                distances: Vec::new(),
                previous: Vec::new(),
            };
        }

        let mut distances: Vec<Option<u64>> = vec![None; n];
        let mut previous = vec![None; n];
        let mut visited = BTreeSet::new();
        distances[run.start()] = Some(0);

        rec.record(
            format!("Initialize distances from vertex {}", run.start()),
            GraphStep {
                distances: distances.clone(),
                ..GraphStep::default()
            },
        );

        while visited.len() < n {
            // Strict comparison: the lowest index wins ties.
            let mut closest: Option<(usize, u64)> = None;
            for (v, d) in distances.iter().enumerate() {
                if let Some(d) = *d {
                    if !visited.contains(&v) && closest.map_or(true, |(_, best)| d < best) {
                        closest = Some((v, d));
                    }
                }
            }
            let Some((current, base)) = closest else {
                break;
            };

            visited.insert(current);
            rec.record(
                format!("Visit vertex {current} with distance {base}"),
                GraphStep {
                    visited: visited.clone(),
                    current: Some(current),
                    distances: distances.clone(),
                    ..GraphStep::default()
                },
            );

            let mut relaxed = Vec::new();
            for neighbor in graph.neighbors(current) {
                let v = neighbor.vertex;
                if visited.contains(&v) {
                    continue;
                }
                let candidate = base.saturating_add(neighbor.weight);
                if distances[v].map_or(true, |d| candidate < d) {
                    distances[v] = Some(candidate);
                    previous[v] = Some(current);
                    relaxed.push((v, candidate));
                }
            }
            if !relaxed.is_empty() {
                let listed: Vec<String> = relaxed
                    .iter()
                    .map(|(v, d)| format!("{v}:{d}"))
                    .collect();
                rec.record(
                    format!("Updated distances: {}", listed.join(", ")),
                    GraphStep {
                        visited: visited.clone(),
                        current: Some(current),
                        distances: distances.clone(),
                        relaxed,
                        ..GraphStep::default()
                    },
                );
            }
        }

        let summary: Vec<String> = distances
            .iter()
            .enumerate()
            .map(|(v, d)| format!("{v}:{}", render_distance(*d)))
            .collect();
        rec.record(
            format!("Dijkstra's algorithm complete ({})", summary.join(", ")),
            GraphStep {
                visited,
                distances: distances.clone(),
                complete: true,
                ..GraphStep::default()
            },
        );
        ShortestPaths {
            distances,
            previous,
        }
    }

    fn step_hint(&self, run: &GraphRun) -> usize {
        2 * run.graph().vertex_count() + 2
    }
}
