//! Process-wide catalogue of every instrumented algorithm.
//!
//! The registry is built once on first use and never changes afterwards.
//! Each [`AlgorithmDescriptor`] carries display metadata and a type-erased
//! entry point that takes [`AlgorithmArgs`] and returns the output together
//! with a [`Trace`] of umbrella [`Step`]s.

use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::algorithms::divide_conquer::{
    Matrix, MatrixMultiply, MatrixPair, MaxSubarray, MaximumSubarray, RecursiveBinarySearch,
    RecursiveMergeSort, RecursiveQuickSort,
};
use crate::algorithms::dynamic::{
    CoinChange, CoinInput, Fibonacci, Knapsack, KnapsackInput, Lcs, LcsInput, LcsOutcome,
};
use crate::algorithms::graph::{Bfs, Dfs, Dijkstra, GraphRun, ShortestPaths};
use crate::algorithms::greedy::{
    Activity, ActivitySelection, FractionalInput, FractionalKnapsack, FractionalOutcome, HuffmanCoding,
    HuffmanOutcome, Job, JobSchedule, JobScheduling, Symbol,
};
use crate::algorithms::searching::{
    BinarySearch, InterpolationSearch, JumpSearch, LinearSearch, SearchOutcome, SearchQuery,
};
use crate::algorithms::sorting::{
    BubbleSort, HeapSort, InsertionSort, MergeSort, QuickSort, SelectionSort,
};
use crate::engine::TraceEngine;
use crate::error::{Error, InputError};
use crate::step::Step;
use crate::trace::{Trace, Traced};
use crate::traits::TracedAlgorithm;
use crate::utils::{bracketed, joined};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    Sorting,
    Searching,
    Graph,
    DivideAndConquer,
    DynamicProgramming,
    Greedy,
}

impl Family {
    pub const ALL: [Family; 6] = [
        Family::Sorting,
        Family::Searching,
        Family::Graph,
        Family::DivideAndConquer,
        Family::DynamicProgramming,
        Family::Greedy,
    ];

    /// Key prefix used in the registry.
    pub fn slug(self) -> &'static str {
        match self {
            Family::Sorting => "sorting",
            Family::Searching => "searching",
            Family::Graph => "graph",
            Family::DivideAndConquer => "divide-conquer",
            Family::DynamicProgramming => "dynamic-programming",
            Family::Greedy => "greedy",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Family::Sorting => "Sorting",
            Family::Searching => "Searching",
            Family::Graph => "Graph",
            Family::DivideAndConquer => "Divide & Conquer",
            Family::DynamicProgramming => "Dynamic Programming",
            Family::Greedy => "Greedy",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Shape of the arguments an entry point accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgsKind {
    Values,
    Search,
    Graph,
    Matrices,
    Index,
    Knapsack,
    Strings,
    Coins,
    Activities,
    FractionalKnapsack,
    Frequencies,
    Jobs,
}

impl ArgsKind {
    /// Raw field names [`crate::input::parse_args`] reads for this kind.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            ArgsKind::Values => &["values"],
            ArgsKind::Search => &["values", "target"],
            ArgsKind::Graph => &["vertices", "edges", "start"],
            ArgsKind::Matrices => &["a", "b"],
            ArgsKind::Index => &["n"],
            ArgsKind::Knapsack => &["weights", "values", "capacity"],
            ArgsKind::Strings => &["first", "second"],
            ArgsKind::Coins => &["coins", "amount"],
            ArgsKind::Activities => &["activities"],
            ArgsKind::FractionalKnapsack => &["items", "capacity"],
            ArgsKind::Frequencies => &["symbols"],
            ArgsKind::Jobs => &["jobs"],
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            ArgsKind::Values => "an array of integers",
            ArgsKind::Search => "an array and a target",
            ArgsKind::Graph => "a vertex count, an edge list and a start vertex",
            ArgsKind::Matrices => "two square matrices",
            ArgsKind::Index => "a sequence index",
            ArgsKind::Knapsack => "item weights, item values and a capacity",
            ArgsKind::Strings => "two strings",
            ArgsKind::Coins => "coin denominations and an amount",
            ArgsKind::Activities => "a list of activities",
            ArgsKind::FractionalKnapsack => "weighted items and a capacity",
            ArgsKind::Frequencies => "symbol frequencies",
            ArgsKind::Jobs => "jobs with deadlines and profits",
        }
    }
}

/// Typed, validated arguments for one entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum AlgorithmArgs {
    Values(Vec<i64>),
    Search(SearchQuery),
    Graph(GraphRun),
    Matrices(MatrixPair),
    Index(u64),
    Knapsack(KnapsackInput),
    Strings(LcsInput),
    Coins(CoinInput),
    Activities(Vec<Activity>),
    FractionalKnapsack(FractionalInput),
    Frequencies(Vec<Symbol>),
    Jobs(Vec<Job>),
}

impl AlgorithmArgs {
    pub fn kind(&self) -> ArgsKind {
        match self {
            AlgorithmArgs::Values(_) => ArgsKind::Values,
            AlgorithmArgs::Search(_) => ArgsKind::Search,
            AlgorithmArgs::Graph(_) => ArgsKind::Graph,
            AlgorithmArgs::Matrices(_) => ArgsKind::Matrices,
            AlgorithmArgs::Index(_) => ArgsKind::Index,
            AlgorithmArgs::Knapsack(_) => ArgsKind::Knapsack,
            AlgorithmArgs::Strings(_) => ArgsKind::Strings,
            AlgorithmArgs::Coins(_) => ArgsKind::Coins,
            AlgorithmArgs::Activities(_) => ArgsKind::Activities,
            AlgorithmArgs::FractionalKnapsack(_) => ArgsKind::FractionalKnapsack,
            AlgorithmArgs::Frequencies(_) => ArgsKind::Frequencies,
            AlgorithmArgs::Jobs(_) => ArgsKind::Jobs,
        }
    }
}

/// Result of any entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AlgorithmOutput {
    Sorted(Vec<i64>),
    Search(SearchOutcome),
    Traversal(Vec<usize>),
    ShortestPaths(ShortestPaths),
    MaxSubarray(MaxSubarray),
    Matrix(Matrix),
    Number(u64),
    Lcs(LcsOutcome),
    Coins(Option<u64>),
    Activities(Vec<Activity>),
    FractionalKnapsack(FractionalOutcome),
    Huffman(HuffmanOutcome),
    Jobs(JobSchedule),
}

impl fmt::Display for AlgorithmOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmOutput::Sorted(values) => write!(f, "{}", bracketed(values)),
            AlgorithmOutput::Search(outcome) => match outcome.index {
                Some(i) => write!(f, "found at index {i}"),
                None => write!(f, "not found (index {})", outcome.display_index()),
            },
            AlgorithmOutput::Traversal(order) => write!(f, "{}", joined(order, " → ")),
            AlgorithmOutput::ShortestPaths(paths) => {
                let cells: Vec<String> = paths
                    .distances
                    .iter()
                    .enumerate()
                    .map(|(v, d)| match d {
                        Some(d) => format!("{v}:{d}"),
                        None => format!("{v}:∞"),
                    })
                    .collect();
                f.write_str(&cells.join(", "))
            }
            AlgorithmOutput::MaxSubarray(best) => match best.range {
                Some((from, to)) => write!(f, "sum {} over [{from}, {to}]", best.sum),
                None => write!(f, "sum {}", best.sum),
            },
            AlgorithmOutput::Matrix(rows) => {
                let rows: Vec<String> = rows.iter().map(|r| bracketed(r)).collect();
                write!(f, "[{}]", rows.join(", "))
            }
            AlgorithmOutput::Number(n) => write!(f, "{n}"),
            AlgorithmOutput::Lcs(lcs) => write!(f, "{} (\"{}\")", lcs.length, lcs.subsequence),
            AlgorithmOutput::Coins(Some(count)) => write!(f, "{count} coins"),
            AlgorithmOutput::Coins(None) => f.write_str("-1 (amount cannot be made)"),
            AlgorithmOutput::Activities(chosen) => {
                let names: Vec<&str> = chosen.iter().map(|a| a.name.as_str()).collect();
                f.write_str(&names.join(", "))
            }
            AlgorithmOutput::FractionalKnapsack(out) => write!(
                f,
                "value {:.2} with weight {}",
                out.total_value, out.total_weight
            ),
            AlgorithmOutput::Huffman(out) => {
                let codes: Vec<String> = out.codes.iter().map(|(s, c)| format!("{s}={c}")).collect();
                f.write_str(&codes.join(", "))
            }
            AlgorithmOutput::Jobs(schedule) => {
                let names: Vec<&str> = schedule.scheduled.iter().map(|j| j.name.as_str()).collect();
                write!(f, "{} (profit {})", names.join(", "), schedule.total_profit)
            }
        }
    }
}

/// Output plus the umbrella trace of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmRun {
    pub output: AlgorithmOutput,
    pub trace: Trace<Step>,
}

pub type EntryPoint = fn(&AlgorithmArgs) -> Result<AlgorithmRun, InputError>;

/// Immutable metadata and entry point of one algorithm.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmDescriptor {
    pub key: &'static str,
    pub family: Family,
    pub name: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub description: &'static str,
    /// Display-only pseudocode.
    pub reference: &'static str,
    pub args: ArgsKind,
    /// Sample raw fields that make a meaningful run.
    pub example: &'static [(&'static str, &'static str)],
    #[serde(skip)]
    pub entry: EntryPoint,
}

impl AlgorithmDescriptor {
    /// Run the entry point. Fails only if `args` is the wrong kind.
    pub fn run(&self, args: &AlgorithmArgs) -> Result<AlgorithmRun, InputError> {
        (self.entry)(args)
    }
}

fn traced<A>(
    algorithm: A,
    input: &A::Input,
    wrap: impl FnOnce(A::Output) -> AlgorithmOutput,
) -> AlgorithmRun
where
    A: TracedAlgorithm,
    A::Step: Into<Step>,
{
    let Traced { result, trace } = TraceEngine::new(algorithm).run(input);
    AlgorithmRun {
        output: wrap(result),
        trace: trace.map_state(Into::into),
    }
}

macro_rules! entry {
    ($algorithm:ident, $args:ident, $output:ident) => {
        |args: &AlgorithmArgs| -> Result<AlgorithmRun, InputError> {
            match args {
                AlgorithmArgs::$args(input) => {
                    let input: &<$algorithm as TracedAlgorithm>::Input = input;
                    Ok(traced($algorithm, input, AlgorithmOutput::$output))
                }
                _ => Err(InputError::ArgsMismatch {
                    algorithm: $algorithm.name(),
                    expected: ArgsKind::$args.describe(),
                }),
            }
        }
    };
}

const SORT_EXAMPLE: &[(&str, &str)] = &[("values", "5,2,8,1,9,4")];
const SEARCH_EXAMPLE: &[(&str, &str)] = &[("values", "1,3,5,7,9,11,13,15,17,19"), ("target", "7")];
const GRAPH_EXAMPLE: &[(&str, &str)] = &[
    ("vertices", "4"),
    ("edges", "0-1,1-2,2-3,3-0,1-3"),
    ("start", "0"),
];

/// Lookup table of all descriptors, in presentation order.
#[derive(Debug)]
pub struct Registry {
    entries: IndexMap<&'static str, AlgorithmDescriptor>,
}

impl Registry {
    fn build() -> Self {
        let descriptors = catalogue();
        let mut entries = IndexMap::with_capacity(descriptors.len());
        for d in descriptors {
            let previous = entries.insert(d.key, d);
            debug_assert!(previous.is_none(), "duplicate registry key");
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(algorithms = entries.len(), "registry built");
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&AlgorithmDescriptor> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmDescriptor> {
        self.entries.values()
    }

    pub fn by_family(&self, family: Family) -> impl Iterator<Item = &AlgorithmDescriptor> {
        self.iter().filter(move |d| d.family == family)
    }

    /// Look up `key` and run it.
    pub fn run(&self, key: &str, args: &AlgorithmArgs) -> Result<AlgorithmRun, Error> {
        let descriptor = self
            .get(key)
            .ok_or_else(|| Error::UnknownAlgorithm(key.to_owned()))?;
        Ok(descriptor.run(args)?)
    }
}

/// The shared registry.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::build)
}

fn catalogue() -> Vec<AlgorithmDescriptor> {
    vec![
        AlgorithmDescriptor {
            key: "sorting/bubble-sort",
            family: Family::Sorting,
            name: "Bubble Sort",
            time_complexity: "O(n²)",
            space_complexity: "O(1)",
            description: "Repeatedly steps through the list, compares adjacent elements and swaps them if they are in the wrong order.",
            reference: "for i in 0..n-1:\n  swapped = false\n  for j in 0..n-1-i:\n    if a[j] > a[j+1]: swap(a[j], a[j+1]); swapped = true\n  if !swapped: break",
            args: ArgsKind::Values,
            example: SORT_EXAMPLE,
            entry: entry!(BubbleSort, Values, Sorted),
        },
        AlgorithmDescriptor {
            key: "sorting/selection-sort",
            family: Family::Sorting,
            name: "Selection Sort",
            time_complexity: "O(n²)",
            space_complexity: "O(1)",
            description: "Finds the minimum element from the unsorted part and puts it at the beginning.",
            reference: "for i in 0..n-1:\n  min = i\n  for j in i+1..n:\n    if a[j] < a[min]: min = j\n  if min != i: swap(a[i], a[min])",
            args: ArgsKind::Values,
            example: SORT_EXAMPLE,
            entry: entry!(SelectionSort, Values, Sorted),
        },
        AlgorithmDescriptor {
            key: "sorting/insertion-sort",
            family: Family::Sorting,
            name: "Insertion Sort",
            time_complexity: "O(n²)",
            space_complexity: "O(1)",
            description: "Builds the sorted array one item at a time by inserting each new element into its place among the already sorted ones.",
            reference: "for i in 1..n:\n  key = a[i]; j = i\n  while j > 0 and a[j-1] > key:\n    a[j] = a[j-1]; j -= 1\n  a[j] = key",
            args: ArgsKind::Values,
            example: SORT_EXAMPLE,
            entry: entry!(InsertionSort, Values, Sorted),
        },
        AlgorithmDescriptor {
            key: "sorting/merge-sort",
            family: Family::Sorting,
            name: "Merge Sort",
            time_complexity: "O(n log n)",
            space_complexity: "O(n)",
            description: "Divides array into halves, recursively sorts them, then merges sorted halves.",
            reference: "sort(lo, hi):\n  if hi - lo < 2: return\n  mid = (lo + hi) / 2\n  sort(lo, mid); sort(mid, hi)\n  merge a[lo..mid] and a[mid..hi]",
            args: ArgsKind::Values,
            example: SORT_EXAMPLE,
            entry: entry!(MergeSort, Values, Sorted),
        },
        AlgorithmDescriptor {
            key: "sorting/quick-sort",
            family: Family::Sorting,
            name: "Quick Sort",
            time_complexity: "O(n log n) average, O(n²) worst",
            space_complexity: "O(log n) average, O(n) worst",
            description: "Selects a pivot, partitions array around it, then recursively sorts partitions.",
            reference: "sort(lo, hi):\n  if lo >= hi: return\n  p = partition(lo, hi)  // last element is the pivot\n  sort(lo, p-1); sort(p+1, hi)",
            args: ArgsKind::Values,
            example: SORT_EXAMPLE,
            entry: entry!(QuickSort, Values, Sorted),
        },
        AlgorithmDescriptor {
            key: "sorting/heap-sort",
            family: Family::Sorting,
            name: "Heap Sort",
            time_complexity: "O(n log n)",
            space_complexity: "O(1)",
            description: "Builds a max-heap from the input data and repeatedly extracts the maximum element.",
            reference: "for i in (0..n/2).rev(): heapify(n, i)\nfor end in (1..n).rev():\n  swap(a[0], a[end])\n  heapify(end, 0)",
            args: ArgsKind::Values,
            example: SORT_EXAMPLE,
            entry: entry!(HeapSort, Values, Sorted),
        },
        AlgorithmDescriptor {
            key: "searching/linear-search",
            family: Family::Searching,
            name: "Linear Search",
            time_complexity: "O(n)",
            space_complexity: "O(1)",
            description: "Sequentially checks each element until the target is found or the list ends.",
            reference: "for i in 0..n:\n  if a[i] == target: return i\nreturn -1",
            args: ArgsKind::Search,
            example: SEARCH_EXAMPLE,
            entry: entry!(LinearSearch, Search, Search),
        },
        AlgorithmDescriptor {
            key: "searching/binary-search",
            family: Family::Searching,
            name: "Binary Search",
            time_complexity: "O(log n)",
            space_complexity: "O(1)",
            description: "Efficiently searches sorted arrays by repeatedly dividing the search interval in half.",
            reference: "lo = 0; hi = n - 1\nwhile lo <= hi:\n  mid = (lo + hi) / 2\n  if a[mid] == target: return mid\n  if a[mid] < target: lo = mid + 1 else: hi = mid - 1\nreturn -1",
            args: ArgsKind::Search,
            example: SEARCH_EXAMPLE,
            entry: entry!(BinarySearch, Search, Search),
        },
        AlgorithmDescriptor {
            key: "searching/jump-search",
            family: Family::Searching,
            name: "Jump Search",
            time_complexity: "O(√n)",
            space_complexity: "O(1)",
            description: "Jumps through fixed-size blocks, then performs linear search in the identified block.",
            reference: "step = floor(sqrt(n)); prev = 0\nwhile a[min(step, n) - 1] < target:\n  prev = step; step += floor(sqrt(n))\n  if prev >= n: return -1\nscan a[prev..min(step, n)] linearly",
            args: ArgsKind::Search,
            example: SEARCH_EXAMPLE,
            entry: entry!(JumpSearch, Search, Search),
        },
        AlgorithmDescriptor {
            key: "searching/interpolation-search",
            family: Family::Searching,
            name: "Interpolation Search",
            time_complexity: "O(log log n)",
            space_complexity: "O(1)",
            description: "Estimates the position of the target based on the value distribution in sorted arrays.",
            reference: "while lo <= hi and a[lo] <= target <= a[hi]:\n  pos = lo + (target - a[lo]) * (hi - lo) / (a[hi] - a[lo])\n  if a[pos] == target: return pos\n  if a[pos] < target: lo = pos + 1 else: hi = pos - 1\nreturn -1",
            args: ArgsKind::Search,
            example: SEARCH_EXAMPLE,
            entry: entry!(InterpolationSearch, Search, Search),
        },
        AlgorithmDescriptor {
            key: "graph/bfs",
            family: Family::Graph,
            name: "Breadth-First Search (BFS)",
            time_complexity: "O(V + E)",
            space_complexity: "O(V)",
            description: "Explores vertices level by level using a queue, visiting all neighbors before moving deeper.",
            reference: "queue = [start]\nwhile let Some(v) = queue.pop_front():\n  if visited(v): continue\n  visit(v)\n  push every neighbour not visited and not queued",
            args: ArgsKind::Graph,
            example: GRAPH_EXAMPLE,
            entry: entry!(Bfs, Graph, Traversal),
        },
        AlgorithmDescriptor {
            key: "graph/dfs",
            family: Family::Graph,
            name: "Depth-First Search (DFS)",
            time_complexity: "O(V + E)",
            space_complexity: "O(V)",
            description: "Explores as far as possible along each branch using a stack before backtracking.",
            reference: "stack = [start]\nwhile let Some(v) = stack.pop():\n  if visited(v): continue\n  visit(v)\n  push unvisited neighbours in reverse order",
            args: ArgsKind::Graph,
            example: GRAPH_EXAMPLE,
            entry: entry!(Dfs, Graph, Traversal),
        },
        AlgorithmDescriptor {
            key: "graph/dijkstra",
            family: Family::Graph,
            name: "Dijkstra's Algorithm",
            time_complexity: "O(V² + E)",
            space_complexity: "O(V)",
            description: "Finds shortest paths from a source vertex to all other vertices in a weighted graph.",
            reference: "dist[start] = 0, others = ∞\nrepeat:\n  u = closest unvisited vertex with finite distance, or stop\n  mark u visited\n  for (v, w) in adj[u]: dist[v] = min(dist[v], dist[u] + w)",
            args: ArgsKind::Graph,
            example: &[
                ("vertices", "4"),
                ("edges", "0-1-4,0-2-1,2-1-2,1-3-5,2-3-8"),
                ("start", "0"),
            ],
            entry: entry!(Dijkstra, Graph, ShortestPaths),
        },
        AlgorithmDescriptor {
            key: "divide-conquer/merge-sort",
            family: Family::DivideAndConquer,
            name: "Merge Sort",
            time_complexity: "O(n log n)",
            space_complexity: "O(n)",
            description: "Divides array into halves, recursively sorts them, then merges sorted halves.",
            reference: "merge_sort(a):\n  if len(a) <= 1: return a\n  left = merge_sort(a[..mid]); right = merge_sort(a[mid..])\n  return merge(left, right)",
            args: ArgsKind::Values,
            example: SORT_EXAMPLE,
            entry: entry!(RecursiveMergeSort, Values, Sorted),
        },
        AlgorithmDescriptor {
            key: "divide-conquer/quick-sort",
            family: Family::DivideAndConquer,
            name: "Quick Sort",
            time_complexity: "O(n log n) average, O(n²) worst",
            space_complexity: "O(log n) average, O(n) worst",
            description: "Selects a pivot, partitions array around it, then recursively sorts partitions.",
            reference: "quick_sort(lo, hi):\n  if lo < hi:\n    p = partition(lo, hi)\n    quick_sort(lo, p - 1); quick_sort(p + 1, hi)",
            args: ArgsKind::Values,
            example: SORT_EXAMPLE,
            entry: entry!(RecursiveQuickSort, Values, Sorted),
        },
        AlgorithmDescriptor {
            key: "divide-conquer/binary-search",
            family: Family::DivideAndConquer,
            name: "Binary Search",
            time_complexity: "O(log n)",
            space_complexity: "O(log n)",
            description: "Recursively divides sorted array in half to find target element.",
            reference: "search(lo, hi):\n  if lo > hi: return -1\n  mid = (lo + hi) / 2\n  if a[mid] == target: return mid\n  if a[mid] > target: return search(lo, mid - 1)\n  return search(mid + 1, hi)",
            args: ArgsKind::Search,
            example: &[("values", "5,2,8,1,9,4"), ("target", "8")],
            entry: entry!(RecursiveBinarySearch, Search, Search),
        },
        AlgorithmDescriptor {
            key: "divide-conquer/max-subarray",
            family: Family::DivideAndConquer,
            name: "Maximum Subarray",
            time_complexity: "O(n log n)",
            space_complexity: "O(log n)",
            description: "Finds the contiguous subarray with the largest sum using divide and conquer.",
            reference: "best(lo, hi):\n  if lo == hi: return a[lo]\n  mid = (lo + hi) / 2\n  return max(best(lo, mid), best(mid + 1, hi), crossing(lo, mid, hi))",
            args: ArgsKind::Values,
            example: &[("values", "-2,1,-3,4,-1,2,1,-5,4")],
            entry: entry!(MaximumSubarray, Values, MaxSubarray),
        },
        AlgorithmDescriptor {
            key: "divide-conquer/strassen",
            family: Family::DivideAndConquer,
            name: "Matrix Multiplication (Strassen)",
            time_complexity: "O(n³)",
            space_complexity: "O(n²)",
            description: "Multiplies two square matrices one output cell at a time. Listed under Strassen, but every cell is the direct row-by-column sum rather than Strassen's seven-product recursion.",
            reference: "for i in 0..n:\n  for j in 0..n:\n    c[i][j] = sum(a[i][k] * b[k][j] for k in 0..n)",
            args: ArgsKind::Matrices,
            example: &[("a", "1,2;3,4"), ("b", "5,6;7,8")],
            entry: entry!(MatrixMultiply, Matrices, Matrix),
        },
        AlgorithmDescriptor {
            key: "dynamic-programming/fibonacci",
            family: Family::DynamicProgramming,
            name: "Fibonacci Sequence",
            time_complexity: "O(n)",
            space_complexity: "O(n)",
            description: "Computes the nth Fibonacci number using dynamic programming to avoid redundant calculations.",
            reference: "dp[0] = 0; dp[1] = 1\nfor i in 2..=n: dp[i] = dp[i-1] + dp[i-2]\nreturn dp[n]",
            args: ArgsKind::Index,
            example: &[("n", "10")],
            entry: entry!(Fibonacci, Index, Number),
        },
        AlgorithmDescriptor {
            key: "dynamic-programming/knapsack",
            family: Family::DynamicProgramming,
            name: "0/1 Knapsack Problem",
            time_complexity: "O(nW)",
            space_complexity: "O(nW)",
            description: "Finds the maximum value that can be obtained with given weight and value constraints.",
            reference: "for i in 1..=n:\n  for w in 1..=W:\n    dp[i][w] = dp[i-1][w]\n    if wt[i] <= w: dp[i][w] = max(dp[i][w], val[i] + dp[i-1][w - wt[i]])",
            args: ArgsKind::Knapsack,
            example: &[("weights", "1,3,4,5"), ("values", "1,4,5,7"), ("capacity", "7")],
            entry: entry!(Knapsack, Knapsack, Number),
        },
        AlgorithmDescriptor {
            key: "dynamic-programming/lcs",
            family: Family::DynamicProgramming,
            name: "Longest Common Subsequence",
            time_complexity: "O(mn)",
            space_complexity: "O(mn)",
            description: "Finds the length of the longest subsequence common to two sequences.",
            reference: "for i in 1..=m:\n  for j in 1..=n:\n    dp[i][j] = if x[i] == y[j] { dp[i-1][j-1] + 1 }\n               else { max(dp[i-1][j], dp[i][j-1]) }",
            args: ArgsKind::Strings,
            example: &[("first", "ABCBDAB"), ("second", "BDCABA")],
            entry: entry!(Lcs, Strings, Lcs),
        },
        AlgorithmDescriptor {
            key: "dynamic-programming/coin-change",
            family: Family::DynamicProgramming,
            name: "Coin Change Problem",
            time_complexity: "O(amount × coins)",
            space_complexity: "O(amount)",
            description: "Finds the minimum number of coins needed to make a given amount.",
            reference: "dp[0] = 0, others = ∞\nfor i in 1..=amount:\n  for c in coins:\n    if c <= i: dp[i] = min(dp[i], dp[i - c] + 1)\nreturn dp[amount] or -1",
            args: ArgsKind::Coins,
            example: &[("coins", "1,2,5"), ("amount", "11")],
            entry: entry!(CoinChange, Coins, Coins),
        },
        AlgorithmDescriptor {
            key: "greedy/activity-selection",
            family: Family::Greedy,
            name: "Activity Selection",
            time_complexity: "O(n log n)",
            space_complexity: "O(1)",
            description: "Selects maximum number of non-overlapping activities by choosing earliest finishing activities.",
            reference: "sort by finish\nkeep first\nfor each next activity:\n  if start >= finish of last kept: keep it",
            args: ArgsKind::Activities,
            example: &[(
                "activities",
                "A1:1-4,A2:3-5,A3:0-6,A4:5-7,A5:3-9,A6:5-9,A7:6-10,A8:8-11",
            )],
            entry: entry!(ActivitySelection, Activities, Activities),
        },
        AlgorithmDescriptor {
            key: "greedy/fractional-knapsack",
            family: Family::Greedy,
            name: "Fractional Knapsack",
            time_complexity: "O(n log n)",
            space_complexity: "O(1)",
            description: "Maximizes value in knapsack by selecting items with highest value-to-weight ratio first.",
            reference: "sort by value / weight, descending\nfor item:\n  if weight <= room: take all\n  else: take room / weight of it; stop",
            args: ArgsKind::FractionalKnapsack,
            example: &[("items", "a:10:60,b:20:100,c:30:120"), ("capacity", "50")],
            entry: entry!(FractionalKnapsack, FractionalKnapsack, FractionalKnapsack),
        },
        AlgorithmDescriptor {
            key: "greedy/huffman-coding",
            family: Family::Greedy,
            name: "Huffman Coding",
            time_complexity: "O(n log n)",
            space_complexity: "O(n)",
            description: "Creates optimal prefix-free binary codes by building tree from character frequencies.",
            reference: "pool = leaves\nwhile pool has 2+ nodes:\n  sort pool by frequency\n  merge the two smallest into a parent\nwalk the tree: left = 0, right = 1",
            args: ArgsKind::Frequencies,
            example: &[("symbols", "a:45,b:13,c:12,d:16,e:9,f:5")],
            entry: entry!(HuffmanCoding, Frequencies, Huffman),
        },
        AlgorithmDescriptor {
            key: "greedy/job-scheduling",
            family: Family::Greedy,
            name: "Job Sequencing with Deadlines",
            time_complexity: "O(n²)",
            space_complexity: "O(n)",
            description: "Schedules jobs to maximize profit while meeting deadlines using greedy approach.",
            reference: "sort by profit, descending\nfor job:\n  t = latest free slot before job.deadline\n  if found: schedule job at t",
            args: ArgsKind::Jobs,
            example: &[("jobs", "J1:2:100,J2:1:19,J3:2:27,J4:1:25,J5:3:15")],
            entry: entry!(JobScheduling, Jobs, Jobs),
        },
    ]
}
