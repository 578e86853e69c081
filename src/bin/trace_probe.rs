use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

use algo_trace::algorithms::divide_conquer::{RecursiveMergeSort, RecursiveQuickSort};
use algo_trace::algorithms::dynamic::{CoinChange, CoinInput, Lcs, LcsInput};
use algo_trace::algorithms::graph::{Dijkstra, Edge, Graph, GraphRun};
use algo_trace::algorithms::searching::{
    BinarySearch, InterpolationSearch, JumpSearch, SearchOutcome, SearchQuery,
};
use algo_trace::algorithms::sorting::{
    BubbleSort, HeapSort, InsertionSort, MergeSort, QuickSort, SelectionSort, SortStep,
};
use algo_trace::input::Fields;
use algo_trace::{input, registry, Error, Family, PlaybackController, TraceEngine, TracedAlgorithm};

#[derive(Parser)]
#[command(name = "trace_probe")]
#[command(about = "Run instrumented algorithms and measure trace generation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered algorithms
    List {
        /// Only this family (e.g. sorting, divide-conquer)
        #[arg(long)]
        family: Option<String>,
    },

    /// Run one algorithm and print its trace
    Run {
        /// Registry key, e.g. sorting/bubble-sort
        key: String,

        /// Raw input fields as name=value; the algorithm's sample input is used when omitted
        #[arg(value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Print output and trace as JSON
        #[arg(long)]
        json: bool,
    },

    /// Time trace generation across input sizes and check results against plain baselines
    Probe {
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Largest input size verified against a baseline
        #[arg(long, default_value_t = 128)]
        verify_limit: usize,
    },
}

fn main() -> ExitCode {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::List { family } => list(family.as_deref()),
        Command::Run { key, fields, json } => run(&key, fields, json).map_err(|e| e.to_string()),
        Command::Probe {
            format,
            verify_limit,
        } => probe(format, verify_limit),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("trace_probe: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

fn list(family: Option<&str>) -> Result<(), String> {
    let families: Vec<Family> = match family {
        Some(slug) => vec![Family::ALL
            .into_iter()
            .find(|f| f.slug() == slug)
            .ok_or_else(|| format!("unknown family '{slug}'"))?],
        None => Family::ALL.to_vec(),
    };

    for family in families {
        println!("{family}");
        for d in registry().by_family(family) {
            println!("  {:<36} {:<34} time {}", d.key, d.name, d.time_complexity);
            println!("  {:<36} takes {}", "", d.args.describe());
        }
        println!();
    }
    Ok(())
}

fn run(key: &str, fields: Vec<(String, String)>, json: bool) -> Result<(), Error> {
    let descriptor = registry()
        .get(key)
        .ok_or_else(|| Error::UnknownAlgorithm(key.to_owned()))?;

    let fields: Fields = if fields.is_empty() {
        descriptor
            .example
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect()
    } else {
        fields.into_iter().collect()
    };
    let args = input::parse_args(descriptor.args, &fields)?;

    let mut player = PlaybackController::new();
    let output = player.run(descriptor, &args)?;

    if json {
        let body = serde_json::json!({
            "algorithm": descriptor,
            "output": output,
            "trace": player.trace(),
        });
        println!("{body:#}");
        return Ok(());
    }

    println!("{} ({})", descriptor.name, descriptor.family);
    for (name, value) in &fields {
        println!("  {name} = {value}");
    }
    println!();
    while let Some(frame) = player.frame() {
        println!(
            "[{:>3}/{}] {}",
            frame.position + 1,
            frame.total,
            frame.step.narration
        );
        let at = frame.position;
        if player.step_forward()? == at {
            break;
        }
    }
    println!();
    println!("result: {output}");
    Ok(())
}

#[derive(Copy, Clone, ValueEnum)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone, Serialize)]
struct Measurement {
    scenario: &'static str,
    size: usize,
    steps: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::NotChecked => "○",
        }
    }
}

/// What one timed run reports back.
struct Probe {
    steps: usize,
    status: VerificationStatus,
    detail: Option<String>,
}

impl Probe {
    fn check(steps: usize, verify: bool, check: impl FnOnce() -> Result<(), String>) -> Self {
        if !verify {
            return Self {
                steps,
                status: VerificationStatus::NotChecked,
                detail: None,
            };
        }
        match check() {
            Ok(()) => Self {
                steps,
                status: VerificationStatus::Passed,
                detail: None,
            },
            Err(detail) => Self {
                steps,
                status: VerificationStatus::Failed,
                detail: Some(detail),
            },
        }
    }
}

type Scenario = fn(usize, &mut System) -> Vec<Measurement>;

const SCENARIOS: &[(&str, Scenario)] = &[
    ("sorting", run_sorting),
    ("searching", run_searching),
    ("dijkstra", run_dijkstra),
    ("dynamic programming", run_dynamic),
];

fn probe(format: OutputFormat, verify_limit: usize) -> Result<(), String> {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Trace Probe: trace generation cost and correctness");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Each scenario runs an instrumented algorithm at growing input sizes and reports:");
    eprintln!("  • steps: number of recorded steps in the trace");
    eprintln!("  • wall_s: wall-clock time in seconds, including every snapshot copy");
    eprintln!("  • rss_delta_kib: resident memory growth while the trace was held");
    eprintln!("  • status: 'passed' = result matches a plain baseline (sizes up to {verify_limit})");
    eprintln!();

    let measurements = collect(verify_limit);
    print_summary(&measurements);
    format.write(&measurements)?;

    if measurements
        .iter()
        .any(|m| m.status == VerificationStatus::Failed)
    {
        return Err("verification failed".to_owned());
    }
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn collect(verify_limit: usize) -> Vec<Measurement> {
    let mut sys = System::new();
    let total = SCENARIOS.len();
    let mut measurements = Vec::new();
    for (idx, (label, scenario)) in SCENARIOS.iter().enumerate() {
        eprintln!("[{}/{}] {label}", idx + 1, total);
        measurements.extend(scenario(verify_limit, &mut sys));
        eprintln!();
    }
    measurements
}

/// Scenarios are independent, so they run side by side. Memory deltas then
/// overlap and are only indicative.
#[cfg(feature = "parallel")]
fn collect(verify_limit: usize) -> Vec<Measurement> {
    use rayon::prelude::*;

    SCENARIOS
        .par_iter()
        .flat_map(|(label, scenario)| {
            eprintln!("running {label}");
            let mut sys = System::new();
            scenario(verify_limit, &mut sys)
        })
        .collect()
}

fn measure<F>(scenario: &'static str, size: usize, sys: &mut System, compute: F) -> Measurement
where
    F: FnOnce() -> Probe,
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let probe = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    let m = Measurement {
        scenario,
        size,
        steps: probe.steps,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        status: probe.status,
        detail: probe.detail,
    };
    eprintln!(
        "      {} {scenario} n={size}: steps={}, time={:.3}s, status={}",
        m.status.icon(),
        m.steps,
        m.wall_s,
        m.status.label()
    );
    m
}

fn sort_probe<A>(algorithm: A, values: &[i64], verify: bool) -> Probe
where
    A: TracedAlgorithm<Input = [i64], Output = Vec<i64>, Step = SortStep>,
{
    let traced = TraceEngine::new(algorithm).run(values);
    Probe::check(traced.trace.len(), verify, || {
        let mut expected = values.to_vec();
        expected.sort_unstable();
        if traced.result != expected {
            return Err(format!("expected {expected:?}, got {:?}", traced.result));
        }
        match traced.final_step() {
            Some(last) if last.state.array == expected => Ok(()),
            _ => Err("final snapshot is not the sorted array".to_owned()),
        }
    })
}

fn run_sorting(verify_limit: usize, sys: &mut System) -> Vec<Measurement> {
    const SIZES: &[usize] = &[8, 32, 128, 256];
    let mut out = Vec::new();
    for &n in SIZES {
        let values = scrambled(n);
        let verify = n <= verify_limit;
        out.push(measure("bubble_sort", n, sys, || sort_probe(BubbleSort, &values, verify)));
        out.push(measure("selection_sort", n, sys, || sort_probe(SelectionSort, &values, verify)));
        out.push(measure("insertion_sort", n, sys, || sort_probe(InsertionSort, &values, verify)));
        out.push(measure("merge_sort", n, sys, || sort_probe(MergeSort, &values, verify)));
        out.push(measure("quick_sort", n, sys, || sort_probe(QuickSort, &values, verify)));
        out.push(measure("heap_sort", n, sys, || sort_probe(HeapSort, &values, verify)));
        out.push(measure("dc_merge_sort", n, sys, || {
            sort_probe(RecursiveMergeSort, &values, verify)
        }));
        out.push(measure("dc_quick_sort", n, sys, || {
            sort_probe(RecursiveQuickSort, &values, verify)
        }));
    }
    out
}

fn search_probe<A>(algorithm: A, query: &SearchQuery, verify: bool) -> Probe
where
    A: TracedAlgorithm<Input = SearchQuery, Output = SearchOutcome>,
{
    let traced = TraceEngine::new(algorithm).run(query);
    Probe::check(traced.trace.len(), verify, || {
        let mut sorted = query.values.clone();
        sorted.sort_unstable();
        let expected = sorted.binary_search(&query.target).is_ok();
        match traced.result.index {
            Some(i) if sorted.get(i) == Some(&query.target) => Ok(()),
            Some(i) => Err(format!("index {i} does not hold {}", query.target)),
            None if !expected => Ok(()),
            None => Err(format!("{} is present but was not found", query.target)),
        }
    })
}

fn run_searching(verify_limit: usize, sys: &mut System) -> Vec<Measurement> {
    const SIZES: &[usize] = &[16, 256, 1024, 4096];
    let mut out = Vec::new();
    for &n in SIZES {
        let values: Vec<i64> = (0..n as i64).map(|i| i * 3 + 1).collect();
        let present = SearchQuery::new(values.clone(), (n as i64 / 3) * 3 + 1);
        let absent = SearchQuery::new(values, 2);
        let verify = n <= verify_limit;
        for query in [&present, &absent] {
            out.push(measure("binary_search", n, sys, || {
                search_probe(BinarySearch, query, verify)
            }));
            out.push(measure("jump_search", n, sys, || search_probe(JumpSearch, query, verify)));
            out.push(measure("interpolation_search", n, sys, || {
                search_probe(InterpolationSearch, query, verify)
            }));
        }
    }
    out
}

fn run_dijkstra(verify_limit: usize, sys: &mut System) -> Vec<Measurement> {
    const SIZES: &[usize] = &[8, 32, 128, 256];
    SIZES
        .iter()
        .map(|&n| {
            let edges = ring_with_chords(n);
            measure("dijkstra", n, sys, || {
                let run = match Graph::new(n, edges.clone()).and_then(|g| GraphRun::new(g, 0)) {
                    Ok(run) => run,
                    Err(err) => {
                        return Probe {
                            steps: 0,
                            status: VerificationStatus::Failed,
                            detail: Some(err.to_string()),
                        }
                    }
                };
                let traced = TraceEngine::new(Dijkstra).run(&run);
                Probe::check(traced.trace.len(), n <= verify_limit, || {
                    let expected = bellman_ford(n, &edges, 0);
                    if traced.result.distances == expected {
                        Ok(())
                    } else {
                        Err("distances differ from Bellman-Ford".to_owned())
                    }
                })
            })
        })
        .collect()
}

fn run_dynamic(verify_limit: usize, sys: &mut System) -> Vec<Measurement> {
    const SIZES: &[usize] = &[8, 16, 32, 48];
    let mut out = Vec::new();
    for &n in SIZES {
        let first = deterministic_text(n, 0);
        let second = deterministic_text(n, 3);
        let verify = n <= verify_limit;
        out.push(measure("lcs", n, sys, || {
            let traced = TraceEngine::new(Lcs).run(&LcsInput::new(first.clone(), second.clone()));
            Probe::check(traced.trace.len(), verify, || {
                let expected = full_lcs_len(first.as_bytes(), second.as_bytes());
                if traced.result.length == expected {
                    Ok(())
                } else {
                    Err(format!("expected {expected}, got {}", traced.result.length))
                }
            })
        }));

        let amount = n * 8;
        let input = CoinInput {
            coins: vec![3, 7, 11],
            amount,
        };
        out.push(measure("coin_change", amount, sys, || {
            let traced = TraceEngine::new(CoinChange).run(&input);
            Probe::check(traced.trace.len(), verify, || {
                let expected = fewest_coins(&input.coins, amount);
                if traced.result == expected {
                    Ok(())
                } else {
                    Err(format!("expected {expected:?}, got {:?}", traced.result))
                }
            })
        }));
    }
    out
}

fn print_summary(measurements: &[Measurement]) {
    eprintln!("{}", "=".repeat(80));
    eprintln!("SUMMARY");
    eprintln!("{}", "=".repeat(80));

    let passed = measurements
        .iter()
        .filter(|m| m.status == VerificationStatus::Passed)
        .count();
    let failed = measurements
        .iter()
        .filter(|m| m.status == VerificationStatus::Failed)
        .count();
    let unchecked = measurements.len() - passed - failed;
    eprintln!(
        "runs: {}  passed: {passed}  failed: {failed}  not checked: {unchecked}",
        measurements.len()
    );

    let total_steps: usize = measurements.iter().map(|m| m.steps).sum();
    let total_time: f64 = measurements.iter().map(|m| m.wall_s).sum();
    eprintln!("steps recorded: {total_steps} in {total_time:.3}s");

    if let Some(heaviest) = measurements.iter().max_by_key(|m| m.steps) {
        eprintln!(
            "longest trace: {} n={} with {} steps",
            heaviest.scenario, heaviest.size, heaviest.steps
        );
    }
    eprintln!();
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,size,steps,wall_s,rss_delta_kib,status,detail");
    for m in measurements {
        let detail = m
            .detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.size,
            m.steps,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let col1 = measurements
        .iter()
        .map(|m| m.scenario.len())
        .max()
        .unwrap_or(0)
        .max("scenario".len());

    println!(
        "{:<col1$}  {:>8}  {:>10}  {:>10}  {:>14}  {:>12}  detail",
        "scenario", "size", "steps", "wall_s", "rss_delta_kib", "status"
    );
    println!("{:-<col1$}  {:-<8}  {:-<10}  {:-<10}  {:-<14}  {:-<12}  {:-<6}", "", "", "", "", "", "", "");
    for m in measurements {
        println!(
            "{:<col1$}  {:>8}  {:>10}  {:>10.3}  {:>14}  {:>12}  {}",
            m.scenario,
            m.size,
            m.steps,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            m.detail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    let body = serde_json::to_string_pretty(measurements).map_err(|e| e.to_string())?;
    println!("{body}");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or(0, |process| process.memory() / 1024)
}

/// Deterministic permutation-like data with duplicates and negatives.
fn scrambled(n: usize) -> Vec<i64> {
    let mut state = 0x2545_f491_4f6c_dd1du64;
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % 200) as i64 - 100
        })
        .collect()
}

fn deterministic_text(len: usize, offset: usize) -> String {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|i| ALPHABET[(i * 7 + offset) % ALPHABET.len()] as char)
        .collect()
}

fn ring_with_chords(n: usize) -> Vec<Edge> {
    let mut edges = Vec::new();
    for v in 0..n {
        edges.push(Edge::weighted(v, (v + 1) % n, (v % 9 + 1) as u64));
        if n > 4 {
            edges.push(Edge::weighted(v, (v * 5 + 3) % n, (v % 13 + 2) as u64));
        }
    }
    edges
}

fn bellman_ford(n: usize, edges: &[Edge], source: usize) -> Vec<Option<u64>> {
    let mut dist = vec![None; n];
    if n == 0 {
        return dist;
    }
    dist[source] = Some(0u64);
    for _ in 1..n {
        let mut changed = false;
        for e in edges {
            for (u, v) in [(e.from, e.to), (e.to, e.from)] {
                if let Some(du) = dist[u] {
                    let cand = du + e.weight;
                    if dist[v].map_or(true, |dv| cand < dv) {
                        dist[v] = Some(cand);
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

fn full_lcs_len(s: &[u8], t: &[u8]) -> u64 {
    let mut dp = vec![vec![0u64; t.len() + 1]; s.len() + 1];
    for i in 1..=s.len() {
        for j in 1..=t.len() {
            dp[i][j] = if s[i - 1] == t[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }
    dp[s.len()][t.len()]
}

fn fewest_coins(coins: &[u64], amount: usize) -> Option<u64> {
    let mut best: Vec<Option<u64>> = vec![None; amount + 1];
    best[0] = Some(0);
    for a in 1..=amount {
        let next = coins
            .iter()
            .filter_map(|&c| {
                let c = usize::try_from(c).ok()?;
                best[a.checked_sub(c)?].map(|k| k + 1)
            })
            .min();
        best[a] = next;
    }
    best[amount]
}
