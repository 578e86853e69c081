//! Example: print every step of a traced quick sort.
//!
//! Run with:
//! `cargo run --example sorting`

use algo_trace::{algorithms::sorting::QuickSort, TraceEngine};

fn main() {
    let values = [5, 2, 8, 1, 9, 4];
    let traced = TraceEngine::new(QuickSort).run(&values);

    for (i, record) in traced.trace.iter().enumerate() {
        let step = &record.state;
        let marks = match (step.comparing.as_slice(), step.swapped.as_slice()) {
            ([], []) => String::new(),
            ([], swapped) => format!("swap {swapped:?}"),
            (comparing, _) => format!("cmp {comparing:?}"),
        };
        println!("{i:3}  {:?}  {marks:14}  {}", step.array, record.narration);
    }
    println!("Sorted: {:?} in {} steps", traced.result, traced.trace.len());
}
