use algo_trace::algorithms::divide_conquer::{RecursiveMergeSort, RecursiveQuickSort};
use algo_trace::algorithms::sorting::{
    BubbleSort, HeapSort, InsertionSort, MergeSort, QuickSort, SelectionSort, SortStep,
};
use algo_trace::{TraceEngine, Traced, TracedAlgorithm};
use proptest::prelude::*;

fn sorted(values: &[i64]) -> Vec<i64> {
    let mut v = values.to_vec();
    v.sort();
    v
}

fn run_all(values: &[i64]) -> Vec<(&'static str, Traced<Vec<i64>, SortStep>)> {
    fn one<A>(algorithm: A, values: &[i64]) -> (&'static str, Traced<Vec<i64>, SortStep>)
    where
        A: TracedAlgorithm<Input = [i64], Output = Vec<i64>, Step = SortStep>,
    {
        let engine = TraceEngine::new(algorithm);
        (engine.algorithm().name(), engine.run(values))
    }

    vec![
        one(BubbleSort, values),
        one(SelectionSort, values),
        one(InsertionSort, values),
        one(MergeSort, values),
        one(QuickSort, values),
        one(HeapSort, values),
        one(RecursiveMergeSort, values),
        one(RecursiveQuickSort, values),
    ]
}

proptest! {
    #[test]
    fn final_snapshot_is_sorted_input(values in prop::collection::vec(-50i64..50, 0..24)) {
        let expected = sorted(&values);
        for (name, traced) in run_all(&values) {
            prop_assert_eq!(&traced.result, &expected, "{} result", name);
            let last = traced.final_step().unwrap();
            prop_assert_eq!(&last.state.array, &expected, "{} final snapshot", name);
        }
    }

    #[test]
    fn snapshots_keep_the_array_length(values in prop::collection::vec(-9i64..9, 0..16)) {
        // The recursive merge sort snapshots sub-arrays instead.
        for (name, traced) in run_all(&values).into_iter().filter(|(name, _)| *name != "recursive merge sort") {
            for record in &traced.trace {
                prop_assert_eq!(record.state.array.len(), values.len(), "{}: {}", name, record.narration);
            }
        }
    }

    #[test]
    fn in_place_sorts_only_permute(values in prop::collection::vec(-20i64..20, 0..16)) {
        let expected = sorted(&values);
        let traces = [
            TraceEngine::new(BubbleSort).run(&values),
            TraceEngine::new(SelectionSort).run(&values),
            TraceEngine::new(QuickSort).run(&values),
            TraceEngine::new(HeapSort).run(&values),
        ];
        for traced in traces {
            for record in &traced.trace {
                prop_assert_eq!(sorted(&record.state.array), expected.clone());
            }
        }
    }

    #[test]
    fn highlights_point_inside_the_array(values in prop::collection::vec(-20i64..20, 1..16)) {
        for (name, traced) in run_all(&values) {
            for record in &traced.trace {
                let s = &record.state;
                let n = s.array.len();
                let in_range = s.comparing.iter().chain(&s.swapped).chain(&s.inserted).all(|&i| i < n)
                    && s.min_index.map_or(true, |i| i < n)
                    && s.pivot.map_or(true, |i| i < n)
                    && s.segment.map_or(true, |(lo, hi)| lo <= hi && hi < n);
                prop_assert!(in_range, "{}: {}", name, record.narration);
            }
        }
    }
}

#[test]
fn degenerate_inputs_still_narrate() {
    for values in [&[][..], &[42][..]] {
        for (name, traced) in run_all(values) {
            assert!(!traced.trace.is_empty(), "{name} recorded nothing");
            assert_eq!(traced.result, values, "{name}");
        }
    }
}

#[test]
fn sorted_input_stops_bubble_sort_early() {
    let traced = TraceEngine::new(BubbleSort).run(&[1, 2, 3, 4, 5]);
    let swaps = traced
        .trace
        .iter()
        .filter(|r| !r.state.swapped.is_empty())
        .count();
    assert_eq!(swaps, 0);
    // start, one pass of four comparisons, early exit, summary
    assert_eq!(traced.trace.len(), 7);
}

#[test]
fn duplicates_survive() {
    let values = [3, 1, 3, 1, 2, 2, 3];
    for (name, traced) in run_all(&values) {
        assert_eq!(traced.result, [1, 1, 2, 2, 3, 3, 3], "{name}");
    }
}
