use algo_trace::algorithms::divide_conquer::RecursiveBinarySearch;
use algo_trace::algorithms::searching::{
    BinarySearch, InterpolationSearch, JumpSearch, LinearSearch, SearchOutcome, SearchQuery,
    SearchStep,
};
use algo_trace::{TraceEngine, Traced, TracedAlgorithm};
use proptest::prelude::*;

type SearchRun = Traced<SearchOutcome, SearchStep>;

/// Searches that work on a sorted copy of the input.
fn ordered_searches(query: &SearchQuery) -> Vec<(&'static str, SearchRun)> {
    fn one<A>(algorithm: A, query: &SearchQuery) -> (&'static str, SearchRun)
    where
        A: TracedAlgorithm<Input = SearchQuery, Output = SearchOutcome, Step = SearchStep>,
    {
        (algorithm.name(), TraceEngine::new(algorithm).run(query))
    }

    vec![
        one(BinarySearch, query),
        one(JumpSearch, query),
        one(InterpolationSearch, query),
        one(RecursiveBinarySearch, query),
    ]
}

fn check_found(name: &str, traced: &SearchRun, target: i64) -> Result<(), TestCaseError> {
    prop_assert!(traced.result.found, "{} missed {}", name, target);
    let index = traced.result.index.unwrap();
    let last = traced.final_step().unwrap();
    prop_assert_eq!(last.state.found, Some(index), "{}", name);
    prop_assert_eq!(last.state.array[index], target, "{}", name);
    Ok(())
}

proptest! {
    #[test]
    fn present_targets_are_found(
        values in prop::collection::vec(-1000i64..1000, 1..40),
        pick in any::<prop::sample::Index>(),
    ) {
        let target = values[pick.index(values.len())];
        let query = SearchQuery::new(values.clone(), target);
        for (name, traced) in ordered_searches(&query) {
            check_found(name, &traced, target)?;
        }

        let linear = TraceEngine::new(LinearSearch).run(&query);
        let first = values.iter().position(|&v| v == target);
        prop_assert_eq!(linear.result.index, first);
    }

    #[test]
    fn absent_targets_report_minus_one(
        values in prop::collection::vec(-500i64..500, 0..40),
        target in -600i64..600,
    ) {
        prop_assume!(!values.contains(&target));
        let query = SearchQuery::new(values, target);
        for (name, traced) in ordered_searches(&query) {
            prop_assert!(!traced.result.found, "{}", name);
            prop_assert_eq!(traced.result.display_index(), -1, "{}", name);
            prop_assert!(traced.final_step().unwrap().state.found.is_none(), "{}", name);
        }
        let linear = TraceEngine::new(LinearSearch).run(&query);
        prop_assert_eq!(linear.result, SearchOutcome::miss());
    }

    #[test]
    fn probes_stay_in_bounds(
        values in prop::collection::vec(-100i64..100, 0..30),
        target in -120i64..120,
    ) {
        let query = SearchQuery::new(values, target);
        for (name, traced) in ordered_searches(&query) {
            for record in &traced.trace {
                let s = &record.state;
                let n = s.array.len();
                prop_assert!(s.probe.map_or(true, |i| i < n), "{}: {}", name, record.narration);
                prop_assert!(s.high.map_or(true, |i| i < n), "{}: {}", name, record.narration);
                if let Some((from, to)) = s.block {
                    prop_assert!(from <= to && to < n, "{}: {}", name, record.narration);
                }
            }
        }
    }

    #[test]
    fn binary_search_probes_logarithmically(len in 1usize..2000, target in -10i64..4010) {
        let values: Vec<i64> = (0..len as i64).map(|i| i * 2).collect();
        let traced = TraceEngine::new(BinarySearch).run(&SearchQuery::new(values, target));
        let probes = traced.trace.iter().filter(|r| r.state.probe.is_some()).count();
        let bound = usize::BITS - len.leading_zeros() + 1;
        prop_assert!(probes <= bound as usize + 1, "{} probes for length {}", probes, len);
    }
}

#[test]
fn sorted_copy_is_what_gets_reported() {
    let query = SearchQuery::new(vec![9, 4, 7, 1], 7);
    let traced = TraceEngine::new(BinarySearch).run(&query);
    assert_eq!(traced.result, SearchOutcome::hit(2));
    assert!(traced.trace.iter().all(|r| r.state.array == [1, 4, 7, 9]));

    // linear search keeps the caller's order
    let traced = TraceEngine::new(LinearSearch).run(&query);
    assert_eq!(traced.result, SearchOutcome::hit(2));
    assert_eq!(traced.final_step().unwrap().state.array, [9, 4, 7, 1]);
}

#[test]
fn empty_array_is_a_single_step() {
    let query = SearchQuery::new(Vec::new(), 3);
    for (name, traced) in ordered_searches(&query) {
        assert_eq!(traced.trace.len(), 1, "{name}");
        assert_eq!(traced.result, SearchOutcome::miss(), "{name}");
    }
}

#[test]
fn jump_search_reports_block() {
    let values: Vec<i64> = (1..=16).collect();
    let traced = TraceEngine::new(JumpSearch).run(&SearchQuery::new(values, 11));
    assert_eq!(traced.result.index, Some(10));
    let block = traced.trace.iter().find_map(|r| r.state.block).unwrap();
    assert_eq!(block, (8, 11));
    assert!(traced.trace.iter().all(|r| r.state.jump_size.map_or(true, |j| j == 4)));
}
