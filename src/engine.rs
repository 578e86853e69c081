//! Trace engine.
//!
//! Runs one [`TracedAlgorithm`] with a fresh [`Recorder`] and hands back the
//! result together with the sealed trace. The engine owns nothing once `run`
//! returns, so the same engine can be run any number of times.

use crate::trace::{Recorder, Traced};
use crate::traits::TracedAlgorithm;

/// Drives an instrumented algorithm.
///
/// Typical usage:
/// ```
/// use algo_trace::{TraceEngine, algorithms::sorting::BubbleSort};
///
/// let traced = TraceEngine::new(BubbleSort).run(&[5, 2, 8, 1, 9, 4]);
/// assert_eq!(traced.result, vec![1, 2, 4, 5, 8, 9]);
/// assert!(!traced.trace.is_empty());
/// ```
pub struct TraceEngine<A: TracedAlgorithm> {
    algorithm: A,
}

impl<A: TracedAlgorithm> TraceEngine<A> {
    pub fn new(algorithm: A) -> Self {
        Self { algorithm }
    }

    /// Expose the wrapped algorithm.
    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Run the algorithm to completion.
    ///
    /// # Panics
    /// Panics if the algorithm returns without recording a single step; every
    /// implementation must narrate even degenerate input.
    pub fn run(&self, input: &A::Input) -> Traced<A::Output, A::Step> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("trace_run", algorithm = self.algorithm.name());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut recorder = Recorder::with_capacity(self.algorithm.step_hint(input));
        let result = self.algorithm.execute(input, &mut recorder);
        let trace = recorder.finish();

        assert!(
            !trace.is_empty(),
            "{} finished without recording a step",
            self.algorithm.name()
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(steps = trace.len(), "trace recorded");

        Traced { result, trace }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountDown;

    impl TracedAlgorithm for CountDown {
        type Input = u32;
        type Output = u32;
        type Step = u32;

        fn name(&self) -> &'static str {
            "count-down"
        }

        fn execute(&self, input: &u32, recorder: &mut Recorder<u32>) -> u32 {
            let mut n = *input;
            recorder.record(format!("start at {n}"), n);
            while n > 0 {
                n -= 1;
                recorder.record(format!("down to {n}"), n);
            }
            n
        }

        fn step_hint(&self, input: &u32) -> usize {
            *input as usize + 1
        }
    }

    struct Silent;

    impl TracedAlgorithm for Silent {
        type Input = ();
        type Output = ();
        type Step = ();

        fn name(&self) -> &'static str {
            "silent"
        }

        fn execute(&self, _input: &(), _recorder: &mut Recorder<()>) {}
    }

    #[test]
    fn run_returns_result_and_trace() {
        let traced = TraceEngine::new(CountDown).run(&3);
        assert_eq!(traced.result, 0);
        assert_eq!(traced.trace.len(), 4);
        assert_eq!(traced.final_step().unwrap().narration, "down to 0");
    }

    #[test]
    fn engine_is_reusable() {
        let engine = TraceEngine::new(CountDown);
        let a = engine.run(&2);
        let b = engine.run(&2);
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "without recording a step")]
    fn silent_algorithm_violates_contract() {
        let _ = TraceEngine::new(Silent).run(&());
    }
}
