//! Core trait for instrumented algorithms.
//!
//! To make an algorithm replayable, implement [`TracedAlgorithm`] for a
//! (usually zero-sized) struct naming the algorithm. The implementation runs
//! the algorithm on its own working copy of the input and records every
//! discrete state it wants the viewer to see.
//!
//! Contract:
//! - `execute` must record at least one step, even for degenerate input; the
//!   single step then explains why no work was done.
//! - The last recorded step summarises the final state.
//! - Every recorded state is an owned value copy.
//! - Implementations hold no state between runs.

use crate::trace::Recorder;

/// An algorithm that narrates its own execution.
pub trait TracedAlgorithm {
    /// Typed, already validated arguments.
    type Input: ?Sized;

    /// The algorithm's answer.
    type Output;

    /// Family-specific snapshot + highlight metadata.
    type Step: Clone;

    /// Display name used in logs.
    fn name(&self) -> &'static str;

    /// Run to completion, appending steps to `recorder`.
    fn execute(&self, input: &Self::Input, recorder: &mut Recorder<Self::Step>) -> Self::Output;

    /// Rough number of steps the run will record, used to pre-size the
    /// recorder. Purely an optimisation.
    fn step_hint(&self, _input: &Self::Input) -> usize {
        0
    }
}
