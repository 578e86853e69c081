//! Step records, traces and the append-only recorder.
//!
//! A [`Trace`] is the finished, read-only product of one algorithm run. The
//! only way to build one is through a [`Recorder`], which can append but
//! never remove or edit, and which is consumed by [`Recorder::finish`].

use serde::{Deserialize, Serialize};

/// One narrated state of an algorithm at a point in its execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord<S> {
    /// Human-readable description of what just happened.
    pub narration: String,
    /// Value snapshot of the relevant data plus highlight metadata.
    pub state: S,
}

/// Ordered, finite sequence of step records produced by one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace<S> {
    records: Vec<StepRecord<S>>,
}

impl<S> Trace<S> {
    /// Number of recorded steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepRecord<S>> {
        self.records.get(index)
    }

    pub fn first(&self) -> Option<&StepRecord<S>> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&StepRecord<S>> {
        self.records.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepRecord<S>> {
        self.records.iter()
    }

    pub fn records(&self) -> &[StepRecord<S>] {
        &self.records
    }

    /// Convert every state into another step type, keeping narrations.
    ///
    /// Used to lift a family-specific trace into the umbrella [`crate::Step`].
    pub fn map_state<T>(self, f: impl FnMut(S) -> T) -> Trace<T> {
        let mut f = f;
        Trace {
            records: self
                .records
                .into_iter()
                .map(|r| StepRecord {
                    narration: r.narration,
                    state: f(r.state),
                })
                .collect(),
        }
    }
}

impl<'a, S> IntoIterator for &'a Trace<S> {
    type Item = &'a StepRecord<S>;
    type IntoIter = std::slice::Iter<'a, StepRecord<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Append-only log that algorithms write their steps into.
#[derive(Debug)]
pub struct Recorder<S> {
    records: Vec<StepRecord<S>>,
}

impl<S> Default for Recorder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Recorder<S> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Append one step. `state` must be an owned copy, never a view into data
    /// the algorithm will keep mutating.
    #[inline]
    pub fn record(&mut self, narration: impl Into<String>, state: S) {
        self.records.push(StepRecord {
            narration: narration.into(),
            state,
        });
    }

    /// Steps recorded so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Seal the log.
    pub fn finish(self) -> Trace<S> {
        Trace {
            records: self.records,
        }
    }
}

/// Result of an instrumented run: the algorithm's answer plus its trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traced<R, S> {
    pub result: R,
    pub trace: Trace<S>,
}

impl<R, S> Traced<R, S> {
    /// The last recorded step; present for every trace built by the engine.
    pub fn final_step(&self) -> Option<&StepRecord<S>> {
        self.trace.last()
    }
}
