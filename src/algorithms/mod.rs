//! Instrumented algorithm families.
//!
//! Each family module exposes zero-sized structs implementing
//! [`crate::TracedAlgorithm`], the step type its traces carry, and the typed
//! inputs and outcomes its algorithms use.

pub mod divide_conquer;
pub mod dynamic;
pub mod graph;
pub mod greedy;
pub mod searching;
pub mod sorting;
