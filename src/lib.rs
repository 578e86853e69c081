//! Instrumented algorithm traces
//!
//! This crate runs textbook algorithms in a mode where every meaningful
//! intermediate state is captured as a narrated step, and provides a playback
//! state machine for stepping through the result.
//!
//! ## Core idea
//! 1. Each algorithm implements [`TracedAlgorithm`] and writes value
//!    snapshots into a [`Recorder`] as it works.
//! 2. [`TraceEngine`] runs it and returns the answer together with the sealed
//!    [`Trace`].
//! 3. [`PlaybackController`] takes ownership of a trace and exposes
//!    play/pause/step/reset over it, with cooperative auto-advance.
//!
//! ## Quick start
//! ```
//! use algo_trace::{TraceEngine, algorithms::searching::{BinarySearch, SearchQuery}};
//!
//! let query = SearchQuery::new(vec![1, 3, 5, 7, 9, 11, 13, 15, 17, 19], 7);
//! let traced = TraceEngine::new(BinarySearch).run(&query);
//! assert!(traced.result.found);
//! assert_eq!(traced.result.index, Some(3));
//! assert!(traced.trace.len() > 1);
//! ```
//!
//! ## From raw text to playback
//! ```
//! use algo_trace::{input, registry, PlaybackController, PlaybackState};
//!
//! let bfs = registry().get("graph/bfs").unwrap();
//! let fields = [("vertices", "4"), ("edges", "0-1,1-2,2-3,3-0,1-3"), ("start", "0")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//! let args = input::parse_args(bfs.args, &fields).unwrap();
//!
//! let mut player = PlaybackController::new();
//! let output = player.run(bfs, &args).unwrap();
//! assert_eq!(output.to_string(), "0 → 1 → 3 → 2");
//! assert_eq!(player.state(), PlaybackState::Ready);
//! ```
//!
//! ## Families
//! The `algorithms` module holds six families:
//! - sorting (bubble, selection, insertion, merge, quick, heap)
//! - searching (linear, binary, jump, interpolation)
//! - graph (BFS, DFS, Dijkstra)
//! - divide and conquer (merge sort, quick sort, binary search, maximum
//!   subarray, matrix multiplication)
//! - dynamic programming (Fibonacci, 0/1 knapsack, LCS, coin change)
//! - greedy (activity selection, fractional knapsack, Huffman coding, job
//!   sequencing)
//!
//! Every one of them is listed in the [`registry()`] under a stable key such
//! as `sorting/bubble-sort`.

pub mod algorithms;
pub mod builder;
pub mod engine;
pub mod error;
pub mod input;
pub mod playback;
pub mod registry;
pub mod step;
pub mod trace;
pub mod traits;
pub mod utils;

pub use crate::builder::PlaybackBuilder;
pub use crate::engine::TraceEngine;
pub use crate::error::{Error, InputError, PlaybackError};
pub use crate::playback::{Frame, PlaybackController, PlaybackState, TickOutcome, TickToken};
pub use crate::registry::{registry, AlgorithmArgs, AlgorithmDescriptor, AlgorithmOutput, Family};
pub use crate::step::Step;
pub use crate::trace::{Recorder, StepRecord, Trace, Traced};
pub use crate::traits::TracedAlgorithm;
