//! Error types.
//!
//! Algorithms themselves have no error channel: degenerate input is handled by
//! recording a single explanatory step. Errors only arise at the edges, while
//! turning raw text into typed arguments and while driving playback.

use thiserror::Error;

/// Rejected user input. No algorithm runs and no trace is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("field `{field}` is required")]
    EmptyField { field: &'static str },

    #[error("field `{field}` is missing")]
    MissingField { field: &'static str },

    #[error("`{token}` in `{field}` is not a number")]
    NonNumeric { field: &'static str, token: String },

    #[error("malformed edge `{token}`; use u-v or u-v-w")]
    MalformedEdge { token: String },

    #[error("vertex {vertex} is out of range for a graph with {vertices} vertices")]
    VertexOutOfRange { vertex: usize, vertices: usize },

    #[error("vertex count must be positive")]
    InvalidVertexCount,

    #[error("matrix `{field}` is not square (row {row} has {len} cells, expected {expected})")]
    NotSquare {
        field: &'static str,
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("matrices must have the same dimension ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },

    #[error("`{left}` has {left_len} entries but `{right}` has {right_len}")]
    LengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    #[error("malformed record `{token}` in `{field}`; expected {expected}")]
    MalformedRecord {
        field: &'static str,
        token: String,
        expected: &'static str,
    },

    #[error("activity `{name}` finishes ({finish}) before it starts ({start})")]
    InvalidInterval { name: String, start: u64, finish: u64 },

    #[error("item `{name}` must have a positive weight")]
    ZeroWeight { name: String },

    #[error("symbol `{symbol}` is listed more than once")]
    DuplicateSymbol { symbol: String },

    #[error("{field} = {value} is out of range (maximum {max})")]
    OutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("`{algorithm}` expects {expected} arguments")]
    ArgsMismatch {
        algorithm: &'static str,
        expected: &'static str,
    },
}

/// Misuse of the playback transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("no trace is loaded; run an algorithm first")]
    NoTrace,
    #[error("cannot load a trace without steps")]
    EmptyTrace,
}

/// Crate-level error for callers that go from raw input to playback.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_token() {
        let err = InputError::NonNumeric {
            field: "values",
            token: "x7".into(),
        };
        assert_eq!(err.to_string(), "`x7` in `values` is not a number");

        let err = InputError::VertexOutOfRange {
            vertex: 9,
            vertices: 4,
        };
        assert!(err.to_string().contains("vertex 9"));
    }

    #[test]
    fn umbrella_error_is_transparent() {
        let err: Error = PlaybackError::NoTrace.into();
        assert_eq!(err.to_string(), PlaybackError::NoTrace.to_string());
    }
}
