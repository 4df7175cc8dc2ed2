//! Error types
//!
//! The engine itself never fails once a grid exists; these cover
//! construction and configuration.

use thiserror::Error;

/// Rejected grid construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("lit probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("board is {rows}x{cols} but settings ask for {expected_rows}x{expected_cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },
    #[error("unexpected cell character {ch:?} at row {row}, column {col}")]
    BadCell { ch: char, row: usize, col: usize },
}

/// Failure loading or validating [`Settings`](crate::Settings)
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(#[from] GridError),
}
