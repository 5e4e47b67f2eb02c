// error.rs - Boundary validation errors for grids and glitch levels

use thiserror::Error;

/// Rejections raised by the validating constructors at the engine boundary.
/// The engine functions themselves never fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell code {0} is not one of 0 (dead), 1 (survived), 2 (new), 3 (died)")]
    InvalidCellCode(u8),

    #[error("unknown glitch level `{0}` (expected none, low, medium or high)")]
    UnknownGlitchLevel(String),
}
