//! Error types for loading puzzles and checking saved solutions

use thiserror::Error;

/// Errors raised while building a puzzle description or matching data against it.
///
/// Unsatisfiable puzzles are not errors: the solver reports them as `None`.
#[derive(Debug, Error)]
pub enum CrosswordError {
    #[error("structure contains no rows")]
    EmptyStructure,

    #[error("no {direction} slot of length {length} starts at ({row}, {col})")]
    UnknownSlot {
        row: usize,
        col: usize,
        direction: crate::crossword::Direction,
        length: usize,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
