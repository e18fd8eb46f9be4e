//! Crossword generation: problem setup, solutions and validation

pub mod problem;
pub mod solution;
pub mod validator;

pub use problem::{CrosswordProblem, PuzzleAnalysis, SlotAnalysis};
pub use solution::{Solution, PlacedWord, letter_grid};
pub use validator::{SolutionValidator, ValidationResult, Violation};
