//! Crossword Generator
//!
//! Fills a crossword grid from a word list by treating every slot as a
//! constraint-satisfaction variable: node consistency, AC-3 arc consistency
//! and heuristic backtracking search.

pub mod config;
pub mod crossword;
pub mod csp;
pub mod error;
pub mod generate;
pub mod utils;

pub use config::Settings;
pub use crossword::{Crossword, Direction, Variable};
pub use error::CrosswordError;
pub use generate::{CrosswordProblem, Solution};

use anyhow::Result;

/// Main entry point: load the configured puzzle and fill it
pub fn generate_crossword(settings: Settings) -> Result<Option<Solution>> {
    let mut problem = CrosswordProblem::new(settings)?;
    problem.solve()
}
