//! Puzzle description: slots, overlaps and the word list

pub mod variable;
pub mod structure;
pub mod io;

pub use variable::{Direction, Variable};
pub use structure::{Crossword, Overlap};
pub use io::{load_crossword, parse_structure, parse_words, structure_to_string, create_example_puzzles};
