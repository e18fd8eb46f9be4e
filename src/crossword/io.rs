//! File I/O for puzzle structures and word lists

use super::Crossword;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;

/// Character marking a cell that takes a letter; anything else is blocked
pub const OPEN_CELL: char = '_';

/// Load a puzzle from a structure file and a word-list file
pub fn load_crossword<P: AsRef<Path>, Q: AsRef<Path>>(structure_path: P, words_path: Q) -> Result<Crossword> {
    let structure = std::fs::read_to_string(&structure_path)
        .with_context(|| format!("Failed to read structure file: {}", structure_path.as_ref().display()))?;
    let words = std::fs::read_to_string(&words_path)
        .with_context(|| format!("Failed to read word list: {}", words_path.as_ref().display()))?;

    Crossword::from_cells(parse_structure(&structure), parse_words(&words))
        .with_context(|| format!("Failed to build crossword from {}", structure_path.as_ref().display()))
}

/// Parse a structure file: one row per line, `_` for open cells.
///
/// Rows keep their own length; padding to a rectangle happens when the
/// crossword is built.
pub fn parse_structure(content: &str) -> Vec<Vec<bool>> {
    content
        .lines()
        .map(|line| line.trim_end_matches('\r').chars().map(|ch| ch == OPEN_CELL).collect())
        .collect()
}

/// Parse a word list: one word per line, upper-cased, blank lines ignored.
///
/// Letter positions are byte offsets, so words with non-ASCII characters are
/// dropped.
pub fn parse_words(content: &str) -> BTreeSet<String> {
    let mut words = BTreeSet::new();

    for line in content.lines() {
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        if !word.is_ascii() {
            log::warn!("Skipping non-ASCII word {:?}", word);
            continue;
        }
        words.insert(word.to_ascii_uppercase());
    }

    words
}

/// Render a structure back to its file representation
pub fn structure_to_string(crossword: &Crossword) -> String {
    let mut result = String::with_capacity(crossword.height * (crossword.width + 1));

    for row in 0..crossword.height {
        for col in 0..crossword.width {
            result.push(if crossword.is_open(row, col) { OPEN_CELL } else { '#' });
        }
        result.push('\n');
    }

    result
}

/// Create example structure and word files for trying the solver out
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Two slots crossing at a single cell
    let cross_structure = "_###\n____\n_###\n";
    std::fs::write(dir.join("cross.txt"), cross_structure)
        .context("Failed to write cross.txt")?;
    let cross_words = "WORD\nOWE\nRED\nCAT\n";
    std::fs::write(dir.join("cross_words.txt"), cross_words)
        .context("Failed to write cross_words.txt")?;

    // Four slots around a blocked square
    let frame_structure = "_____\n_###_\n_###_\n_###_\n_____\n";
    std::fs::write(dir.join("frame.txt"), frame_structure)
        .context("Failed to write frame.txt")?;
    let frame_words = "CRANE\nCHEST\nEAGER\nTIGER\nAPPLE\nHOUSE\nBREAD\nPLANT\n";
    std::fs::write(dir.join("frame_words.txt"), frame_words)
        .context("Failed to write frame_words.txt")?;

    Ok(())
}
