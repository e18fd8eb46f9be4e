//! Filled crossword representation

use crate::crossword::{Crossword, Direction, Variable};
use crate::csp::{Assignment, SearchStatistics};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Character drawn for blocked cells
pub const BLOCKED_CELL: char = '█';

/// A word placed in one slot of the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub word: String,
}

impl PlacedWord {
    pub fn variable(&self) -> Variable {
        Variable::new(self.row, self.col, self.direction, self.word.len())
    }
}

/// A complete fill of a crossword
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub width: usize,
    pub height: usize,
    /// Placed words in slot order
    pub entries: Vec<PlacedWord>,
    /// Open/blocked flags, row by row
    pub structure: Vec<Vec<bool>>,
    /// Letter projected onto each cell, `None` where no word covers it
    pub letters: Vec<Vec<Option<char>>>,
    /// Time taken by consistency enforcement and search
    #[serde(skip)]
    pub solve_time: Duration,
    pub statistics: SearchStatistics,
}

impl Solution {
    /// Create a new solution from a complete assignment
    pub fn new(
        crossword: &Crossword,
        assignment: &Assignment,
        statistics: SearchStatistics,
        solve_time: Duration,
    ) -> Self {
        let entries = assignment
            .iter()
            .map(|(var, word)| PlacedWord {
                row: var.row,
                col: var.col,
                direction: var.direction,
                word: word.clone(),
            })
            .collect();

        let structure = (0..crossword.height)
            .map(|row| (0..crossword.width).map(|col| crossword.is_open(row, col)).collect())
            .collect();

        Self {
            width: crossword.width,
            height: crossword.height,
            entries,
            structure,
            letters: letter_grid(crossword, assignment),
            solve_time,
            statistics,
        }
    }

    /// Rebuild the slot → word mapping
    pub fn assignment(&self) -> Assignment {
        self.entries
            .iter()
            .map(|entry| (entry.variable(), entry.word.clone()))
            .collect()
    }

    /// Letter at a cell, if any
    pub fn letter(&self, row: usize, col: usize) -> Option<char> {
        self.letters.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json().context("Failed to serialize solution")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write solution: {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read solution: {}", path.as_ref().display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse solution: {}", path.as_ref().display()))
    }
}

/// Project each assigned word onto the grid, letter `k` on the `k`-th cell of its slot
pub fn letter_grid(crossword: &Crossword, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; crossword.width]; crossword.height];

    for (var, word) in assignment {
        for (k, ch) in word.chars().enumerate().take(var.length) {
            let (row, col) = var.cell(k);
            if let Some(cell) = letters.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = Some(ch);
            }
        }
    }

    letters
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let open = self.structure.get(row).and_then(|r| r.get(col)).copied().unwrap_or(false);
                let ch = if open {
                    self.letter(row, col).unwrap_or(' ')
                } else {
                    BLOCKED_CELL
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
