//! Static puzzle description: grid structure, slots and the overlap table

use super::{Direction, Variable};
use crate::error::CrosswordError;
use anyhow::Result;
use itertools::Itertools;
use std::collections::{BTreeSet, HashMap};

/// Shared cell of two intersecting slots: (index in first, index in second)
pub type Overlap = (usize, usize);

/// Immutable description of a crossword puzzle
#[derive(Debug, Clone)]
pub struct Crossword {
    pub width: usize,
    pub height: usize,
    /// Row-major open/blocked flags, `true` for cells that take a letter
    structure: Vec<bool>,
    words: BTreeSet<String>,
    variables: Vec<Variable>,
    overlaps: HashMap<(Variable, Variable), Overlap>,
    neighbors: HashMap<Variable, Vec<Variable>>,
}

impl Crossword {
    /// Build a puzzle from a 2D open-cell mask and a word list.
    ///
    /// Rows shorter than the widest one are padded with blocked cells.
    pub fn from_cells<I>(cells: Vec<Vec<bool>>, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        if cells.is_empty() {
            return Err(CrosswordError::EmptyStructure.into());
        }

        let height = cells.len();
        let width = cells.iter().map(Vec::len).max().unwrap_or(0);

        let mut structure = Vec::with_capacity(width * height);
        for row in cells {
            let padding = width - row.len();
            structure.extend(row);
            structure.extend(std::iter::repeat(false).take(padding));
        }

        let mut crossword = Self {
            width,
            height,
            structure,
            words: words.into_iter().collect(),
            variables: Vec::new(),
            overlaps: HashMap::new(),
            neighbors: HashMap::new(),
        };
        crossword.variables = crossword.find_variables();
        crossword.compute_overlaps();

        log::debug!(
            "Built {}x{} crossword with {} slots, {} overlaps and {} words",
            crossword.width,
            crossword.height,
            crossword.variables.len(),
            crossword.overlaps.len() / 2,
            crossword.words.len()
        );

        Ok(crossword)
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Whether the cell takes a letter; out-of-bounds cells are blocked
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.structure[self.index(row, col)]
    }

    /// Number of cells that take a letter
    pub fn open_count(&self) -> usize {
        self.structure.iter().filter(|&&open| open).count()
    }

    /// Scan the grid row by row for maximal runs of at least two open cells
    fn find_variables(&self) -> Vec<Variable> {
        let mut variables = Vec::new();

        for row in 0..self.height {
            for col in 0..self.width {
                if !self.is_open(row, col) {
                    continue;
                }

                let starts_across = col == 0 || !self.is_open(row, col - 1);
                if starts_across {
                    let length = (col..self.width)
                        .take_while(|&c| self.is_open(row, c))
                        .count();
                    if length > 1 {
                        variables.push(Variable::new(row, col, Direction::Across, length));
                    }
                }

                let starts_down = row == 0 || !self.is_open(row - 1, col);
                if starts_down {
                    let length = (row..self.height)
                        .take_while(|&r| self.is_open(r, col))
                        .count();
                    if length > 1 {
                        variables.push(Variable::new(row, col, Direction::Down, length));
                    }
                }
            }
        }

        variables
    }

    fn compute_overlaps(&mut self) {
        for (&a, &b) in self.variables.iter().tuple_combinations() {
            let b_cells = b.cells();
            let shared = a
                .cells()
                .into_iter()
                .enumerate()
                .find_map(|(i, cell)| b_cells.iter().position(|&c| c == cell).map(|j| (i, j)));

            if let Some((i, j)) = shared {
                self.overlaps.insert((a, b), (i, j));
                self.overlaps.insert((b, a), (j, i));
            }
        }

        // Neighbour lists follow slot order so that iteration is reproducible
        for &x in &self.variables {
            let list: Vec<Variable> = self
                .variables
                .iter()
                .copied()
                .filter(|&y| self.overlaps.contains_key(&(x, y)))
                .collect();
            self.neighbors.insert(x, list);
        }
    }

    /// All slots in discovery order
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The word list the puzzle was built with
    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    /// Shared cell of `x` and `y`, or `None` when they do not intersect
    pub fn overlap(&self, x: Variable, y: Variable) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// Slots that share a cell with `var`
    pub fn neighbors(&self, var: Variable) -> &[Variable] {
        self.neighbors.get(&var).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of neighbours of `var`
    pub fn degree(&self, var: Variable) -> usize {
        self.neighbors(var).len()
    }

    /// Number of directed arcs, i.e. ordered intersecting pairs
    pub fn arc_count(&self) -> usize {
        self.overlaps.len()
    }

    /// Look up the slot starting at a cell in a given direction
    pub fn find_variable(&self, row: usize, col: usize, direction: Direction) -> Option<Variable> {
        self.variables
            .iter()
            .copied()
            .find(|v| v.row == row && v.col == col && v.direction == direction)
    }
}
