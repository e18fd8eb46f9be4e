//! Partial slot → word assignments

use super::consistency::letter;
use crate::crossword::{Crossword, Variable};
use itertools::Itertools;
use std::collections::BTreeMap;

/// Words chosen so far, keyed by slot
pub type Assignment = BTreeMap<Variable, String>;

/// Whether every slot of the puzzle has a word
pub fn is_complete(crossword: &Crossword, assignment: &Assignment) -> bool {
    crossword.variables().iter().all(|v| assignment.contains_key(v))
}

/// Whether the words fit together: correct lengths, no word used twice and
/// matching letters on every shared cell.
///
/// Recomputed from scratch on each call.
pub fn is_consistent(crossword: &Crossword, assignment: &Assignment) -> bool {
    if assignment.iter().any(|(var, word)| word.len() != var.length) {
        return false;
    }

    assignment.iter().tuple_combinations().all(|((&x, wx), (&y, wy))| {
        if wx == wy {
            return false;
        }
        match crossword.overlap(x, y) {
            Some((i, j)) => letter(wx, i) == letter(wy, j),
            None => true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::{parse_structure, Direction};

    fn cross() -> (Crossword, Variable, Variable) {
        let cw = Crossword::from_cells(parse_structure("_###\n____\n_###\n"), Vec::new()).unwrap();
        let down = Variable::new(0, 0, Direction::Down, 3);
        let across = Variable::new(1, 0, Direction::Across, 4);
        (cw, down, across)
    }

    #[test]
    fn test_empty_assignment_is_consistent_but_incomplete() {
        let (cw, _, _) = cross();
        let assignment = Assignment::new();
        assert!(is_consistent(&cw, &assignment));
        assert!(!is_complete(&cw, &assignment));
    }

    #[test]
    fn test_matching_overlap() {
        let (cw, down, across) = cross();
        let mut assignment = Assignment::new();
        assignment.insert(across, "WORD".to_string());
        assignment.insert(down, "OWE".to_string());

        assert!(is_consistent(&cw, &assignment));
        assert!(is_complete(&cw, &assignment));
    }

    #[test]
    fn test_conflicting_overlap() {
        let (cw, down, across) = cross();
        let mut assignment = Assignment::new();
        assignment.insert(across, "WORD".to_string());
        assignment.insert(down, "RED".to_string());

        assert!(!is_consistent(&cw, &assignment));
    }

    #[test]
    fn test_wrong_length_single_word() {
        let (cw, down, _) = cross();
        let mut assignment = Assignment::new();
        assignment.insert(down, "WORD".to_string());

        assert!(!is_consistent(&cw, &assignment));
    }

    #[test]
    fn test_duplicate_words() {
        let cw = Crossword::from_cells(parse_structure("___\n###\n___\n"), Vec::new()).unwrap();
        let mut assignment = Assignment::new();
        assignment.insert(cw.variables()[0], "CAT".to_string());
        assignment.insert(cw.variables()[1], "CAT".to_string());

        assert!(!is_consistent(&cw, &assignment));
    }
}
