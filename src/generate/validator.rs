//! Independent re-checking of crossword fills

use super::Solution;
use crate::crossword::{Crossword, Variable};
use crate::csp::Assignment;
use crate::error::CrosswordError;
use anyhow::Result;
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;

/// Validates assignments against a puzzle description
pub struct SolutionValidator<'a> {
    crossword: &'a Crossword,
}

/// Result of solution validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
    pub error_message: Option<String>,
    pub details: ValidationDetails,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationDetails {
    pub slots_total: usize,
    pub slots_filled: usize,
    pub pairs_checked: usize,
}

/// A single broken constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MissingVariable(Variable),
    /// A saved solution places more than one word in the same slot
    RepeatedSlot { variable: Variable, word: String },
    WrongLength { variable: Variable, word: String },
    DuplicateWord { first: Variable, second: Variable, word: String },
    LetterConflict { first: Variable, second: Variable, first_letter: char, second_letter: char },
    NotInWordList { variable: Variable, word: String },
}

impl<'a> SolutionValidator<'a> {
    pub fn new(crossword: &'a Crossword) -> Self {
        Self { crossword }
    }

    /// Check a (possibly partial) assignment and list every violation
    pub fn validate(&self, assignment: &Assignment) -> ValidationResult {
        self.validate_with(assignment, Vec::new())
    }

    fn validate_with(&self, assignment: &Assignment, mut violations: Vec<Violation>) -> ValidationResult {

        for &var in self.crossword.variables() {
            if !assignment.contains_key(&var) {
                violations.push(Violation::MissingVariable(var));
            }
        }

        for (&variable, word) in assignment {
            if word.len() != variable.length {
                violations.push(Violation::WrongLength { variable, word: word.clone() });
            }
            if !self.crossword.words().contains(word) {
                violations.push(Violation::NotInWordList { variable, word: word.clone() });
            }
        }

        let mut pairs_checked = 0;
        for ((&x, wx), (&y, wy)) in assignment.iter().tuple_combinations() {
            pairs_checked += 1;

            if wx == wy {
                violations.push(Violation::DuplicateWord { first: x, second: y, word: wx.clone() });
            }

            if let Some((i, j)) = self.crossword.overlap(x, y) {
                let a = wx.chars().nth(i);
                let b = wy.chars().nth(j);
                if let (Some(first_letter), Some(second_letter)) = (a, b) {
                    if first_letter != second_letter {
                        violations.push(Violation::LetterConflict { first: x, second: y, first_letter, second_letter });
                    }
                }
            }
        }

        let details = ValidationDetails {
            slots_total: self.crossword.variables().len(),
            slots_filled: assignment.len(),
            pairs_checked,
        };

        let is_valid = violations.is_empty();
        let error_message = if is_valid {
            None
        } else {
            Some(Self::generate_error_message(&violations))
        };

        ValidationResult {
            is_valid,
            violations,
            error_message,
            details,
        }
    }

    /// Match the placed words of a saved solution to this puzzle's slots and check them
    pub fn validate_solution(&self, solution: &Solution) -> Result<ValidationResult> {
        let mut assignment = BTreeMap::new();
        let mut repeated = Vec::new();

        for entry in &solution.entries {
            let variable = self
                .crossword
                .find_variable(entry.row, entry.col, entry.direction)
                .ok_or(CrosswordError::UnknownSlot {
                    row: entry.row,
                    col: entry.col,
                    direction: entry.direction,
                    length: entry.word.len(),
                })?;
            if assignment.insert(variable, entry.word.clone()).is_some() {
                repeated.push(Violation::RepeatedSlot { variable, word: entry.word.clone() });
            }
        }

        Ok(self.validate_with(&assignment, repeated))
    }

    fn generate_error_message(violations: &[Violation]) -> String {
        let mut message = format!("Found {} violations. ", violations.len());

        for (i, violation) in violations.iter().take(3).enumerate() {
            if i == 0 {
                message.push_str("Examples: ");
            }
            message.push_str(&format!("{}; ", violation));
        }

        if violations.len() > 3 {
            message.push_str(&format!("... and {} more", violations.len() - 3));
        }

        message
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingVariable(var) => write!(f, "slot {} has no word", var),
            Violation::RepeatedSlot { variable, word } => {
                write!(f, "slot {} is filled more than once (again with {})", variable, word)
            }
            Violation::WrongLength { variable, word } => {
                write!(f, "{} does not fit slot {}", word, variable)
            }
            Violation::DuplicateWord { first, second, word } => {
                write!(f, "{} used for both {} and {}", word, first, second)
            }
            Violation::LetterConflict { first, second, first_letter, second_letter } => write!(
                f,
                "slots {} and {} disagree on a shared cell ({} vs {})",
                first, second, first_letter, second_letter
            ),
            Violation::NotInWordList { variable, word } => {
                write!(f, "{} in slot {} is not in the word list", word, variable)
            }
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result: {}", if self.is_valid { "VALID" } else { "INVALID" })?;

        if let Some(ref error) = self.error_message {
            writeln!(f, "Error: {}", error)?;
        }

        writeln!(f, "Slots filled: {}/{}", self.details.slots_filled, self.details.slots_total)?;
        writeln!(f, "Pairs checked: {}", self.details.pairs_checked)?;
        writeln!(f, "Violations: {}", self.violations.len())?;
        for violation in &self.violations {
            writeln!(f, "  - {}", violation)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::{parse_structure, Direction};
    use crate::csp::SearchStatistics;
    use std::time::Duration;

    fn cross() -> Crossword {
        let words = ["WORD", "OWE", "RED", "CAT"].iter().map(|w| w.to_string());
        Crossword::from_cells(parse_structure("_###\n____\n_###\n"), words).unwrap()
    }

    fn down() -> Variable {
        Variable::new(0, 0, Direction::Down, 3)
    }

    fn across() -> Variable {
        Variable::new(1, 0, Direction::Across, 4)
    }

    #[test]
    fn test_valid_assignment() {
        let cw = cross();
        let validator = SolutionValidator::new(&cw);

        let mut assignment = Assignment::new();
        assignment.insert(across(), "WORD".to_string());
        assignment.insert(down(), "OWE".to_string());

        let result = validator.validate(&assignment);
        assert!(result.is_valid);
        assert!(result.error_message.is_none());
        assert_eq!(result.details.pairs_checked, 1);
    }

    #[test]
    fn test_reports_each_violation() {
        let cw = cross();
        let validator = SolutionValidator::new(&cw);

        let mut assignment = Assignment::new();
        assignment.insert(across(), "WORD".to_string());
        assignment.insert(down(), "RED".to_string());

        let result = validator.validate(&assignment);
        assert!(!result.is_valid);
        assert_eq!(
            result.violations,
            vec![Violation::LetterConflict {
                first: down(),
                second: across(),
                first_letter: 'E',
                second_letter: 'W',
            }]
        );
    }

    #[test]
    fn test_missing_and_unknown_words() {
        let cw = cross();
        let validator = SolutionValidator::new(&cw);

        let mut assignment = Assignment::new();
        assignment.insert(down(), "ZZZ".to_string());

        let result = validator.validate(&assignment);
        assert!(result.violations.contains(&Violation::MissingVariable(across())));
        assert!(result.violations.contains(&Violation::NotInWordList { variable: down(), word: "ZZZ".to_string() }));
        assert!(result.error_message.unwrap().contains("2 violations"));
    }

    #[test]
    fn test_duplicates_and_lengths() {
        let words = ["CAT"].iter().map(|w| w.to_string());
        let cw = Crossword::from_cells(parse_structure("___\n###\n___\n"), words).unwrap();
        let validator = SolutionValidator::new(&cw);
        let top = cw.variables()[0];
        let bottom = cw.variables()[1];

        let mut assignment = Assignment::new();
        assignment.insert(top, "CAT".to_string());
        assignment.insert(bottom, "CAT".to_string());
        let result = validator.validate(&assignment);
        assert_eq!(
            result.violations,
            vec![Violation::DuplicateWord { first: top, second: bottom, word: "CAT".to_string() }]
        );

        assignment.insert(bottom, "CATS".to_string());
        let result = validator.validate(&assignment);
        assert!(result.violations.iter().any(|v| matches!(v, Violation::WrongLength { .. })));
    }

    #[test]
    fn test_validate_saved_solution() {
        let cw = cross();
        let validator = SolutionValidator::new(&cw);

        let mut assignment = Assignment::new();
        assignment.insert(across(), "WORD".to_string());
        assignment.insert(down(), "OWE".to_string());
        let mut solution = Solution::new(&cw, &assignment, SearchStatistics::default(), Duration::ZERO);

        assert!(validator.validate_solution(&solution).unwrap().is_valid);

        solution.entries[0].col = 2;
        assert!(validator.validate_solution(&solution).is_err());
    }

    #[test]
    fn test_saved_solution_with_repeated_slot() {
        let cw = cross();
        let validator = SolutionValidator::new(&cw);

        let mut assignment = Assignment::new();
        assignment.insert(across(), "WORD".to_string());
        assignment.insert(down(), "OWE".to_string());
        let mut solution = Solution::new(&cw, &assignment, SearchStatistics::default(), Duration::ZERO);

        // The later entry wins the slot, but the repeat is still reported
        let mut repeat = solution.entries[0].clone();
        repeat.word = "RED".to_string();
        let slot = repeat.variable();
        solution.entries.insert(0, repeat);

        let result = validator.validate_solution(&solution).unwrap();
        assert!(!result.is_valid);
        assert_eq!(
            result.violations,
            vec![Violation::RepeatedSlot { variable: slot, word: solution.entries[1].word.clone() }]
        );
        assert!(result.to_string().contains("filled more than once"));
    }
}
