//! Heuristic backtracking search over slot assignments

use super::assignment::{is_complete, is_consistent, Assignment};
use super::consistency::{ac3, letter, Arc};
use super::DomainStore;
use crate::config::{Inference, SolverConfig, ValueOrdering, VariableOrdering};
use crate::crossword::{Crossword, Variable};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::time::{Duration, Instant};

/// Heuristics and inference used by the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub variable_ordering: VariableOrdering,
    pub value_ordering: ValueOrdering,
    pub inference: Inference,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            variable_ordering: VariableOrdering::MinimumRemainingValues,
            value_ordering: ValueOrdering::LeastConstraining,
            inference: Inference::None,
        }
    }
}

impl From<&SolverConfig> for SearchOptions {
    fn from(config: &SolverConfig) -> Self {
        Self {
            variable_ordering: config.variable_ordering,
            value_ordering: config.value_ordering,
            inference: config.inference,
        }
    }
}

/// Counters collected during one search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatistics {
    /// Calls into the recursive step
    pub nodes: usize,
    /// Consistent choices undone after their subtree failed
    pub backtracks: usize,
    pub consistency_checks: usize,
    /// Choices rejected because inference emptied a domain
    pub inference_failures: usize,
    pub max_depth: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Depth-first backtracking search.
///
/// The store handed in is never modified. With [`Inference::ArcConsistency`]
/// the search narrows a private copy of it and snapshots that copy around
/// every choice.
pub struct Backtracker<'a> {
    crossword: &'a Crossword,
    shared: &'a DomainStore,
    working: Option<DomainStore>,
    options: SearchOptions,
    statistics: SearchStatistics,
}

impl<'a> Backtracker<'a> {
    pub fn new(crossword: &'a Crossword, domains: &'a DomainStore, options: SearchOptions) -> Self {
        Self {
            crossword,
            shared: domains,
            working: None,
            options,
            statistics: SearchStatistics::default(),
        }
    }

    /// Search from the empty assignment
    pub fn solve(&mut self) -> Option<Assignment> {
        self.backtrack(Assignment::new())
    }

    /// Complete `assignment` if possible.
    ///
    /// Returns `None` once every branch below `assignment` is exhausted.
    pub fn backtrack(&mut self, mut assignment: Assignment) -> Option<Assignment> {
        let start = Instant::now();
        self.statistics = SearchStatistics::default();
        self.working = match self.options.inference {
            Inference::None => None,
            Inference::ArcConsistency => Some(self.shared.clone()),
        };

        let found = self.extend(&mut assignment, 0);

        self.working = None;
        self.statistics.elapsed = start.elapsed();
        log::debug!(
            "Search {} after {} nodes and {} backtracks",
            if found { "succeeded" } else { "exhausted" },
            self.statistics.nodes,
            self.statistics.backtracks
        );

        found.then_some(assignment)
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Domains as seen by the current branch
    fn domains(&self) -> &DomainStore {
        self.working.as_ref().unwrap_or(self.shared)
    }

    fn extend(&mut self, assignment: &mut Assignment, depth: usize) -> bool {
        self.statistics.nodes += 1;
        self.statistics.max_depth = self.statistics.max_depth.max(depth);

        if is_complete(self.crossword, assignment) {
            return true;
        }

        let Some(var) = self.select_unassigned_variable(assignment) else {
            return false;
        };

        for word in self.order_domain_values(var, assignment) {
            assignment.insert(var, word.clone());
            self.statistics.consistency_checks += 1;

            if is_consistent(self.crossword, assignment) {
                log::trace!("depth {}: trying {} = {}", depth, var, word);
                if self.descend(var, &word, assignment, depth) {
                    return true;
                }
                self.statistics.backtracks += 1;
            }

            assignment.remove(&var);
        }

        false
    }

    /// Recurse below the choice `var = word`, running inference first when enabled
    fn descend(&mut self, var: Variable, word: &str, assignment: &mut Assignment, depth: usize) -> bool {
        let crossword = self.crossword;
        let Some(working) = self.working.as_mut() else {
            return self.extend(assignment, depth + 1);
        };

        let snapshot = working.snapshot();
        working.restrict_to(var, word);
        let arcs: Vec<Arc> = crossword.neighbors(var).iter().map(|&z| (z, var)).collect();

        let found = if ac3(crossword, working, Some(arcs)) {
            self.extend(assignment, depth + 1)
        } else {
            self.statistics.inference_failures += 1;
            false
        };

        if !found {
            if let Some(working) = self.working.as_mut() {
                working.restore(snapshot);
            }
        }
        found
    }

    /// Pick the next slot to fill.
    ///
    /// Minimum remaining values first, then highest degree; remaining ties go
    /// to the earliest slot.
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<Variable> {
        let domains = self.domains();
        let mut unassigned = self
            .crossword
            .variables()
            .iter()
            .copied()
            .filter(|v| !assignment.contains_key(v));

        match self.options.variable_ordering {
            VariableOrdering::Static => unassigned.next(),
            VariableOrdering::MinimumRemainingValues => {
                unassigned.min_by_key(|&v| (domains.len(v), Reverse(self.crossword.degree(v))))
            }
        }
    }

    /// Candidates for `var`, least constraining first.
    ///
    /// A candidate's cost is the number of words it would rule out in the
    /// domains of unassigned neighbours. Equal costs keep domain order.
    pub fn order_domain_values(&self, var: Variable, assignment: &Assignment) -> Vec<String> {
        let domains = self.domains();
        let candidates = domains.domain(var).iter().cloned();

        if self.options.value_ordering == ValueOrdering::Natural {
            return candidates.collect();
        }

        // Letter histogram of each unassigned neighbour at its side of the shared cell
        let profiles: Vec<(usize, usize, [usize; 256])> = self
            .crossword
            .neighbors(var)
            .iter()
            .filter(|&&n| !assignment.contains_key(&n))
            .filter_map(|&n| {
                let (i, j) = self.crossword.overlap(var, n)?;
                let mut counts = [0usize; 256];
                let mut total = 0;
                for word in domains.domain(n) {
                    if let Some(ch) = letter(word, j) {
                        counts[ch as usize] += 1;
                    }
                    total += 1;
                }
                Some((i, total, counts))
            })
            .collect();

        let mut ranked: Vec<(usize, String)> = candidates
            .map(|word| {
                let eliminated = profiles
                    .iter()
                    .map(|(i, total, counts)| match letter(&word, *i) {
                        Some(ch) => total - counts[ch as usize],
                        None => *total,
                    })
                    .sum();
                (eliminated, word)
            })
            .collect();
        ranked.sort_by_key(|(eliminated, _)| *eliminated);

        ranked.into_iter().map(|(_, word)| word).collect()
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes: {}", self.nodes)?;
        writeln!(f, "  Backtracks: {}", self.backtracks)?;
        writeln!(f, "  Consistency checks: {}", self.consistency_checks)?;
        writeln!(f, "  Inference failures: {}", self.inference_failures)?;
        writeln!(f, "  Max depth: {}", self.max_depth)?;
        writeln!(f, "  Search time: {:.3}s", self.elapsed.as_secs_f64())?;
        Ok(())
    }
}
