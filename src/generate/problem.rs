//! Crossword generation problem definition

use super::{Solution, SolutionValidator};
use crate::config::Settings;
use crate::crossword::{load_crossword, structure_to_string, Crossword, Variable};
use crate::csp::{ac3, enforce_node_consistency, Backtracker, DomainStore, SearchOptions, SearchStatistics};
use anyhow::{Context, Result};
use std::fmt;
use std::time::Instant;

/// A crossword to fill with the configured solver
pub struct CrosswordProblem {
    settings: Settings,
    crossword: Crossword,
    domains: DomainStore,
    statistics: SearchStatistics,
}

impl CrosswordProblem {
    /// Create a new problem from settings, loading the structure and word list
    pub fn new(settings: Settings) -> Result<Self> {
        let crossword = load_crossword(&settings.input.structure_file, &settings.input.words_file)
            .context("Failed to load crossword")?;

        Ok(Self::with_crossword(settings, crossword))
    }

    /// Create a problem with an explicit puzzle (useful for testing)
    pub fn with_crossword(settings: Settings, crossword: Crossword) -> Self {
        let domains = DomainStore::initialize(crossword.variables(), crossword.words());

        Self {
            settings,
            crossword,
            domains,
            statistics: SearchStatistics::default(),
        }
    }

    /// Enforce node and arc consistency, then search.
    ///
    /// `Ok(None)` means the puzzle has no fill; errors are reserved for a fill
    /// that fails independent validation.
    pub fn solve(&mut self) -> Result<Option<Solution>> {
        let start_time = Instant::now();

        log::info!(
            "Solving {}x{} crossword with {} slots and {} words",
            self.crossword.width,
            self.crossword.height,
            self.crossword.variables().len(),
            self.crossword.words().len()
        );

        self.domains = DomainStore::initialize(self.crossword.variables(), self.crossword.words());
        enforce_node_consistency(&self.crossword, &mut self.domains);

        if self.settings.solver.enforce_arc_consistency && !ac3(&self.crossword, &mut self.domains, None) {
            log::info!("Arc consistency proved the puzzle unsatisfiable");
            self.statistics = SearchStatistics::default();
            return Ok(None);
        }

        let options = SearchOptions::from(&self.settings.solver);
        let mut search = Backtracker::new(&self.crossword, &self.domains, options);
        let assignment = search.solve();
        self.statistics = search.statistics().clone();

        let Some(assignment) = assignment else {
            log::info!("Search exhausted after {} nodes", self.statistics.nodes);
            return Ok(None);
        };

        let validation = SolutionValidator::new(&self.crossword).validate(&assignment);
        if !validation.is_valid {
            anyhow::bail!(
                "Search produced an invalid fill: {}",
                validation.error_message.unwrap_or_default()
            );
        }

        let solve_time = start_time.elapsed();
        log::info!("Found a fill in {:.3}s", solve_time.as_secs_f64());

        Ok(Some(Solution::new(&self.crossword, &assignment, self.statistics.clone(), solve_time)))
    }

    /// Report domain sizes after node and arc consistency without searching
    pub fn analyze(&self) -> PuzzleAnalysis {
        let mut domains = DomainStore::initialize(self.crossword.variables(), self.crossword.words());
        enforce_node_consistency(&self.crossword, &mut domains);
        let after_node = domains.clone();
        let arc_consistent = ac3(&self.crossword, &mut domains, None);

        let slots = self
            .crossword
            .variables()
            .iter()
            .map(|&variable| SlotAnalysis {
                variable,
                degree: self.crossword.degree(variable),
                node_consistent_candidates: after_node.len(variable),
                arc_consistent_candidates: domains.len(variable),
            })
            .collect();

        PuzzleAnalysis {
            structure: structure_to_string(&self.crossword),
            width: self.crossword.width,
            height: self.crossword.height,
            open_cells: self.crossword.open_count(),
            word_count: self.crossword.words().len(),
            arc_count: self.crossword.arc_count(),
            arc_consistent,
            node_consistent_total: after_node.total_size(),
            arc_consistent_total: domains.total_size(),
            slots,
        }
    }

    pub fn crossword(&self) -> &Crossword {
        &self.crossword
    }

    /// Domains as left by the last call to [`solve`](Self::solve)
    pub fn domains(&self) -> &DomainStore {
        &self.domains
    }

    /// Search counters from the last call to [`solve`](Self::solve)
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}

/// Pre-search summary of a puzzle
#[derive(Debug, Clone)]
pub struct PuzzleAnalysis {
    /// Structure in file form
    pub structure: String,
    pub width: usize,
    pub height: usize,
    pub open_cells: usize,
    pub word_count: usize,
    pub arc_count: usize,
    /// `false` when AC-3 alone proves that no fill exists
    pub arc_consistent: bool,
    pub node_consistent_total: usize,
    pub arc_consistent_total: usize,
    pub slots: Vec<SlotAnalysis>,
}

#[derive(Debug, Clone)]
pub struct SlotAnalysis {
    pub variable: Variable,
    pub degree: usize,
    pub node_consistent_candidates: usize,
    pub arc_consistent_candidates: usize,
}

impl fmt::Display for PuzzleAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Puzzle Analysis:")?;
        for line in self.structure.lines() {
            writeln!(f, "  {}", line)?;
        }
        writeln!(f, "  Grid: {}x{} ({} open cells)", self.width, self.height, self.open_cells)?;
        writeln!(f, "  Slots: {}", self.slots.len())?;
        writeln!(f, "  Arcs: {}", self.arc_count)?;
        writeln!(f, "  Words: {}", self.word_count)?;
        writeln!(
            f,
            "  Arc consistency: {}",
            if self.arc_consistent { "holds" } else { "fails (no fill exists)" }
        )?;
        writeln!(
            f,
            "  Candidates: {} -> {}",
            self.node_consistent_total, self.arc_consistent_total
        )?;
        writeln!(f, "  Candidates per slot (length check -> arc consistency):")?;
        for slot in &self.slots {
            writeln!(
                f,
                "    {:<22} degree {:>2}  {:>6} -> {:>6}",
                slot.variable.to_string(),
                slot.degree,
                slot.node_consistent_candidates,
                slot.arc_consistent_candidates
            )?;
        }
        Ok(())
    }
}
