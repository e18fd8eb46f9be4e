//! Candidate word sets per slot

use crate::crossword::Variable;
use std::collections::{BTreeSet, HashMap};

/// Remaining candidate words for every slot.
///
/// Sets are ordered so that every traversal of a domain is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomainStore {
    domains: HashMap<Variable, BTreeSet<String>>,
}

/// Value copy of a [`DomainStore`] taken with [`DomainStore::snapshot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSnapshot {
    domains: HashMap<Variable, BTreeSet<String>>,
}

impl DomainStore {
    /// Give every slot a copy of the full word list
    pub fn initialize<'a, V, W>(variables: V, words: W) -> Self
    where
        V: IntoIterator<Item = &'a Variable>,
        W: IntoIterator<Item = &'a String>,
    {
        let words: BTreeSet<String> = words.into_iter().cloned().collect();
        let domains = variables
            .into_iter()
            .map(|&v| (v, words.clone()))
            .collect();
        Self { domains }
    }

    /// Candidates for `var`; empty for slots the store does not know
    pub fn domain(&self, var: Variable) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.domains.get(&var).unwrap_or(&EMPTY)
    }

    pub fn len(&self, var: Variable) -> usize {
        self.domain(var).len()
    }

    pub fn is_empty(&self, var: Variable) -> bool {
        self.domain(var).is_empty()
    }

    pub fn contains(&self, var: Variable, word: &str) -> bool {
        self.domain(var).contains(word)
    }

    /// Remove `word` from the domain of `var`. Returns whether it was present.
    pub fn remove(&mut self, var: Variable, word: &str) -> bool {
        self.domains
            .get_mut(&var)
            .map(|domain| domain.remove(word))
            .unwrap_or(false)
    }

    /// Keep only the candidates of `var` accepted by `keep`; returns how many were dropped
    pub fn retain<F>(&mut self, var: Variable, mut keep: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        match self.domains.get_mut(&var) {
            Some(domain) => {
                let before = domain.len();
                domain.retain(|word| keep(word));
                before - domain.len()
            }
            None => 0,
        }
    }

    /// Narrow `var` to the single candidate `word`
    pub fn restrict_to(&mut self, var: Variable, word: &str) {
        if let Some(domain) = self.domains.get_mut(&var) {
            domain.retain(|w| w == word);
        }
    }

    /// Total number of candidates over all slots
    pub fn total_size(&self) -> usize {
        self.domains.values().map(BTreeSet::len).sum()
    }

    pub fn snapshot(&self) -> DomainSnapshot {
        DomainSnapshot {
            domains: self.domains.clone(),
        }
    }

    /// Return to the exact state captured by `snapshot`
    pub fn restore(&mut self, snapshot: DomainSnapshot) {
        self.domains = snapshot.domains;
    }
}
