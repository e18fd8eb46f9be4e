//! Node and arc consistency over a domain store

use super::DomainStore;
use crate::crossword::{Crossword, Variable};
use std::collections::VecDeque;

/// Directed constraint "domain of `.0` is consistent with domain of `.1`"
pub type Arc = (Variable, Variable);

/// Letter of `word` at byte position `index`
#[inline]
pub(crate) fn letter(word: &str, index: usize) -> Option<u8> {
    word.as_bytes().get(index).copied()
}

/// Drop every candidate whose length differs from its slot's length
pub fn enforce_node_consistency(crossword: &Crossword, domains: &mut DomainStore) {
    for &var in crossword.variables() {
        let removed = domains.retain(var, |word| word.len() == var.length);
        if removed > 0 {
            log::trace!("Node consistency removed {} words from {}", removed, var);
        }
    }
}

/// Make `x` arc consistent with `y`.
///
/// Removes each word of `x` that has no partner in `y` agreeing on the shared
/// cell. Returns whether anything was removed; slots without an overlap
/// constrain nothing.
pub fn revise(crossword: &Crossword, domains: &mut DomainStore, x: Variable, y: Variable) -> bool {
    let Some((i, j)) = crossword.overlap(x, y) else {
        return false;
    };

    // Letters y can still supply at its side of the shared cell
    let mut supported = [false; 256];
    for word in domains.domain(y) {
        if let Some(ch) = letter(word, j) {
            supported[ch as usize] = true;
        }
    }

    let removed = domains.retain(x, |word| letter(word, i).is_some_and(|ch| supported[ch as usize]));
    if removed > 0 {
        log::trace!("Revised {} against {}: removed {} words", x, y, removed);
    }
    removed > 0
}

/// Every ordered pair of distinct intersecting slots, in slot order
pub fn all_arcs(crossword: &Crossword) -> Vec<Arc> {
    crossword
        .variables()
        .iter()
        .flat_map(|&x| crossword.neighbors(x).iter().map(move |&y| (x, y)))
        .collect()
}

/// Enforce arc consistency with AC-3.
///
/// The worklist starts from `arcs`, or from every arc of the puzzle when
/// `None`. Returns `false` as soon as some domain becomes empty, `true` once
/// the queue drains.
pub fn ac3(crossword: &Crossword, domains: &mut DomainStore, arcs: Option<Vec<Arc>>) -> bool {
    let mut queue: VecDeque<Arc> = arcs.unwrap_or_else(|| all_arcs(crossword)).into();
    let mut revisions = 0usize;

    while let Some((x, y)) = queue.pop_front() {
        if !revise(crossword, domains, x, y) {
            continue;
        }
        revisions += 1;

        if domains.is_empty(x) {
            log::debug!("AC-3 emptied the domain of {} after {} revisions", x, revisions);
            return false;
        }

        queue.extend(
            crossword
                .neighbors(x)
                .iter()
                .filter(|&&z| z != y)
                .map(|&z| (z, x)),
        );
    }

    log::debug!("AC-3 reached a fixpoint after {} revisions", revisions);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::{parse_structure, Direction};

    fn crossword(structure: &str, words: &[&str]) -> Crossword {
        Crossword::from_cells(parse_structure(structure), words.iter().map(|w| w.to_string())).unwrap()
    }

    fn domains_for(crossword: &Crossword) -> DomainStore {
        DomainStore::initialize(crossword.variables(), crossword.words())
    }

    #[test]
    fn test_node_consistency_keeps_matching_lengths() {
        let cw = crossword("_###\n____\n_###\n", &["WORD", "RED", "OWE", "AB", "TOOLONG"]);
        let mut domains = domains_for(&cw);

        enforce_node_consistency(&cw, &mut domains);

        for &var in cw.variables() {
            assert!(domains.domain(var).iter().all(|w| w.len() == var.length));
        }
        let across = Variable::new(1, 0, Direction::Across, 4);
        assert_eq!(domains.len(across), 1);
    }

    #[test]
    fn test_node_consistency_may_leave_empty_domain() {
        let cw = crossword("_____\n", &["CAT"]);
        let mut domains = domains_for(&cw);
        enforce_node_consistency(&cw, &mut domains);
        assert!(domains.is_empty(cw.variables()[0]));
    }

    #[test]
    fn test_revise_removes_unsupported_words() {
        let cw = crossword("_###\n____\n_###\n", &["WORD", "RED", "OWE"]);
        let mut domains = domains_for(&cw);
        enforce_node_consistency(&cw, &mut domains);

        let down = Variable::new(0, 0, Direction::Down, 3);
        let across = Variable::new(1, 0, Direction::Across, 4);

        // RED has 'E' where WORD needs 'W'
        assert!(revise(&cw, &mut domains, down, across));
        assert_eq!(domains.domain(down).iter().collect::<Vec<_>>(), vec!["OWE"]);
        assert!(!revise(&cw, &mut domains, down, across));
        assert!(!revise(&cw, &mut domains, across, down));
    }

    #[test]
    fn test_revise_without_overlap_is_noop() {
        let cw = crossword("___\n###\n___\n", &["CAT", "DOG"]);
        let mut domains = domains_for(&cw);
        let top = cw.variables()[0];
        let bottom = cw.variables()[1];

        assert!(!revise(&cw, &mut domains, top, bottom));
        assert_eq!(domains.len(top), 2);
    }

    #[test]
    fn test_all_arcs() {
        let cw = crossword("_____\n_###_\n_###_\n_###_\n_____\n", &[]);
        let arcs = all_arcs(&cw);
        assert_eq!(arcs.len(), 8);
        assert!(arcs.iter().all(|&(x, y)| x != y && cw.overlap(x, y).is_some()));
    }

    #[test]
    fn test_ac3_detects_incompatible_words() {
        let cw = crossword("_###\n____\n_###\n", &["WORD", "CAT"]);
        let mut domains = domains_for(&cw);
        enforce_node_consistency(&cw, &mut domains);

        assert!(!ac3(&cw, &mut domains, None));
    }

    #[test]
    fn test_ac3_is_idempotent() {
        let cw = crossword(
            "_____\n_###_\n_###_\n_###_\n_____\n",
            &["CRANE", "CHEST", "EAGER", "TIGER", "APPLE", "HOUSE", "BREAD", "PLANT", "CLEAR"],
        );
        let mut domains = domains_for(&cw);
        enforce_node_consistency(&cw, &mut domains);

        assert!(ac3(&cw, &mut domains, None));
        let after_first = domains.clone();
        assert!(ac3(&cw, &mut domains, None));
        assert_eq!(domains, after_first);
    }

    #[test]
    fn test_ac3_propagates_along_chain() {
        // Top across, left down, bottom across: pruning the top reaches the bottom via the left
        let cw = crossword("___\n_##\n___\n", &["ABC", "AXD", "DEF", "QRS"]);
        let mut domains = domains_for(&cw);
        enforce_node_consistency(&cw, &mut domains);

        let top = Variable::new(0, 0, Direction::Across, 3);
        let left = Variable::new(0, 0, Direction::Down, 3);
        let bottom = Variable::new(2, 0, Direction::Across, 3);

        assert!(ac3(&cw, &mut domains, None));
        for &(x, y) in &all_arcs(&cw) {
            let mut probe = domains.clone();
            assert!(!revise(&cw, &mut probe, x, y));
        }
        assert!(domains.domain(top).iter().all(|w| w.starts_with('A')));
        assert!(domains.domain(left).contains("AXD"));
        assert!(domains.domain(bottom).iter().all(|w| w.starts_with('D')));
    }

    #[test]
    fn test_ac3_with_seed_arcs() {
        let cw = crossword("_###\n____\n_###\n", &["WORD", "RED", "OWE"]);
        let mut domains = domains_for(&cw);
        enforce_node_consistency(&cw, &mut domains);

        let down = Variable::new(0, 0, Direction::Down, 3);
        let across = Variable::new(1, 0, Direction::Across, 4);
        assert!(ac3(&cw, &mut domains, Some(vec![(down, across)])));
        assert_eq!(domains.len(down), 1);

        assert!(ac3(&cw, &mut domains, Some(Vec::new())));
    }
}
