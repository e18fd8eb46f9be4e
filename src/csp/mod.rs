//! Constraint satisfaction engine: domains, consistency and search

pub mod domains;
pub mod consistency;
pub mod assignment;
pub mod search;

pub use domains::{DomainStore, DomainSnapshot};
pub use consistency::{enforce_node_consistency, revise, ac3, all_arcs, Arc};
pub use assignment::{Assignment, is_complete, is_consistent};
pub use search::{Backtracker, SearchOptions, SearchStatistics};
