// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A vocabulary term together with its exact edit distance from the query.
/// `distance` never exceeds the index's configured budget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermMatch {
    pub term: String,
    pub distance: usize,
}

impl TermMatch {
    pub fn new(term: impl Into<String>, distance: usize) -> Self {
        Self { term: term.into(), distance }
    }
}

/// Closest first, ties broken lexically, so output is reproducible.
impl Ord for TermMatch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.term.cmp(&other.term))
    }
}

impl PartialOrd for TermMatch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selects the index implementation behind a `TermExtractor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    Trie,
    DeletionDictionary,
}
