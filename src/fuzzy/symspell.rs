// File: src/fuzzy/symspell.rs
use crate::config::check_distance;
use crate::core::index::TermIndex;
use crate::core::types::TermMatch;
use crate::error::GateResult;
use crate::fuzzy::distance::edit_distance;
use crate::vocabulary::Vocabulary;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

type DeleteTable = HashMap<String, HashSet<String>>;

/// Approximate term matching based on the Symmetric Delete (SymSpell) idea.
/// Every delete variant of every vocabulary word is precomputed, so a query
/// only has to generate its own variants and hash them; the cost is
/// independent of vocabulary size.
#[derive(Debug, Clone)]
pub struct DeletionDictionary {
    vocabulary: Vocabulary,
    /// Maps a delete variant (e.g. "menopase") to the words it came from
    /// (e.g. {"menopause"}). Every word maps to at least itself.
    deletes: DeleteTable,
    max_deletions: usize,
    /// Char length of the longest vocabulary word.
    longest_term: usize,
}

impl DeletionDictionary {
    /// Builds the full delete table up front. Words are expanded in parallel
    /// and the per-thread tables merged by set union.
    pub fn new(vocabulary: Vocabulary, max_deletions: usize) -> GateResult<Self> {
        check_distance(max_deletions)?;

        let deletes = vocabulary
            .as_set()
            .par_iter()
            .fold(DeleteTable::new, |mut table, word| {
                for variant in delete_variants(word, max_deletions) {
                    table.entry(variant).or_default().insert(word.clone());
                }
                table
            })
            .reduce(DeleteTable::new, merge_tables);

        log::debug!(
            "deletion dictionary: {} words, {} keys, max_deletions {}",
            vocabulary.len(),
            deletes.len(),
            max_deletions
        );

        let longest_term = vocabulary.iter().map(|w| w.chars().count()).max().unwrap_or(0);

        Ok(Self {
            vocabulary,
            deletes,
            max_deletions,
            longest_term,
        })
    }

    /// Candidates within `max_deletions` of `query`, verified by exact edit
    /// distance and sorted by (distance, term).
    /// Complexity: O(k^d) variants for a query of length k, plus one
    /// O(k * m) distance computation per unique candidate.
    pub fn lookup(&self, query: &str) -> Vec<TermMatch> {
        // Edit distance is at least the length difference, so a query this
        // long cannot match; skip its O(k^d) variant expansion.
        if query.chars().count() > self.longest_term + self.max_deletions {
            return Vec::new();
        }

        let mut candidates: HashSet<&str> = HashSet::new();

        if let Some(word) = self.vocabulary.get(query) {
            candidates.insert(word);
        }

        for variant in delete_variants(query, self.max_deletions) {
            if let Some(words) = self.deletes.get(&variant) {
                candidates.extend(words.iter().map(String::as_str));
            }
        }

        // Shared deletes over-approximate: "ab" and "ba" both reduce to "a".
        let mut matches: Vec<TermMatch> = candidates
            .into_iter()
            .filter_map(|word| {
                let distance = edit_distance(query, word);
                (distance <= self.max_deletions).then(|| TermMatch::new(word, distance))
            })
            .collect();
        matches.sort();
        matches
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn max_deletions(&self) -> usize {
        self.max_deletions
    }

    /// Number of distinct keys in the delete table.
    pub fn key_count(&self) -> usize {
        self.deletes.len()
    }
}

impl TermIndex for DeletionDictionary {
    fn matches(&self, query: &str) -> Vec<TermMatch> {
        self.lookup(query)
    }

    fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains(term)
    }

    fn max_distance(&self) -> usize {
        self.max_deletions
    }
}

fn merge_tables(mut left: DeleteTable, mut right: DeleteTable) -> DeleteTable {
    if left.len() < right.len() {
        std::mem::swap(&mut left, &mut right);
    }
    for (key, words) in right {
        left.entry(key).or_default().extend(words);
    }
    left
}

/// All distinct strings reachable from `word` by deleting up to `depth`
/// characters, including `word` itself.
pub fn delete_variants(word: &str, depth: usize) -> HashSet<String> {
    let mut variants = HashSet::new();
    variants.insert(word.to_string());

    let mut frontier = variants.clone();
    for _ in 0..depth {
        let mut next = HashSet::new();
        for edit in &frontier {
            for (i, _) in edit.char_indices() {
                let mut deleted = edit.clone();
                deleted.remove(i);
                next.insert(deleted);
            }
        }
        if next.is_empty() {
            break;
        }
        variants.extend(next.iter().cloned());
        frontier = next;
    }

    variants
}
