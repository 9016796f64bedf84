// File: src/core/index.rs
use crate::core::trie::FuzzyTrie;
use crate::core::types::{IndexKind, TermMatch};
use crate::error::GateResult;
use crate::fuzzy::symspell::DeletionDictionary;
use crate::vocabulary::Vocabulary;

/// The contract shared by the trie and the deletion dictionary: for the same
/// vocabulary and budget both return the same set of matches.
pub trait TermIndex: Send + Sync {
    /// Matches within `max_distance()`, sorted by (distance, term).
    fn matches(&self, query: &str) -> Vec<TermMatch>;

    fn contains(&self, term: &str) -> bool;

    fn max_distance(&self) -> usize;

    fn touches(&self, query: &str) -> bool {
        !self.matches(query).is_empty()
    }
}

/// Builds the index selected by `kind` over `vocabulary`.
pub fn build_index(
    kind: IndexKind,
    vocabulary: Vocabulary,
    max_distance: usize,
) -> GateResult<Box<dyn TermIndex>> {
    let index: Box<dyn TermIndex> = match kind {
        IndexKind::Trie => Box::new(FuzzyTrie::from_words(vocabulary.iter(), max_distance)?),
        IndexKind::DeletionDictionary => {
            Box::new(DeletionDictionary::new(vocabulary, max_distance)?)
        }
    };
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_kinds_agree_on_scenario() {
        let vocab = Vocabulary::from_terms(["menopause", "estrogen", "hotflash"]);
        for kind in [IndexKind::Trie, IndexKind::DeletionDictionary] {
            let index = build_index(kind, vocab.clone(), 1).unwrap();
            assert_eq!(index.matches("menopase"), vec![TermMatch::new("menopause", 1)]);
            assert!(index.touches("estrogn"));
            assert!(!index.touches("xyz"));
            assert!(index.contains("hotflash"));
            assert_eq!(index.max_distance(), 1);
        }
    }
}
