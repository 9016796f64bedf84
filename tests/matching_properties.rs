//! Property tests for the two index implementations.
//!
//! Invariants:
//! - every vocabulary word matches itself at distance 0
//! - one edit away is found with budget >= 1 and not with budget 0
//! - trie and deletion dictionary return the same matches
//! - a larger budget never drops a match
//! - inserting a word twice changes nothing

use proptest::prelude::*;
use std::collections::HashSet;
use term_gate::fuzzy::distance::edit_distance;
use term_gate::{DeletionDictionary, FuzzyTrie, TermMatch, Vocabulary};

// ============================================================================
// Fixtures
// ============================================================================

const TERMS: &[&str] = &["menopause", "estrogen", "hotflash"];

fn both(vocab: &Vocabulary, max: usize) -> (FuzzyTrie, DeletionDictionary) {
    (
        FuzzyTrie::from_words(vocab.iter(), max).unwrap(),
        DeletionDictionary::new(vocab.clone(), max).unwrap(),
    )
}

fn word() -> impl Strategy<Value = String> {
    "[a-e]{0,6}"
}

fn vocab_strategy() -> impl Strategy<Value = Vocabulary> {
    prop::collection::vec(word(), 0..12).prop_map(|words| Vocabulary::from_terms(words))
}

/// One random substitution, insertion or deletion.
fn one_edit(word: &str, kind: usize, pos: usize, ch: char) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    match kind % 3 {
        0 if !chars.is_empty() => {
            let i = pos % chars.len();
            chars[i] = ch;
        }
        1 => {
            let i = pos % (chars.len() + 1);
            chars.insert(i, ch);
        }
        _ if !chars.is_empty() => {
            let i = pos % chars.len();
            chars.remove(i);
        }
        _ => chars.push(ch),
    }
    chars.into_iter().collect()
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn scenario_deleted_letter() {
    let (trie, dict) = both(&Vocabulary::from_terms(TERMS), 1);
    let expected = vec![TermMatch::new("menopause", 1)];
    assert_eq!(trie.matches("menopase"), expected);
    assert_eq!(dict.lookup("menopase"), expected);
}

#[test]
fn scenario_unrelated_query() {
    let (trie, dict) = both(&Vocabulary::from_terms(TERMS), 1);
    assert!(trie.matches("xyz").is_empty());
    assert!(dict.lookup("xyz").is_empty());
}

#[test]
fn scenario_empty_vocabulary() {
    for max in 0..=2 {
        let (trie, dict) = both(&Vocabulary::new(), max);
        for query in ["", "a", "menopause"] {
            assert!(trie.matches(query).is_empty());
            assert!(dict.lookup(query).is_empty());
        }
    }
}

#[test]
fn exact_membership_for_every_word() {
    let vocab = Vocabulary::from_terms(TERMS);
    for max in 0..=2 {
        let (trie, dict) = both(&vocab, max);
        for word in vocab.iter() {
            assert!(trie.matches(word).contains(&TermMatch::new(word, 0)));
            assert!(dict.lookup(word).contains(&TermMatch::new(word, 0)));
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn trie_and_dictionary_agree(vocab in vocab_strategy(), query in word(), max in 0usize..=2) {
        let (trie, dict) = both(&vocab, max);
        let from_trie: HashSet<TermMatch> = trie.matches(&query).into_iter().collect();
        let from_dict: HashSet<TermMatch> = dict.lookup(&query).into_iter().collect();
        prop_assert_eq!(from_trie, from_dict);
    }

    #[test]
    fn distances_are_exact_and_bounded(vocab in vocab_strategy(), query in word(), max in 0usize..=2) {
        let (trie, dict) = both(&vocab, max);
        for m in trie.matches(&query).into_iter().chain(dict.lookup(&query)) {
            prop_assert!(m.distance <= max);
            prop_assert_eq!(m.distance, edit_distance(&query, &m.term));
        }
    }

    #[test]
    fn dictionary_has_full_recall(vocab in vocab_strategy(), query in word(), max in 0usize..=2) {
        let dict = DeletionDictionary::new(vocab.clone(), max).unwrap();
        let found: HashSet<String> = dict.lookup(&query).into_iter().map(|m| m.term).collect();
        for term in vocab.iter() {
            let within = edit_distance(&query, term) <= max;
            prop_assert_eq!(within, found.contains(term), "term {:?}", term);
        }
    }

    #[test]
    fn single_edit_recall(target in "[a-e]{1,6}", kind in 0usize..3, pos in 0usize..8, ch in prop::char::range('a', 'f')) {
        let typo = one_edit(&target, kind, pos, ch);
        prop_assume!(typo != target);
        let vocab = Vocabulary::from_terms([target.as_str()]);

        let (trie, dict) = both(&vocab, 1);
        let expected = TermMatch::new(target.clone(), 1);
        prop_assert!(trie.matches(&typo).contains(&expected));
        prop_assert!(dict.lookup(&typo).contains(&expected));

        let (trie, dict) = both(&vocab, 0);
        prop_assert!(trie.matches(&typo).is_empty());
        prop_assert!(dict.lookup(&typo).is_empty());
    }

    #[test]
    fn larger_budget_keeps_matches(vocab in vocab_strategy(), query in word()) {
        let mut previous: HashSet<TermMatch> = HashSet::new();
        for max in 0..=2 {
            let (trie, dict) = both(&vocab, max);
            let current: HashSet<TermMatch> = dict.lookup(&query).into_iter().collect();
            prop_assert!(previous.is_subset(&current));
            let from_trie: HashSet<TermMatch> = trie.matches(&query).into_iter().collect();
            prop_assert!(previous.is_subset(&from_trie));
            previous = current;
        }
    }

    #[test]
    fn zero_budget_is_membership(vocab in vocab_strategy(), query in word()) {
        let (trie, dict) = both(&vocab, 0);
        let expected = if vocab.contains(&query) { vec![TermMatch::new(query.clone(), 0)] } else { vec![] };
        prop_assert_eq!(trie.matches(&query), expected.clone());
        prop_assert_eq!(dict.lookup(&query), expected);
    }

    #[test]
    fn duplicate_insertion_changes_nothing(words in prop::collection::vec(word(), 0..8), query in word()) {
        let once = FuzzyTrie::from_words(&words, 1).unwrap();
        let twice = FuzzyTrie::from_words(words.iter().chain(words.iter()), 1).unwrap();
        prop_assert_eq!(once.node_count(), twice.node_count());
        prop_assert_eq!(once.len(), twice.len());
        prop_assert_eq!(once.matches(&query), twice.matches(&query));
    }
}
