// File: src/vocabulary.rs
use crate::core::normalizer::STOPWORDS;
use crate::core::trie::FuzzyTrie;
use crate::error::GateResult;
use std::collections::HashSet;

/// The immutable set of normalized domain terms both indexes are built from.
/// Terms are trimmed and lowercased on the way in; duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: HashSet<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .collect();
        Self { terms }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    /// Returns the stored copy of `term`, if present.
    pub fn get(&self, term: &str) -> Option<&String> {
        self.terms.get(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Terms in lexical order, the shape written to disk.
    pub fn sorted(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self.iter().collect();
        terms.sort_unstable();
        terms
    }

    pub(crate) fn as_set(&self) -> &HashSet<String> {
        &self.terms
    }

    /// Union of two vocabularies.
    pub fn merged(mut self, other: Vocabulary) -> Self {
        self.terms.extend(other.terms);
        self
    }
}

impl FromIterator<String> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::from_terms(iter)
    }
}

/// Accumulates terms harvested from a terminology service during the
/// offline build. Each raw concept name is split into single-word terms.
pub struct VocabularyBuilder {
    max_term_length: usize,
    words: HashSet<String>,
}

impl VocabularyBuilder {
    pub fn new(max_term_length: usize) -> Self {
        Self {
            max_term_length,
            words: HashSet::new(),
        }
    }

    /// Splits a raw concept name (e.g. "Hot flashes, night") into terms.
    /// Returns how many new terms were added.
    pub fn add_name(&mut self, name: &str) -> usize {
        let cleaned: String = name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();

        let before = self.words.len();
        for token in cleaned.split_whitespace() {
            if token.chars().count() <= 2 || STOPWORDS.contains(&token) {
                continue;
            }
            if !token.chars().all(|c| c.is_alphabetic()) {
                continue;
            }
            self.add_term(token);
        }
        self.words.len() - before
    }

    /// Adds one already-normalized term if it fits the ASCII and length bounds.
    pub fn add_term(&mut self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() || !term.is_ascii() || term.len() >= self.max_term_length {
            return false;
        }
        self.words.insert(term)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn build(self) -> Vocabulary {
        Vocabulary { terms: self.words }
    }
}

/// Collapses near-duplicate spellings. Terms are visited shortest first
/// (then lexically); a term is dropped when an already kept term lies within
/// `max_distance` of it.
pub fn dedup_near(vocabulary: &Vocabulary, max_distance: usize) -> GateResult<Vocabulary> {
    let mut ordered = vocabulary.sorted();
    ordered.sort_by_key(|t| t.chars().count());

    let mut kept = FuzzyTrie::new(max_distance)?;
    let mut terms = HashSet::with_capacity(ordered.len());
    for term in ordered {
        if kept.search(term).is_empty() {
            kept.insert(term);
            terms.insert(term.to_string());
        } else {
            log::debug!("dropping near-duplicate term '{}'", term);
        }
    }
    log::info!(
        "near-dedup kept {} of {} terms (max_distance {})",
        terms.len(),
        vocabulary.len(),
        max_distance
    );
    Ok(Vocabulary { terms })
}
