use crate::config::GateConfig;
use crate::core::index::{build_index, TermIndex};
use crate::core::normalizer::{Normalizer, RuleNormalizer};
use crate::core::types::TermMatch;
use crate::error::GateResult;
use crate::persistence::load_vocabulary;
use crate::vocabulary::Vocabulary;
use std::path::Path;
use std::sync::Arc;

/// Decides whether free text touches the domain vocabulary.
/// Immutable once built; share it behind an `Arc` across threads.
pub struct TermExtractor {
    index: Box<dyn TermIndex>,
    normalizer: Arc<dyn Normalizer>,
}

impl TermExtractor {
    pub fn new(index: Box<dyn TermIndex>, normalizer: Arc<dyn Normalizer>) -> Self {
        Self { index, normalizer }
    }

    /// Builds the index named in `config` over `vocabulary`, with the rule
    /// normalizer configured from the same settings.
    pub fn from_config(config: &GateConfig, vocabulary: Vocabulary) -> GateResult<Self> {
        config.validate()?;
        let index = build_index(config.index, vocabulary, config.max_distance)?;
        Ok(Self::new(index, Arc::new(RuleNormalizer::from_config(config))))
    }

    /// Loads the vocabulary file and builds as `from_config` does.
    pub fn from_vocabulary_file(config: &GateConfig, path: &Path) -> GateResult<Self> {
        let vocabulary = load_vocabulary(path)?;
        log::info!(
            "building {:?} index over {} terms from {}",
            config.index,
            vocabulary.len(),
            path.display()
        );
        Self::from_config(config, vocabulary)
    }

    /// True as soon as any normalized token has a match in the index.
    /// No tokens means no match.
    pub fn lookup(&self, text: &str) -> bool {
        self.normalizer
            .normalize(text)
            .iter()
            .any(|token| self.index.touches(token))
    }

    /// The graded result `lookup` collapses: every token that matched, with
    /// its sorted matches.
    pub fn matched_terms(&self, text: &str) -> Vec<(String, Vec<TermMatch>)> {
        self.normalizer
            .normalize(text)
            .into_iter()
            .filter_map(|token| {
                let matches = self.index.matches(&token);
                (!matches.is_empty()).then_some((token, matches))
            })
            .collect()
    }

    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.normalizer.normalize(text)
    }

    pub fn index(&self) -> &dyn TermIndex {
        self.index.as_ref()
    }

    /// Runs `lookup` on tokio's blocking pool so an async caller's event
    /// loop is not stalled. Cancellation is up to the caller.
    #[cfg(feature = "async")]
    pub async fn lookup_offloaded(self: Arc<Self>, text: String) -> GateResult<bool> {
        tokio::task::spawn_blocking(move || self.lookup(&text))
            .await
            .map_err(|e| crate::error::GateError::Runtime(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalizer::WhitespaceNormalizer;
    use crate::core::types::IndexKind;
    use crate::fuzzy::symspell::DeletionDictionary;

    fn whitespace_extractor(terms: &[&str], max_distance: usize) -> TermExtractor {
        let vocab = Vocabulary::from_terms(terms.iter().copied());
        let index = DeletionDictionary::new(vocab, max_distance).unwrap();
        TermExtractor::new(Box::new(index), Arc::new(WhitespaceNormalizer))
    }

    #[test]
    fn misspelled_token_opens_gate() {
        let extractor = whitespace_extractor(&["hotflash"], 1);
        assert!(extractor.lookup("I have hotflashs"));
    }

    #[test]
    fn split_compound_does_not_reach_term() {
        let extractor = whitespace_extractor(&["hotflash"], 1);
        assert!(extractor.tokens("I have hot flashs").contains(&"flashs".to_string()));
        assert!(!extractor.lookup("I have hot flashs"));

        let extractor = whitespace_extractor(&["flash"], 1);
        assert!(extractor.lookup("I have hot flashs"));
    }

    #[test]
    fn no_tokens_means_closed() {
        let extractor = whitespace_extractor(&["hotflash"], 1);
        assert!(!extractor.lookup(""));
        assert!(!extractor.lookup("   \t "));
    }

    #[test]
    fn empty_vocabulary_never_matches() {
        let extractor = whitespace_extractor(&[], 2);
        assert!(!extractor.lookup("menopause estrogen hotflash"));
    }

    #[test]
    fn matched_terms_reports_grades() {
        let extractor = whitespace_extractor(&["menopause", "estrogen"], 1);
        let matched = extractor.matched_terms("menopase and estrogen");
        assert_eq!(
            matched,
            vec![
                ("menopase".to_string(), vec![TermMatch::new("menopause", 1)]),
                ("estrogen".to_string(), vec![TermMatch::new("estrogen", 0)]),
            ]
        );
    }

    #[test]
    fn from_config_uses_rule_normalizer() {
        let config = GateConfig { index: IndexKind::Trie, ..GateConfig::default() };
        let vocab = Vocabulary::from_terms(["flash", "therapy"]);
        let extractor = TermExtractor::from_config(&config, vocab).unwrap();
        assert_eq!(extractor.tokens("the hot flashes"), vec!["hot", "flash"]);
        assert!(extractor.lookup("Hormone therapies"));
        assert!(!extractor.lookup("the and of"));
    }
}
