// File: src/core/normalizer.rs
use crate::config::GateConfig;
use std::collections::HashSet;

/// Filler words never treated as candidate terms.
pub const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "below", "between", "both", "but", "by", "can",
    "could", "did", "do", "does", "down", "during", "each", "few", "for", "from", "further",
    "had", "has", "have", "having", "he", "her", "here", "him", "his", "how", "i", "if", "in",
    "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "very",
    "was", "we", "were", "what", "when", "where", "which", "while", "who", "why", "will",
    "with", "would", "you", "your",
];

/// Turns free text into candidate tokens for the indexes. Implementations
/// must be pure: same text, same tokens.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, text: &str) -> Vec<String>;
}

/// Lowercases and splits on whitespace, nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceNormalizer;

impl Normalizer for WhitespaceNormalizer {
    fn normalize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_lowercase).collect()
    }
}

/// Rule-based normalizer: alphabetic tokens only, stop-words removed,
/// optional plural reduction, minimum length enforced on the result.
#[derive(Debug, Clone)]
pub struct RuleNormalizer {
    min_length: usize,
    use_lemmatization: bool,
    stopwords: HashSet<String>,
}

impl RuleNormalizer {
    pub fn new(min_length: usize, use_lemmatization: bool) -> Self {
        Self {
            min_length,
            use_lemmatization,
            stopwords: STOPWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        let mut normalizer = Self::new(config.min_token_length, config.use_lemmatization);
        normalizer
            .stopwords
            .extend(config.extra_stopwords.iter().map(|s| s.to_lowercase()));
        normalizer
    }

    pub fn with_stopwords<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords
            .extend(extra.into_iter().map(|s| s.as_ref().to_lowercase()));
        self
    }
}

impl Default for RuleNormalizer {
    fn default() -> Self {
        Self::new(3, true)
    }
}

impl Normalizer for RuleNormalizer {
    fn normalize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for raw in text.split_whitespace() {
            let token = raw
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if token.is_empty() || !token.chars().all(char::is_alphabetic) {
                continue;
            }
            if self.stopwords.contains(&token) {
                continue;
            }
            let token = if self.use_lemmatization { base_form(&token) } else { token };
            if token.chars().count() < self.min_length {
                continue;
            }
            tokens.push(token);
        }
        tokens
    }
}

/// Crude plural reduction: "therapies" -> "therapy", "flashes" -> "flash",
/// "sweats" -> "sweat". Words ending in "ss", "us" or "is" are left alone.
fn base_form(word: &str) -> String {
    let len = word.len();
    if len > 4 && word.ends_with("ies") {
        return format!("{}y", &word[..len - 3]);
    }
    if len > 4 && ["ches", "shes", "sses", "xes", "zes"].iter().any(|s| word.ends_with(s)) {
        return word[..len - 2].to_string();
    }
    if len > 3 && word.ends_with('s') && !["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return word[..len - 1].to_string();
    }
    word.to_string()
}
