// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod persistence;
pub mod vocabulary;

pub use crate::config::GateConfig;
pub use crate::core::engine::TermExtractor;
pub use crate::core::index::{build_index, TermIndex};
pub use crate::core::normalizer::{Normalizer, RuleNormalizer, WhitespaceNormalizer};
pub use crate::core::trie::FuzzyTrie;
pub use crate::core::types::{IndexKind, TermMatch};
pub use crate::error::{GateError, GateResult};
pub use crate::fuzzy::symspell::DeletionDictionary;
pub use crate::vocabulary::{Vocabulary, VocabularyBuilder};
