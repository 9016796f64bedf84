// File: src/config.rs
use crate::core::types::IndexKind;
use crate::error::{GateError, GateResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest edit budget either index accepts. Delete-variant counts grow
/// roughly as `len^d`, so anything above this is a configuration mistake.
pub const MAX_SUPPORTED_DISTANCE: usize = 3;

/// Rejects edit budgets the indexes cannot serve in bounded time.
pub fn check_distance(max_distance: usize) -> GateResult<()> {
    if max_distance > MAX_SUPPORTED_DISTANCE {
        return Err(GateError::Config(format!(
            "max_distance must be <= {}, got {}",
            MAX_SUPPORTED_DISTANCE, max_distance
        )));
    }
    if max_distance == MAX_SUPPORTED_DISTANCE {
        log::warn!(
            "max_distance {} is at the supported limit; index build may be slow",
            max_distance
        );
    }
    Ok(())
}

/// Runtime configuration for the term gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Edit budget shared by both indexes. Default: 1.
    pub max_distance: usize,

    /// Which index backs the extractor. Default: deletion dictionary.
    pub index: IndexKind,

    /// Tokens shorter than this are dropped by the rule normalizer. Default: 3.
    pub min_token_length: usize,

    /// Exclusive upper bound on harvested term length. Default: 18.
    pub max_term_length: usize,

    /// Reduce plural tokens to a base form. Default: true.
    pub use_lemmatization: bool,

    /// Stop-words on top of the built-in list.
    pub extra_stopwords: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_distance: 1,
            index: IndexKind::DeletionDictionary,
            min_token_length: 3,
            max_term_length: 18,
            use_lemmatization: true,
            extra_stopwords: Vec::new(),
        }
    }
}

impl GateConfig {
    pub fn validate(&self) -> GateResult<()> {
        check_distance(self.max_distance)?;
        if self.max_term_length == 0 {
            return Err(GateError::Config(
                "max_term_length must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> GateResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| GateError::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> GateResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}
