// File: src/error.rs
use thiserror::Error;

/// Everything that can go wrong outside the lookup paths: configuration,
/// vocabulary loading and snapshot persistence. Lookups themselves are total.
#[derive(Error, Debug)]
pub enum GateError {
    /// Invalid construction parameters.
    #[error("config error: {0}")]
    Config(String),

    /// The vocabulary file has the wrong shape.
    #[error("vocabulary error: {0}")]
    Vocabulary(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A trie snapshot could not be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    /// A decoded trie snapshot is not a well-formed tree.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// An offloaded lookup did not complete.
    #[error("runtime error: {0}")]
    Runtime(String),
}

pub type GateResult<T> = Result<T, GateError>;
