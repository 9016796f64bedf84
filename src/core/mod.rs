pub mod engine;
pub mod index;
pub mod normalizer;
pub mod trie;
pub mod types;
