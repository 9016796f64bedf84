pub mod distance;
pub mod symspell;
