//! Text analysis module for Parley.
//!
//! This module turns raw utterances into normalized token sequences: it
//! tokenizes on word boundaries, lowercases, drops ignorable punctuation and
//! reduces every word to its lemma. The same analyzer is used for training
//! patterns and for incoming utterances.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
