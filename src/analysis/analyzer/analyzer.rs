//! Core analyzer trait definition.
//!
//! Analyzers combine a tokenizer and a chain of filters into the complete
//! normalization pipeline:
//!
//! ```text
//! Raw Text → Tokenizer → Filter 1 → ... → Filter N → Token Stream
//! ```
//!
//! # Examples
//!
//! ```
//! use parley::analysis::analyzer::{Analyzer, EnglishAnalyzer};
//!
//! let analyzer = EnglishAnalyzer::new().unwrap();
//! let words = analyzer.normalize("How to file VAWC?").unwrap();
//!
//! assert_eq!(words, vec!["how", "to", "file", "vawc"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so one analyzer can be shared between
/// the training pipeline and any number of concurrent inference calls.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Normalize text into the sequence of words used for encoding.
    ///
    /// Empty tokens are dropped; the rest are returned in input order,
    /// duplicates included.
    fn normalize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .analyze(text)?
            .filter(|token| !token.text.is_empty())
            .map(|token| token.text)
            .collect())
    }
}
