//! Lemmatizing token filter and lemmatizer implementations.

use super::Filter;
use crate::analysis::token::{TokenStream, TokenType};
use crate::error::Result;

/// Trait for lemmatization rule sets.
///
/// A lemmatizer is a pure function from a lowercase word to its base form.
/// Implementations must be deterministic and idempotent: the lemma of a
/// lemma is itself.
pub trait Lemmatizer: Send + Sync {
    /// Reduce a word to its lemma.
    fn lemmatize(&self, word: &str) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

pub mod english;

pub use english::EnglishLemmatizer;

/// Filter that replaces each token's text with its lemma.
pub struct LemmaFilter {
    lemmatizer: Box<dyn Lemmatizer>,
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl LemmaFilter {
    /// Create a new lemma filter with the English rule set.
    pub fn new() -> Self {
        LemmaFilter {
            lemmatizer: Box::new(EnglishLemmatizer::new()),
        }
    }
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.token_type() == Some(TokenType::Punctuation) {
                    return token;
                }
                let lemma = self.lemmatizer.lemmatize(&token.text);
                token.with_text(lemma)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}
