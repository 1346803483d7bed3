//! Punctuation filter implementation.
//!
//! Removes tokens that consist solely of ignorable punctuation. By default the
//! ignorable set is `? ! . ,`; other punctuation passes through as ordinary
//! tokens.
//!
//! # Examples
//!
//! ```
//! use parley::analysis::token_filter::Filter;
//! use parley::analysis::token_filter::punctuation::PunctuationFilter;
//! use parley::analysis::token::Token;
//!
//! let filter = PunctuationFilter::new();
//! let tokens = vec![Token::new("help", 0), Token::new("?", 1), Token::new("!", 2)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text, "help");
//! ```

use std::collections::HashSet;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Punctuation characters dropped from normalized output.
pub const DEFAULT_IGNORED_PUNCTUATION: &[char] = &['?', '!', '.', ','];

/// A filter that removes ignorable punctuation tokens from the stream.
#[derive(Clone, Debug)]
pub struct PunctuationFilter {
    ignored: HashSet<char>,
}

impl PunctuationFilter {
    /// Create a filter with the default ignorable punctuation.
    pub fn new() -> Self {
        Self::with_chars(DEFAULT_IGNORED_PUNCTUATION.iter().copied())
    }

    /// Create a filter that ignores the given characters.
    pub fn with_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        PunctuationFilter {
            ignored: chars.into_iter().collect(),
        }
    }

    /// Check whether a token text is made only of ignorable characters.
    pub fn is_ignorable(&self, text: &str) -> bool {
        !text.is_empty() && text.chars().all(|c| self.ignored.contains(&c))
    }
}

impl Default for PunctuationFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for PunctuationFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .filter(|token| !self.is_ignorable(&token.text))
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}
