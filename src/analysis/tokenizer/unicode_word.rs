//! Unicode word tokenizer implementation.
//!
//! Splits text using Unicode word boundary rules (UAX #29). Whitespace
//! segments are dropped; punctuation is kept as separate tokens so that later
//! filters decide what to ignore.
//!
//! # Examples
//!
//! ```
//! use parley::analysis::tokenizer::Tokenizer;
//! use parley::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("How to file VAWC?").unwrap().collect();
//!
//! let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["How", "to", "file", "VAWC", "?"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that splits text on Unicode word boundaries.
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new Unicode word tokenizer.
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }

    fn detect_token_type(word: &str) -> TokenType {
        if word.chars().all(|c| c.is_numeric()) {
            TokenType::Num
        } else if word.chars().any(|c| c.is_alphanumeric()) {
            TokenType::Alphanum
        } else if word.chars().all(|c| c.is_ascii_punctuation()) {
            TokenType::Punctuation
        } else {
            TokenType::Other
        }
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = text
            .split_word_bounds()
            .filter(|segment| !segment.chars().all(char::is_whitespace))
            .enumerate()
            .map(|(position, segment)| {
                Token::new(segment, position).with_token_type(Self::detect_token_type(segment))
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
