//! Token types and utilities for text analysis.
//!
//! This module defines the core data structures for representing text tokens,
//! which are the units that flow through the normalization pipeline.
//!
//! # Core Types
//!
//! - [`Token`] - A single analyzed token with text, position, and type
//! - [`TokenType`] - Classification of token content (alphanumeric, punctuation, etc.)
//! - [`TokenStream`] - Type alias for boxed iterator of tokens
//!
//! # Examples
//!
//! ```
//! use parley::analysis::token::{Token, TokenType};
//!
//! let token = Token::new("Filing", 0).with_token_type(TokenType::Alphanum);
//! assert_eq!(token.text, "Filing");
//! assert_eq!(token.token_type(), Some(TokenType::Alphanum));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the original token stream (0-based)
    pub position: usize,

    /// Classification assigned by the tokenizer
    pub token_type: Option<TokenType>,
}

/// Token type classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Alphanumeric text
    Alphanum,
    /// Numeric values
    Num,
    /// Punctuation marks
    Punctuation,
    /// Other/unknown token types
    Other,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            token_type: None,
        }
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }

    /// Token type recorded by the tokenizer, if any.
    pub fn token_type(&self) -> Option<TokenType> {
        self.token_type
    }

    /// Replace the text, keeping position and type.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);
        assert_eq!(token.text, "hello");
        assert_eq!(token.position, 0);
        assert!(token.token_type().is_none());
    }

    #[test]
    fn test_with_text_keeps_type() {
        let token = Token::new("Files", 2)
            .with_token_type(TokenType::Alphanum)
            .with_text("files");

        assert_eq!(token.text, "files");
        assert_eq!(token.position, 2);
        assert_eq!(token.token_type(), Some(TokenType::Alphanum));
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("hello", 0);
        assert_eq!(format!("{token}"), "hello");
    }
}
