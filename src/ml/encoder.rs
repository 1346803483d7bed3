//! Bag-of-words encoding over a fixed vocabulary.

use crate::error::{ParleyError, Result};
use crate::ml::vocabulary::{LabelSet, TrainingExample, Vocabulary};

/// An encoded training pair: presence vector and one-hot target.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedExample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

/// Presence-only encoder. Out-of-vocabulary tokens are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BagOfWordsEncoder;

impl BagOfWordsEncoder {
    pub fn new() -> Self {
        BagOfWordsEncoder
    }

    /// Encode tokens as a 0/1 vector of length `vocabulary.len()`.
    pub fn encode<S: AsRef<str>>(&self, tokens: &[S], vocabulary: &Vocabulary) -> Vec<f64> {
        let mut vector = vec![0.0; vocabulary.len()];
        for token in tokens {
            if let Some(index) = vocabulary.index_of(token.as_ref()) {
                vector[index] = 1.0;
            }
        }
        vector
    }

    /// One-hot encode `tag` against the label set.
    pub fn encode_label(&self, tag: &str, labels: &LabelSet) -> Result<Vec<f64>> {
        let index = labels
            .index_of(tag)
            .ok_or_else(|| ParleyError::invalid_argument(format!("unknown label '{tag}'")))?;
        let mut vector = vec![0.0; labels.len()];
        vector[index] = 1.0;
        Ok(vector)
    }

    /// Encode every training example.
    pub fn encode_corpus(
        &self,
        examples: &[TrainingExample],
        vocabulary: &Vocabulary,
        labels: &LabelSet,
    ) -> Result<Vec<EncodedExample>> {
        examples
            .iter()
            .map(|example| {
                Ok(EncodedExample {
                    input: self.encode(&example.tokens, vocabulary),
                    target: self.encode_label(&example.tag, labels)?,
                })
            })
            .collect()
    }
}
