//! Vocabulary and label set construction.
//!
//! Both are sorted, deduplicated sequences. The encoder and the classifier
//! address words and labels by position, so identical catalogs must always
//! produce identical orderings.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::catalog::IntentCatalog;
use crate::error::{ParleyError, Result};

/// Sorted, deduplicated sequence of strings with positional lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from any collection of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = words.into_iter().map(Into::into).collect();
        Vocabulary {
            words: set.into_iter().collect(),
        }
    }

    /// Position of `word`, if present.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.words
            .binary_search_by(|entry| entry.as_str().cmp(word))
            .ok()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index_of(word).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Whether the stored words are strictly increasing.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.words.windows(2).all(|pair| pair[0] < pair[1])
    }
}

/// The ordered label set. Index-aligned with the classifier output.
pub type LabelSet = Vocabulary;

/// A normalized pattern paired with the tag it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingExample {
    pub tokens: Vec<String>,
    pub tag: String,
}

/// Output of [`VocabularyBuilder::build`].
#[derive(Debug, Clone)]
pub struct TrainingCorpus {
    pub vocabulary: Vocabulary,
    pub labels: LabelSet,
    pub examples: Vec<TrainingExample>,
}

/// Normalizes every catalog pattern and collects the vocabulary and labels.
pub struct VocabularyBuilder {
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for VocabularyBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VocabularyBuilder")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl VocabularyBuilder {
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        VocabularyBuilder { analyzer }
    }

    /// Build the vocabulary, label set and training examples.
    ///
    /// Intents without patterns contribute no label, since the classifier
    /// could never learn to predict them. Fails with
    /// [`ParleyError::EmptyCatalog`] when the catalog has no patterns.
    pub fn build(&self, catalog: &IntentCatalog) -> Result<TrainingCorpus> {
        let mut words = BTreeSet::new();
        let mut tags = BTreeSet::new();
        let mut examples = Vec::with_capacity(catalog.pattern_count());

        for intent in catalog.iter() {
            if intent.patterns.is_empty() {
                tracing::warn!(tag = %intent.tag, "intent has no patterns, skipping");
                continue;
            }

            for pattern in &intent.patterns {
                let tokens = self.analyzer.normalize(pattern)?;
                words.extend(tokens.iter().cloned());
                examples.push(TrainingExample {
                    tokens,
                    tag: intent.tag.clone(),
                });
            }
            tags.insert(intent.tag.clone());
        }

        if examples.is_empty() {
            return Err(ParleyError::EmptyCatalog);
        }

        let corpus = TrainingCorpus {
            vocabulary: Vocabulary::from_words(words),
            labels: Vocabulary::from_words(tags),
            examples,
        };

        tracing::info!(
            documents = corpus.examples.len(),
            classes = corpus.labels.len(),
            unique_words = corpus.vocabulary.len(),
            "built vocabulary"
        );

        Ok(corpus)
    }
}
