//! Machine learning for intent classification.
//!
//! Training turns an intent catalog into a [`bundle::ModelBundle`]:
//!
//! ```text
//! catalog → normalize → VocabularyBuilder → BagOfWordsEncoder → MlpClassifier::fit → ModelBundle
//! ```
//!
//! Inference runs the same normalizer and encoder against the bundle's
//! vocabulary, then ranks the network output (see [`intent_classifier`]).

pub mod bundle;
pub mod encoder;
pub mod intent_classifier;
pub mod mlp;
pub mod vocabulary;
