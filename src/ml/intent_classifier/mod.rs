//! Intent classification: ranking, response selection and training.
//!
//! This module provides intent classification for chat utterances using either:
//! - Neural classification: a bag-of-words MLP loaded from a model bundle
//! - Keyword-based classification: rule-based matching on catalog keywords
//!
//! # Architecture
//!
//! - `IntentClassifier` trait: Common interface for all classifiers
//! - `NeuralIntentClassifier`: MLP over a trained `ModelBundle`
//! - `KeywordIntentClassifier`: Keyword matching implementation
//! - `IntentRanker`: Confidence threshold and ordering of a distribution
//! - `ResponseSelector`: Reply lookup for the top-ranked intent
//! - `IntentTrainer`: Builds a `ModelBundle` from an intent catalog
//!
//! # Example
//!
//! ```rust,no_run
//! use parley::analysis::analyzer::EnglishAnalyzer;
//! use parley::catalog::IntentCatalog;
//! use parley::ml::intent_classifier::{self, IntentRanker, IntentTrainer};
//! use parley::ml::mlp::MlpConfig;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = IntentCatalog::load("resources/intents.json")?;
//! let analyzer = Arc::new(EnglishAnalyzer::new()?);
//!
//! let trainer = IntentTrainer::new(analyzer.clone(), MlpConfig::default());
//! let outcome = trainer.train(&catalog, &mut StdRng::seed_from_u64(42))?;
//!
//! let classifier = intent_classifier::new_neural(
//!     Arc::new(outcome.bundle),
//!     analyzer,
//!     IntentRanker::default(),
//! );
//! let ranked = classifier.classify("how do i file a vawc complaint")?;
//! # Ok(())
//! # }
//! ```

mod classifier;
mod core;
mod keyword_classifier;
mod neural_classifier;
mod ranker;
mod response;
mod trainer;
mod types;

// Public exports
pub use classifier::IntentClassifier;
pub use self::core::{load_bundle, new_keyword_based, new_neural};
pub use keyword_classifier::KeywordIntentClassifier;
pub use neural_classifier::NeuralIntentClassifier;
pub use ranker::{DEFAULT_THRESHOLD, IntentRanker, RankerConfig};
pub use response::{
    DEFAULT_EMPTY_QUERY_RESPONSE, DEFAULT_MISSING_INTENT_RESPONSE, DEFAULT_NO_MATCH_RESPONSE,
    ResponseConfig, ResponseSelector,
};
pub use trainer::{IntentTrainer, TrainingOutcome, TrainingReport};
pub use types::{PredictionCandidate, RankedPredictions};
