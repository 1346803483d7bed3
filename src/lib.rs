//! # Parley
//!
//! An intent-classification chatbot: utterances are normalized, encoded as a
//! bag of words over a fixed vocabulary, classified by a small feed-forward
//! network and answered with a canned response for the matched intent.
//!
//! ## Features
//!
//! - Rule-based English normalization (tokenize, lowercase, lemmatize)
//! - Deterministic vocabulary and label ordering
//! - MLP classifier trained with Adam, reproducible from a seed
//! - Single-file model bundle keeping weights, vocabulary and labels together
//! - Confidence-thresholded ranking with fixed fallback replies
//! - Keyword classifier for catalogs without a trained model
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use parley::analysis::analyzer::EnglishAnalyzer;
//! use parley::catalog::IntentCatalog;
//! use parley::chat::ChatEngine;
//! use parley::config::ParleyConfig;
//! use parley::ml::intent_classifier::load_bundle;
//!
//! # fn main() -> parley::error::Result<()> {
//! let config = ParleyConfig::default();
//! let catalog = Arc::new(IntentCatalog::load("resources/intents.json")?);
//! let bundle = load_bundle("model.bin")?;
//! let analyzer = Arc::new(EnglishAnalyzer::new()?);
//!
//! let engine = ChatEngine::neural(bundle, catalog, analyzer, &config);
//! let response = engine.respond("how do i file a vawc complaint", false);
//! println!("{}", response.response);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod catalog;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod ml;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
