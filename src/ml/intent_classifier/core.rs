//! Helper functions for creating intent classifiers.

use std::path::Path;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::catalog::IntentCatalog;
use crate::error::Result;
use crate::ml::bundle::ModelBundle;
use crate::ml::intent_classifier::classifier::IntentClassifier;
use crate::ml::intent_classifier::keyword_classifier::KeywordIntentClassifier;
use crate::ml::intent_classifier::neural_classifier::NeuralIntentClassifier;
use crate::ml::intent_classifier::ranker::IntentRanker;

/// Load a model bundle from disk.
pub fn load_bundle<P: AsRef<Path>>(path: P) -> Result<Arc<ModelBundle>> {
    Ok(Arc::new(ModelBundle::load(path)?))
}

/// Create a new keyword-based intent classifier from the catalog keywords.
pub fn new_keyword_based(
    catalog: &IntentCatalog,
    analyzer: Arc<dyn Analyzer>,
    ranker: IntentRanker,
) -> Result<Box<dyn IntentClassifier>> {
    Ok(Box::new(KeywordIntentClassifier::from_catalog(
        catalog, analyzer, ranker,
    )?))
}

/// Create a new neural intent classifier over a trained bundle.
pub fn new_neural(
    bundle: Arc<ModelBundle>,
    analyzer: Arc<dyn Analyzer>,
    ranker: IntentRanker,
) -> Box<dyn IntentClassifier> {
    Box::new(NeuralIntentClassifier::new(bundle, analyzer, ranker))
}
