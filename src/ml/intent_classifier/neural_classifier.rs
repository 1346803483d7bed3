//! Neural intent classifier backed by a trained [`ModelBundle`].

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;
use crate::ml::bundle::ModelBundle;
use crate::ml::encoder::BagOfWordsEncoder;

use super::classifier::IntentClassifier;
use super::ranker::IntentRanker;
use super::types::RankedPredictions;

/// Normalize, encode against the bundle vocabulary, predict, rank.
pub struct NeuralIntentClassifier {
    analyzer: Arc<dyn Analyzer>,
    encoder: BagOfWordsEncoder,
    bundle: Arc<ModelBundle>,
    ranker: IntentRanker,
}

impl std::fmt::Debug for NeuralIntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeuralIntentClassifier")
            .field("analyzer", &self.analyzer.name())
            .field("vocabulary_size", &self.bundle.vocabulary().len())
            .field("labels", &self.bundle.labels().len())
            .field("threshold", &self.ranker.threshold())
            .finish()
    }
}

impl NeuralIntentClassifier {
    pub fn new(bundle: Arc<ModelBundle>, analyzer: Arc<dyn Analyzer>, ranker: IntentRanker) -> Self {
        NeuralIntentClassifier {
            analyzer,
            encoder: BagOfWordsEncoder::new(),
            bundle,
            ranker,
        }
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    /// Full distribution over the bundle's labels, before ranking.
    pub fn distribution(&self, text: &str) -> Result<Vec<f64>> {
        let tokens = self.analyzer.normalize(text)?;
        let input = self.encoder.encode(&tokens, self.bundle.vocabulary());
        self.bundle.predict(&input)
    }
}

impl IntentClassifier for NeuralIntentClassifier {
    fn classify(&self, text: &str) -> Result<RankedPredictions> {
        let distribution = self.distribution(text)?;
        let ranked = self.ranker.rank(&distribution, self.bundle.labels());

        tracing::debug!(
            classifier = self.name(),
            candidates = ranked.len(),
            top = ranked.top().map(|c| c.tag.as_str()).unwrap_or("-"),
            "classified utterance"
        );
        Ok(ranked)
    }

    fn name(&self) -> &str {
        "neural"
    }
}
