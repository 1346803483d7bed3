//! Training pipeline: catalog in, model bundle out.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::catalog::IntentCatalog;
use crate::error::{ParleyError, Result};
use crate::ml::bundle::{BundleMetadata, ModelBundle};
use crate::ml::encoder::BagOfWordsEncoder;
use crate::ml::mlp::{MlpClassifier, MlpConfig, TrainingStats};
use crate::ml::vocabulary::VocabularyBuilder;

/// Summary of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Number of training patterns.
    pub documents: usize,
    /// Number of distinct intents.
    pub classes: usize,
    /// Vocabulary size.
    pub unique_words: usize,
    pub stats: TrainingStats,
}

/// Result of [`IntentTrainer::train`].
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub bundle: ModelBundle,
    pub report: TrainingReport,
}

/// Builds the vocabulary, encodes the corpus and fits the network.
pub struct IntentTrainer {
    analyzer: Arc<dyn Analyzer>,
    config: MlpConfig,
}

impl std::fmt::Debug for IntentTrainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentTrainer")
            .field("analyzer", &self.analyzer.name())
            .field("config", &self.config)
            .finish()
    }
}

impl IntentTrainer {
    pub fn new(analyzer: Arc<dyn Analyzer>, config: MlpConfig) -> Self {
        IntentTrainer { analyzer, config }
    }

    pub fn config(&self) -> &MlpConfig {
        &self.config
    }

    /// Train a new bundle from `catalog`.
    pub fn train<R: Rng + ?Sized>(
        &self,
        catalog: &IntentCatalog,
        rng: &mut R,
    ) -> Result<TrainingOutcome> {
        self.config.validate()?;

        let corpus = VocabularyBuilder::new(self.analyzer.clone()).build(catalog)?;
        let encoded = BagOfWordsEncoder::new().encode_corpus(
            &corpus.examples,
            &corpus.vocabulary,
            &corpus.labels,
        )?;

        tracing::info!(
            examples = encoded.len(),
            hidden_layers = ?self.config.hidden_layers,
            max_iter = self.config.max_iter,
            "training model"
        );

        let mut classifier = MlpClassifier::new(self.config.clone());
        let stats = classifier.fit(&encoded, rng)?;
        let Some(state) = classifier.into_state() else {
            return Err(ParleyError::UntrainedModel);
        };

        let report = TrainingReport {
            documents: corpus.examples.len(),
            classes: corpus.labels.len(),
            unique_words: corpus.vocabulary.len(),
            stats,
        };

        let metadata = BundleMetadata {
            version: crate::VERSION.to_string(),
            trained_at: Utc::now(),
            training_examples: report.documents,
            hidden_layers: self.config.hidden_layers.clone(),
            iterations: report.stats.iterations,
            final_loss: report.stats.final_training_loss,
        };
        let bundle = ModelBundle::new(state, corpus.vocabulary, corpus.labels, metadata)?;

        tracing::info!(
            iterations = report.stats.iterations,
            loss = report.stats.final_training_loss,
            converged = report.stats.converged,
            elapsed_ms = report.stats.training_time_ms,
            "training complete"
        );

        Ok(TrainingOutcome { bundle, report })
    }
}
