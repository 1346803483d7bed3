//! Inference pipeline: one utterance in, one structured reply out.
//!
//! [`ChatEngine`] owns a classifier, the intent catalog and a response
//! selector. It is built once and then shared; [`ChatEngine::respond`] never
//! fails, turning every per-request error into a [`ChatResponse`] carrying an
//! error object, so one bad utterance cannot take the serving process down.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::catalog::IntentCatalog;
use crate::config::ParleyConfig;
use crate::error::{ParleyError, Result};
use crate::ml::bundle::ModelBundle;
use crate::ml::intent_classifier::{
    self, IntentClassifier, IntentRanker, PredictionCandidate, RankedPredictions,
    ResponseSelector,
};

/// Intent reported when nothing matched.
pub const UNKNOWN_INTENT: &str = "unknown";

/// Reply used when a request fails mid-pipeline.
pub const REQUEST_ERROR_RESPONSE: &str = "I encountered an error processing your request.";

/// Reply used when the model or catalog cannot be loaded at startup.
pub const STARTUP_ERROR_RESPONSE: &str = "System Error: Model not loaded.";

/// Successful pipeline output.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    /// Top-ranked intent, if any cleared the threshold.
    pub intent: Option<String>,
    pub predictions: RankedPredictions,
}

/// Stable error object for structured output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}

impl From<&ParleyError> for ErrorPayload {
    fn from(err: &ParleyError) -> Self {
        ErrorPayload {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// The structured result written for a calling process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub intent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Vec<PredictionCandidate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl ChatResponse {
    /// Payload emitted before exiting when startup fails.
    pub fn startup_failure(err: &ParleyError) -> Self {
        ChatResponse {
            response: STARTUP_ERROR_RESPONSE.to_string(),
            intent: UNKNOWN_INTENT.to_string(),
            predictions: None,
            error: Some(err.into()),
        }
    }

    /// Payload for a request that failed mid-pipeline.
    pub fn request_failure(err: &ParleyError) -> Self {
        ChatResponse {
            response: REQUEST_ERROR_RESPONSE.to_string(),
            intent: UNKNOWN_INTENT.to_string(),
            predictions: None,
            error: Some(err.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Classifier, catalog and response selection behind one entry point.
pub struct ChatEngine {
    classifier: Box<dyn IntentClassifier>,
    catalog: Arc<IntentCatalog>,
    selector: ResponseSelector,
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for ChatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatEngine")
            .field("classifier", &self.classifier.name())
            .field("intents", &self.catalog.len())
            .field("selector", &self.selector)
            .finish()
    }
}

impl ChatEngine {
    /// Assemble an engine. `seed` fixes response selection; `None` seeds
    /// from the operating system.
    pub fn new(
        classifier: Box<dyn IntentClassifier>,
        catalog: Arc<IntentCatalog>,
        selector: ResponseSelector,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        ChatEngine {
            classifier,
            catalog,
            selector,
            rng: Mutex::new(rng),
        }
    }

    /// Engine over a trained bundle.
    pub fn neural(
        bundle: Arc<ModelBundle>,
        catalog: Arc<IntentCatalog>,
        analyzer: Arc<dyn Analyzer>,
        config: &ParleyConfig,
    ) -> Self {
        let classifier = intent_classifier::new_neural(
            bundle,
            analyzer,
            IntentRanker::from_config(&config.ranker),
        );
        Self::from_parts(classifier, catalog, config)
    }

    /// Engine matching on the catalog's keywords.
    pub fn keyword(
        catalog: Arc<IntentCatalog>,
        analyzer: Arc<dyn Analyzer>,
        config: &ParleyConfig,
    ) -> Result<Self> {
        let classifier = intent_classifier::new_keyword_based(
            &catalog,
            analyzer,
            IntentRanker::from_config(&config.ranker),
        )?;
        Ok(Self::from_parts(classifier, catalog, config))
    }

    fn from_parts(
        classifier: Box<dyn IntentClassifier>,
        catalog: Arc<IntentCatalog>,
        config: &ParleyConfig,
    ) -> Self {
        Self::new(
            classifier,
            catalog,
            ResponseSelector::new(config.responses.clone()),
            config.seed,
        )
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    pub fn catalog(&self) -> &IntentCatalog {
        &self.catalog
    }

    /// Run the pipeline, propagating errors.
    pub fn reply(&self, text: &str) -> Result<ChatReply> {
        let predictions = self.classifier.classify(text)?;
        let response = {
            let mut rng = self.rng.lock();
            self.selector
                .select(&predictions, &self.catalog, &mut *rng)
        };
        let intent = predictions.top().map(|c| c.tag.clone());

        tracing::debug!(
            classifier = self.classifier.name(),
            intent = intent.as_deref().unwrap_or(UNKNOWN_INTENT),
            "answered utterance"
        );

        Ok(ChatReply {
            response,
            intent,
            predictions,
        })
    }

    /// Run the pipeline and shape the outcome for a calling process.
    ///
    /// Blank input yields the empty-query reply; errors yield an error
    /// payload. This method never fails.
    pub fn respond(&self, text: &str, include_predictions: bool) -> ChatResponse {
        if text.trim().is_empty() {
            return ChatResponse {
                response: self.selector.config().empty_query.clone(),
                intent: UNKNOWN_INTENT.to_string(),
                predictions: include_predictions.then(Vec::new),
                error: None,
            };
        }

        match self.reply(text) {
            Ok(reply) => ChatResponse {
                response: reply.response,
                intent: reply.intent.unwrap_or_else(|| UNKNOWN_INTENT.to_string()),
                predictions: include_predictions.then(|| reply.predictions.into_vec()),
                error: None,
            },
            Err(err) => {
                tracing::error!(error = %err, code = err.code(), "failed to answer utterance");
                ChatResponse::request_failure(&err)
            }
        }
    }
}
