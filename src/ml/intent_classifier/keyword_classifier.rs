//! Keyword-based intent classifier.

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::catalog::IntentCatalog;
use crate::error::Result;
use crate::ml::vocabulary::LabelSet;

use super::classifier::IntentClassifier;
use super::ranker::IntentRanker;
use super::types::RankedPredictions;

/// Keyword-based intent classifier.
///
/// Each intent scores one point per keyword found in the normalized query.
/// Scores are normalized into a distribution and ranked like the neural
/// classifier's output. Needs no training; intents without keywords are
/// never predicted.
pub struct KeywordIntentClassifier {
    labels: LabelSet,
    /// Normalized keywords, index-aligned with `labels`.
    keywords: Vec<HashSet<String>>,
    analyzer: Arc<dyn Analyzer>,
    ranker: IntentRanker,
}

impl std::fmt::Debug for KeywordIntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordIntentClassifier")
            .field("labels", &self.labels)
            .field("keywords", &self.keywords)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl KeywordIntentClassifier {
    /// Collect and normalize the keywords of every intent in the catalog.
    pub fn from_catalog(
        catalog: &IntentCatalog,
        analyzer: Arc<dyn Analyzer>,
        ranker: IntentRanker,
    ) -> Result<Self> {
        let labels = LabelSet::from_words(
            catalog
                .iter()
                .filter(|intent| !intent.keywords.is_empty())
                .map(|intent| intent.tag.clone()),
        );

        let mut keywords = Vec::with_capacity(labels.len());
        for tag in labels.iter() {
            let mut set = HashSet::new();
            if let Some(intent) = catalog.get(tag) {
                for keyword in &intent.keywords {
                    set.extend(analyzer.normalize(keyword)?);
                }
            }
            keywords.push(set);
        }

        if labels.is_empty() {
            tracing::warn!("no intent defines keywords; every query will fall back");
        }

        Ok(KeywordIntentClassifier {
            labels,
            keywords,
            analyzer,
            ranker,
        })
    }

    fn scores(&self, tokens: &HashSet<String>) -> Vec<f64> {
        self.keywords
            .iter()
            .map(|set| set.intersection(tokens).count() as f64)
            .collect()
    }
}

impl IntentClassifier for KeywordIntentClassifier {
    fn classify(&self, text: &str) -> Result<RankedPredictions> {
        let tokens: HashSet<String> = self.analyzer.normalize(text)?.into_iter().collect();

        let mut distribution = self.scores(&tokens);
        let total: f64 = distribution.iter().sum();
        if total == 0.0 {
            return Ok(RankedPredictions::empty());
        }
        distribution.iter_mut().for_each(|score| *score /= total);

        Ok(self.ranker.rank(&distribution, &self.labels))
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
