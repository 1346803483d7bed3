//! Confidence-thresholded ranking of a probability distribution.

use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};
use crate::ml::vocabulary::LabelSet;

use super::types::{PredictionCandidate, RankedPredictions};

/// Default minimum probability an intent must exceed.
pub const DEFAULT_THRESHOLD: f64 = 0.25;

/// Ranker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Probabilities must be strictly greater than this value.
    pub threshold: f64,
}

impl Default for RankerConfig {
    fn default() -> Self {
        RankerConfig {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl RankerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.threshold) {
            return Err(ParleyError::invalid_config(format!(
                "threshold must be in [0, 1), got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Filters and sorts a distribution into [`RankedPredictions`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentRanker {
    threshold: f64,
}

impl Default for IntentRanker {
    fn default() -> Self {
        IntentRanker::new(DEFAULT_THRESHOLD)
    }
}

impl IntentRanker {
    pub fn new(threshold: f64) -> Self {
        IntentRanker { threshold }
    }

    pub fn from_config(config: &RankerConfig) -> Self {
        IntentRanker::new(config.threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Pair probabilities with labels by position, keep those above the
    /// threshold and sort them by probability, descending. Ties keep label
    /// order. Entries beyond the shorter of the two inputs are ignored.
    pub fn rank(&self, distribution: &[f64], labels: &LabelSet) -> RankedPredictions {
        let mut candidates: Vec<PredictionCandidate> = distribution
            .iter()
            .zip(labels.iter())
            .filter(|(probability, _)| **probability > self.threshold)
            .map(|(&probability, tag)| PredictionCandidate::new(tag, probability))
            .collect();

        // Stable sort: equal probabilities stay in label order.
        candidates.sort_by(|a, b| b.probability.total_cmp(&a.probability));

        RankedPredictions::from_sorted(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> LabelSet {
        LabelSet::from_words(["farewell", "greeting", "vawc_filing"])
    }

    #[test]
    fn test_rank_keeps_confident_match() {
        let ranker = IntentRanker::default();

        // farewell, greeting, vawc_filing
        let ranked = ranker.rank(&[0.03, 0.02, 0.95], &labels());

        assert_eq!(
            ranked.into_vec(),
            vec![PredictionCandidate::new("vawc_filing", 0.95)]
        );
    }

    #[test]
    fn test_rank_nothing_clears_threshold() {
        let ranker = IntentRanker::default();

        let ranked = ranker.rank(&[0.25, 0.25, 0.2], &labels());

        assert!(ranked.is_empty());
        assert!(ranked.top().is_none());
    }

    #[test]
    fn test_rank_sorted_descending() {
        let ranker = IntentRanker::new(0.1);

        let ranked = ranker.rank(&[0.3, 0.5, 0.2], &labels());
        let probs: Vec<f64> = ranked.iter().map(|c| c.probability).collect();

        assert_eq!(probs, vec![0.5, 0.3, 0.2]);
        assert_eq!(ranked.top().unwrap().tag, "greeting");
    }

    #[test]
    fn test_rank_ties_keep_label_order() {
        let ranker = IntentRanker::new(0.1);

        let ranked = ranker.rank(&[0.4, 0.2, 0.4], &labels());
        let tags: Vec<&str> = ranked.iter().map(|c| c.tag.as_str()).collect();

        assert_eq!(tags, vec!["farewell", "vawc_filing", "greeting"]);
    }

    #[test]
    fn test_ranker_config_validation() {
        assert!(RankerConfig::default().validate().is_ok());
        assert!(RankerConfig { threshold: 1.0 }.validate().is_err());
        assert!(RankerConfig { threshold: -0.1 }.validate().is_err());
    }
}
