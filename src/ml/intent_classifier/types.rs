//! Common types for intent classification.

use serde::{Deserialize, Serialize};

/// A candidate intent and its predicted probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionCandidate {
    /// Intent tag.
    pub tag: String,
    /// Probability in `[0, 1]`.
    pub probability: f64,
}

impl PredictionCandidate {
    pub fn new<S: Into<String>>(tag: S, probability: f64) -> Self {
        PredictionCandidate {
            tag: tag.into(),
            probability,
        }
    }
}

/// Candidates above the confidence threshold, most probable first.
///
/// An empty list is the normal "no confident match" outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedPredictions(Vec<PredictionCandidate>);

impl RankedPredictions {
    /// Callers outside the ranker go through [`IntentRanker`], which
    /// establishes the ordering.
    ///
    /// [`IntentRanker`]: super::IntentRanker
    pub(crate) fn from_sorted(candidates: Vec<PredictionCandidate>) -> Self {
        RankedPredictions(candidates)
    }

    pub fn empty() -> Self {
        RankedPredictions(Vec::new())
    }

    /// The most probable candidate, if any cleared the threshold.
    pub fn top(&self) -> Option<&PredictionCandidate> {
        self.0.first()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PredictionCandidate> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[PredictionCandidate] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<PredictionCandidate> {
        self.0
    }
}

impl IntoIterator for RankedPredictions {
    type Item = PredictionCandidate;
    type IntoIter = std::vec::IntoIter<PredictionCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
