//! Response selection for a ranked prediction.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::catalog::IntentCatalog;

use super::types::RankedPredictions;

pub const DEFAULT_NO_MATCH_RESPONSE: &str =
    "I'm sorry, I don't understand that yet. Can you rephrase?";
pub const DEFAULT_MISSING_INTENT_RESPONSE: &str = "I'm not sure how to help with that.";
pub const DEFAULT_EMPTY_QUERY_RESPONSE: &str = "No query provided.";

/// Fixed fallback replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Used when no intent clears the threshold.
    pub no_match: String,
    /// Used when the top intent is absent from the catalog.
    pub missing_intent: String,
    /// Used for empty or whitespace-only utterances.
    pub empty_query: String,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        ResponseConfig {
            no_match: DEFAULT_NO_MATCH_RESPONSE.to_string(),
            missing_intent: DEFAULT_MISSING_INTENT_RESPONSE.to_string(),
            empty_query: DEFAULT_EMPTY_QUERY_RESPONSE.to_string(),
        }
    }
}

/// Picks the reply for the top-ranked intent.
#[derive(Debug, Clone, Default)]
pub struct ResponseSelector {
    config: ResponseConfig,
}

impl ResponseSelector {
    pub fn new(config: ResponseConfig) -> Self {
        ResponseSelector { config }
    }

    pub fn config(&self) -> &ResponseConfig {
        &self.config
    }

    /// Never fails: an empty ranking or an unknown tag yields a fallback.
    pub fn select<R: Rng + ?Sized>(
        &self,
        ranked: &RankedPredictions,
        catalog: &IntentCatalog,
        rng: &mut R,
    ) -> String {
        let Some(top) = ranked.top() else {
            return self.config.no_match.clone();
        };

        let Some(intent) = catalog.get(&top.tag) else {
            tracing::warn!(tag = %top.tag, "predicted intent is missing from the catalog");
            return self.config.missing_intent.clone();
        };

        intent
            .responses
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| self.config.missing_intent.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IntentDefinition;
    use crate::ml::intent_classifier::IntentRanker;
    use crate::ml::vocabulary::LabelSet;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog() -> IntentCatalog {
        IntentCatalog::new(vec![IntentDefinition::new(
            "vawc_filing",
            vec!["how to file vawc".to_string()],
            vec![
                "Go to the barangay hall.".to_string(),
                "You can file at the police station.".to_string(),
                "Visit the women's desk.".to_string(),
            ],
        )])
        .unwrap()
    }

    fn ranked(tag: &str) -> RankedPredictions {
        IntentRanker::default().rank(&[0.9], &LabelSet::from_words([tag]))
    }

    #[test]
    fn test_empty_ranking_falls_back() {
        let selector = ResponseSelector::default();
        let mut rng = StdRng::seed_from_u64(0);

        let reply = selector.select(&RankedPredictions::empty(), &catalog(), &mut rng);

        assert_eq!(reply, DEFAULT_NO_MATCH_RESPONSE);
    }

    #[test]
    fn test_reply_comes_from_intent() {
        let selector = ResponseSelector::default();
        let catalog = catalog();
        let responses = &catalog.get("vawc_filing").unwrap().responses;
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..50 {
            let reply = selector.select(&ranked("vawc_filing"), &catalog, &mut rng);
            assert!(responses.contains(&reply));
        }
    }

    #[test]
    fn test_unknown_tag_falls_back() {
        let selector = ResponseSelector::default();
        let mut rng = StdRng::seed_from_u64(0);

        let reply = selector.select(&ranked("weather"), &catalog(), &mut rng);

        assert_eq!(reply, DEFAULT_MISSING_INTENT_RESPONSE);
    }

    #[test]
    fn test_custom_fallbacks() {
        let selector = ResponseSelector::new(ResponseConfig {
            no_match: "Please rephrase.".to_string(),
            ..ResponseConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(0);

        let reply = selector.select(&RankedPredictions::empty(), &catalog(), &mut rng);

        assert_eq!(reply, "Please rephrase.");
        assert_eq!(selector.config().empty_query, DEFAULT_EMPTY_QUERY_RESPONSE);
    }
}
