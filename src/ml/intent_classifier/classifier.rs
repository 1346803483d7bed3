//! Intent classifier trait definition.

use crate::error::Result;

use super::types::RankedPredictions;

/// Intent classifier trait.
///
/// Implementations map a raw utterance to the intents that clear their
/// confidence threshold. Implementations hold only read-only state, so one
/// classifier can serve concurrent requests.
pub trait IntentClassifier: Send + Sync {
    /// Rank the plausible intents for an utterance.
    ///
    /// # Arguments
    /// * `text` - The raw utterance
    ///
    /// # Returns
    /// Candidates sorted by probability, possibly empty
    fn classify(&self, text: &str) -> Result<RankedPredictions>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
