//! Intent catalog: the labeled example utterances and canned responses.
//!
//! The catalog is read from a JSON document of the form
//!
//! ```json
//! {
//!   "intents": [
//!     {
//!       "tag": "greeting",
//!       "patterns": ["hi", "hello"],
//!       "responses": ["Hello! How can I help you?"],
//!       "keywords": ["hi", "hello"]
//!     }
//!   ]
//! }
//! ```
//!
//! `keywords` is optional and only used by the keyword classifier. The
//! catalog is validated once at construction (unique, non-empty tags and
//! non-empty response lists) and is immutable afterwards.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};

/// A single intent: its tag, example utterances and candidate replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentDefinition {
    /// Unique identifier of the intent.
    pub tag: String,
    /// Example utterances used for training.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Candidate replies; one is picked at random when the intent matches.
    pub responses: Vec<String>,
    /// Trigger words for keyword-based classification.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl IntentDefinition {
    /// Create a new intent definition without keywords.
    pub fn new<S: Into<String>>(tag: S, patterns: Vec<String>, responses: Vec<String>) -> Self {
        IntentDefinition {
            tag: tag.into(),
            patterns,
            responses,
            keywords: Vec::new(),
        }
    }

    /// Attach keyword triggers to this definition.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }
}

/// On-disk shape of the catalog.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    intents: Vec<IntentDefinition>,
}

/// Ordered, validated collection of intent definitions.
#[derive(Debug, Clone)]
pub struct IntentCatalog {
    intents: Vec<IntentDefinition>,
    by_tag: HashMap<String, usize>,
}

impl IntentCatalog {
    /// Build a catalog, enforcing tag uniqueness and non-empty responses.
    pub fn new(intents: Vec<IntentDefinition>) -> Result<Self> {
        let mut by_tag = HashMap::with_capacity(intents.len());

        for (idx, intent) in intents.iter().enumerate() {
            if intent.tag.trim().is_empty() {
                return Err(ParleyError::catalog_load(format!(
                    "intent #{idx} has an empty tag"
                )));
            }
            if intent.responses.is_empty() {
                return Err(ParleyError::catalog_load(format!(
                    "intent '{}' has no responses",
                    intent.tag
                )));
            }
            if by_tag.insert(intent.tag.clone(), idx).is_some() {
                return Err(ParleyError::catalog_load(format!(
                    "duplicate intent tag '{}'",
                    intent.tag
                )));
            }
        }

        Ok(IntentCatalog { intents, by_tag })
    }

    /// Parse a catalog from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| ParleyError::catalog_load(format!("malformed catalog: {e}")))?;
        Self::new(file.intents)
    }

    /// Load a catalog from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ParleyError::catalog_load(format!("cannot read {}: {e}", path.display()))
        })?;
        let catalog = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            intents = catalog.len(),
            patterns = catalog.pattern_count(),
            "loaded intent catalog"
        );
        Ok(catalog)
    }

    /// Serialize the catalog back to JSON.
    pub fn to_json_string(&self) -> Result<String> {
        let file = CatalogFile {
            intents: self.intents.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Look up an intent by tag.
    pub fn get(&self, tag: &str) -> Option<&IntentDefinition> {
        self.by_tag.get(tag).map(|&idx| &self.intents[idx])
    }

    /// Iterate over intents in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &IntentDefinition> {
        self.intents.iter()
    }

    /// Number of intents.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Whether the catalog has no intents.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Total number of example patterns across all intents.
    pub fn pattern_count(&self) -> usize {
        self.intents.iter().map(|i| i.patterns.len()).sum()
    }
}
