//! Configuration for training and inference.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```json
//! {
//!   "classifier": { "hidden_layers": [64], "max_iter": 500 },
//!   "ranker": { "threshold": 0.4 },
//!   "seed": 42
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};
use crate::ml::intent_classifier::{RankerConfig, ResponseConfig};
use crate::ml::mlp::MlpConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParleyConfig {
    /// Network shape and optimizer settings.
    pub classifier: MlpConfig,

    /// Confidence threshold.
    pub ranker: RankerConfig,

    /// Fallback replies.
    pub responses: ResponseConfig,

    /// Seed for training and response selection.
    /// If None, the generator is seeded from the operating system.
    pub seed: Option<u64>,
}

impl ParleyConfig {
    /// Load and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ParleyError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: ParleyConfig = serde_json::from_str(&content)
            .map_err(|e| ParleyError::invalid_config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        self.ranker.validate()?;
        Ok(())
    }
}
