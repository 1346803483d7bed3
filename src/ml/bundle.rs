//! The persisted model bundle.
//!
//! A bundle holds the trained network together with the vocabulary and label
//! set it was trained against, so they are always saved and loaded as one
//! unit. Bundles are produced by [`IntentTrainer`] or by [`ModelBundle::load`]
//! and are read-only afterwards.
//!
//! [`IntentTrainer`]: crate::ml::intent_classifier::IntentTrainer

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};
use crate::ml::mlp::MlpState;
use crate::ml::vocabulary::{LabelSet, Vocabulary};

/// Descriptive information recorded at training time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleMetadata {
    /// Crate version that produced the bundle.
    pub version: String,
    /// Training timestamp.
    pub trained_at: DateTime<Utc>,
    /// Number of training examples used.
    pub training_examples: usize,
    pub hidden_layers: Vec<usize>,
    pub iterations: usize,
    pub final_loss: f64,
}

/// Trained network, vocabulary and label set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    state: MlpState,
    vocabulary: Vocabulary,
    labels: LabelSet,
    metadata: BundleMetadata,
}

impl ModelBundle {
    pub(crate) fn new(
        state: MlpState,
        vocabulary: Vocabulary,
        labels: LabelSet,
        metadata: BundleMetadata,
    ) -> Result<Self> {
        let bundle = ModelBundle {
            state,
            vocabulary,
            labels,
            metadata,
        };
        bundle.validate()?;
        Ok(bundle)
    }

    pub fn state(&self) -> &MlpState {
        &self.state
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn metadata(&self) -> &BundleMetadata {
        &self.metadata
    }

    /// Probability distribution over [`ModelBundle::labels`].
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.state.predict(input)
    }

    /// Write the bundle to `path`.
    ///
    /// The bytes go to a sibling temporary file that is renamed over `path`
    /// once fully written. The temporary file is removed if any step fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut tmp_name = path.file_name().map(|n| n.to_os_string()).ok_or_else(|| {
            ParleyError::invalid_argument(format!("invalid model path: {}", path.display()))
        })?;
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        let written = self
            .write_to(&tmp_path)
            .and_then(|()| std::fs::rename(&tmp_path, path).map_err(ParleyError::from));
        if let Err(err) = written {
            if let Err(remove_err) = std::fs::remove_file(&tmp_path) {
                tracing::warn!(
                    path = %tmp_path.display(),
                    error = %remove_err,
                    "failed to remove temporary model file"
                );
            }
            return Err(err);
        }

        tracing::info!(
            path = %path.display(),
            words = self.vocabulary.len(),
            labels = self.labels.len(),
            "saved model bundle"
        );
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;
        writer
            .into_inner()
            .map_err(|e| ParleyError::Io(e.into_error()))?
            .sync_all()?;
        Ok(())
    }

    /// Read a bundle from `path`. Any failure is reported as
    /// [`ParleyError::ModelLoad`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| ParleyError::model_load(format!("cannot open {}: {e}", path.display())))?;

        let bundle: ModelBundle = bincode::deserialize_from(BufReader::new(file)).map_err(|e| {
            ParleyError::model_load(format!("cannot decode {}: {e}", path.display()))
        })?;
        bundle.validate()?;

        tracing::debug!(
            path = %path.display(),
            words = bundle.vocabulary.len(),
            labels = bundle.labels.len(),
            trained_at = %bundle.metadata.trained_at,
            "loaded model bundle"
        );
        Ok(bundle)
    }

    fn validate(&self) -> Result<()> {
        if !self.vocabulary.is_well_formed() || !self.labels.is_well_formed() {
            return Err(ParleyError::model_load(
                "vocabulary or label set is not sorted and unique",
            ));
        }
        if self.labels.is_empty() {
            return Err(ParleyError::model_load("label set is empty"));
        }
        if self.state.input_dim() != self.vocabulary.len() {
            return Err(ParleyError::model_load(format!(
                "network expects {} inputs but the vocabulary has {} words",
                self.state.input_dim(),
                self.vocabulary.len()
            )));
        }
        self.state.validate(self.labels.len())
    }
}
