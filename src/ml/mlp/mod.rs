//! Feed-forward neural network classifier.
//!
//! A multi-layer perceptron with ReLU hidden layers and a softmax output,
//! trained with mini-batch Adam on cross-entropy loss plus an L2 penalty.
//!
//! # Examples
//!
//! ```
//! use parley::ml::encoder::EncodedExample;
//! use parley::ml::mlp::{MlpClassifier, MlpConfig};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let examples = vec![
//!     EncodedExample { input: vec![1.0, 0.0], target: vec![1.0, 0.0] },
//!     EncodedExample { input: vec![0.0, 1.0], target: vec![0.0, 1.0] },
//! ];
//!
//! let mut classifier = MlpClassifier::new(MlpConfig::default());
//! let mut rng = StdRng::seed_from_u64(42);
//! classifier.fit(&examples, &mut rng).unwrap();
//!
//! let probs = classifier.predict(&[1.0, 0.0]).unwrap();
//! assert!(probs[0] > probs[1]);
//! ```

mod adam;
mod layer;

pub use adam::AdamOptimizer;
pub use layer::{DenseLayer, MlpState};

use std::time::Instant;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};
use crate::ml::encoder::EncodedExample;

/// Hyperparameters of the network and its optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlpConfig {
    /// Width of each hidden layer.
    pub hidden_layers: Vec<usize>,
    /// Maximum number of passes over the training set.
    pub max_iter: usize,
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    /// L2 penalty strength.
    pub alpha: f64,
    /// Mini-batch size, clamped to the number of examples.
    pub batch_size: usize,
    /// Minimum loss improvement that resets the no-improvement counter.
    pub tol: f64,
    /// Epochs without improvement tolerated before training stops.
    pub n_iter_no_change: usize,
}

impl Default for MlpConfig {
    fn default() -> Self {
        MlpConfig {
            hidden_layers: vec![128, 64],
            max_iter: 1000,
            learning_rate: 0.001,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            alpha: 1e-4,
            batch_size: 200,
            tol: 1e-4,
            n_iter_no_change: 10,
        }
    }
}

impl MlpConfig {
    pub fn validate(&self) -> Result<()> {
        if self.hidden_layers.is_empty() {
            return Err(ParleyError::invalid_config(
                "at least one hidden layer is required",
            ));
        }
        if self.hidden_layers.contains(&0) {
            return Err(ParleyError::invalid_config(
                "hidden layer sizes must be positive",
            ));
        }
        if self.max_iter == 0 {
            return Err(ParleyError::invalid_config("max_iter must be positive"));
        }
        if self.batch_size == 0 {
            return Err(ParleyError::invalid_config("batch_size must be positive"));
        }
        if !(self.learning_rate > 0.0) {
            return Err(ParleyError::invalid_config(
                "learning_rate must be positive",
            ));
        }
        if !(0.0..1.0).contains(&self.beta1) || !(0.0..1.0).contains(&self.beta2) {
            return Err(ParleyError::invalid_config("beta1 and beta2 must be in [0, 1)"));
        }
        if !(self.epsilon > 0.0) {
            return Err(ParleyError::invalid_config("epsilon must be positive"));
        }
        if !(self.alpha >= 0.0) || !(self.tol >= 0.0) {
            return Err(ParleyError::invalid_config(
                "alpha and tol must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Training statistics and performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Training loss curve, one entry per epoch.
    pub training_losses: Vec<f64>,
    /// Number of epochs completed.
    pub iterations: usize,
    /// Training time in milliseconds.
    pub training_time_ms: u64,
    /// Loss of the last epoch.
    pub final_training_loss: f64,
    /// Whether training stopped on the convergence criterion rather than
    /// on `max_iter`.
    pub converged: bool,
}

/// Gradient accumulators, shaped like the network.
struct Gradients {
    weights: Vec<Vec<f64>>,
    biases: Vec<Vec<f64>>,
}

impl Gradients {
    fn zeros(state: &MlpState) -> Self {
        Gradients {
            weights: state.layers.iter().map(|l| vec![0.0; l.weights.len()]).collect(),
            biases: state.layers.iter().map(|l| vec![0.0; l.biases.len()]).collect(),
        }
    }

    /// Interleave as `[w0, b0, w1, b1, ...]`, the optimizer's buffer order.
    fn into_buffers(self) -> Vec<Vec<f64>> {
        self.weights
            .into_iter()
            .zip(self.biases)
            .flat_map(|(w, b)| [w, b])
            .collect()
    }
}

/// Multi-layer perceptron classifier.
#[derive(Debug, Clone)]
pub struct MlpClassifier {
    config: MlpConfig,
    state: Option<MlpState>,
}

impl MlpClassifier {
    pub fn new(config: MlpConfig) -> Self {
        MlpClassifier {
            config,
            state: None,
        }
    }

    /// Wrap an already trained state.
    pub fn from_state(config: MlpConfig, state: MlpState) -> Self {
        MlpClassifier {
            config,
            state: Some(state),
        }
    }

    pub fn config(&self) -> &MlpConfig {
        &self.config
    }

    pub fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&MlpState> {
        self.state.as_ref()
    }

    pub fn into_state(self) -> Option<MlpState> {
        self.state
    }

    /// Forward pass through the trained network.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.state
            .as_ref()
            .ok_or(ParleyError::UntrainedModel)?
            .predict(input)
    }

    /// Train from scratch on `examples`.
    ///
    /// The RNG drives weight initialisation and the single shuffle of the
    /// examples, so a seeded generator gives reproducible training.
    pub fn fit<R: Rng + ?Sized>(
        &mut self,
        examples: &[EncodedExample],
        rng: &mut R,
    ) -> Result<TrainingStats> {
        self.config.validate()?;

        let first = examples
            .first()
            .ok_or_else(|| ParleyError::invalid_argument("no training examples"))?;
        let input_dim = first.input.len();
        let output_dim = first.target.len();
        if output_dim == 0 {
            return Err(ParleyError::invalid_argument("targets must not be empty"));
        }
        for example in examples {
            if example.input.len() != input_dim {
                return Err(ParleyError::DimensionMismatch {
                    expected: input_dim,
                    actual: example.input.len(),
                });
            }
            if example.target.len() != output_dim {
                return Err(ParleyError::DimensionMismatch {
                    expected: output_dim,
                    actual: example.target.len(),
                });
            }
        }

        let start = Instant::now();

        let mut sizes = Vec::with_capacity(self.config.hidden_layers.len() + 2);
        sizes.push(input_dim);
        sizes.extend(&self.config.hidden_layers);
        sizes.push(output_dim);

        let layers = sizes
            .windows(2)
            .map(|pair| DenseLayer::glorot(pair[0], pair[1], &mut *rng))
            .collect();
        let mut state = MlpState::new(input_dim, layers);

        let mut order: Vec<usize> = (0..examples.len()).collect();
        order.shuffle(rng);

        let buffer_sizes: Vec<usize> = state
            .layers
            .iter()
            .flat_map(|l| [l.weights.len(), l.biases.len()])
            .collect();
        let mut optimizer = AdamOptimizer::new(
            &buffer_sizes,
            self.config.learning_rate,
            self.config.beta1,
            self.config.beta2,
            self.config.epsilon,
        );

        let batch_size = self.config.batch_size.clamp(1, examples.len());
        let mut stats = TrainingStats::default();
        let mut best_loss = f64::INFINITY;
        let mut no_improvement = 0;

        tracing::debug!(
            examples = examples.len(),
            layers = ?sizes,
            batch_size,
            "starting network training"
        );

        for epoch in 0..self.config.max_iter {
            let mut epoch_loss = 0.0;

            for batch in order.chunks(batch_size) {
                let batch_loss = self.train_batch(&mut state, &mut optimizer, examples, batch);
                epoch_loss += batch_loss * batch.len() as f64;
            }
            epoch_loss /= examples.len() as f64;

            stats.training_losses.push(epoch_loss);
            stats.iterations = epoch + 1;

            if !epoch_loss.is_finite() {
                tracing::warn!(epoch, "training loss diverged");
                break;
            }

            if epoch_loss > best_loss - self.config.tol {
                no_improvement += 1;
            } else {
                no_improvement = 0;
            }
            if epoch_loss < best_loss {
                best_loss = epoch_loss;
            }

            if no_improvement > self.config.n_iter_no_change {
                stats.converged = true;
                break;
            }
        }

        stats.final_training_loss = stats.training_losses.last().copied().unwrap_or_default();
        stats.training_time_ms = start.elapsed().as_millis() as u64;

        if !stats.converged {
            tracing::warn!(
                max_iter = self.config.max_iter,
                "network reached the iteration cap without converging"
            );
        }
        tracing::debug!(
            iterations = stats.iterations,
            loss = stats.final_training_loss,
            "network training finished"
        );

        self.state = Some(state);
        Ok(stats)
    }

    /// One Adam step on a mini-batch. Returns the batch loss.
    fn train_batch(
        &self,
        state: &mut MlpState,
        optimizer: &mut AdamOptimizer,
        examples: &[EncodedExample],
        batch: &[usize],
    ) -> f64 {
        let n = batch.len() as f64;
        let mut grads = Gradients::zeros(state);
        let mut loss = 0.0;

        for &idx in batch {
            let example = &examples[idx];
            let activations = state.activations(&example.input);
            let Some(output) = activations.last() else {
                continue;
            };

            loss -= output
                .iter()
                .zip(&example.target)
                .map(|(&p, &y)| y * p.clamp(f64::EPSILON, 1.0).ln())
                .sum::<f64>();

            // Softmax with cross-entropy: the output delta is p - y.
            let mut delta: Vec<f64> = output
                .iter()
                .zip(&example.target)
                .map(|(p, y)| p - y)
                .collect();

            for l in (0..state.layers.len()).rev() {
                let layer = &state.layers[l];
                let input = &activations[l];
                let fan_out = layer.fan_out;

                for (i, &a) in input.iter().enumerate() {
                    if a == 0.0 {
                        continue;
                    }
                    let row = &mut grads.weights[l][i * fan_out..(i + 1) * fan_out];
                    for (g, &d) in row.iter_mut().zip(&delta) {
                        *g += a * d;
                    }
                }
                for (g, &d) in grads.biases[l].iter_mut().zip(&delta) {
                    *g += d;
                }

                if l > 0 {
                    // ReLU derivative: only units that fired pass gradient.
                    delta = input
                        .iter()
                        .enumerate()
                        .map(|(i, &a)| {
                            if a <= 0.0 {
                                return 0.0;
                            }
                            let row = &layer.weights[i * fan_out..(i + 1) * fan_out];
                            row.iter().zip(&delta).map(|(w, d)| w * d).sum::<f64>()
                        })
                        .collect();
                }
            }
        }

        let alpha = self.config.alpha;
        let mut penalty = 0.0;
        for (layer, g) in state.layers.iter().zip(grads.weights.iter_mut()) {
            for (gw, &w) in g.iter_mut().zip(&layer.weights) {
                *gw = (*gw + alpha * w) / n;
                penalty += w * w;
            }
        }
        for g in grads.biases.iter_mut() {
            g.iter_mut().for_each(|gb| *gb /= n);
        }

        let buffers = grads.into_buffers();
        let mut params: Vec<&mut [f64]> = state
            .layers
            .iter_mut()
            .flat_map(|l| [l.weights.as_mut_slice(), l.biases.as_mut_slice()])
            .collect();
        optimizer.step(&mut params, &buffers);

        loss / n + 0.5 * alpha * penalty / n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn one_hot(index: usize, len: usize) -> Vec<f64> {
        let mut v = vec![0.0; len];
        v[index] = 1.0;
        v
    }

    fn toy_examples() -> Vec<EncodedExample> {
        vec![
            EncodedExample {
                input: vec![1.0, 1.0, 0.0, 0.0],
                target: one_hot(0, 3),
            },
            EncodedExample {
                input: vec![1.0, 0.0, 0.0, 0.0],
                target: one_hot(0, 3),
            },
            EncodedExample {
                input: vec![0.0, 0.0, 1.0, 0.0],
                target: one_hot(1, 3),
            },
            EncodedExample {
                input: vec![0.0, 0.0, 1.0, 1.0],
                target: one_hot(1, 3),
            },
            EncodedExample {
                input: vec![0.0, 1.0, 0.0, 1.0],
                target: one_hot(2, 3),
            },
        ]
    }

    #[test]
    fn test_default_config() {
        let config = MlpConfig::default();

        assert_eq!(config.hidden_layers, vec![128, 64]);
        assert_eq!(config.max_iter, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = MlpConfig::default();
        config.hidden_layers.clear();
        assert!(matches!(
            config.validate().unwrap_err(),
            ParleyError::InvalidConfig(_)
        ));

        let config = MlpConfig {
            learning_rate: 0.0,
            ..MlpConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MlpConfig {
            hidden_layers: vec![16, 0],
            ..MlpConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fit_learns_training_set() {
        let examples = toy_examples();
        let mut classifier = MlpClassifier::new(MlpConfig::default());
        let mut rng = StdRng::seed_from_u64(42);

        let stats = classifier.fit(&examples, &mut rng).unwrap();

        assert!(stats.iterations > 0 && stats.iterations <= 1000);
        assert_eq!(stats.training_losses.len(), stats.iterations);
        assert!(stats.final_training_loss < stats.training_losses[0]);

        for example in &examples {
            let probs = classifier.predict(&example.input).unwrap();
            let sum: f64 = probs.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
            assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));

            let expected = example.target.iter().position(|&t| t == 1.0).unwrap();
            let best = probs
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap();
            assert_eq!(best, expected);
        }
    }

    #[test]
    fn test_seeded_training_is_reproducible() {
        let examples = toy_examples();
        let config = MlpConfig {
            hidden_layers: vec![8],
            max_iter: 50,
            ..MlpConfig::default()
        };

        let mut a = MlpClassifier::new(config.clone());
        a.fit(&examples, &mut StdRng::seed_from_u64(3)).unwrap();
        let mut b = MlpClassifier::new(config);
        b.fit(&examples, &mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_untrained_predict() {
        let classifier = MlpClassifier::new(MlpConfig::default());

        assert!(!classifier.is_trained());
        assert!(matches!(
            classifier.predict(&[1.0]).unwrap_err(),
            ParleyError::UntrainedModel
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let examples = toy_examples();
        let mut classifier = MlpClassifier::new(MlpConfig {
            hidden_layers: vec![4],
            max_iter: 5,
            ..MlpConfig::default()
        });
        classifier
            .fit(&examples, &mut StdRng::seed_from_u64(1))
            .unwrap();

        let err = classifier.predict(&[1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            ParleyError::DimensionMismatch {
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let mut classifier = MlpClassifier::new(MlpConfig::default());
        let mut rng = StdRng::seed_from_u64(0);

        assert!(classifier.fit(&[], &mut rng).is_err());

        let ragged = vec![
            EncodedExample {
                input: vec![1.0, 0.0],
                target: one_hot(0, 2),
            },
            EncodedExample {
                input: vec![1.0],
                target: one_hot(1, 2),
            },
        ];
        assert!(matches!(
            classifier.fit(&ragged, &mut rng).unwrap_err(),
            ParleyError::DimensionMismatch { .. }
        ));
    }
}
