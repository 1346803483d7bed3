//! Dense layers and the trained network state.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};

/// A fully connected layer.
///
/// `weights` is row-major with shape `fan_in x fan_out`, so the weight from
/// input `i` to output `j` lives at `i * fan_out + j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub fan_in: usize,
    pub fan_out: usize,
    pub weights: Vec<f64>,
    pub biases: Vec<f64>,
}

impl DenseLayer {
    /// Glorot-uniform initialisation scaled for ReLU networks.
    pub fn glorot<R: Rng + ?Sized>(fan_in: usize, fan_out: usize, rng: &mut R) -> Self {
        let bound = (6.0 / (fan_in + fan_out) as f64).sqrt();
        let weights = (0..fan_in * fan_out)
            .map(|_| rng.random_range(-bound..bound))
            .collect();
        let biases = (0..fan_out)
            .map(|_| rng.random_range(-bound..bound))
            .collect();

        DenseLayer {
            fan_in,
            fan_out,
            weights,
            biases,
        }
    }

    /// Affine transform `input * W + b`. Zero inputs are skipped, which keeps
    /// the first layer cheap on sparse bag-of-words vectors.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut output = self.biases.clone();
        for (i, &x) in input.iter().enumerate() {
            if x == 0.0 {
                continue;
            }
            let row = &self.weights[i * self.fan_out..(i + 1) * self.fan_out];
            for (out, &w) in output.iter_mut().zip(row) {
                *out += x * w;
            }
        }
        output
    }

    fn is_consistent(&self) -> bool {
        self.weights.len() == self.fan_in * self.fan_out && self.biases.len() == self.fan_out
    }
}

pub(crate) fn relu_in_place(values: &mut [f64]) {
    for v in values.iter_mut() {
        if *v < 0.0 {
            *v = 0.0;
        }
    }
}

pub(crate) fn softmax_in_place(values: &mut [f64]) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    if sum > 0.0 {
        for v in values.iter_mut() {
            *v /= sum;
        }
    }
}

/// Trained parameters of the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpState {
    pub(crate) input_dim: usize,
    pub(crate) layers: Vec<DenseLayer>,
}

impl MlpState {
    pub(crate) fn new(input_dim: usize, layers: Vec<DenseLayer>) -> Self {
        MlpState { input_dim, layers }
    }

    /// Length of the input vectors this state accepts.
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Number of probabilities produced by [`MlpState::predict`].
    pub fn output_dim(&self) -> usize {
        self.layers.last().map_or(0, |layer| layer.fan_out)
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    /// Sizes of the hidden layers.
    pub fn hidden_layer_sizes(&self) -> Vec<usize> {
        let n = self.layers.len().saturating_sub(1);
        self.layers[..n].iter().map(|layer| layer.fan_out).collect()
    }

    /// Forward pass returning every layer's activation, input included.
    pub(crate) fn activations(&self, input: &[f64]) -> Vec<Vec<f64>> {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(input.to_vec());

        let last = self.layers.len().saturating_sub(1);
        for (idx, layer) in self.layers.iter().enumerate() {
            let mut out = match activations.last() {
                Some(prev) => layer.forward(prev),
                None => layer.biases.clone(),
            };
            if idx == last {
                softmax_in_place(&mut out);
            } else {
                relu_in_place(&mut out);
            }
            activations.push(out);
        }

        activations
    }

    /// Probability distribution over the labels for one encoded input.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        if self.layers.is_empty() {
            return Err(ParleyError::UntrainedModel);
        }
        if input.len() != self.input_dim {
            return Err(ParleyError::DimensionMismatch {
                expected: self.input_dim,
                actual: input.len(),
            });
        }

        Ok(self.activations(input).pop().unwrap_or_default())
    }

    /// Check that layer shapes chain from `input_dim` to `output_dim`.
    pub(crate) fn validate(&self, output_dim: usize) -> Result<()> {
        if self.layers.is_empty() {
            return Err(ParleyError::model_load("network has no layers"));
        }

        let mut expected_in = self.input_dim;
        for (idx, layer) in self.layers.iter().enumerate() {
            if layer.fan_in != expected_in || !layer.is_consistent() {
                return Err(ParleyError::model_load(format!(
                    "layer {idx} has inconsistent dimensions"
                )));
            }
            expected_in = layer.fan_out;
        }

        if expected_in != output_dim {
            return Err(ParleyError::model_load(format!(
                "network produces {expected_in} outputs but {output_dim} labels are stored"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn identity_layer() -> DenseLayer {
        DenseLayer {
            fan_in: 2,
            fan_out: 2,
            weights: vec![1.0, 0.0, 0.0, 1.0],
            biases: vec![0.0, 0.0],
        }
    }

    #[test]
    fn test_glorot_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let layer = DenseLayer::glorot(10, 20, &mut rng);
        let bound = (6.0f64 / 30.0).sqrt();

        assert_eq!(layer.weights.len(), 200);
        assert_eq!(layer.biases.len(), 20);
        assert!(layer.weights.iter().all(|w| w.abs() <= bound));
    }

    #[test]
    fn test_forward() {
        let layer = DenseLayer {
            fan_in: 2,
            fan_out: 1,
            weights: vec![2.0, 3.0],
            biases: vec![1.0],
        };

        assert_eq!(layer.forward(&[1.0, 1.0]), vec![6.0]);
        assert_eq!(layer.forward(&[0.0, 1.0]), vec![4.0]);
    }

    #[test]
    fn test_softmax() {
        let mut values = vec![1.0, 1.0, 1000.0];
        softmax_in_place(&mut values);

        assert!((values.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(values[2] > 0.999);
    }

    #[test]
    fn test_predict_is_distribution() {
        let state = MlpState::new(2, vec![identity_layer(), identity_layer()]);

        let probs = state.predict(&[1.0, 0.0]).unwrap();

        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(probs[0] > probs[1]);
    }

    #[test]
    fn test_predict_errors() {
        let state = MlpState::new(2, vec![identity_layer()]);
        let err = state.predict(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            ParleyError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        ));

        let empty = MlpState::new(2, vec![]);
        assert!(matches!(
            empty.predict(&[1.0, 0.0]).unwrap_err(),
            ParleyError::UntrainedModel
        ));
    }

    #[test]
    fn test_validate() {
        let state = MlpState::new(2, vec![identity_layer(), identity_layer()]);
        assert!(state.validate(2).is_ok());
        assert!(state.validate(3).is_err());
        assert_eq!(state.hidden_layer_sizes(), vec![2]);

        let mut broken = state.clone();
        broken.layers[1].weights.pop();
        assert!(broken.validate(2).is_err());
    }
}
