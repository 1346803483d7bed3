//! Adam optimizer over a list of flat parameter buffers.

/// Adam with bias correction folded into the step size.
#[derive(Debug, Clone)]
pub struct AdamOptimizer {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    t: i32,
    first_moments: Vec<Vec<f64>>,
    second_moments: Vec<Vec<f64>>,
}

impl AdamOptimizer {
    /// `sizes` lists the length of every parameter buffer, in update order.
    pub fn new(sizes: &[usize], learning_rate: f64, beta1: f64, beta2: f64, epsilon: f64) -> Self {
        AdamOptimizer {
            learning_rate,
            beta1,
            beta2,
            epsilon,
            t: 0,
            first_moments: sizes.iter().map(|&n| vec![0.0; n]).collect(),
            second_moments: sizes.iter().map(|&n| vec![0.0; n]).collect(),
        }
    }

    /// Apply one update. `params` and `grads` must match the sizes given to
    /// [`AdamOptimizer::new`].
    pub fn step(&mut self, params: &mut [&mut [f64]], grads: &[Vec<f64>]) {
        self.t = self.t.saturating_add(1);
        let lr = self.learning_rate * (1.0 - self.beta2.powi(self.t)).sqrt()
            / (1.0 - self.beta1.powi(self.t));

        for (((param, grad), m), v) in params
            .iter_mut()
            .zip(grads)
            .zip(&mut self.first_moments)
            .zip(&mut self.second_moments)
        {
            for (((p, &g), m), v) in param.iter_mut().zip(grad).zip(m.iter_mut()).zip(v.iter_mut())
            {
                *m = self.beta1 * *m + (1.0 - self.beta1) * g;
                *v = self.beta2 * *v + (1.0 - self.beta2) * g * g;
                *p -= lr * *m / (v.sqrt() + self.epsilon);
            }
        }
    }

    /// Number of updates applied so far.
    pub fn steps(&self) -> i32 {
        self.t
    }
}
