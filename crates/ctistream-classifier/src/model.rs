//! Binary logistic-regression model over TF-IDF features

use ctistream_core::Label;
use serde::{Deserialize, Serialize};

const MAX_ITER: usize = 1000;
const LEARNING_RATE: f64 = 0.5;
const CONVERGENCE_EPS: f64 = 1e-6;

/// Linear probabilistic classifier; the positive class is [`Label::Cti`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    bias: f64,
}

impl LogisticRegression {
    /// Fit with full-batch gradient descent.
    ///
    /// `features` rows must all have the same length; `labels` pairs
    /// one-to-one with rows. Training is deterministic.
    pub fn fit(features: &[Vec<f64>], labels: &[Label]) -> Self {
        let n_features = features.first().map_or(0, Vec::len);
        let n_samples = features.len();
        let mut model = Self {
            weights: vec![0.0; n_features],
            bias: 0.0,
        };
        if n_samples == 0 {
            return model;
        }

        let targets: Vec<f64> = labels
            .iter()
            .map(|l| if *l == Label::Cti { 1.0 } else { 0.0 })
            .collect();

        let mut gradient = vec![0.0; n_features];
        for _ in 0..MAX_ITER {
            gradient.iter_mut().for_each(|g| *g = 0.0);
            let mut bias_gradient = 0.0;

            for (row, &target) in features.iter().zip(&targets) {
                let error = model.predict_proba(row) - target;
                for (g, &x) in gradient.iter_mut().zip(row) {
                    *g += error * x;
                }
                bias_gradient += error;
            }

            let scale = LEARNING_RATE / n_samples as f64;
            let mut max_step: f64 = 0.0;
            for (w, &g) in model.weights.iter_mut().zip(&gradient) {
                let step = scale * g;
                *w -= step;
                max_step = max_step.max(step.abs());
            }
            let bias_step = scale * bias_gradient;
            model.bias -= bias_step;
            max_step = max_step.max(bias_step.abs());

            if max_step < CONVERGENCE_EPS {
                break;
            }
        }

        model
    }

    /// Probability of the CTI class.
    pub fn predict_proba(&self, features: &[f64]) -> f64 {
        let z: f64 = self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;
        1.0 / (1.0 + (-z).exp())
    }

    /// Hard label at the 0.5 threshold.
    pub fn predict(&self, features: &[f64]) -> Label {
        if self.predict_proba(features) >= 0.5 {
            Label::Cti
        } else {
            Label::NonCti
        }
    }

    /// Predict a batch of rows, preserving order.
    pub fn predict_all(&self, features: &[Vec<f64>]) -> Vec<Label> {
        features.iter().map(|row| self.predict(row)).collect()
    }
}
