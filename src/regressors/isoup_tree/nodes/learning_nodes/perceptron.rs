use crate::error::LearningNodeError;
use crate::regressors::isoup_tree::nodes::learning_nodes::WeightMatrix;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

/// Linear map from a bias-augmented, normalized feature vector to a
/// normalized target vector, trained online.
///
/// The weight shape is unknown until the first instance arrives; the owned
/// generator is consumed exactly once, to draw the initial weights.
#[derive(Debug, Clone)]
pub struct Perceptron {
    weights: Option<WeightMatrix>,
    rng: StdRng,
}

impl Perceptron {
    pub fn new(seed: u64) -> Self {
        Self {
            weights: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_weights(weights: WeightMatrix, seed: u64) -> Self {
        Self {
            weights: Some(weights),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Independent copy of this perceptron's weights behind a fresh generator.
    pub fn inherit(&self, seed: u64) -> Self {
        Self {
            weights: self.weights.clone(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn weights(&self) -> Option<&WeightMatrix> {
        self.weights.as_ref()
    }

    pub fn check_dimensions(
        &self,
        number_of_features: usize,
        number_of_targets: usize,
    ) -> Result<(), LearningNodeError> {
        if let Some(weights) = &self.weights {
            LearningNodeError::check_len("target", weights.rows(), number_of_targets)?;
            // one column per feature plus the bias column
            LearningNodeError::check_len("weight column", weights.cols(), number_of_features + 1)?;
        }
        Ok(())
    }

    /// Draws `targets x (features + 1)` uniform weights and L1-normalizes each
    /// row, unless the weights already exist.
    pub fn ensure_initialized(&mut self, number_of_features: usize, number_of_targets: usize) {
        if self.weights.is_some() {
            return;
        }
        let mut weights =
            WeightMatrix::random_uniform(number_of_targets, number_of_features + 1, &mut self.rng);
        weights.normalize_rows();
        debug!(
            rows = weights.rows(),
            cols = weights.cols(),
            "initialized perceptron weights"
        );
        self.weights = Some(weights);
    }

    pub fn predict(&self, normalized_sample: &[f64]) -> Result<Vec<f64>, LearningNodeError> {
        self.weights
            .as_ref()
            .ok_or(LearningNodeError::UninitializedWeights)?
            .mul_vec(normalized_sample)
    }

    /// One gradient step `W += learning_ratio * (y - p) x^T` followed by row
    /// renormalization. Returns the prediction `p` made before the step.
    pub fn update_step(
        &mut self,
        normalized_sample: &[f64],
        normalized_target: &[f64],
        learning_ratio: f64,
    ) -> Result<Vec<f64>, LearningNodeError> {
        let prediction = self.predict(normalized_sample)?;
        let weights = self
            .weights
            .as_mut()
            .ok_or(LearningNodeError::UninitializedWeights)?;
        LearningNodeError::check_len("normalized target", weights.rows(), normalized_target.len())?;

        let error: Vec<f64> = normalized_target
            .iter()
            .zip(&prediction)
            .map(|(y, p)| y - p)
            .collect();
        weights.add_scaled_outer(learning_ratio, &error, normalized_sample)?;
        weights.normalize_rows();
        Ok(prediction)
    }

    pub fn estimate_size_bytes(&self) -> usize {
        size_of::<Self>()
            + self
                .weights
                .as_ref()
                .map_or(0, WeightMatrix::estimate_size_bytes)
    }
}
