use crate::utils::math::abs_diff;

pub const FADING_FACTOR: f64 = 0.95;

/// Exponentially faded mean absolute errors of the perceptron and of the
/// mean predictor, one entry per target, measured in normalized space.
///
/// Both vectors are empty until the first update, which reads as all zeros.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FadedErrors {
    perceptron: Vec<f64>,
    mean: Vec<f64>,
}

impl FadedErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn perceptron(&self) -> &[f64] {
        &self.perceptron
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn update(
        &mut self,
        normalized_target: &[f64],
        normalized_prediction: &[f64],
        normalized_mean: &[f64],
    ) {
        fade(
            &mut self.perceptron,
            &abs_diff(normalized_target, normalized_prediction),
        );
        fade(&mut self.mean, &abs_diff(normalized_target, normalized_mean));
    }

    pub fn estimate_size_bytes(&self) -> usize {
        size_of::<Self>() + (self.perceptron.len() + self.mean.len()) * size_of::<f64>()
    }
}

fn fade(acc: &mut Vec<f64>, error: &[f64]) {
    if acc.len() < error.len() {
        acc.resize(error.len(), 0.0);
    }
    for (a, e) in acc.iter_mut().zip(error) {
        *a = FADING_FACTOR * *a + e;
    }
}
