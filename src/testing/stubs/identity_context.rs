use crate::regressors::isoup_tree::{PerceptronOptions, RegressorContext};
use std::cell::Cell;

/// Context whose normalization is the identity (plus the bias input), so node
/// tests can reason about raw values. Counts how often each normalization ran.
#[derive(Debug, Default)]
pub struct IdentityContext {
    options: PerceptronOptions,
    nominal_attributes: Vec<usize>,
    sample_calls: Cell<usize>,
    target_calls: Cell<usize>,
}

impl IdentityContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: PerceptronOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn with_nominal(mut self, nominal_attributes: Vec<usize>) -> Self {
        self.nominal_attributes = nominal_attributes;
        self
    }

    pub fn sample_calls(&self) -> usize {
        self.sample_calls.get()
    }

    pub fn target_calls(&self) -> usize {
        self.target_calls.get()
    }
}

impl RegressorContext for IdentityContext {
    fn perceptron_options(&self) -> &PerceptronOptions {
        &self.options
    }

    fn is_nominal_attribute(&self, index: usize) -> bool {
        self.nominal_attributes.contains(&index)
    }

    fn normalize_sample(&self, features: &[f64]) -> Vec<f64> {
        self.sample_calls.set(self.sample_calls.get() + 1);
        let mut sample = features.to_vec();
        sample.push(1.0);
        sample
    }

    fn normalize_target_value(&self, targets: &[f64]) -> Vec<f64> {
        self.target_calls.set(self.target_calls.get() + 1);
        targets.to_vec()
    }
}
