use crate::core::instances::MultiTargetInstance;
use crate::regressors::isoup_tree::nodes::{Activity, MultiTargetLearningNode, PredictorKind};
use crate::regressors::isoup_tree::{
    IsoupTreeParams, PerceptronOptions, RegressorContext, RunningNormalizer,
};
use crate::utils::math::derive_seed;

/// Concrete [RegressorContext]: the tree parameters plus the running
/// normalization statistics a multi-target regressor keeps.
#[derive(Debug, Clone, Default)]
pub struct RegressionContext {
    params: IsoupTreeParams,
    normalizer: RunningNormalizer,
}

impl RegressionContext {
    pub fn new(params: IsoupTreeParams) -> Self {
        Self {
            params,
            normalizer: RunningNormalizer::new(),
        }
    }

    pub fn params(&self) -> &IsoupTreeParams {
        &self.params
    }

    pub fn normalizer(&self) -> &RunningNormalizer {
        &self.normalizer
    }

    /// Called once per instance before it is routed to a leaf.
    pub fn update_normalizer(&mut self, instance: &MultiTargetInstance) {
        self.normalizer.update(instance);
    }

    /// Creates a fresh leaf for `node_id`, seeded from the tree-level seed.
    pub fn new_learning_node(&self, node_id: u64, activity: Activity) -> MultiTargetLearningNode {
        MultiTargetLearningNode::new(
            PredictorKind::from(self.params.leaf_prediction),
            activity,
            derive_seed(self.params.random_seed, node_id),
        )
    }
}

impl RegressorContext for RegressionContext {
    fn perceptron_options(&self) -> &PerceptronOptions {
        &self.params.perceptron
    }

    fn is_nominal_attribute(&self, index: usize) -> bool {
        self.params.is_nominal_attribute(index)
    }

    fn normalize_sample(&self, features: &[f64]) -> Vec<f64> {
        self.normalizer.normalize_sample(features)
    }

    fn normalize_target_value(&self, targets: &[f64]) -> Vec<f64> {
        self.normalizer.normalize_target_value(targets)
    }
}
