use crate::core::estimators::TargetStatistics;
use crate::core::instances::MultiTargetInstance;
use crate::error::LearningNodeError;
use crate::regressors::attribute_regression_observers::AttributeRegressionObserver;
use crate::regressors::isoup_tree::RegressorContext;
use crate::regressors::isoup_tree::nodes::learning_nodes::{
    FadedErrors, LearningNode, Predictor, PredictorKind, WeightMatrix,
};
use strum_macros::{Display, IntoStaticStr};
use tracing::{debug, trace};

/// Whether a leaf keeps per-feature attribute observers. Decided by the tree's
/// memory management, never by the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Activity {
    Active,
    Inactive,
}

/// Normalized inputs of one gradient step.
struct NormalizedStep {
    sample: Vec<f64>,
    target: Vec<f64>,
    mean: Option<Vec<f64>>,
}

/// Leaf of a multi-target regression tree.
///
/// Accumulates target statistics, trains its predictor in the regressor's
/// normalized space and, while active, feeds one attribute observer per
/// feature for split evaluation.
pub struct MultiTargetLearningNode {
    statistics: TargetStatistics,
    predictor: Predictor,
    activity: Activity,
    attribute_observers: Vec<Option<Box<dyn AttributeRegressionObserver>>>,
    number_of_features: Option<usize>,
    weight_seen_at_last_split_evaluation: f64,
}

impl MultiTargetLearningNode {
    pub fn new(kind: PredictorKind, activity: Activity, seed: u64) -> Self {
        Self::new_with_stats(TargetStatistics::new(), kind, activity, seed)
    }

    pub fn new_with_stats(
        initial_stats: TargetStatistics,
        kind: PredictorKind,
        activity: Activity,
        seed: u64,
    ) -> Self {
        let weight_seen = initial_stats.total_weight();
        Self {
            statistics: initial_stats,
            predictor: Predictor::new(kind, seed),
            activity,
            attribute_observers: Vec::new(),
            number_of_features: None,
            weight_seen_at_last_split_evaluation: weight_seen,
        }
    }

    /// Node to place below this one after a split. It keeps this node's
    /// predictor kind and owns its own copy of the current weights.
    pub fn new_child(
        &self,
        initial_stats: TargetStatistics,
        activity: Activity,
        seed: u64,
    ) -> Self {
        let weight_seen = initial_stats.total_weight();
        Self {
            statistics: initial_stats,
            predictor: self.predictor.inherit(seed),
            activity,
            attribute_observers: Vec::new(),
            number_of_features: self.number_of_features,
            weight_seen_at_last_split_evaluation: weight_seen,
        }
    }

    pub fn statistics(&self) -> &TargetStatistics {
        &self.statistics
    }

    pub fn predictor_kind(&self) -> PredictorKind {
        self.predictor.kind()
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn is_active(&self) -> bool {
        self.activity == Activity::Active
    }

    pub fn activate(&mut self) {
        if !self.is_active() {
            debug!("activating learning node");
            self.activity = Activity::Active;
        }
    }

    /// Drops every attribute observer; statistics and predictor are kept.
    pub fn deactivate(&mut self) {
        if self.is_active() {
            debug!(
                observers = self.attribute_observers.iter().flatten().count(),
                "deactivating learning node"
            );
            self.activity = Activity::Inactive;
            self.attribute_observers = Vec::new();
        }
    }

    pub fn perceptron_weights(&self) -> Option<&WeightMatrix> {
        self.predictor.perceptron().and_then(|p| p.weights())
    }

    pub fn faded_errors(&self) -> Option<&FadedErrors> {
        self.predictor.faded_errors()
    }

    pub fn attribute_observer(&self, index: usize) -> Option<&dyn AttributeRegressionObserver> {
        self.attribute_observers.get(index).and_then(|o| o.as_deref())
    }

    pub fn number_of_attribute_observers(&self) -> usize {
        self.attribute_observers.iter().flatten().count()
    }

    pub fn weight_seen_at_last_split_evaluation(&self) -> f64 {
        self.weight_seen_at_last_split_evaluation
    }

    pub fn set_weight_seen_at_last_split_evaluation(&mut self, weight: f64) {
        self.weight_seen_at_last_split_evaluation = weight;
    }

    /// Linear prediction for an already normalized, bias-augmented sample.
    pub fn predict(&self, normalized_sample: &[f64]) -> Result<Vec<f64>, LearningNodeError> {
        self.predictor
            .perceptron()
            .ok_or(LearningNodeError::PerceptronUnavailable)?
            .predict(normalized_sample)
    }

    /// Mean of the targets seen so far, in target units.
    pub fn mean_prediction(&self) -> Option<Vec<f64>> {
        self.statistics.mean()
    }

    pub fn normalized_mean_prediction(&self, context: &dyn RegressorContext) -> Option<Vec<f64>> {
        self.mean_prediction().map(|mean| context.normalize_target_value(&mean))
    }

    fn check_instance(&self, features: &[f64], targets: &[f64]) -> Result<(), LearningNodeError> {
        if let Some(expected) = self.number_of_features {
            LearningNodeError::check_len("feature", expected, features.len())?;
        }
        self.statistics.check_dimension(targets)?;
        if let Some(perceptron) = self.predictor.perceptron() {
            perceptron.check_dimensions(features.len(), targets.len())?;
        }
        Ok(())
    }

    /// Asks the context for the normalized inputs of every gradient step and
    /// checks them against the weight shape, without touching the node.
    fn prepare_steps(
        &self,
        instance: &MultiTargetInstance,
        statistics: &TargetStatistics,
        context: &dyn RegressorContext,
    ) -> Result<Vec<NormalizedStep>, LearningNodeError> {
        if self.predictor.perceptron().is_none() {
            return Ok(Vec::new());
        }
        let number_of_targets = instance.number_of_targets();
        let mean = if matches!(self.predictor, Predictor::Adaptive { .. }) {
            statistics.mean()
        } else {
            None
        };
        // Fractional weight is dropped: 1.7 means one step.
        let steps = instance.weight().floor() as usize;

        let mut prepared = Vec::with_capacity(steps);
        for _ in 0..steps {
            let sample = context.normalize_sample(&instance.features);
            LearningNodeError::check_len(
                "normalized sample",
                instance.number_of_features() + 1,
                sample.len(),
            )?;
            let target = context.normalize_target_value(&instance.targets);
            LearningNodeError::check_len("normalized target", number_of_targets, target.len())?;
            let mean = match &mean {
                Some(mean) => {
                    let normalized = context.normalize_target_value(mean);
                    LearningNodeError::check_len(
                        "normalized mean",
                        number_of_targets,
                        normalized.len(),
                    )?;
                    Some(normalized)
                }
                None => None,
            };
            prepared.push(NormalizedStep {
                sample,
                target,
                mean,
            });
        }
        Ok(prepared)
    }

    fn update_predictor(
        &mut self,
        instance: &MultiTargetInstance,
        steps: &[NormalizedStep],
        learning_ratio: f64,
    ) -> Result<(), LearningNodeError> {
        let number_of_features = instance.number_of_features();
        let number_of_targets = instance.number_of_targets();

        match &mut self.predictor {
            Predictor::MeanOnly => Ok(()),
            Predictor::Perceptron(perceptron) => {
                perceptron.ensure_initialized(number_of_features, number_of_targets);
                for step in steps {
                    perceptron.update_step(&step.sample, &step.target, learning_ratio)?;
                    trace!(learning_ratio, "perceptron step");
                }
                Ok(())
            }
            Predictor::Adaptive {
                perceptron,
                faded_errors,
            } => {
                perceptron.ensure_initialized(number_of_features, number_of_targets);
                for step in steps {
                    let prediction =
                        perceptron.update_step(&step.sample, &step.target, learning_ratio)?;
                    // count > 0 whenever a step runs, so the mean exists
                    if let Some(mean) = &step.mean {
                        faded_errors.update(&step.target, &prediction, mean);
                    }
                    trace!(learning_ratio, "adaptive perceptron step");
                }
                Ok(())
            }
        }
    }

    fn update_attribute_observers(
        &mut self,
        features: &[f64],
        targets: &[f64],
        weight: f64,
        context: &dyn RegressorContext,
    ) {
        if self.attribute_observers.len() < features.len() {
            self.attribute_observers.resize_with(features.len(), || None);
        }
        for (i, &value) in features.iter().enumerate() {
            let observer = self.attribute_observers[i].get_or_insert_with(|| {
                if context.is_nominal_attribute(i) {
                    context.new_nominal_regression_observer()
                } else {
                    context.new_numeric_regression_observer()
                }
            });
            observer.update(value, targets, weight);
        }
    }
}

impl LearningNode for MultiTargetLearningNode {
    fn learn_from_instance(
        &mut self,
        instance: &MultiTargetInstance,
        context: &dyn RegressorContext,
    ) -> Result<(), LearningNodeError> {
        let features = instance.features.as_slice();
        let targets = instance.targets.as_slice();
        let weight = instance.weight();

        self.check_instance(features, targets)?;
        let mut statistics = self.statistics.clone();
        statistics.observe(targets, weight)?;
        let steps = self.prepare_steps(instance, &statistics, context)?;
        let learning_ratio = context
            .perceptron_options()
            .learning_ratio(statistics.total_weight());

        self.number_of_features = Some(instance.number_of_features());
        self.statistics = statistics;
        self.update_predictor(instance, &steps, learning_ratio)?;

        if self.is_active() {
            self.update_attribute_observers(features, targets, weight, context);
        }
        Ok(())
    }

    fn total_weight(&self) -> f64 {
        self.statistics.total_weight()
    }

    fn calc_byte_size(&self) -> usize {
        let mut total = size_of::<Self>();

        total += self.statistics.estimate_size_bytes();
        total += self.predictor.estimate_size_bytes();

        total += self.attribute_observers.len()
            * size_of::<Option<Box<dyn AttributeRegressionObserver>>>();
        for obs in self.attribute_observers.iter().flatten() {
            total += obs.estimate_size_bytes();
        }

        total
    }
}
