use crate::regressors::attribute_regression_observers::{
    AttributeRegressionObserver, NominalAttributeRegressionObserver,
    NumericAttributeRegressionObserver,
};
use crate::regressors::isoup_tree::PerceptronOptions;

/// What a learning node needs from the regressor that owns it: the learning
/// ratio schedule, which features are nominal, and the running normalization
/// of features and targets.
pub trait RegressorContext {
    fn perceptron_options(&self) -> &PerceptronOptions;

    fn is_nominal_attribute(&self, index: usize) -> bool;

    /// Z-scores `features` and appends the bias input `1.0`.
    fn normalize_sample(&self, features: &[f64]) -> Vec<f64>;

    /// Z-scores `targets`.
    fn normalize_target_value(&self, targets: &[f64]) -> Vec<f64>;

    fn new_nominal_regression_observer(&self) -> Box<dyn AttributeRegressionObserver> {
        Box::new(NominalAttributeRegressionObserver::new())
    }

    fn new_numeric_regression_observer(&self) -> Box<dyn AttributeRegressionObserver> {
        Box::new(NumericAttributeRegressionObserver::new())
    }
}
