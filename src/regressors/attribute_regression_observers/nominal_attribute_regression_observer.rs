use crate::core::estimators::TargetStatistics;
use crate::regressors::attribute_regression_observers::AttributeRegressionObserver;
use std::any::Any;
use std::collections::HashMap;
use tracing::warn;

/// Nominal attribute observer for regression splits: one [TargetStatistics]
/// per nominal value index.
#[derive(Debug, Default)]
pub struct NominalAttributeRegressionObserver {
    statistics_per_value: HashMap<usize, TargetStatistics>,
}

impl NominalAttributeRegressionObserver {
    pub fn new() -> Self {
        Self {
            statistics_per_value: HashMap::new(),
        }
    }

    pub fn statistics_for_value(&self, value: usize) -> Option<&TargetStatistics> {
        self.statistics_per_value.get(&value)
    }

    pub fn observed_values(&self) -> Vec<usize> {
        let mut values: Vec<usize> = self.statistics_per_value.keys().copied().collect();
        values.sort_unstable();
        values
    }
}

impl AttributeRegressionObserver for NominalAttributeRegressionObserver {
    fn update(&mut self, att_val: f64, targets: &[f64], weight: f64) {
        // nominal values are indices; NaN, negative and fractional values are not
        if att_val.is_nan() || att_val < 0.0 || att_val.fract() != 0.0 || !(weight > 0.0) {
            return;
        }
        let stats = self.statistics_per_value.entry(att_val as usize).or_default();
        if let Err(err) = stats.observe(targets, weight) {
            warn!(%err, value = att_val, "dropping nominal observation");
        }
    }

    fn estimate_size_bytes(&self) -> usize {
        let mut total = size_of::<Self>();
        for stats in self.statistics_per_value.values() {
            total += size_of::<usize>();
            total += stats.estimate_size_bytes();
        }
        total
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_value_index() {
        let mut obs = NominalAttributeRegressionObserver::new();
        obs.update(0.0, &[1.0], 1.0);
        obs.update(2.0, &[4.0], 1.0);
        obs.update(0.0, &[3.0], 1.0);

        assert_eq!(obs.observed_values(), vec![0, 2]);
        let zero = obs.statistics_for_value(0).unwrap();
        assert_eq!(zero.total_weight(), 2.0);
        assert_eq!(zero.mean(), Some(vec![2.0]));
        assert!(obs.statistics_for_value(1).is_none());
    }

    #[test]
    fn ignores_missing_and_zero_weight() {
        let mut obs = NominalAttributeRegressionObserver::new();
        obs.update(f64::NAN, &[1.0], 1.0);
        obs.update(1.0, &[1.0], 0.0);
        obs.update(-1.0, &[1.0], 1.0);
        obs.update(2.7, &[1.0], 1.0);
        assert!(obs.observed_values().is_empty());
    }

    #[test]
    fn mismatched_target_length_is_dropped() {
        let mut obs = NominalAttributeRegressionObserver::new();
        obs.update(1.0, &[1.0, 2.0], 1.0);
        obs.update(1.0, &[5.0], 1.0);
        let stats = obs.statistics_for_value(1).unwrap();
        assert_eq!(stats.total_weight(), 1.0);
        assert_eq!(stats.sum_target(), Some(&[1.0, 2.0][..]));
    }
}
