use crate::core::estimators::TargetStatistics;
use crate::regressors::attribute_regression_observers::AttributeRegressionObserver;
use std::any::Any;
use std::cmp::Ordering;
use tracing::warn;

/// Numeric attribute observer for regression splits.
///
/// Keeps one [TargetStatistics] per distinct attribute value, sorted by value.
/// This is the in-order flattening of an extended binary search tree, so a
/// split evaluator can sweep candidate thresholds left to right.
#[derive(Debug, Default)]
pub struct NumericAttributeRegressionObserver {
    observations: Vec<(f64, TargetStatistics)>,
}

impl NumericAttributeRegressionObserver {
    pub fn new() -> Self {
        Self {
            observations: Vec::new(),
        }
    }

    fn position_of(&self, att_val: f64) -> Result<usize, usize> {
        self.observations
            .binary_search_by(|(v, _)| v.partial_cmp(&att_val).unwrap_or(Ordering::Less))
    }

    pub fn distinct_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|(v, _)| *v)
    }

    pub fn number_of_distinct_values(&self) -> usize {
        self.observations.len()
    }

    /// Aggregated statistics of every observation with value `<= split_value`.
    pub fn statistics_at_or_below(&self, split_value: f64) -> TargetStatistics {
        let mut acc = TargetStatistics::new();
        for (_, stats) in self.observations.iter().take_while(|(v, _)| *v <= split_value) {
            acc.merge(stats);
        }
        acc
    }

    pub fn total_statistics(&self) -> TargetStatistics {
        let mut acc = TargetStatistics::new();
        for (_, stats) in &self.observations {
            acc.merge(stats);
        }
        acc
    }
}

impl AttributeRegressionObserver for NumericAttributeRegressionObserver {
    fn update(&mut self, att_val: f64, targets: &[f64], weight: f64) {
        if att_val.is_nan() || !(weight > 0.0) {
            return;
        }

        let idx = match self.position_of(att_val) {
            Ok(idx) => idx,
            Err(idx) => {
                self.observations.insert(idx, (att_val, TargetStatistics::new()));
                idx
            }
        };
        // the node validates shapes upstream, so this only trips on direct misuse
        if let Err(err) = self.observations[idx].1.observe(targets, weight) {
            warn!(%err, value = att_val, "dropping numeric observation");
        }
    }

    fn estimate_size_bytes(&self) -> usize {
        let mut total = size_of::<Self>();
        for (_, stats) in &self.observations {
            total += size_of::<f64>();
            total += stats.estimate_size_bytes();
        }
        total
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
