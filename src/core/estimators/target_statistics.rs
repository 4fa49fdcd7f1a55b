use crate::error::LearningNodeError;

/// Weighted sufficient statistics of a target vector: total weight, per-target
/// sum and per-target sum of squares.
///
/// Every field stays `None` until the first observation that writes it, and an
/// absent field reads as "nothing observed yet".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetStatistics {
    count: Option<f64>,
    sum_target: Option<Vec<f64>>,
    sum_squared_target: Option<Vec<f64>>,
}

impl TargetStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of targets this record is shaped for, once known.
    pub fn dimension(&self) -> Option<usize> {
        self.sum_target.as_ref().map(Vec::len)
    }

    pub fn check_dimension(&self, targets: &[f64]) -> Result<(), LearningNodeError> {
        match self.dimension() {
            Some(expected) => LearningNodeError::check_len("target", expected, targets.len()),
            None => Ok(()),
        }
    }

    pub fn observe(&mut self, targets: &[f64], weight: f64) -> Result<(), LearningNodeError> {
        self.check_dimension(targets)?;

        match self.count.as_mut() {
            Some(count) => *count += weight,
            None => self.count = Some(weight),
        }

        match (self.sum_target.as_mut(), self.sum_squared_target.as_mut()) {
            (Some(sum), Some(sum_sq)) => {
                for ((s, sq), &y) in sum.iter_mut().zip(sum_sq.iter_mut()).zip(targets) {
                    *s += weight * y;
                    *sq += weight * y * y;
                }
            }
            _ => {
                self.sum_target = Some(targets.iter().map(|&y| weight * y).collect());
                self.sum_squared_target = Some(targets.iter().map(|&y| weight * y * y).collect());
            }
        }
        Ok(())
    }

    /// Folds another record into this one. Used by observers to aggregate the
    /// statistics of several attribute values.
    pub fn merge(&mut self, other: &TargetStatistics) {
        let (Some(count), Some(sum), Some(sum_sq)) = (
            other.count,
            other.sum_target.as_ref(),
            other.sum_squared_target.as_ref(),
        ) else {
            return;
        };

        match (
            self.count.as_mut(),
            self.sum_target.as_mut(),
            self.sum_squared_target.as_mut(),
        ) {
            (Some(c), Some(s), Some(sq)) => {
                *c += count;
                for (d, v) in s.iter_mut().zip(sum) {
                    *d += v;
                }
                for (d, v) in sq.iter_mut().zip(sum_sq) {
                    *d += v;
                }
            }
            _ => *self = other.clone(),
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.count.unwrap_or(0.0)
    }

    pub fn sum_target(&self) -> Option<&[f64]> {
        self.sum_target.as_deref()
    }

    pub fn sum_squared_target(&self) -> Option<&[f64]> {
        self.sum_squared_target.as_deref()
    }

    /// `sum_target / count`; `None` while nothing has been observed.
    pub fn mean(&self) -> Option<Vec<f64>> {
        let count = self.count.filter(|&c| c != 0.0)?;
        let sum = self.sum_target.as_ref()?;
        Some(sum.iter().map(|s| s / count).collect())
    }

    /// Weighted population variance per target.
    pub fn variance(&self) -> Option<Vec<f64>> {
        let count = self.count.filter(|&c| c != 0.0)?;
        let sum = self.sum_target.as_ref()?;
        let sum_sq = self.sum_squared_target.as_ref()?;
        Some(
            sum.iter()
                .zip(sum_sq)
                .map(|(s, sq)| ((sq - s * s / count) / count).max(0.0))
                .collect(),
        )
    }

    pub fn estimate_size_bytes(&self) -> usize {
        let mut total = size_of::<Self>();
        total += self.dimension().unwrap_or(0) * 2 * size_of::<f64>();
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn starts_absent() {
        let s = TargetStatistics::new();
        assert_eq!(s.total_weight(), 0.0);
        assert!(s.sum_target().is_none());
        assert!(s.mean().is_none());
        assert!(s.variance().is_none());
        assert_eq!(s.dimension(), None);
    }

    #[test]
    fn count_is_additive() {
        let mut s = TargetStatistics::new();
        let weights = [0.5, 1.0, 2.25, 3.0, 0.0];
        for w in weights {
            s.observe(&[1.0, 2.0], w).unwrap();
        }
        assert_relative_eq!(s.total_weight(), weights.iter().sum::<f64>());
    }

    #[test]
    fn mean_matches_weighted_average() {
        let data = [
            (vec![1.0, -2.0], 1.0),
            (vec![3.0, 4.0], 2.0),
            (vec![-1.5, 0.5], 0.5),
        ];
        let mut s = TargetStatistics::new();
        for (y, w) in &data {
            s.observe(y, *w).unwrap();
        }

        let total: f64 = data.iter().map(|(_, w)| w).sum();
        let expected: Vec<f64> = (0..2)
            .map(|t| data.iter().map(|(y, w)| y[t] * w).sum::<f64>() / total)
            .collect();
        let mean = s.mean().unwrap();
        for (m, e) in mean.iter().zip(&expected) {
            assert_relative_eq!(*m, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn variance_of_constant_target_is_zero() {
        let mut s = TargetStatistics::new();
        for _ in 0..5 {
            s.observe(&[7.0], 1.0).unwrap();
        }
        assert_relative_eq!(s.variance().unwrap()[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn variance_matches_population_formula() {
        let mut s = TargetStatistics::new();
        for y in [1.0, 2.0, 3.0, 4.0] {
            s.observe(&[y], 1.0).unwrap();
        }
        assert_relative_eq!(s.variance().unwrap()[0], 1.25, epsilon = 1e-12);
    }

    #[test]
    fn rejects_target_dimension_change() {
        let mut s = TargetStatistics::new();
        s.observe(&[1.0, 2.0], 1.0).unwrap();
        let err = s.observe(&[1.0], 1.0).unwrap_err();
        assert_eq!(
            err,
            LearningNodeError::DimensionMismatch {
                what: "target",
                expected: 2,
                found: 1
            }
        );
        assert_eq!(s.total_weight(), 1.0);
    }

    #[test]
    fn merge_adds_and_adopts() {
        let mut a = TargetStatistics::new();
        let mut b = TargetStatistics::new();
        b.observe(&[2.0], 2.0).unwrap();

        a.merge(&b);
        assert_eq!(a, b);

        a.merge(&b);
        assert_eq!(a.total_weight(), 4.0);
        assert_eq!(a.sum_target(), Some(&[8.0][..]));
        assert_eq!(a.sum_squared_target(), Some(&[16.0][..]));

        a.merge(&TargetStatistics::new());
        assert_eq!(a.total_weight(), 4.0);
    }
}
