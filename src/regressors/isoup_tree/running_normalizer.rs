use crate::core::instances::MultiTargetInstance;

#[derive(Debug, Clone, Default)]
struct RunningMoments {
    sum: Vec<f64>,
    sum_of_squares: Vec<f64>,
}

impl RunningMoments {
    fn add(&mut self, values: &[f64], weight: f64) {
        if self.sum.len() < values.len() {
            self.sum.resize(values.len(), 0.0);
            self.sum_of_squares.resize(values.len(), 0.0);
        }
        for (i, &v) in values.iter().enumerate() {
            self.sum[i] += weight * v;
            self.sum_of_squares[i] += weight * v * v;
        }
    }

    /// `(x - mean) / sd`, or 0 where the standard deviation vanishes.
    fn z_score(&self, i: usize, x: f64, n: f64) -> f64 {
        let (Some(&sum), Some(&sum_sq)) = (self.sum.get(i), self.sum_of_squares.get(i)) else {
            return 0.0;
        };
        let mean = sum / n;
        let sd = ((sum_sq - sum * sum / n) / n).max(0.0).sqrt();
        if sd != 0.0 { (x - mean) / sd } else { 0.0 }
    }
}

/// Weighted running mean and standard deviation of every feature and target,
/// maintained by the regressor and consumed by its perceptron leaves.
#[derive(Debug, Clone, Default)]
pub struct RunningNormalizer {
    examples_seen: f64,
    features: RunningMoments,
    targets: RunningMoments,
}

impl RunningNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn examples_seen(&self) -> f64 {
        self.examples_seen
    }

    pub fn update(&mut self, instance: &MultiTargetInstance) {
        let weight = instance.weight();
        self.examples_seen += weight;
        self.features.add(&instance.features, weight);
        self.targets.add(&instance.targets, weight);
    }

    pub fn normalize_sample(&self, features: &[f64]) -> Vec<f64> {
        let mut normalized = vec![0.0; features.len() + 1];
        if self.examples_seen > 1.0 {
            for (i, &x) in features.iter().enumerate() {
                normalized[i] = self.features.z_score(i, x, self.examples_seen);
            }
        }
        normalized[features.len()] = 1.0;
        normalized
    }

    pub fn normalize_target_value(&self, targets: &[f64]) -> Vec<f64> {
        if self.examples_seen > 1.0 {
            targets
                .iter()
                .enumerate()
                .map(|(i, &y)| self.targets.z_score(i, y, self.examples_seen))
                .collect()
        } else {
            targets.to_vec()
        }
    }
}
