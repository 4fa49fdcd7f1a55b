use crate::error::LearningNodeError;

/// One observation of a multi-target regression stream: a feature vector,
/// a target vector and a non-negative weight.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiTargetInstance {
    pub features: Vec<f64>,
    pub targets: Vec<f64>,
    weight: f64,
}

impl MultiTargetInstance {
    pub fn new(
        features: Vec<f64>,
        targets: Vec<f64>,
        weight: f64,
    ) -> Result<MultiTargetInstance, LearningNodeError> {
        let mut instance = MultiTargetInstance {
            features,
            targets,
            weight: 1.0,
        };
        instance.set_weight(weight)?;
        Ok(instance)
    }

    pub fn unweighted(features: Vec<f64>, targets: Vec<f64>) -> MultiTargetInstance {
        MultiTargetInstance {
            features,
            targets,
            weight: 1.0,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, new_value: f64) -> Result<(), LearningNodeError> {
        if new_value < 0.0 || !new_value.is_finite() {
            Err(LearningNodeError::InvalidWeight(new_value))
        } else {
            self.weight = new_value;
            Ok(())
        }
    }

    pub fn number_of_features(&self) -> usize {
        self.features.len()
    }

    pub fn number_of_targets(&self) -> usize {
        self.targets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_and_non_finite_weights() {
        assert_eq!(
            MultiTargetInstance::new(vec![1.0], vec![2.0], -0.5),
            Err(LearningNodeError::InvalidWeight(-0.5))
        );
        assert!(MultiTargetInstance::new(vec![1.0], vec![2.0], f64::INFINITY).is_err());
        assert!(MultiTargetInstance::new(vec![1.0], vec![2.0], f64::NAN).is_err());
    }

    #[test]
    fn set_weight_keeps_old_value_on_error() {
        let mut inst = MultiTargetInstance::new(vec![1.0], vec![2.0], 2.5).unwrap();
        assert!(inst.set_weight(-1.0).is_err());
        assert_eq!(inst.weight(), 2.5);
        inst.set_weight(0.0).unwrap();
        assert_eq!(inst.weight(), 0.0);
    }

    #[test]
    fn reports_dimensions() {
        let inst = MultiTargetInstance::unweighted(vec![1.0, f64::NAN, 0.5], vec![0.0, 1.0]);
        assert_eq!(inst.number_of_features(), 3);
        assert_eq!(inst.number_of_targets(), 2);
        assert_eq!(inst.weight(), 1.0);
    }
}
