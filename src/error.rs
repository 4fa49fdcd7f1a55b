use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LearningNodeError {
    #[error("perceptron weights are not initialized yet")]
    UninitializedWeights,

    #[error("node has no perceptron predictor")]
    PerceptronUnavailable,

    #[error("{what} dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid instance weight: {0}")]
    InvalidWeight(f64),
}

impl LearningNodeError {
    pub(crate) fn check_len(
        what: &'static str,
        expected: usize,
        found: usize,
    ) -> Result<(), LearningNodeError> {
        if expected == found {
            Ok(())
        } else {
            Err(LearningNodeError::DimensionMismatch {
                what,
                expected,
                found,
            })
        }
    }
}
