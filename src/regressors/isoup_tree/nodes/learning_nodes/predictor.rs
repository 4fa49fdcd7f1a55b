use crate::regressors::isoup_tree::LeafPredictionOption;
use crate::regressors::isoup_tree::nodes::learning_nodes::{FadedErrors, Perceptron};
use strum_macros::{Display, EnumDiscriminants, EnumIter, IntoStaticStr};

/// The model a learning node maintains on top of its target statistics.
#[derive(Debug, Clone, EnumDiscriminants)]
#[strum_discriminants(name(PredictorKind))]
#[strum_discriminants(derive(Hash, EnumIter, Display, IntoStaticStr))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum Predictor {
    MeanOnly,
    Perceptron(Perceptron),
    Adaptive {
        perceptron: Perceptron,
        faded_errors: FadedErrors,
    },
}

impl Predictor {
    pub fn new(kind: PredictorKind, seed: u64) -> Self {
        match kind {
            PredictorKind::MeanOnly => Predictor::MeanOnly,
            PredictorKind::Perceptron => Predictor::Perceptron(Perceptron::new(seed)),
            PredictorKind::Adaptive => Predictor::Adaptive {
                perceptron: Perceptron::new(seed),
                faded_errors: FadedErrors::new(),
            },
        }
    }

    /// Same kind as `self`, with a deep copy of the current weights. Faded
    /// errors start over.
    pub fn inherit(&self, seed: u64) -> Self {
        match self {
            Predictor::MeanOnly => Predictor::MeanOnly,
            Predictor::Perceptron(p) => Predictor::Perceptron(p.inherit(seed)),
            Predictor::Adaptive { perceptron, .. } => Predictor::Adaptive {
                perceptron: perceptron.inherit(seed),
                faded_errors: FadedErrors::new(),
            },
        }
    }

    pub fn kind(&self) -> PredictorKind {
        PredictorKind::from(self)
    }

    pub fn perceptron(&self) -> Option<&Perceptron> {
        match self {
            Predictor::MeanOnly => None,
            Predictor::Perceptron(p) | Predictor::Adaptive { perceptron: p, .. } => Some(p),
        }
    }

    pub fn faded_errors(&self) -> Option<&FadedErrors> {
        match self {
            Predictor::Adaptive { faded_errors, .. } => Some(faded_errors),
            _ => None,
        }
    }

    pub fn estimate_size_bytes(&self) -> usize {
        match self {
            Predictor::MeanOnly => size_of::<Self>(),
            Predictor::Perceptron(p) => size_of::<Self>() + p.estimate_size_bytes(),
            Predictor::Adaptive {
                perceptron,
                faded_errors,
            } => {
                size_of::<Self>()
                    + perceptron.estimate_size_bytes()
                    + faded_errors.estimate_size_bytes()
            }
        }
    }
}

impl From<LeafPredictionOption> for PredictorKind {
    fn from(option: LeafPredictionOption) -> Self {
        match option {
            LeafPredictionOption::Mean => PredictorKind::MeanOnly,
            LeafPredictionOption::Perceptron => PredictorKind::Perceptron,
            LeafPredictionOption::Adaptive => PredictorKind::Adaptive,
        }
    }
}
