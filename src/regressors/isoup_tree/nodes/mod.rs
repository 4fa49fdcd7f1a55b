pub mod learning_nodes;

pub use learning_nodes::{
    Activity, FadedErrors, LearningNode, MultiTargetLearningNode, Perceptron, Predictor,
    PredictorKind, WeightMatrix,
};
