pub use faded_errors::{FADING_FACTOR, FadedErrors};
pub use learning_node::LearningNode;
pub use multi_target_learning_node::{Activity, MultiTargetLearningNode};
pub use perceptron::Perceptron;
pub use predictor::{Predictor, PredictorKind};
pub use weight_matrix::WeightMatrix;
mod faded_errors;
mod learning_node;
mod multi_target_learning_node;
mod perceptron;
mod predictor;
mod weight_matrix;
