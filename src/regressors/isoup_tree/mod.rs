mod isoup_tree_params;
mod leaf_prediction_option;
pub mod nodes;
mod regression_context;
mod regressor_context;
mod running_normalizer;

pub use isoup_tree_params::{IsoupTreeParams, PerceptronOptions};
pub use leaf_prediction_option::LeafPredictionOption;
pub use regression_context::RegressionContext;
pub use regressor_context::RegressorContext;
pub use running_normalizer::RunningNormalizer;
