pub mod core;
pub mod error;
pub mod regressors;
pub mod utils;

pub use error::LearningNodeError;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
