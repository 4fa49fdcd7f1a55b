mod attribute_regression_observer;
mod nominal_attribute_regression_observer;
mod numeric_attribute_regression_observer;

pub use attribute_regression_observer::AttributeRegressionObserver;
pub use nominal_attribute_regression_observer::NominalAttributeRegressionObserver;
pub use numeric_attribute_regression_observer::NumericAttributeRegressionObserver;
