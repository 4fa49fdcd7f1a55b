pub mod estimators;
pub mod instances;
