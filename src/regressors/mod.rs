pub mod attribute_regression_observers;
pub mod isoup_tree;
