use std::any::Any;

pub trait AttributeRegressionObserver {
    fn update(&mut self, att_val: f64, targets: &[f64], weight: f64);
    fn estimate_size_bytes(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
}
