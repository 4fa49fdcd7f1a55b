use crate::core::instances::MultiTargetInstance;
use crate::error::LearningNodeError;
use crate::regressors::isoup_tree::RegressorContext;

pub trait LearningNode {
    fn learn_from_instance(
        &mut self,
        instance: &MultiTargetInstance,
        context: &dyn RegressorContext,
    ) -> Result<(), LearningNodeError>;

    fn total_weight(&self) -> f64;

    fn calc_byte_size(&self) -> usize;
}
