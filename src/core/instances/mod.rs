pub mod multi_target_instance;

pub use multi_target_instance::MultiTargetInstance;
