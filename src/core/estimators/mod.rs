pub mod target_statistics;

pub use target_statistics::TargetStatistics;
