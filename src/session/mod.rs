pub mod dashboard;
pub mod headline;
