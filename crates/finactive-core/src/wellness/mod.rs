pub mod advisories;
pub mod breakdown;
pub mod engine;
pub mod ratios;
pub mod scores;

pub use engine::{assess_client, compute, compute_with_policy, ClientAssessment, MetricsResult};
