//! Matching engine: hard filters, sub-scores, composite score, and the orchestrator
//! that persists admitted matches.

pub mod batch;
pub mod composite;
pub mod filters;
pub mod orchestrator;
pub mod scoring;
pub mod seniority;

#[cfg(test)]
pub(crate) mod test_support;

pub use composite::DEFAULT_WEIGHTS;
pub use orchestrator::{MatchEngine, MatchingConfig};
