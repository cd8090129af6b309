//! Deterministic entity synthesis for the assetgraph-gen generator.
//!
//! This crate turns a seed and a per-model plan into a stream of asset
//! and relationship records. The same seed always yields the same
//! records, independent of machine, thread count, or time.
//!
//! # Architecture
//!
//! ```text
//! global seed
//!      │
//!      ▼ partitioner (sub-seed per model)
//! ┌────────────────┐
//! │ ModelGenerator │  one per model, fully isolated state
//! │                │
//! │  - sampler     │  seeded StdRng + distributions
//! │  - catalog     │  fixed property templates
//! │  - allocator   │  monotonic per-model ids
//! └───────┬────────┘
//!         │
//!         ▼
//!   AssetRecord / RelationshipRecord stream
//!         │
//!         ▼
//!   ModelStats (incremental counters) ──► ModelRecord summary
//! ```
//!
//! # Example
//!
//! ```rust
//! use assetgraph_generator::{plan_models, ModelGenerator};
//!
//! let plans = plan_models(42, 1, 10, 3);
//! let mut generator = ModelGenerator::new(plans[0].clone()).unwrap();
//!
//! while let Some(asset) = generator.next_asset() {
//!     let asset = asset.unwrap();
//!     println!("{}", asset.record_key());
//! }
//! ```

pub mod catalog;
pub mod model;
pub mod partitioner;
pub mod sampler;
pub mod stats;
pub mod synthesizer;

pub use model::ModelGenerator;
pub use partitioner::{derive_subseed, plan_models, ModelPlan};
pub use sampler::{PercentileBuckets, SeededSampler};
pub use stats::ModelStats;
pub use synthesizer::{EntitySynthesizer, ASSET_CATEGORIES, RELATIONSHIP_TYPES};

use assetgraph_core::GenerateError;

/// Validate every fixed sampling distribution the generator relies on.
///
/// Run once at startup so a malformed configuration aborts the run
/// before any model begins and before any output is written.
pub fn validate_distributions() -> Result<(), GenerateError> {
    sampler::validate_weights(
        "asset categories",
        &ASSET_CATEGORIES.iter().map(|c| c.weight).collect::<Vec<_>>(),
    )?;
    sampler::validate_weights(
        "relationship types",
        &RELATIONSHIP_TYPES
            .iter()
            .map(|t| t.weight)
            .collect::<Vec<_>>(),
    )?;
    PercentileBuckets::property_counts()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_distributions_are_valid() {
        validate_distributions().unwrap();
    }
}
