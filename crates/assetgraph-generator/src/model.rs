//! Per-model generation driver.
//!
//! A [`ModelGenerator`] owns one model's sampler and allocator and
//! yields records lazily: first the asset stream, then the
//! relationship stream referencing only already-yielded asset ids.
//! Nothing is buffered: the caller emits each record as it arrives,
//! so peak memory stays at one record regardless of model size.

use crate::partitioner::ModelPlan;
use crate::synthesizer::EntitySynthesizer;
use assetgraph_core::{AssetRecord, GenerateError, IdAllocator, RelationshipRecord};
use tracing::debug;

/// Lazily generates one model's records from its plan.
#[derive(Debug)]
pub struct ModelGenerator {
    plan: ModelPlan,
    synthesizer: EntitySynthesizer,
    allocator: IdAllocator,
    assets_remaining: u64,
    relationships_remaining: u64,
}

impl ModelGenerator {
    /// Create a generator for one model plan.
    pub fn new(plan: ModelPlan) -> Result<Self, GenerateError> {
        let synthesizer = EntitySynthesizer::new(plan.seed)?;
        let allocator = IdAllocator::new(plan.model_id.clone());
        let assets_remaining = plan.asset_count;
        let relationships_remaining = plan.relationship_count;
        Ok(Self {
            plan,
            synthesizer,
            allocator,
            assets_remaining,
            relationships_remaining,
        })
    }

    /// The plan this generator executes.
    pub fn plan(&self) -> &ModelPlan {
        &self.plan
    }

    /// Assets generated so far.
    pub fn assets_generated(&self) -> u64 {
        self.allocator.assets_allocated()
    }

    /// Next asset record, or `None` once the requested count is done.
    pub fn next_asset(&mut self) -> Option<Result<AssetRecord, GenerateError>> {
        if self.assets_remaining == 0 {
            return None;
        }
        self.assets_remaining -= 1;

        let asset = self.synthesizer.synthesize_asset(&mut self.allocator);
        if let Ok(ref asset) = asset {
            let generated = self.allocator.assets_allocated();
            if generated % 10_000 == 0 {
                debug!(
                    "{}: generated {} assets ({})",
                    self.plan.model_id,
                    generated,
                    asset.record_key()
                );
            }
        }
        Some(asset)
    }

    /// Check the relationship phase can start.
    ///
    /// Returns `InsufficientAssetPool` when relationships were
    /// requested but the asset pool cannot form an edge with distinct
    /// endpoints; the caller records the skip and the model still
    /// counts as successful.
    pub fn begin_relationships(&self) -> Result<(), GenerateError> {
        let pool = self.allocator.assets_allocated();
        if self.plan.relationship_count > 0 && pool < 2 {
            return Err(GenerateError::InsufficientAssetPool {
                model_id: self.plan.model_id.clone(),
                asset_count: pool,
            });
        }
        Ok(())
    }

    /// Next relationship record, or `None` once the requested count is
    /// done.
    pub fn next_relationship(&mut self) -> Option<Result<RelationshipRecord, GenerateError>> {
        if self.relationships_remaining == 0 {
            return None;
        }
        self.relationships_remaining -= 1;

        let pool = self.allocator.assets_allocated();
        Some(
            self.synthesizer
                .synthesize_relationship(&mut self.allocator, pool),
        )
    }
}
