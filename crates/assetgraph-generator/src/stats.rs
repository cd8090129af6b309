//! Incremental per-model statistics.
//!
//! Counters update as records pass through the emitter; the byte
//! estimate is fed from each record's serialized length, never from
//! re-reading output. Counts only increase; once finalized into a
//! [`ModelRecord`] they are read-only.

use crate::partitioner::ModelPlan;
use assetgraph_core::{
    AssetRecord, ModelRecord, ModelStatistics, ModelStatus, RelationshipRecord,
};
use std::collections::BTreeMap;

/// Running counters for one model's generation.
#[derive(Debug, Default)]
pub struct ModelStats {
    asset_count: u64,
    relationship_count: u64,
    assets_by_category: BTreeMap<String, u64>,
    relationships_by_type: BTreeMap<String, u64>,
    estimated_bytes: u64,
}

impl ModelStats {
    /// Fresh counters, all zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Account one emitted asset and its serialized length.
    pub fn record_asset(&mut self, asset: &AssetRecord, bytes: u64) {
        self.asset_count += 1;
        *self
            .assets_by_category
            .entry(asset.category.clone())
            .or_insert(0) += 1;
        self.estimated_bytes += bytes;
    }

    /// Account one emitted relationship and its serialized length.
    pub fn record_relationship(&mut self, relationship: &RelationshipRecord, bytes: u64) {
        self.relationship_count += 1;
        *self
            .relationships_by_type
            .entry(relationship.attributes.relationship_type.clone())
            .or_insert(0) += 1;
        self.estimated_bytes += bytes;
    }

    /// Assets recorded so far.
    pub fn asset_count(&self) -> u64 {
        self.asset_count
    }

    /// Relationships recorded so far.
    pub fn relationship_count(&self) -> u64 {
        self.relationship_count
    }

    /// Byte estimate so far.
    pub fn estimated_bytes(&self) -> u64 {
        self.estimated_bytes
    }

    /// Produce the finalized model summary record.
    pub fn finalize(
        self,
        plan: &ModelPlan,
        status: ModelStatus,
        error: Option<String>,
    ) -> ModelRecord {
        ModelRecord {
            model_id: plan.model_id.clone(),
            name: plan.name.clone(),
            requested_assets: plan.asset_count,
            requested_relationships: plan.relationship_count,
            status,
            error,
            statistics: ModelStatistics {
                asset_count: self.asset_count,
                relationship_count: self.relationship_count,
                assets_by_category: self.assets_by_category,
                relationships_by_type: self.relationships_by_type,
                estimated_bytes: self.estimated_bytes,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesizer::EntitySynthesizer;
    use assetgraph_core::IdAllocator;

    #[test]
    fn test_counts_accumulate_by_category() {
        let mut synthesizer = EntitySynthesizer::new(42).unwrap();
        let mut allocator = IdAllocator::new("model-0001");
        let mut stats = ModelStats::new();

        for _ in 0..50 {
            let asset = synthesizer.synthesize_asset(&mut allocator).unwrap();
            stats.record_asset(&asset, 100);
        }

        assert_eq!(stats.asset_count(), 50);
        assert_eq!(stats.estimated_bytes(), 5000);

        let plan = ModelPlan::new(42, 0, 50, 0);
        let record = stats.finalize(&plan, ModelStatus::Complete, None);
        let by_category: u64 = record.statistics.assets_by_category.values().sum();
        assert_eq!(by_category, 50);
    }

    #[test]
    fn test_finalize_carries_plan_and_status() {
        let plan = ModelPlan::new(42, 2, 10, 4);
        let record =
            ModelStats::new().finalize(&plan, ModelStatus::RelationshipsSkipped, None);

        assert_eq!(record.model_id, "model-0003");
        assert_eq!(record.requested_assets, 10);
        assert_eq!(record.requested_relationships, 4);
        assert_eq!(record.status, ModelStatus::RelationshipsSkipped);
        assert_eq!(record.statistics.relationship_count, 0);
    }
}
