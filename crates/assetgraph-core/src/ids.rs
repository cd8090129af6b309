//! Compound identifiers and per-model identifier allocation.
//!
//! Records are addressed by multi-field keys rather than a single
//! opaque id: assets by `(modelId, id)` and relationships by
//! `(modelId, id, fromAssetId, toAssetId)`. Local ids come from
//! per-model monotonic counters, so no coordination is needed across
//! models; the compound key always includes the model id.

use crate::error::GenerateError;
use serde::Serialize;

/// Compound identifier of an asset, unique within its model.
///
/// Serialized as the `_id` sub-document of an asset record, in the
/// shape expected by `mongoimport --upsertFields=modelId,id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetId {
    /// Owning model.
    pub model_id: String,
    /// Local id, e.g. `asset-000042`. Monotonic per model across all
    /// categories.
    pub id: String,
}

impl AssetId {
    /// Render the identifier as a single string, for logs and for the
    /// sink failure hint.
    pub fn render(&self) -> String {
        format!("{}:{}", self.model_id, self.id)
    }
}

/// Compound identifier of a relationship.
///
/// The local `id` is part of the key: two relationships of different
/// type (or two instances of the same type) may legally share the same
/// `(modelId, fromAssetId, toAssetId)` triple, and are distinct records
/// only because the local id differs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipId {
    /// Owning model.
    pub model_id: String,
    /// Local id, e.g. `rel-000007`. Monotonic per model, independent of
    /// the asset counter.
    pub id: String,
    /// Local id of the source asset.
    pub from_asset_id: String,
    /// Local id of the target asset.
    pub to_asset_id: String,
}

impl RelationshipId {
    /// Render the identifier as a single string.
    pub fn render(&self) -> String {
        format!("{}:{}", self.model_id, self.id)
    }
}

/// Per-model identifier allocator.
///
/// Holds two independent monotonic counters, one for assets and one for
/// relationships. Allocation is local, in-memory state; ids are never
/// reused within a model for the lifetime of the run. Gaps may occur
/// only when a relationship attempt is skipped before an id is charged;
/// ids need not be contiguous, only unique and monotonic per scope.
#[derive(Debug)]
pub struct IdAllocator {
    model_id: String,
    next_asset: u64,
    next_relationship: u64,
}

impl IdAllocator {
    /// Create an allocator for one model. Counters start at 1.
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            next_asset: 1,
            next_relationship: 1,
        }
    }

    /// Allocate the next asset local id for this model.
    pub fn next_asset_id(&mut self) -> Result<String, GenerateError> {
        let ordinal = self.next_asset;
        self.next_asset =
            self.next_asset
                .checked_add(1)
                .ok_or_else(|| GenerateError::AllocatorExhaustion {
                    model_id: self.model_id.clone(),
                    scope: "asset",
                })?;
        Ok(Self::asset_local_id(ordinal - 1))
    }

    /// Allocate the next relationship local id for this model.
    pub fn next_relationship_id(&mut self) -> Result<String, GenerateError> {
        let ordinal = self.next_relationship;
        self.next_relationship = self.next_relationship.checked_add(1).ok_or_else(|| {
            GenerateError::AllocatorExhaustion {
                model_id: self.model_id.clone(),
                scope: "relationship",
            }
        })?;
        Ok(format!("rel-{:06}", ordinal))
    }

    /// Number of asset ids allocated so far.
    pub fn assets_allocated(&self) -> u64 {
        self.next_asset - 1
    }

    /// Number of relationship ids allocated so far.
    pub fn relationships_allocated(&self) -> u64 {
        self.next_relationship - 1
    }

    /// Model this allocator belongs to.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Reconstruct the local id of the asset at a zero-based allocation
    /// index. Because asset ids are monotonic and dense, relationship
    /// endpoints can be sampled as indices into `0..assets_allocated()`
    /// and turned back into ids without retaining the asset records.
    pub fn asset_local_id(index: u64) -> String {
        format!("asset-{:06}", index + 1)
    }
}
