//! Core types for the assetgraph-gen data generator.
//!
//! This crate defines the records that make up a generated asset graph
//! (models, assets, relationships), the compound identifiers that give
//! them their identity in the target document store, the per-model
//! identifier allocator, and the error taxonomy shared by the
//! generation pipeline.
//!
//! Everything here is write-once: records are created during generation
//! and never mutated afterwards. The only exception is a model's
//! statistics, which grow monotonically until the model is finalized.

pub mod error;
pub mod ids;
pub mod records;

pub use error::GenerateError;
pub use ids::{AssetId, IdAllocator, RelationshipId};
pub use records::{
    AssetRecord, Bounds, ElementMetadata, ModelRecord, ModelStatistics, ModelStatus, Point3,
    PropertyBag, PropertyValue, RelationshipAttributes, RelationshipRecord, SpaceRef,
};
