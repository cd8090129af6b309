//! Entity synthesis: composing one asset or relationship record from
//! sampled category, allocated identifier, geometry, and properties.

use crate::catalog::select_properties;
use crate::sampler::{round2, PercentileBuckets, SeededSampler};
use assetgraph_core::{
    AssetId, AssetRecord, Bounds, ElementMetadata, GenerateError, IdAllocator, Point3,
    RelationshipAttributes, RelationshipId, RelationshipRecord, SpaceRef,
};

/// One entry of the closed asset category set.
#[derive(Debug, Clone, Copy)]
pub struct AssetCategory {
    /// Short key used on records and in statistics.
    pub key: &'static str,
    /// Fully qualified type id.
    pub type_id: &'static str,
    /// Source-system category id.
    pub category_id: &'static str,
    /// Base for generated element ids.
    pub element_id_start: u64,
    /// Sampling weight.
    pub weight: f64,
}

/// Asset category mix matching the reference Revit workload.
pub const ASSET_CATEGORIES: &[AssetCategory] = &[
    AssetCategory {
        key: "wall",
        type_id: "autodesk.revit:wall-2.0.0",
        category_id: "OST_Walls",
        element_id_start: 316_000,
        weight: 0.23,
    },
    AssetCategory {
        key: "mep",
        type_id: "autodesk.revit:mep-component-2.0.0",
        category_id: "OST_DuctTerminal",
        element_id_start: 325_000,
        weight: 0.20,
    },
    AssetCategory {
        key: "furniture",
        type_id: "autodesk.revit:furniture-2.0.0",
        category_id: "OST_Furniture",
        element_id_start: 340_000,
        weight: 0.23,
    },
    AssetCategory {
        key: "structural",
        type_id: "autodesk.revit:structural-2.0.0",
        category_id: "OST_StructuralFraming",
        element_id_start: 330_000,
        weight: 0.115,
    },
    AssetCategory {
        key: "room",
        type_id: "autodesk.revit:room-2.0.0",
        category_id: "OST_Rooms",
        element_id_start: 320_000,
        weight: 0.085,
    },
    AssetCategory {
        key: "window",
        type_id: "autodesk.revit:window-2.0.0",
        category_id: "OST_Windows",
        element_id_start: 319_000,
        weight: 0.06,
    },
    AssetCategory {
        key: "door",
        type_id: "autodesk.revit:door-2.0.0",
        category_id: "OST_Doors",
        element_id_start: 318_000,
        weight: 0.04,
    },
    AssetCategory {
        key: "fixture",
        type_id: "autodesk.revit:fixture-2.0.0",
        category_id: "OST_LightingFixtures",
        element_id_start: 350_000,
        weight: 0.04,
    },
];

/// One entry of the closed relationship type set.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipType {
    /// Short key used on records and in statistics.
    pub key: &'static str,
    /// Fully qualified type id.
    pub type_id: &'static str,
    /// Sampling weight.
    pub weight: f64,
    /// Hosting edges carry an insertion point.
    pub has_insertion_point: bool,
}

/// Relationship type mix.
pub const RELATIONSHIP_TYPES: &[RelationshipType] = &[
    RelationshipType {
        key: "hosted",
        type_id: "autodesk.revit:hosted-1.0.0",
        weight: 0.30,
        has_insertion_point: true,
    },
    RelationshipType {
        key: "roomBounding",
        type_id: "autodesk.revit:roomBounding-1.0.0",
        weight: 0.20,
        has_insertion_point: false,
    },
    RelationshipType {
        key: "serves",
        type_id: "autodesk.mep:serves-1.0.0",
        weight: 0.15,
        has_insertion_point: false,
    },
    RelationshipType {
        key: "connects",
        type_id: "autodesk.mep:connects-1.0.0",
        weight: 0.15,
        has_insertion_point: false,
    },
    RelationshipType {
        key: "contains",
        type_id: "autodesk.revit:contains-1.0.0",
        weight: 0.10,
        has_insertion_point: false,
    },
    RelationshipType {
        key: "supports",
        type_id: "autodesk.revit:supports-1.0.0",
        weight: 0.10,
        has_insertion_point: false,
    },
];

const PHASES: &[&str] = &["New Construction", "Existing", "Demolition", "Future"];

const LEVEL_COUNT: u64 = 5;

/// Composes asset and relationship records for one model.
///
/// Synthesis is a pure function of the sampler state: no IO, no
/// retries. Identifier allocation is the caller-provided allocator's
/// concern; the synthesizer only consumes ids.
#[derive(Debug)]
pub struct EntitySynthesizer {
    sampler: SeededSampler,
    property_counts: PercentileBuckets,
    category_weights: Vec<f64>,
    relationship_weights: Vec<f64>,
}

impl EntitySynthesizer {
    /// Create a synthesizer seeded for one model.
    pub fn new(seed: u64) -> Result<Self, GenerateError> {
        Ok(Self {
            sampler: SeededSampler::from_seed(seed),
            property_counts: PercentileBuckets::property_counts()?,
            category_weights: ASSET_CATEGORIES.iter().map(|c| c.weight).collect(),
            relationship_weights: RELATIONSHIP_TYPES.iter().map(|t| t.weight).collect(),
        })
    }

    /// Synthesize the next asset record.
    pub fn synthesize_asset(
        &mut self,
        allocator: &mut IdAllocator,
    ) -> Result<AssetRecord, GenerateError> {
        let category = &ASSET_CATEGORIES[self.sampler.weighted_index(&self.category_weights)?];
        let ordinal = allocator.assets_allocated() + 1;
        let local_id = allocator.next_asset_id()?;

        let level = self.sampler.range_u64(1, LEVEL_COUNT);
        let phase = *self.sampler.pick(PHASES);
        let unique_id = self.sampler.uuid_v4();

        let geometry = self.synthesize_bounds();
        let count = self.property_counts.sample(&mut self.sampler) as usize;
        let properties = select_properties(&mut self.sampler, count);

        Ok(AssetRecord {
            id: AssetId {
                model_id: allocator.model_id().to_string(),
                id: local_id,
            },
            type_id: category.type_id.to_string(),
            category: category.key.to_string(),
            space: SpaceRef {
                id: format!("space-level-{level}"),
            },
            metadata: ElementMetadata {
                element_id: (category.element_id_start + ordinal).to_string(),
                category_id: category.category_id.to_string(),
                phase_created: phase.to_string(),
                unique_id,
            },
            geometry,
            properties,
        })
    }

    /// Synthesize the next relationship record, sampling both endpoints
    /// from the model's `asset_pool` already-allocated assets.
    ///
    /// Fails with `InsufficientAssetPool` when fewer than two assets
    /// exist; no relationship id is charged in that case.
    pub fn synthesize_relationship(
        &mut self,
        allocator: &mut IdAllocator,
        asset_pool: u64,
    ) -> Result<RelationshipRecord, GenerateError> {
        if asset_pool < 2 {
            return Err(GenerateError::InsufficientAssetPool {
                model_id: allocator.model_id().to_string(),
                asset_count: asset_pool,
            });
        }

        let rel_type =
            &RELATIONSHIP_TYPES[self.sampler.weighted_index(&self.relationship_weights)?];

        // Distinct endpoints without a rejection loop: sample the
        // target from a range one smaller and shift it past the source.
        let from = self.sampler.index(asset_pool as usize) as u64;
        let mut to = self.sampler.index(asset_pool as usize - 1) as u64;
        if to >= from {
            to += 1;
        }

        let local_id = allocator.next_relationship_id()?;
        let insertion_point = rel_type
            .has_insertion_point
            .then(|| self.sample_insertion_point());

        Ok(RelationshipRecord {
            id: RelationshipId {
                model_id: allocator.model_id().to_string(),
                id: local_id,
                from_asset_id: IdAllocator::asset_local_id(from),
                to_asset_id: IdAllocator::asset_local_id(to),
            },
            type_id: rel_type.type_id.to_string(),
            attributes: RelationshipAttributes {
                relationship_type: rel_type.key.to_string(),
                insertion_point,
            },
        })
    }

    /// Bounds with max >= min guaranteed by construction: the max
    /// corner is the min corner plus a positive delta per component.
    fn synthesize_bounds(&mut self) -> Bounds {
        let min_point = self
            .sampler
            .point3([(0.0, 100.0), (0.0, 100.0), (0.0, 15.0)]);
        let delta: Point3 = [
            self.sampler.range_f64(0.5, 30.0),
            self.sampler.range_f64(0.5, 30.0),
            self.sampler.range_f64(8.0, 14.0),
        ];
        let max_point = [
            round2(min_point[0] + delta[0]),
            round2(min_point[1] + delta[1]),
            round2(min_point[2] + delta[2]),
        ];
        Bounds {
            min_point,
            max_point,
        }
    }

    fn sample_insertion_point(&mut self) -> Point3 {
        self.sampler
            .point3([(0.0, 100.0), (0.0, 100.0), (0.0, 15.0)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_geometry_invariant() {
        let mut synthesizer = EntitySynthesizer::new(42).unwrap();
        let mut allocator = IdAllocator::new("model-0001");

        for _ in 0..200 {
            let asset = synthesizer.synthesize_asset(&mut allocator).unwrap();
            assert!(
                asset.geometry.is_well_formed(),
                "max must dominate min: {:?}",
                asset.geometry
            );
        }
    }

    #[test]
    fn test_asset_category_from_closed_set() {
        let mut synthesizer = EntitySynthesizer::new(42).unwrap();
        let mut allocator = IdAllocator::new("model-0001");

        for _ in 0..50 {
            let asset = synthesizer.synthesize_asset(&mut allocator).unwrap();
            let category = ASSET_CATEGORIES
                .iter()
                .find(|c| c.key == asset.category)
                .expect("category key from the closed set");
            assert_eq!(asset.type_id, category.type_id);
            assert_eq!(asset.metadata.category_id, category.category_id);
        }
    }

    #[test]
    fn test_relationship_endpoints_distinct_and_in_pool() {
        let mut synthesizer = EntitySynthesizer::new(42).unwrap();
        let mut allocator = IdAllocator::new("model-0001");
        for _ in 0..10 {
            allocator.next_asset_id().unwrap();
        }

        for _ in 0..500 {
            let rel = synthesizer
                .synthesize_relationship(&mut allocator, 10)
                .unwrap();
            assert_ne!(rel.id.from_asset_id, rel.id.to_asset_id);
            for endpoint in [&rel.id.from_asset_id, &rel.id.to_asset_id] {
                let ordinal: u64 = endpoint
                    .strip_prefix("asset-")
                    .unwrap()
                    .parse()
                    .unwrap();
                assert!((1..=10).contains(&ordinal));
            }
        }
    }

    #[test]
    fn test_relationship_requires_two_assets() {
        let mut synthesizer = EntitySynthesizer::new(42).unwrap();
        let mut allocator = IdAllocator::new("model-0001");
        allocator.next_asset_id().unwrap();

        let result = synthesizer.synthesize_relationship(&mut allocator, 1);
        assert!(matches!(
            result,
            Err(GenerateError::InsufficientAssetPool { asset_count: 1, .. })
        ));
        // The skipped attempt must not charge a relationship id.
        assert_eq!(allocator.relationships_allocated(), 0);
    }

    #[test]
    fn test_hosted_relationships_carry_insertion_point() {
        let mut synthesizer = EntitySynthesizer::new(42).unwrap();
        let mut allocator = IdAllocator::new("model-0001");

        let mut saw_hosted = false;
        for _ in 0..200 {
            let rel = synthesizer
                .synthesize_relationship(&mut allocator, 100)
                .unwrap();
            if rel.attributes.relationship_type == "hosted" {
                saw_hosted = true;
                assert!(rel.attributes.insertion_point.is_some());
            } else {
                assert!(rel.attributes.insertion_point.is_none());
            }
        }
        assert!(saw_hosted, "weights should produce hosted edges");
    }

    #[test]
    fn test_synthesis_deterministic() {
        let mut a = EntitySynthesizer::new(7).unwrap();
        let mut b = EntitySynthesizer::new(7).unwrap();
        let mut alloc_a = IdAllocator::new("model-0001");
        let mut alloc_b = IdAllocator::new("model-0001");

        for _ in 0..20 {
            let asset_a = a.synthesize_asset(&mut alloc_a).unwrap();
            let asset_b = b.synthesize_asset(&mut alloc_b).unwrap();
            assert_eq!(asset_a, asset_b);
        }
    }
}
