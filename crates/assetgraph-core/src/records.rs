//! Generated record types: models, assets, relationships, and the
//! typed property values that fill an asset's property bag.
//!
//! Field order in the serialized output follows struct declaration
//! order and is stable within a run, which keeps generated files
//! diff-friendly across runs with the same seed.

use crate::ids::{AssetId, RelationshipId};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A 3-vector in model space.
pub type Point3 = [f64; 3];

/// Axis-aligned spatial bounds of an asset.
///
/// Invariant: every coordinate of `max_point` is >= the corresponding
/// coordinate of `min_point`. Construction in the synthesizer
/// guarantees this by building the max as min plus a positive delta.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    /// Component-wise minimum corner.
    pub min_point: Point3,
    /// Component-wise maximum corner.
    pub max_point: Point3,
}

impl Bounds {
    /// Check the component-wise ordering invariant.
    pub fn is_well_formed(&self) -> bool {
        self.min_point
            .iter()
            .zip(self.max_point.iter())
            .all(|(lo, hi)| hi >= lo)
    }
}

/// A single typed property value.
///
/// The declared kind tag makes every record line self-describing: a
/// consumer can dispatch on `kind` without an external schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PropertyValue {
    /// Numeric value with an optional unit (e.g. sqft, cuft).
    Numeric {
        value: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
    /// Free-form or enumerated text.
    Text { value: String },
    /// A 3-vector value.
    Vector { value: Point3 },
}

/// Ordered name -> value mapping of an asset's properties.
///
/// Entry order is insertion order; serialization emits a JSON object
/// with the entries in that order. Names are unique within one bag;
/// the catalog's selection scheme never produces a duplicate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyBag {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bag with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append an entry. The caller is responsible for name uniqueness.
    pub fn push(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.entries.push((name.into(), value));
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, PropertyValue)> {
        self.entries.iter()
    }

    /// Look up a value by name.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, value)| value)
    }
}

impl Serialize for PropertyBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Reference to the space (building level) an asset sits in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaceRef {
    /// Space identifier, e.g. `space-level-3`.
    pub id: String,
}

/// Revit-style element metadata attached to every asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMetadata {
    /// Source-system element id.
    pub element_id: String,
    /// Source-system category id, e.g. `OST_Walls`.
    pub category_id: String,
    /// Construction phase the element was created in.
    pub phase_created: String,
    /// Deterministic RFC 4122 v4 id derived from the model's RNG.
    pub unique_id: Uuid,
}

/// A typed entity belonging to exactly one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    /// Compound identifier, unique within the model.
    #[serde(rename = "_id")]
    pub id: AssetId,
    /// Fully qualified type id, e.g. `autodesk.revit:wall-2.0.0`.
    #[serde(rename = "type")]
    pub type_id: String,
    /// Short category key from the closed set, e.g. `wall`.
    pub category: String,
    /// Space assignment.
    pub space: SpaceRef,
    /// Element metadata block.
    pub metadata: ElementMetadata,
    /// Spatial bounds.
    pub geometry: Bounds,
    /// Sampled-cardinality property bag.
    pub properties: PropertyBag,
}

impl AssetRecord {
    /// Rendered identifier for logs and the sink failure hint.
    pub fn record_key(&self) -> String {
        self.id.render()
    }
}

/// Attribute bag of a relationship.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipAttributes {
    /// Short relationship type key, e.g. `hosted`.
    pub relationship_type: String,
    /// Insertion point, present for hosting edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_point: Option<Point3>,
}

/// A typed directed edge between two assets of the same model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRecord {
    /// Compound identifier. Unique even when the endpoint pair repeats.
    #[serde(rename = "_id")]
    pub id: RelationshipId,
    /// Fully qualified type id, e.g. `autodesk.revit:hosted-1.0.0`.
    #[serde(rename = "type")]
    pub type_id: String,
    /// Attribute bag.
    pub attributes: RelationshipAttributes,
}

impl RelationshipRecord {
    /// Rendered identifier for logs and the sink failure hint.
    pub fn record_key(&self) -> String {
        self.id.render()
    }
}

/// Completion status of one model's generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelStatus {
    /// All requested assets and relationships were emitted.
    Complete,
    /// Assets were emitted, but the pool was too small to form edges;
    /// zero relationships were recorded. Still a successful model.
    RelationshipsSkipped,
    /// Generation aborted mid-model; already-written output for this
    /// model is invalid and must be regenerated in full.
    Failed,
}

/// Finalized per-model statistics.
///
/// Counts only ever increase while a model is generating; the record is
/// read-only once the model completes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStatistics {
    /// Assets emitted.
    pub asset_count: u64,
    /// Relationships emitted.
    pub relationship_count: u64,
    /// Asset counts keyed by category.
    pub assets_by_category: BTreeMap<String, u64>,
    /// Relationship counts keyed by relationship type.
    pub relationships_by_type: BTreeMap<String, u64>,
    /// Sum of serialized record lengths, accumulated as records pass
    /// through the emitter, never by re-reading output.
    pub estimated_bytes: u64,
}

/// Summary record of one generated model, written to `models.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    /// Globally unique model id, e.g. `model-0001`.
    pub model_id: String,
    /// Human-readable name.
    pub name: String,
    /// Requested asset count.
    pub requested_assets: u64,
    /// Requested relationship count.
    pub requested_relationships: u64,
    /// Completion status.
    pub status: ModelStatus,
    /// Failure detail when status is `failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Finalized statistics.
    pub statistics: ModelStatistics,
}

impl ModelRecord {
    /// Rendered identifier for logs and the sink failure hint.
    pub fn record_key(&self) -> String {
        self.model_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_well_formed() {
        let bounds = Bounds {
            min_point: [0.0, 1.0, 2.0],
            max_point: [0.0, 5.0, 3.0],
        };
        assert!(bounds.is_well_formed());

        let inverted = Bounds {
            min_point: [0.0, 1.0, 2.0],
            max_point: [0.0, 0.5, 3.0],
        };
        assert!(!inverted.is_well_formed());
    }

    #[test]
    fn test_property_bag_preserves_insertion_order() {
        let mut bag = PropertyBag::new();
        bag.push(
            "volume",
            PropertyValue::Numeric {
                value: 120.5,
                unit: Some("cuft".to_string()),
            },
        );
        bag.push(
            "area",
            PropertyValue::Numeric {
                value: 42.0,
                unit: Some("sqft".to_string()),
            },
        );
        bag.push(
            "comments",
            PropertyValue::Text {
                value: "Approved".to_string(),
            },
        );

        let json = serde_json::to_string(&bag).unwrap();
        let volume_pos = json.find("volume").unwrap();
        let area_pos = json.find("area").unwrap();
        let comments_pos = json.find("comments").unwrap();
        assert!(volume_pos < area_pos);
        assert!(area_pos < comments_pos);
    }

    #[test]
    fn test_property_value_tagged_serialization() {
        let numeric = PropertyValue::Numeric {
            value: 3.5,
            unit: Some("ft".to_string()),
        };
        let json = serde_json::to_value(&numeric).unwrap();
        assert_eq!(json["kind"], "numeric");
        assert_eq!(json["unit"], "ft");

        let vector = PropertyValue::Vector {
            value: [1.0, 2.0, 3.0],
        };
        let json = serde_json::to_value(&vector).unwrap();
        assert_eq!(json["kind"], "vector");
        assert_eq!(json["value"][2], 3.0);
    }

    #[test]
    fn test_asset_record_serialization_shape() {
        let record = AssetRecord {
            id: AssetId {
                model_id: "model-0001".to_string(),
                id: "asset-000001".to_string(),
            },
            type_id: "autodesk.revit:wall-2.0.0".to_string(),
            category: "wall".to_string(),
            space: SpaceRef {
                id: "space-level-1".to_string(),
            },
            metadata: ElementMetadata {
                element_id: "316001".to_string(),
                category_id: "OST_Walls".to_string(),
                phase_created: "Existing".to_string(),
                unique_id: Uuid::nil(),
            },
            geometry: Bounds {
                min_point: [0.0, 0.0, 0.0],
                max_point: [10.0, 0.5, 9.0],
            },
            properties: PropertyBag::new(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["_id"]["modelId"], "model-0001");
        assert_eq!(json["_id"]["id"], "asset-000001");
        assert_eq!(json["type"], "autodesk.revit:wall-2.0.0");
        assert_eq!(json["geometry"]["minPoint"][0], 0.0);
        assert_eq!(json["metadata"]["categoryId"], "OST_Walls");
    }

    #[test]
    fn test_model_status_serialization() {
        assert_eq!(
            serde_json::to_value(ModelStatus::RelationshipsSkipped).unwrap(),
            "relationships-skipped"
        );
        assert_eq!(
            serde_json::to_value(ModelStatus::Complete).unwrap(),
            "complete"
        );
    }

    #[test]
    fn test_model_record_omits_error_when_none() {
        let record = ModelRecord {
            model_id: "model-0001".to_string(),
            name: "AEC Model 0001".to_string(),
            requested_assets: 10,
            requested_relationships: 2,
            status: ModelStatus::Complete,
            error: None,
            statistics: ModelStatistics::default(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("\"error\""));
    }
}
