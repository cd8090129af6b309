//! Fixed catalog of typed property templates.
//!
//! Each template names a Revit-style parameter, its fully qualified
//! type id, and a value generator (numeric range with unit, text
//! choice, tag pattern, or 3-vector). An asset's property bag is built
//! by selecting a sampled number of templates without replacement;
//! when the requested count exceeds the catalog size, the catalog is
//! cycled with an incremented variant suffix (`area`, `area_1`,
//! `area_2`, ...), so any count is reachable with no duplicate name
//! within one asset.

use crate::sampler::{round2, SeededSampler};
use assetgraph_core::{PropertyBag, PropertyValue};

/// Value generator carried by a catalog template.
#[derive(Debug, Clone, Copy)]
pub enum ValueTemplate {
    /// Numeric value uniform in `[min, max]` with a fixed unit.
    NumericRange {
        min: f64,
        max: f64,
        unit: Option<&'static str>,
    },
    /// One of a fixed set of strings.
    TextChoice(&'static [&'static str]),
    /// Prefixed numeric tag, e.g. `M-417`.
    Tag { prefix: &'static str, max: u64 },
    /// 3-vector with each component uniform in `[min, max]`.
    Vector { min: f64, max: f64 },
}

/// One entry of the property catalog.
#[derive(Debug, Clone, Copy)]
pub struct PropertyTemplate {
    /// Parameter name used as the property key.
    pub name: &'static str,
    /// Fully qualified parameter type id.
    pub type_id: &'static str,
    /// Value generator.
    pub template: ValueTemplate,
}

/// The fixed property catalog.
pub const CATALOG: &[PropertyTemplate] = &[
    PropertyTemplate {
        name: "area",
        type_id: "autodesk.revit.parameter:area-1.0.0",
        template: ValueTemplate::NumericRange {
            min: 50.0,
            max: 500.0,
            unit: Some("sqft"),
        },
    },
    PropertyTemplate {
        name: "volume",
        type_id: "autodesk.revit.parameter:volume-1.0.0",
        template: ValueTemplate::NumericRange {
            min: 100.0,
            max: 1000.0,
            unit: Some("cuft"),
        },
    },
    PropertyTemplate {
        name: "length",
        type_id: "autodesk.revit.parameter:length-1.0.0",
        template: ValueTemplate::NumericRange {
            min: 5.0,
            max: 50.0,
            unit: Some("ft"),
        },
    },
    PropertyTemplate {
        name: "width",
        type_id: "autodesk.revit.parameter:width-1.0.0",
        template: ValueTemplate::NumericRange {
            min: 0.5,
            max: 2.0,
            unit: Some("ft"),
        },
    },
    PropertyTemplate {
        name: "height",
        type_id: "autodesk.revit.parameter:height-1.0.0",
        template: ValueTemplate::NumericRange {
            min: 8.0,
            max: 14.0,
            unit: Some("ft"),
        },
    },
    PropertyTemplate {
        name: "elevation",
        type_id: "autodesk.revit.parameter:elevation-1.0.0",
        template: ValueTemplate::NumericRange {
            min: 0.0,
            max: 50.0,
            unit: Some("ft"),
        },
    },
    PropertyTemplate {
        name: "perimeter",
        type_id: "autodesk.revit.parameter:perimeter-1.0.0",
        template: ValueTemplate::NumericRange {
            min: 20.0,
            max: 140.0,
            unit: Some("ft"),
        },
    },
    PropertyTemplate {
        name: "cost",
        type_id: "autodesk.revit.parameter:cost-1.0.0",
        template: ValueTemplate::NumericRange {
            min: 100.0,
            max: 10_000.0,
            unit: Some("usd"),
        },
    },
    PropertyTemplate {
        name: "mark",
        type_id: "autodesk.revit.parameter:mark-1.0.0",
        template: ValueTemplate::Tag {
            prefix: "M-",
            max: 999,
        },
    },
    PropertyTemplate {
        name: "comments",
        type_id: "autodesk.revit.parameter:comments-1.0.0",
        template: ValueTemplate::TextChoice(&["Approved", "Pending", "Review"]),
    },
    PropertyTemplate {
        name: "level",
        type_id: "autodesk.revit.parameter:level-1.0.0",
        template: ValueTemplate::TextChoice(&[
            "Level 1", "Level 2", "Level 3", "Level 4", "Level 5",
        ]),
    },
    PropertyTemplate {
        name: "offset",
        type_id: "autodesk.revit.parameter:offset-1.0.0",
        template: ValueTemplate::Vector {
            min: 0.0,
            max: 10.0,
        },
    },
];

/// Instantiate one template with a sampled value.
pub fn instantiate(template: &PropertyTemplate, sampler: &mut SeededSampler) -> PropertyValue {
    match template.template {
        ValueTemplate::NumericRange { min, max, unit } => PropertyValue::Numeric {
            value: round2(sampler.range_f64(min, max)),
            unit: unit.map(str::to_string),
        },
        ValueTemplate::TextChoice(options) => PropertyValue::Text {
            value: sampler.pick(options).to_string(),
        },
        ValueTemplate::Tag { prefix, max } => PropertyValue::Text {
            value: format!("{prefix}{}", sampler.range_u64(1, max)),
        },
        ValueTemplate::Vector { min, max } => PropertyValue::Vector {
            value: sampler.point3([(min, max); 3]),
        },
    }
}

/// Build a property bag with exactly `count` entries.
///
/// Each full pass over the catalog draws a fresh without-replacement
/// order; pass `r > 0` appends the `_{r}` variant suffix to the
/// template name.
pub fn select_properties(sampler: &mut SeededSampler, count: usize) -> PropertyBag {
    let mut bag = PropertyBag::with_capacity(count);
    let len = CATALOG.len();
    let mut order = Vec::new();

    for k in 0..count {
        if k % len == 0 {
            order = sampler.shuffled_indices(len);
        }
        let round = k / len;
        let template = &CATALOG[order[k % len]];
        let name = if round == 0 {
            template.name.to_string()
        } else {
            format!("{}_{round}", template.name)
        };
        bag.push(name, instantiate(template, sampler));
    }

    bag
}
