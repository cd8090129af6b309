//! Preset run sizes.
//!
//! A preset bundles model count, per-model counts, and flush interval
//! into a named size. Explicit CLI flags override individual preset
//! fields.

use clap::ValueEnum;

/// Preset size for a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetSize {
    Small,
    Medium,
    Large,
}

impl std::fmt::Display for PresetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresetSize::Small => write!(f, "small"),
            PresetSize::Medium => write!(f, "medium"),
            PresetSize::Large => write!(f, "large"),
        }
    }
}

/// Complete preset configuration.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub model_count: u64,
    pub assets_per_model: u64,
    pub relationships_per_model: u64,
    pub batch_size: u64,
}

impl Preset {
    /// Get preset by size.
    pub fn by_size(size: PresetSize) -> Self {
        match size {
            PresetSize::Small => Self::small(),
            PresetSize::Medium => Self::medium(),
            PresetSize::Large => Self::large(),
        }
    }

    /// Small preset: 2 models, 1K assets each. Smoke-test scale.
    pub fn small() -> Self {
        Self {
            model_count: 2,
            assets_per_model: 1_000,
            relationships_per_model: 300,
            batch_size: 500,
        }
    }

    /// Medium preset: 4 models, 10K assets each.
    pub fn medium() -> Self {
        Self {
            model_count: 4,
            assets_per_model: 10_000,
            relationships_per_model: 3_000,
            batch_size: 1_000,
        }
    }

    /// Large preset: 8 models, 100K assets each.
    pub fn large() -> Self {
        Self {
            model_count: 8,
            assets_per_model: 100_000,
            relationships_per_model: 30_000,
            batch_size: 5_000,
        }
    }
}
