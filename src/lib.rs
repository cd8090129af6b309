//! assetgraph-gen: deterministic asset-graph dataset generation.
//!
//! The library side of the binary: run configuration and
//! orchestration, preset sizes, and the run report. The generation
//! pipeline itself lives in the `assetgraph-core`,
//! `assetgraph-generator`, and `assetgraph-jsonl` crates.

pub mod preset;
pub mod report;
pub mod run;

pub use preset::{Preset, PresetSize};
pub use report::{ModelOutcome, RunReport};
pub use run::{run, RunConfig};
