//! Run report types.
//!
//! Per-model outcomes are aggregated into a run report distinguishing
//! completed, relationship-skipped, and failed models. One model's
//! failure never blocks its siblings, but it does make the run as a
//! whole report failure.

use assetgraph_core::{ModelRecord, ModelStatus};
use std::time::Duration;

/// Result of one model's generation.
#[derive(Debug, Clone)]
pub struct ModelOutcome {
    /// Finalized model summary record.
    pub model: ModelRecord,
    /// Wall-clock time spent on this model.
    pub duration: Duration,
}

impl ModelOutcome {
    /// Whether this model's output is valid.
    pub fn succeeded(&self) -> bool {
        self.model.status != ModelStatus::Failed
    }
}

/// Result of a full generation run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Seed the run generated from.
    pub seed: u64,
    /// True when the seed came from the clock (not reproducible).
    pub seeded_from_clock: bool,
    /// Per-model outcomes in model-index order.
    pub outcomes: Vec<ModelOutcome>,
    /// Wall-clock duration of the whole run.
    pub total_duration: Duration,
}

impl RunReport {
    /// Models whose output is valid.
    pub fn completed_models(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    /// Models that failed mid-generation.
    pub fn failed_models(&self) -> usize {
        self.outcomes.len() - self.completed_models()
    }

    /// Total assets emitted across all models.
    pub fn total_assets(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|o| o.model.statistics.asset_count)
            .sum()
    }

    /// Total relationships emitted across all models.
    pub fn total_relationships(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|o| o.model.statistics.relationship_count)
            .sum()
    }

    /// Total estimated serialized bytes across all models.
    pub fn total_bytes(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|o| o.model.statistics.estimated_bytes)
            .sum()
    }

    /// Whether every model produced valid output.
    pub fn succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.succeeded())
    }

    /// Overall records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            (self.total_assets() + self.total_relationships()) as f64
                / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Generate a summary string.
    pub fn summary(&self) -> String {
        let status = if self.succeeded() { "OK" } else { "FAILED" };

        let mut summary = format!(
            "Generation Report: {status}\n\
             ==================\n\
             Seed: {}{}\n\
             Models: {} ({} completed, {} failed)\n\
             Assets: {}\n\
             Relationships: {}\n\
             Estimated Size: {} bytes\n\
             Duration: {:?} ({:.2} records/sec)\n",
            self.seed,
            if self.seeded_from_clock {
                " (from clock, not reproducible)"
            } else {
                ""
            },
            self.outcomes.len(),
            self.completed_models(),
            self.failed_models(),
            self.total_assets(),
            self.total_relationships(),
            self.total_bytes(),
            self.total_duration,
            self.records_per_second(),
        );

        for outcome in &self.outcomes {
            let model = &outcome.model;
            let status = match model.status {
                ModelStatus::Complete => "complete",
                ModelStatus::RelationshipsSkipped => "relationships-skipped",
                ModelStatus::Failed => "FAILED",
            };
            summary.push_str(&format!(
                "  {}: {} - {} assets, {} relationships in {:?}\n",
                model.model_id,
                status,
                model.statistics.asset_count,
                model.statistics.relationship_count,
                outcome.duration,
            ));
            if let Some(ref error) = model.error {
                summary.push_str(&format!("    error: {error}\n"));
            }
        }

        summary
    }
}
