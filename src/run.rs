//! Run orchestration: plan models, fan out bounded parallel workers,
//! collect outcomes, write the model summary stream.
//!
//! Each model is an independent unit of work with no shared mutable
//! state: its own sub-seed, allocator, and output files. The only
//! single-writer resource is `models.jsonl`, written by the
//! orchestrator in model-index order after all workers join, so output
//! is merge-stable regardless of worker scheduling.

use crate::report::{ModelOutcome, RunReport};
use anyhow::{Context, Result};
use assetgraph_core::{GenerateError, ModelRecord, ModelStatus};
use assetgraph_generator::{plan_models, validate_distributions, ModelGenerator, ModelPlan, ModelStats};
use assetgraph_jsonl::JsonlEmitter;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Fully resolved configuration for one generation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of models to generate.
    pub model_count: u64,
    /// Assets per model.
    pub assets_per_model: u64,
    /// Relationships per model.
    pub relationships_per_model: u64,
    /// Seed; `None` falls back to the clock and forfeits
    /// reproducibility.
    pub seed: Option<u64>,
    /// Root output directory.
    pub output_dir: PathBuf,
    /// Emitter flush interval in records.
    pub batch_size: u64,
    /// Maximum models generated concurrently.
    pub parallelism: usize,
}

/// Execute a generation run.
///
/// Configuration-level errors (`InvalidDistribution`) abort before any
/// model begins and before any output is written. Per-model failures
/// are isolated: the failed model's summary is emitted with status
/// `failed`, siblings run to completion, and the returned report
/// carries the overall verdict.
pub async fn run(config: RunConfig) -> Result<RunReport> {
    let started = Instant::now();

    validate_distributions().context("sampling configuration is invalid")?;

    let (seed, seeded_from_clock) = match config.seed {
        Some(seed) => (seed, false),
        None => {
            let seed = Utc::now().timestamp_micros() as u64;
            warn!("no seed given; seeded from clock ({seed}); this run is not reproducible");
            (seed, true)
        }
    };

    let plans = plan_models(
        seed,
        config.model_count,
        config.assets_per_model,
        config.relationships_per_model,
    );
    info!(
        "planned {} model(s): {} assets, {} relationships each (seed={seed})",
        plans.len(),
        config.assets_per_model,
        config.relationships_per_model
    );

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let semaphore = Arc::new(Semaphore::new(config.parallelism.max(1)));
    let mut workers = JoinSet::new();
    for plan in plans {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .context("worker semaphore closed")?;
        let output_dir = config.output_dir.clone();
        let batch_size = config.batch_size;
        workers.spawn_blocking(move || {
            let index = plan.index;
            let outcome = generate_model(&plan, &output_dir, batch_size);
            drop(permit);
            (index, outcome)
        });
    }

    let mut outcomes: Vec<Option<ModelOutcome>> =
        (0..config.model_count).map(|_| None).collect();
    while let Some(joined) = workers.join_next().await {
        let (index, outcome) = joined.context("model worker panicked")?;
        outcomes[index as usize] = Some(outcome);
    }
    let outcomes: Vec<ModelOutcome> = outcomes
        .into_iter()
        .map(|o| o.expect("every planned model produces an outcome"))
        .collect();

    write_model_summaries(&config.output_dir, &outcomes)?;

    let report = RunReport {
        seed,
        seeded_from_clock,
        outcomes,
        total_duration: started.elapsed(),
    };
    info!(
        "run finished: {}/{} models completed, {} assets, {} relationships",
        report.completed_models(),
        report.outcomes.len(),
        report.total_assets(),
        report.total_relationships()
    );

    Ok(report)
}

/// Write the model summary stream in model-index order.
fn write_model_summaries(output_dir: &Path, outcomes: &[ModelOutcome]) -> Result<()> {
    let path = output_dir.join("models.jsonl");
    let mut emitter = JsonlEmitter::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for outcome in outcomes {
        emitter.emit(&outcome.model.record_key(), &outcome.model)?;
    }
    emitter.finish()?;
    Ok(())
}

/// Generate one model into `<output_root>/<model_id>/`.
///
/// Never returns an error: a failure is folded into a `failed` model
/// record so the orchestrator can keep siblings running.
fn generate_model(plan: &ModelPlan, output_root: &Path, batch_size: u64) -> ModelOutcome {
    let started = Instant::now();
    let model = match try_generate_model(plan, output_root, batch_size) {
        Ok(model) => model,
        Err(err) => {
            error!("{}: generation failed: {err}", plan.model_id);
            // Already-written output for this model is invalid; the
            // summary record marks it.
            ModelStats::new().finalize(plan, ModelStatus::Failed, Some(err.to_string()))
        }
    };
    ModelOutcome {
        model,
        duration: started.elapsed(),
    }
}

fn try_generate_model(
    plan: &ModelPlan,
    output_root: &Path,
    batch_size: u64,
) -> Result<ModelRecord, GenerateError> {
    let model_dir = output_root.join(&plan.model_id);
    std::fs::create_dir_all(&model_dir)?;

    let mut generator = ModelGenerator::new(plan.clone())?;
    let mut stats = ModelStats::new();

    let mut assets =
        JsonlEmitter::create(model_dir.join("assets.jsonl"))?.with_batch_size(batch_size);
    while let Some(asset) = generator.next_asset() {
        let asset = asset?;
        let bytes = assets.emit(&asset.record_key(), &asset)?;
        stats.record_asset(&asset, bytes);
    }
    let asset_metrics = assets.finish()?;

    let mut status = ModelStatus::Complete;
    let mut relationships =
        JsonlEmitter::create(model_dir.join("relationships.jsonl"))?.with_batch_size(batch_size);
    match generator.begin_relationships() {
        Ok(()) => {
            while let Some(relationship) = generator.next_relationship() {
                let relationship = relationship?;
                let bytes = relationships.emit(&relationship.record_key(), &relationship)?;
                stats.record_relationship(&relationship, bytes);
            }
        }
        Err(GenerateError::InsufficientAssetPool { asset_count, .. }) => {
            info!(
                "{}: skipping relationships, {} asset(s) cannot form an edge",
                plan.model_id, asset_count
            );
            status = ModelStatus::RelationshipsSkipped;
        }
        Err(other) => return Err(other),
    }
    let relationship_metrics = relationships.finish()?;

    info!(
        "{}: {} assets ({} bytes), {} relationships ({} bytes) in {:?}",
        plan.model_id,
        asset_metrics.records_written,
        asset_metrics.bytes_written,
        relationship_metrics.records_written,
        relationship_metrics.bytes_written,
        asset_metrics.duration + relationship_metrics.duration,
    );

    Ok(stats.finalize(plan, status, None))
}
