//! Error types for asset graph generation.

use thiserror::Error;

/// Errors that can occur while generating an asset graph.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Malformed sampling configuration (empty categorical set, zero or
    /// non-finite weights, non-monotonic percentile breakpoints).
    /// Detected during configuration validation, before any model begins.
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    /// The identifier counter for a scope ran out. Practically
    /// unreachable with 64-bit counters, but defined rather than
    /// wrapping around silently.
    #[error("Identifier space exhausted for {scope} ids in model {model_id}")]
    AllocatorExhaustion {
        /// Model whose allocator overflowed.
        model_id: String,
        /// Which counter overflowed ("asset" or "relationship").
        scope: &'static str,
    },

    /// A model requested relationships but holds fewer than two assets,
    /// so no edge with distinct endpoints can be formed. The caller
    /// skips relationship generation for that model and records zero
    /// relationships; the run as a whole still succeeds.
    #[error("Model {model_id} has {asset_count} asset(s), need at least 2 for relationships")]
    InsufficientAssetPool {
        /// Model with the undersized pool.
        model_id: String,
        /// Assets generated for that model.
        asset_count: u64,
    },

    /// Writing a record to the output sink failed. Fatal to the
    /// affected model only. Carries the identifier of the last record
    /// that was written successfully so a resumable run can skip
    /// already-written records.
    #[error("Sink write failed (last emitted: {last_emitted:?}): {source}")]
    SinkWriteFailure {
        /// Identifier of the last successfully emitted record, if any.
        last_emitted: Option<String>,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// IO error outside the emit path (creating output files or
    /// directories).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenerateError {
    /// Whether this error invalidates the whole run rather than a
    /// single model.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, GenerateError::InvalidDistribution(_))
    }
}
