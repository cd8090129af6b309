//! Streaming JSONL (JSON Lines) output for assetgraph-gen.
//!
//! One serialized record per line, UTF-8, each line independently
//! parseable, the shape bulk importers such as `mongoimport` consume
//! directly. The emitter writes each record as it arrives and never
//! retains references to previously emitted records, so peak memory is
//! one record plus the write buffer.
//!
//! # Example
//!
//! ```ignore
//! let mut emitter = JsonlEmitter::create(dir.join("assets.jsonl"))?;
//! let bytes = emitter.emit(&asset.record_key(), &asset)?;
//! let metrics = emitter.finish()?;
//! println!("{} records, {} bytes", metrics.records_written, metrics.bytes_written);
//! ```

pub mod emitter;

pub use emitter::{EmitMetrics, JsonlEmitter, DEFAULT_BATCH_SIZE, DEFAULT_BUFFER_SIZE};
