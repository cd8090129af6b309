//! Line-delimited JSON record emitter.

use assetgraph_core::GenerateError;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

/// Default buffer size for JSONL writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Default number of records between explicit flushes.
pub const DEFAULT_BATCH_SIZE: u64 = 1000;

/// Metrics from one emitter's lifetime.
#[derive(Debug, Clone, Default)]
pub struct EmitMetrics {
    /// Records written.
    pub records_written: u64,
    /// Bytes written, newlines included.
    pub bytes_written: u64,
    /// Time from creation to finish.
    pub duration: Duration,
}

impl EmitMetrics {
    /// Records per second over the emitter's lifetime.
    pub fn records_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.records_written as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Writes serialized records to a sink, one line each.
///
/// Buffering is transparent to correctness: every `batch_size` records
/// the buffer is flushed, and [`finish`](JsonlEmitter::finish) flushes
/// fully before metrics are reported. A write failure surfaces as
/// [`GenerateError::SinkWriteFailure`] carrying the identifier of the
/// last record that made it out, which is what a resumable caller
/// needs to skip already-written records.
pub struct JsonlEmitter<W: Write> {
    writer: BufWriter<W>,
    batch_size: u64,
    last_emitted: Option<String>,
    records_written: u64,
    bytes_written: u64,
    started: Instant,
}

impl JsonlEmitter<File> {
    /// Create an emitter over a new file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, GenerateError> {
        let file = File::create(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> JsonlEmitter<W> {
    /// Wrap an arbitrary sink.
    pub fn new(sink: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, sink),
            batch_size: DEFAULT_BATCH_SIZE,
            last_emitted: None,
            records_written: 0,
            bytes_written: 0,
            started: Instant::now(),
        }
    }

    /// Set the flush interval in records.
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Serialize `record` and append it as one line.
    ///
    /// `key` is the record's rendered identifier, retained only as the
    /// resume hint for a subsequent failure. Returns the number of
    /// bytes written for this record, newline included.
    pub fn emit<T: Serialize>(&mut self, key: &str, record: &T) -> Result<u64, GenerateError> {
        let mut line = serde_json::to_vec(record)
            .map_err(|e| self.write_failure(std::io::Error::other(e)))?;
        line.push(b'\n');

        self.writer
            .write_all(&line)
            .map_err(|e| self.write_failure(e))?;

        self.records_written += 1;
        self.bytes_written += line.len() as u64;
        self.last_emitted = Some(key.to_string());

        if self.records_written % self.batch_size == 0 {
            self.writer.flush().map_err(|e| self.write_failure(e))?;
        }

        Ok(line.len() as u64)
    }

    /// Identifier of the last successfully emitted record.
    pub fn last_emitted(&self) -> Option<&str> {
        self.last_emitted.as_deref()
    }

    /// Records written so far.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Flush everything and report metrics.
    pub fn finish(mut self) -> Result<EmitMetrics, GenerateError> {
        self.writer.flush().map_err(|e| GenerateError::SinkWriteFailure {
            last_emitted: self.last_emitted.clone(),
            source: e,
        })?;
        Ok(EmitMetrics {
            records_written: self.records_written,
            bytes_written: self.bytes_written,
            duration: self.started.elapsed(),
        })
    }

    fn write_failure(&self, source: std::io::Error) -> GenerateError {
        GenerateError::SinkWriteFailure {
            last_emitted: self.last_emitted.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use tempfile::TempDir;

    #[derive(Serialize)]
    struct Row {
        id: String,
        value: u64,
    }

    fn row(n: u64) -> Row {
        Row {
            id: format!("row-{n:03}"),
            value: n,
        }
    }

    #[test]
    fn test_emit_one_record_per_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.jsonl");

        let mut emitter = JsonlEmitter::create(&path).unwrap();
        for n in 0..10 {
            let record = row(n);
            emitter.emit(&record.id.clone(), &record).unwrap();
        }
        let metrics = emitter.finish().unwrap();
        assert_eq!(metrics.records_written, 10);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 10);
        for line in lines {
            let json: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(json.get("id").is_some());
        }
    }

    #[test]
    fn test_bytes_written_matches_file_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.jsonl");

        let mut emitter = JsonlEmitter::create(&path).unwrap();
        let mut returned = 0;
        for n in 0..25 {
            let record = row(n);
            returned += emitter.emit(&record.id.clone(), &record).unwrap();
        }
        let metrics = emitter.finish().unwrap();

        let file_size = std::fs::metadata(&path).unwrap().len();
        assert_eq!(metrics.bytes_written, file_size);
        assert_eq!(returned, file_size);
    }

    #[test]
    fn test_last_emitted_tracks_most_recent_key() {
        let mut emitter = JsonlEmitter::new(Vec::new());
        assert_eq!(emitter.last_emitted(), None);

        emitter.emit("row-000", &row(0)).unwrap();
        emitter.emit("row-001", &row(1)).unwrap();
        assert_eq!(emitter.last_emitted(), Some("row-001"));
    }

    #[test]
    fn test_write_failure_carries_last_emitted() {
        // A sink that accepts one flush worth of data, then fails.
        struct FailingSink {
            wrote: bool,
        }
        impl Write for FailingSink {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                if self.wrote {
                    Err(std::io::Error::other("sink full"))
                } else {
                    self.wrote = true;
                    Ok(buf.len())
                }
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut emitter =
            JsonlEmitter::new(FailingSink { wrote: false }).with_batch_size(1);
        emitter.emit("row-000", &row(0)).unwrap();

        let err = emitter.emit("row-001", &row(1)).unwrap_err();
        match err {
            GenerateError::SinkWriteFailure { last_emitted, .. } => {
                assert_eq!(last_emitted.as_deref(), Some("row-000"));
            }
            other => panic!("expected SinkWriteFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_batch_flush_keeps_file_current() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.jsonl");

        let mut emitter = JsonlEmitter::create(&path).unwrap().with_batch_size(5);
        for n in 0..5 {
            let record = row(n);
            emitter.emit(&record.id.clone(), &record).unwrap();
        }

        // Five records hit a batch boundary, so they are on disk even
        // though the emitter is still open.
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 5);

        emitter.finish().unwrap();
    }
}
