//! Log record sinks

use super::record::LogRecord;
use crate::constants::DEFAULT_LOG_BUFFER_CAPACITY;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// Destination for rendered log records
pub trait LogSink: Send + Sync {
    /// Accept one record
    fn write(&self, record: &LogRecord);
}

/// Writes one JSON line per record to a [`MakeWriter`]
///
/// Works with `std::io::stdout`, `std::io::stderr` and the rolling file
/// appenders of `tracing-appender`.
pub struct WriterSink<W> {
    make_writer: W,
}

impl<W> WriterSink<W>
where
    W: for<'a> MakeWriter<'a> + Send + Sync,
{
    /// Create a sink writing through `make_writer`
    pub fn new(make_writer: W) -> Self {
        Self { make_writer }
    }
}

impl<W> LogSink for WriterSink<W>
where
    W: for<'a> MakeWriter<'a> + Send + Sync,
{
    fn write(&self, record: &LogRecord) {
        let mut writer = self.make_writer.make_writer();
        // Logging must never fail the caller
        let _ = writeln!(writer, "{}", record.to_json());
    }
}

impl<W> std::fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterSink").finish_non_exhaustive()
    }
}

/// Bounded in-memory buffer of recent records
///
/// Oldest records are dropped once `capacity` is reached.
#[derive(Debug)]
pub struct MemoryLogSink {
    entries: Mutex<VecDeque<LogRecord>>,
    capacity: usize,
}

impl MemoryLogSink {
    /// Create a buffer holding at most `capacity` records
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogRecord>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All buffered records, oldest first
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().iter().cloned().collect()
    }

    /// The most recent `count` records, oldest first
    pub fn recent(&self, count: usize) -> Vec<LogRecord> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(count);
        entries.iter().skip(skip).cloned().collect()
    }

    /// Records carrying `message`
    pub fn with_message(&self, message: &str) -> Vec<LogRecord> {
        self.lock()
            .iter()
            .filter(|record| record.message == message)
            .cloned()
            .collect()
    }

    /// Number of buffered records
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every buffered record
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Default for MemoryLogSink {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_BUFFER_CAPACITY)
    }
}

impl LogSink for MemoryLogSink {
    fn write(&self, record: &LogRecord) {
        let mut entries = self.lock();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(record.clone());
    }
}
