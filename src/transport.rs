//! Transport sinks
//!
//! Transports observe every message that passes the level gate. They run
//! inline and in registration order; a failing transport is isolated and
//! reported through the logger's own diagnostic path without affecting the
//! caller or sibling transports.

use anyhow::Result;
use parking_lot::Mutex;

use crate::levels::LogLevel;

/// A registered side-effecting sink.
///
/// Receives the semantic level, the flattened `[TAG] arg arg ...` message,
/// and the individually rendered raw arguments for structured consumption.
/// Returning `Err` (or panicking) marks the dispatch as failed; the failure
/// is contained by the dispatcher and never reaches the logging caller.
pub trait Transport: Send + Sync {
    fn send(&self, level: LogLevel, message: &str, meta: &[String]) -> Result<()>;
}

impl<F> Transport for F
where
    F: Fn(LogLevel, &str, &[String]) -> Result<()> + Send + Sync,
{
    fn send(&self, level: LogLevel, message: &str, meta: &[String]) -> Result<()> {
        self(level, message, meta)
    }
}

/// One record as observed by [`BufferTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRecord {
    pub level: LogLevel,
    pub message: String,
    pub meta: Vec<String>,
}

/// In-memory transport collecting every dispatched record.
#[derive(Debug, Default)]
pub struct BufferTransport {
    records: Mutex<Vec<TransportRecord>>,
}

impl BufferTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the collected records.
    pub fn records(&self) -> Vec<TransportRecord> {
        self.records.lock().clone()
    }

    /// Drain and return the collected records.
    pub fn take(&self) -> Vec<TransportRecord> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl Transport for BufferTransport {
    fn send(&self, level: LogLevel, message: &str, meta: &[String]) -> Result<()> {
        self.records.lock().push(TransportRecord {
            level,
            message: message.to_string(),
            meta: meta.to_vec(),
        });
        Ok(())
    }
}
