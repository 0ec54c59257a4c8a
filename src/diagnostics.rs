//! Diagnostics collaborator.
//!
//! Strategies never log directly. Every recovered failure (a bad PDF page, a
//! missing EPUB chapter, converter warnings, a staging file that would not go
//! away) is handed to the `Diagnostics` the extractor was built with.

use std::sync::Mutex;

/// Sink for non-fatal extraction diagnostics
pub trait Diagnostics: Send + Sync {
    /// Something was skipped or degraded but extraction went on
    fn warn(&self, context: &str, message: &str);

    /// A unit of work (page, chapter, cleanup) failed and was dropped
    fn error(&self, context: &str, message: &str);

    fn info(&self, _context: &str, _message: &str) {}
}

/// Default sink, forwards everything to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, context: &str, message: &str) {
        tracing::warn!(context, "{}", message);
    }

    fn error(&self, context: &str, message: &str) {
        tracing::error!(context, "{}", message);
    }

    fn info(&self, context: &str, message: &str) {
        tracing::info!(context, "{}", message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub level: Level,
    pub context: String,
    pub message: String,
}

/// Records entries in memory; used by tests and by hosts that want to show
/// diagnostics next to the extracted text
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: Mutex<Vec<Entry>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Entry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn warnings(&self) -> Vec<Entry> {
        self.with_level(Level::Warn)
    }

    pub fn errors(&self) -> Vec<Entry> {
        self.with_level(Level::Error)
    }

    fn with_level(&self, level: Level) -> Vec<Entry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == level)
            .collect()
    }

    fn push(&self, level: Level, context: &str, message: &str) {
        let entry = Entry {
            level,
            context: context.to_string(),
            message: message.to_string(),
        };
        match self.entries.lock() {
            Ok(mut entries) => entries.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn warn(&self, context: &str, message: &str) {
        self.push(Level::Warn, context, message);
    }

    fn error(&self, context: &str, message: &str) {
        self.push(Level::Error, context, message);
    }

    fn info(&self, context: &str, message: &str) {
        self.push(Level::Info, context, message);
    }
}
