//! Pluggable diagnostic sinks
//!
//! Components dump their internal state through a [`DiagnosticSink`] instead
//! of logging directly. The container always calls the sink; choosing
//! [`NullSink`] makes the dump free apart from building `fmt::Arguments`.

use std::fmt;

/// Where a diagnostic record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticOrigin {
    /// Short type name of the emitter (e.g. `"TileSetComponent"`)
    pub kind: &'static str,
    /// Numeric identity of the emitter (component id)
    pub id: u64,
}

impl DiagnosticOrigin {
    /// Create a new origin
    pub const fn new(kind: &'static str, id: u64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for DiagnosticOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

/// Receiver for diagnostic records
pub trait DiagnosticSink {
    /// Whether records are kept at all. Emitters may skip expensive work when false.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Record one diagnostic line
    fn record(&mut self, origin: DiagnosticOrigin, message: fmt::Arguments<'_>);
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn is_enabled(&self) -> bool {
        false
    }

    fn record(&mut self, _origin: DiagnosticOrigin, _message: fmt::Arguments<'_>) {}
}

/// Sink forwarding every record to the `log` facade
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    level: log::Level,
}

impl LogSink {
    /// Create a sink logging at `level`
    pub const fn new(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(log::Level::Debug)
    }
}

impl DiagnosticSink for LogSink {
    fn is_enabled(&self) -> bool {
        log::log_enabled!(self.level)
    }

    fn record(&mut self, origin: DiagnosticOrigin, message: fmt::Arguments<'_>) {
        log::log!(self.level, "[{}] {}", origin, message);
    }
}

/// Sink collecting formatted records in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Vec<(DiagnosticOrigin, String)>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All records collected so far
    pub fn records(&self) -> &[(DiagnosticOrigin, String)] {
        &self.records
    }

    /// Records emitted by the given component id
    pub fn records_for(&self, id: u64) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter(move |(origin, _)| origin.id == id)
            .map(|(_, line)| line.as_str())
    }

    /// Drop every collected record
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&mut self, origin: DiagnosticOrigin, message: fmt::Arguments<'_>) {
        self.records.push((origin, message.to_string()));
    }
}
