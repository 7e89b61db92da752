//! Console log sink for pipeline and inspection progress.
//!
//! Progress lines (info, success) go to stdout, problems (warning, error)
//! to stderr, so a report printed on stdout is never interleaved with
//! diagnostics. Every entry is also sent to any subscriber; the pipeline
//! tests use that to check which warnings a run produced.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Entries kept per subscriber before the oldest are dropped.
const SUBSCRIBER_BACKLOG: usize = 256;

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    fn marker(self) -> &'static str {
        match self {
            Self::Info => "   ",
            Self::Success => "   ✓",
            Self::Warning => "   ⚠️",
            Self::Error => "   ❌",
        }
    }

    /// Warnings and errors; these print to stderr.
    pub fn is_problem(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// One line of pipeline output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth under the previous line (per-row details of a warning)
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), indent: 0 }
    }

    pub fn nested(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Console line for this entry.
    pub fn render(&self) -> String {
        format!(
            "{}{} {}",
            "   ".repeat(self.indent as usize),
            self.level.marker(),
            self.message
        )
    }
}

/// Process-wide sink used by the `log_*` helpers
pub static LOG_SINK: Lazy<LogSink> = Lazy::new(LogSink::new);

/// Prints entries and forwards them to subscribers
pub struct LogSink {
    sender: broadcast::Sender<LogEntry>,
}

impl LogSink {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(SUBSCRIBER_BACKLOG);
        Self { sender }
    }

    pub fn emit(&self, entry: LogEntry) {
        if entry.level.is_problem() {
            eprintln!("{}", entry.render());
        } else {
            println!("{}", entry.render());
        }

        // Err only means nobody is subscribed
        let _ = self.sender.send(entry);
    }

    /// Receiver for every entry emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_info(msg: impl Into<String>) {
    LOG_SINK.emit(LogEntry::new(LogLevel::Info, msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOG_SINK.emit(LogEntry::new(LogLevel::Success, msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOG_SINK.emit(LogEntry::new(LogLevel::Warning, msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_SINK.emit(LogEntry::new(LogLevel::Error, msg));
}

/// Warning detail line, indented under the warning it belongs to.
pub fn log_warning_detail(msg: impl Into<String>) {
    LOG_SINK.emit(LogEntry::new(LogLevel::Warning, msg).nested(1));
}

/// Everything a receiver has buffered so far; lagged entries are skipped.
pub fn drain(receiver: &mut broadcast::Receiver<LogEntry>) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(entry) => entries.push(entry),
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markers() {
        assert_eq!(LogEntry::new(LogLevel::Info, "hi").render(), "    hi");
        assert!(LogEntry::new(LogLevel::Warning, "careful").render().contains("⚠️ careful"));
        assert!(LogEntry::new(LogLevel::Error, "boom")
            .nested(1)
            .render()
            .starts_with("      ❌"));
    }

    #[test]
    fn test_problem_levels() {
        assert!(LogLevel::Warning.is_problem());
        assert!(LogLevel::Error.is_problem());
        assert!(!LogLevel::Info.is_problem());
        assert!(!LogLevel::Success.is_problem());
    }

    #[test]
    fn test_subscriber_receives_entries() {
        let sink = LogSink::new();
        let mut rx = sink.subscribe();

        sink.emit(LogEntry::new(LogLevel::Info, "first"));
        sink.emit(LogEntry::new(LogLevel::Warning, "second"));

        let entries = drain(&mut rx);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].level, LogLevel::Warning);
    }

    #[test]
    fn test_emit_without_subscribers() {
        LogSink::default().emit(LogEntry::new(LogLevel::Success, "nobody listening"));
    }

    #[test]
    fn test_entry_serializes_lowercase_level() {
        let json = serde_json::to_value(LogEntry::new(LogLevel::Warning, "w")).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["indent"], 0);
    }
}
