//! Structured JSON logger
//!
//! - Structured logs (JSON)
//! - Deterministic key ordering
//! - Explicit severity levels
//! - One log line = one event
//! - Synchronous, no buffering
//! - Threshold owned by each logger, not the process

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

use super::events::Event;

/// Log severity levels
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Per-hint and per-resolution detail
    Trace,
    /// Normal operations
    Info,
    /// Recoverable issues
    #[default]
    Warn,
    /// Operation failures
    Error,
    /// Broken checker invariant
    Fatal,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JSON-line logger with its own severity threshold.
///
/// Each engine carries one, so engines built with different log levels do
/// not affect each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Logger {
    threshold: Severity,
}

impl Logger {
    pub fn new(threshold: Severity) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Whether `event` is written. Check before building costly fields.
    pub fn enabled(&self, event: Event) -> bool {
        event.severity() >= self.threshold
    }

    /// Log an event at its own severity.
    ///
    /// Fields are output in deterministic order (alphabetical by key).
    /// ERROR and above go to stderr, the rest to stdout.
    pub fn log(&self, event: Event, fields: &[(&str, &str)]) {
        if !self.enabled(event) {
            return;
        }
        if event.severity() >= Severity::Error {
            write_line(event, fields, &mut io::stderr());
        } else {
            write_line(event, fields, &mut io::stdout());
        }
    }
}

fn write_line<W: Write>(event: Event, fields: &[(&str, &str)], writer: &mut W) {
    // One write per line
    let _ = writer.write_all(render(event, fields).as_bytes());
    let _ = writer.flush();
}

fn render(event: Event, fields: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(256);

    output.push_str("{\"event\":\"");
    output.push_str(event.as_str());
    output.push_str("\",\"severity\":\"");
    output.push_str(event.severity().as_str());
    output.push('"');

    let mut sorted_fields: Vec<_> = fields.iter().collect();
    sorted_fields.sort_by_key(|(k, _)| *k);

    for (key, value) in sorted_fields {
        output.push_str(",\"");
        escape_json_string(&mut output, key);
        output.push_str("\":\"");
        escape_json_string(&mut output, value);
        output.push('"');
    }

    output.push_str("}\n");
    output
}

fn escape_json_string(output: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c.is_control() => {
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
        assert_eq!(Severity::default(), Severity::Warn);
    }

    #[test]
    fn test_severity_deserializes_lowercase() {
        let severity: Severity = serde_json::from_str("\"trace\"").unwrap();
        assert_eq!(severity, Severity::Trace);
    }

    #[test]
    fn test_threshold_filters_events() {
        let warn = Logger::default();
        assert!(!warn.enabled(Event::HintCompiled));
        assert!(!warn.enabled(Event::ViolationDiagnosed));
        assert!(warn.enabled(Event::ForwardRefUnresolved));
        assert!(warn.enabled(Event::VerdictInconsistent));

        let trace = Logger::new(Severity::Trace);
        assert!(trace.enabled(Event::HintCompiled));

        let fatal = Logger::new(Severity::Fatal);
        assert!(!fatal.enabled(Event::DefectRaised));
        assert!(fatal.enabled(Event::VerdictInconsistent));
    }

    #[test]
    fn test_render_json_format() {
        let output = render(Event::HintCompiled, &[]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "HINT_COMPILED");
        assert_eq!(parsed["severity"], "TRACE");
    }

    #[test]
    fn test_render_deterministic_ordering() {
        let output1 = render(
            Event::DefectRaised,
            &[("sign", "1"), ("hint", "2"), ("label", "3")],
        );
        let output2 = render(
            Event::DefectRaised,
            &[("label", "3"), ("sign", "1"), ("hint", "2")],
        );

        assert_eq!(output1, output2);

        let hint_pos = output1.find("hint").unwrap();
        let label_pos = output1.find("label").unwrap();
        let sign_pos = output1.find("sign").unwrap();
        assert!(hint_pos < label_pos);
        assert!(label_pos < sign_pos);
    }

    #[test]
    fn test_render_escapes_special_chars() {
        let output = render(
            Event::ViolationDiagnosed,
            &[("cause", "str 'a' not \"int\"\nnext")],
        );

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["cause"], "str 'a' not \"int\"\nnext");
    }

    #[test]
    fn test_render_one_line_event_first() {
        let output = render(Event::ConfigLoaded, &[("a", "1"), ("b", "2")]);

        assert_eq!(output.chars().filter(|c| *c == '\n').count(), 1);
        assert!(output.find("\"event\"").unwrap() < output.find("\"severity\"").unwrap());
    }
}
