//! Observable checker events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded from JSON
    ConfigLoaded,
    /// Engine constructed
    EngineReady,
    /// Hint compiled into a check procedure
    HintCompiled,
    /// Forward reference resolved (cache miss)
    ForwardRefResolved,
    /// Forward reference could not be resolved
    ForwardRefUnresolved,
    /// Sleuth produced a cause for a rejected pith
    ViolationDiagnosed,
    /// Definition-time defect surfaced to the caller
    DefectRaised,
    /// Compiler and sleuth disagree
    VerdictInconsistent,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::EngineReady => "ENGINE_READY",
            Event::HintCompiled => "HINT_COMPILED",
            Event::ForwardRefResolved => "FORWARD_REF_RESOLVED",
            Event::ForwardRefUnresolved => "FORWARD_REF_UNRESOLVED",
            Event::ViolationDiagnosed => "VIOLATION_DIAGNOSED",
            Event::DefectRaised => "DEFECT_RAISED",
            Event::VerdictInconsistent => "VERDICT_INCONSISTENT",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::HintCompiled | Event::ForwardRefResolved => Severity::Trace,
            Event::ConfigLoaded | Event::EngineReady | Event::ViolationDiagnosed => Severity::Info,
            Event::ForwardRefUnresolved => Severity::Warn,
            Event::DefectRaised => Severity::Error,
            Event::VerdictInconsistent => Severity::Fatal,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_strings() {
        assert_eq!(Event::HintCompiled.as_str(), "HINT_COMPILED");
        assert_eq!(Event::ForwardRefUnresolved.to_string(), "FORWARD_REF_UNRESOLVED");
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::HintCompiled.severity(), Severity::Trace);
        assert_eq!(Event::DefectRaised.severity(), Severity::Error);
        assert_eq!(Event::VerdictInconsistent.severity(), Severity::Fatal);
        assert_eq!(Event::ViolationDiagnosed.severity(), Severity::Info);
    }
}
