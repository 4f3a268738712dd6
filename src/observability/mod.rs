//! Observability subsystem
//!
//! This module provides:
//! - Structured logging (JSON lines)
//! - Atomic counters
//! - Typed checker events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on verdicts or causes
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use hintguard::observability::{Event, Logger, Severity};
//!
//! let logger = Logger::new(Severity::Trace);
//! logger.log(Event::HintCompiled, &[("hint", "list[int]")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
