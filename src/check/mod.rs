//! Validator program compiler and checker entry points
//!
//! - `Engine::compile` turns a hint into a `CheckProcedure`
//! - `Engine::diagnose` explains why a pith violates a hint
//! - `Checker::validate` does both with one sampling seed
//!
//! A rejected pith is never an error. `CheckError` is reserved for defects
//! in hints, validators or configuration, and for disagreement between the
//! compiled check and the sleuth.

mod compiler;
mod config;
mod engine;
mod errors;
mod runtime;
mod sampling;

pub use compiler::{CheckProcedure, Compiler};
pub use config::{CheckConfig, Strategy, Verbosity};
pub use engine::{Checker, Engine, Verdict, Violation, DEFAULT_LABEL};
pub use errors::{CheckError, CheckErrorCode, CheckResult, ErrorClass};
pub use runtime::Runtime;
pub use sampling::{sample_count, sample_indices};

pub(crate) use compiler::annotated_validators;
