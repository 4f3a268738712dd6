//! hintguard - A runtime value-validation compiler
//!
//! Compiles nested type hints into specialized check procedures and, when a
//! value is rejected, explains which sub-value violated which sub-hint.

pub mod check;
pub mod hint;
pub mod observability;
pub mod pith;
pub mod resolve;
pub mod sleuth;
pub mod vale;

pub use check::{CheckConfig, CheckError, CheckResult, Checker, Engine, Verdict, Violation};
pub use hint::{Hint, Metadatum};
pub use pith::{Class, ClassCatalog, Instance, Pith};
pub use resolve::Scope;
