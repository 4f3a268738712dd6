//! Cause sleuth
//!
//! Second traversal of a hint, run only after a compiled check rejected a
//! pith. It mirrors the compiler's sign dispatch but explains instead of
//! deciding: each node returns `None` when it is not the cause, or a string
//! naming the offending sub-pith and sub-hint.
//!
//! Cause formats:
//! - class: `int -5 not instance of str`
//! - annotated: `int -5 violates validator Is[x > 0]`
//! - union: `float 2.5 matches no member of int | str (int: ...; str: ...)`
//! - container: `list index 2 item <cause>`
//! - fixed tuple: `tuple (1,) length 1 not 2`, `tuple index 0 item <cause>`
//! - mapping: `dict key <cause>`, `dict key 'a' value <cause>`
//! - literal: `str 'x' not any of 'r', 'w'`

mod annotated;
mod container;
mod context;
mod leaf;
mod union;

pub use context::CauseSleuth;
