//! Hint model
//!
//! A hint is an immutable tree describing the values a parameter, return or
//! field accepts. Its sign selects how the compiler and the sleuth treat it;
//! both match exhaustively on `Hint`, so a new sign must be handled in both.

mod types;

pub use types::{Hint, HintSign, Metadatum};
