//! Validator combinator algebra
//!
//! Validators annotate a hint with data constraints beyond its class:
//!
//! ```ignore
//! let positive = Is::new("x > 0", |p| matches!(p, Pith::Int(i) if *i > 0));
//! let even = Is::new("x % 2 == 0", |p| matches!(p, Pith::Int(i) if i % 2 == 0));
//! let hint = Hint::annotated(Hint::class(catalog.int().clone()), [positive & !even]);
//! ```

mod factories;
mod is;

pub use factories::{Is, IsAttr, IsEqual, IsMatch, IsSubclass};
pub use is::{Combinator, Predicate, SubscriptedIs};
