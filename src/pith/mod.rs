//! Runtime value model
//!
//! Stands in for the host runtime: values, nominal classes, the builtin
//! class catalog, and text rendering of values for cause strings.

mod catalog;
mod class;
mod represent;
mod value;

pub use catalog::ClassCatalog;
pub use class::{Class, ClassRef, BUILTINS_MODULE};
pub use represent::{repr, Represent, TruncatingRepr, DEFAULT_MAX_LEVEL};
pub use value::{Instance, Pith};
