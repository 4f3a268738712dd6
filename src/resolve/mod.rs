//! Forward reference resolution
//!
//! Hints may name classes that are not defined yet. Such references are
//! resolved lazily against an explicit `Scope`, and successful resolutions
//! are memoized by the `ForwardRefResolver`.

mod forward;
mod resolver;
mod scope;

pub use forward::ForwardRef;
pub use resolver::ForwardRefResolver;
pub use scope::Scope;
