//! Sleuth traversal context and sign dispatch

use super::{annotated, container, leaf, union};
use crate::check::{CheckConfig, CheckError, CheckResult, Runtime};
use crate::hint::{Hint, HintSign};
use crate::pith::{Pith, Represent};

/// State of one diagnostic traversal.
///
/// Created once per failing top-level check and copied into each recursive
/// call through [`CauseSleuth::permute`]. The label, seed and runtime never
/// change during a traversal.
#[derive(Clone, Copy)]
pub struct CauseSleuth<'a> {
    hint: &'a Hint,
    pith: &'a Pith,
    hint_sign: HintSign,
    exception_label: &'a str,
    seed: u64,
    depth: usize,
    runtime: &'a Runtime,
    config: &'a CheckConfig,
    represent: &'a dyn Represent,
}

impl<'a> CauseSleuth<'a> {
    /// Root context for diagnosing `pith` against `hint`.
    ///
    /// `seed` must be the seed the compiled check ran with, so both walk the
    /// same container items.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        hint: &'a Hint,
        pith: &'a Pith,
        exception_label: &'a str,
        seed: u64,
        runtime: &'a Runtime,
        config: &'a CheckConfig,
        represent: &'a dyn Represent,
    ) -> Self {
        Self {
            hint,
            pith,
            hint_sign: hint.sign(),
            exception_label,
            seed,
            depth: 1,
            runtime,
            config,
            represent,
        }
    }

    /// Child context one level deeper.
    pub fn permute(&self, hint: &'a Hint, pith: &'a Pith) -> Self {
        Self {
            hint,
            pith,
            hint_sign: hint.sign(),
            depth: self.depth + 1,
            ..*self
        }
    }

    pub fn hint(&self) -> &'a Hint {
        self.hint
    }

    pub fn pith(&self) -> &'a Pith {
        self.pith
    }

    pub fn hint_sign(&self) -> HintSign {
        self.hint_sign
    }

    pub fn exception_label(&self) -> &'a str {
        self.exception_label
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(super) fn runtime(&self) -> &'a Runtime {
        self.runtime
    }

    pub(super) fn config(&self) -> &'a CheckConfig {
        self.config
    }

    /// Representation of a pith, without its type.
    pub(super) fn represent(&self, pith: &Pith) -> String {
        self.represent.represent(pith)
    }

    /// Type and representation of the current pith, e.g. `int -5`.
    pub(super) fn describe(&self) -> String {
        self.represent.describe(self.pith)
    }

    /// Why the current pith violates the current hint, or `None` if it
    /// satisfies it.
    ///
    /// `None` is returned exactly when the compiled check for the same hint,
    /// pith and seed accepts.
    pub fn get_cause_or_none(&self) -> CheckResult<Option<String>> {
        if self.depth > self.config.max_depth {
            return Err(CheckError::too_deep(self.config.max_depth));
        }

        match self.hint {
            Hint::Any => Ok(None),
            Hint::Class(class) => Ok(leaf::class_cause(self, class)),
            Hint::ForwardRef(fref) => leaf::forward_ref_cause(self, fref),
            Hint::Literal(values) => leaf::literal_cause(self, values),
            Hint::Union(members) => union::union_cause(self, members),
            Hint::Annotated { hint, metadata } => annotated::annotated_cause(self, hint, metadata),
            Hint::ContainerOf { origin, item } => container::container_cause(self, origin, item),
            Hint::TupleFixed(members) => container::tuple_cause(self, members),
            Hint::MappingOf { origin, key, value } => {
                container::mapping_cause(self, origin, key, value)
            }
        }
    }
}

impl std::fmt::Debug for CauseSleuth<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CauseSleuth")
            .field("hint", &self.hint.to_string())
            .field("hint_sign", &self.hint_sign)
            .field("exception_label", &self.exception_label)
            .field("seed", &self.seed)
            .field("depth", &self.depth)
            .finish()
    }
}
