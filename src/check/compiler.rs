//! Validator program compiler
//!
//! Compiles a hint into a tree of specialized closures, one per hint node,
//! each dispatched once on the node's sign at compile time. A composite
//! node's closure calls its children's closures; nothing inspects the hint
//! at check time.
//!
//! Definition-time defects found while compiling:
//! - empty unions and empty literals (HINT_MALFORMED)
//! - container origins that expose no items or entries (HINT_MALFORMED)
//! - non-validator Annotated metadata (HINT_MALFORMED_METADATA)
//! - malformed forward reference names (FORWARD_REF_MALFORMED)
//! - nesting beyond the configured depth (HINT_TOO_DEEP)
//!
//! Forward references resolve lazily, the first time the check runs.

use std::fmt;
use std::sync::Arc;

use super::config::Strategy;
use super::errors::{CheckError, CheckResult};
use super::runtime::Runtime;
use super::sampling::sample_indices;
use crate::hint::{Hint, Metadatum};
use crate::observability::{Event, MetricsRegistry};
use crate::pith::{ClassRef, Pith};
use crate::vale::SubscriptedIs;

/// Compiled check of one hint node. The `u64` is the sampling seed.
pub(crate) type CheckFn = Box<dyn Fn(&Pith, u64) -> CheckResult<bool> + Send + Sync>;

fn check_fn<F>(f: F) -> CheckFn
where
    F: Fn(&Pith, u64) -> CheckResult<bool> + Send + Sync + 'static,
{
    Box::new(f)
}

/// One alternative of a compiled union.
enum Branch {
    /// Consecutive class members folded into one instance-of test
    Classes(Vec<ClassRef>),
    Node(CheckFn),
}

/// Compiles hints against one runtime.
pub struct Compiler<'a> {
    runtime: &'a Arc<Runtime>,
    strategy: Strategy,
    max_depth: usize,
    label: &'a str,
}

impl<'a> Compiler<'a> {
    pub fn new(
        runtime: &'a Arc<Runtime>,
        strategy: Strategy,
        max_depth: usize,
        label: &'a str,
    ) -> Self {
        Self {
            runtime,
            strategy,
            max_depth,
            label,
        }
    }

    /// Compile a hint into a check procedure.
    pub fn compile(
        &self,
        hint: &Hint,
        seed: Option<u64>,
        metrics: Arc<MetricsRegistry>,
    ) -> CheckResult<CheckProcedure> {
        let check = self.compile_node(hint, 1)?;
        let hint_repr = hint.to_string();

        metrics.increment_hints_compiled();
        let logger = self.runtime.logger();
        if logger.enabled(Event::HintCompiled) {
            logger.log(
                Event::HintCompiled,
                &[
                    ("hint", hint_repr.as_str()),
                    ("label", self.label),
                    ("strategy", self.strategy.as_str()),
                ],
            );
        }

        Ok(CheckProcedure {
            check: Arc::new(check),
            hint_repr,
            seed,
            metrics,
        })
    }

    fn compile_node(&self, hint: &Hint, depth: usize) -> CheckResult<CheckFn> {
        if depth > self.max_depth {
            return Err(CheckError::too_deep(self.max_depth));
        }

        match hint {
            Hint::Any => Ok(check_fn(|_, _| Ok(true))),
            Hint::Class(class) => Ok(self.compile_class(class.clone())),
            Hint::Union(members) => self.compile_union(hint, members, depth),
            Hint::Annotated {
                hint: child,
                metadata,
            } => {
                let validators: Vec<SubscriptedIs> = annotated_validators(self.label, hint, metadata)?
                    .into_iter()
                    .cloned()
                    .collect();
                let child = self.compile_node(child, depth + 1)?;
                Ok(check_fn(move |pith, seed| {
                    Ok(child(pith, seed)? && validators.iter().all(|v| v.is_valid(pith)))
                }))
            }
            Hint::ForwardRef(fref) => {
                fref.validate()?;
                let fref = fref.clone();
                let runtime = Arc::clone(self.runtime);
                Ok(check_fn(move |pith, _| {
                    let class = runtime.resolve(&fref)?;
                    Ok(runtime.is_instance(pith, &class))
                }))
            }
            Hint::ContainerOf { origin, item } => {
                if !self.runtime.catalog().is_item_container(origin) {
                    return Err(CheckError::malformed_hint(hint, format!("{} exposes no items", origin)));
                }
                let item = self.compile_node(item, depth + 1)?;
                let origin = origin.clone();
                let runtime = Arc::clone(self.runtime);
                let strategy = self.strategy;
                Ok(check_fn(move |pith, seed| {
                    let Some(items) = runtime.items_if_instance(pith, &origin) else {
                        return Ok(false);
                    };
                    for index in sample_indices(items.len(), strategy, seed) {
                        if !item(&items[index], seed)? {
                            return Ok(false);
                        }
                    }
                    Ok(true)
                }))
            }
            Hint::TupleFixed(members) => {
                let members = members
                    .iter()
                    .map(|member| self.compile_node(member, depth + 1))
                    .collect::<CheckResult<Vec<_>>>()?;
                let runtime = Arc::clone(self.runtime);
                let tuple = runtime.catalog().tuple().clone();
                Ok(check_fn(move |pith, seed| {
                    let Some(items) = runtime.items_if_instance(pith, &tuple) else {
                        return Ok(false);
                    };
                    if items.len() != members.len() {
                        return Ok(false);
                    }
                    for (member, item) in members.iter().zip(items) {
                        if !member(item, seed)? {
                            return Ok(false);
                        }
                    }
                    Ok(true)
                }))
            }
            Hint::MappingOf { origin, key, value } => {
                if !self.runtime.catalog().is_mapping(origin) {
                    return Err(CheckError::malformed_hint(hint, format!("{} exposes no entries", origin)));
                }
                let key = self.compile_node(key, depth + 1)?;
                let value = self.compile_node(value, depth + 1)?;
                let origin = origin.clone();
                let runtime = Arc::clone(self.runtime);
                let strategy = self.strategy;
                Ok(check_fn(move |pith, seed| {
                    let Some(entries) = runtime.entries_if_instance(pith, &origin) else {
                        return Ok(false);
                    };
                    for index in sample_indices(entries.len(), strategy, seed) {
                        let (k, v) = &entries[index];
                        if !key(k, seed)? || !value(v, seed)? {
                            return Ok(false);
                        }
                    }
                    Ok(true)
                }))
            }
            Hint::Literal(values) => {
                if values.is_empty() {
                    return Err(CheckError::malformed_hint(hint, "literal has no values"));
                }
                let values = values.clone();
                let runtime = Arc::clone(self.runtime);
                Ok(check_fn(move |pith, _| {
                    Ok(values.iter().any(|value| runtime.matches_literal(pith, value)))
                }))
            }
        }
    }

    fn compile_class(&self, class: ClassRef) -> CheckFn {
        if class.is_object() {
            return check_fn(|_, _| Ok(true));
        }
        let runtime = Arc::clone(self.runtime);
        check_fn(move |pith, _| Ok(runtime.is_instance(pith, &class)))
    }

    fn compile_union(&self, hint: &Hint, members: &[Hint], depth: usize) -> CheckResult<CheckFn> {
        if members.is_empty() {
            return Err(CheckError::malformed_hint(hint, "union has no members"));
        }

        let mut branches: Vec<Branch> = Vec::with_capacity(members.len());
        for member in members {
            let Hint::Class(class) = member else {
                branches.push(Branch::Node(self.compile_node(member, depth + 1)?));
                continue;
            };
            if depth + 1 > self.max_depth {
                return Err(CheckError::too_deep(self.max_depth));
            }
            match branches.last_mut() {
                Some(Branch::Classes(classes)) => classes.push(class.clone()),
                _ => branches.push(Branch::Classes(vec![class.clone()])),
            }
        }

        let runtime = Arc::clone(self.runtime);
        Ok(check_fn(move |pith, seed| {
            for branch in &branches {
                let accepted = match branch {
                    Branch::Classes(classes) => {
                        let class = runtime.catalog().class_of(pith);
                        classes.iter().any(|c| class.is_subclass_of(c))
                    }
                    Branch::Node(check) => check(pith, seed)?,
                };
                if accepted {
                    return Ok(true);
                }
            }
            Ok(false)
        }))
    }
}

/// Validators of an Annotated hint, in declared order.
///
/// Any metadatum that is not a validator subscription is a definition-time
/// defect naming `label`.
pub(crate) fn annotated_validators<'h>(
    label: &str,
    hint: &Hint,
    metadata: &'h [Metadatum],
) -> CheckResult<Vec<&'h SubscriptedIs>> {
    metadata
        .iter()
        .map(|metadatum| match metadatum {
            Metadatum::Is(validator) => Ok(validator),
            Metadatum::Opaque(_) => Err(CheckError::malformed_metadata(label, hint, metadatum)),
        })
        .collect()
}

/// A compiled, shareable check for one hint.
#[derive(Clone)]
pub struct CheckProcedure {
    check: Arc<CheckFn>,
    hint_repr: String,
    seed: Option<u64>,
    metrics: Arc<MetricsRegistry>,
}

impl CheckProcedure {
    /// Check a pith with a freshly drawn sampling seed.
    pub fn check(&self, pith: &Pith) -> CheckResult<bool> {
        self.check_seeded(pith, self.draw_seed())
    }

    /// Check a pith with an explicit sampling seed.
    ///
    /// `Ok(false)` is an ordinary rejection. `Err` only carries defects that
    /// surface lazily, such as unresolvable forward references.
    pub fn check_seeded(&self, pith: &Pith, seed: u64) -> CheckResult<bool> {
        self.metrics.increment_checks_performed();
        let accepted = (self.check)(pith, seed)?;
        if !accepted {
            self.metrics.increment_checks_rejected();
        }
        Ok(accepted)
    }

    /// The configured seed, or a random one.
    pub fn draw_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn hint_repr(&self) -> &str {
        &self.hint_repr
    }
}

impl fmt::Debug for CheckProcedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckProcedure")
            .field("hint", &self.hint_repr)
            .field("seed", &self.seed)
            .finish()
    }
}
