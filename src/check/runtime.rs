//! Shared state consulted by compiled checks and the sleuth

use std::sync::Arc;

use super::errors::{CheckError, CheckResult};
use crate::observability::{Event, Logger, MetricsRegistry};
use crate::pith::{ClassCatalog, ClassRef, Pith};
use crate::resolve::{ForwardRef, ForwardRefResolver, Scope};

/// Catalog, scope, resolver, metrics and logger of one engine.
///
/// Read-only after construction apart from the resolver cache and the
/// counters, both of which are safe to share across threads.
#[derive(Debug)]
pub struct Runtime {
    catalog: Arc<ClassCatalog>,
    scope: Scope,
    resolver: ForwardRefResolver,
    metrics: Arc<MetricsRegistry>,
    logger: Logger,
}

impl Runtime {
    pub fn new(
        catalog: Arc<ClassCatalog>,
        scope: Scope,
        metrics: Arc<MetricsRegistry>,
        logger: Logger,
    ) -> Self {
        let resolver = ForwardRefResolver::new(Arc::clone(&catalog), Arc::clone(&metrics), logger);
        Self {
            catalog,
            scope,
            resolver,
            metrics,
            logger,
        }
    }

    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn resolver(&self) -> &ForwardRefResolver {
        &self.resolver
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    pub fn logger(&self) -> Logger {
        self.logger
    }

    pub fn is_instance(&self, pith: &Pith, class: &ClassRef) -> bool {
        self.catalog.is_instance(pith, class)
    }

    /// Whether `pith` matches the literal `value`: an instance of the
    /// literal's class that compares equal to it. `Literal[1]` accepts `True`,
    /// `Literal[True]` rejects `1`.
    pub fn matches_literal(&self, pith: &Pith, value: &Pith) -> bool {
        let equal = match (value, pith) {
            (Pith::Int(i), Pith::Bool(b)) => *i == i64::from(*b),
            _ => value == pith,
        };
        equal && self.is_instance(pith, self.catalog.class_of(value))
    }

    /// Resolve a forward reference against this runtime's scope.
    pub fn resolve(&self, fref: &ForwardRef) -> CheckResult<ClassRef> {
        self.resolver.resolve(fref, &self.scope)
    }

    /// Items of `pith` if it is an instance of `origin` exposing items.
    pub fn items_if_instance<'p>(&self, pith: &'p Pith, origin: &ClassRef) -> Option<&'p [Pith]> {
        if self.is_instance(pith, origin) {
            pith.items()
        } else {
            None
        }
    }

    /// Entries of `pith` if it is an instance of `origin` exposing entries.
    pub fn entries_if_instance<'p>(
        &self,
        pith: &'p Pith,
        origin: &ClassRef,
    ) -> Option<&'p [(Pith, Pith)]> {
        if self.is_instance(pith, origin) {
            pith.entries()
        } else {
            None
        }
    }

    /// Record a definition-time defect or consistency violation and pass it on.
    pub fn observe_defect(&self, label: &str, err: CheckError) -> CheckError {
        self.metrics.increment_defects_raised();
        let event = if err.is_consistency_violation() {
            Event::VerdictInconsistent
        } else {
            Event::DefectRaised
        };
        if self.logger.enabled(event) {
            let message = err.to_string();
            self.logger.log(
                event,
                &[
                    ("code", err.code().code()),
                    ("label", label),
                    ("message", message.as_str()),
                ],
            );
        }
        err
    }
}
