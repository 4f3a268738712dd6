//! Memoizing forward reference resolver
//!
//! Resolution is lazy: it happens the first time a forward reference is
//! checked or diagnosed, never when the hint is built. Lookup order:
//!
//! 1. the scope, by canonical name
//! 2. the builtin catalog, by bare name (relative references only)
//!
//! Only successful resolutions are cached, so a reference that fails today
//! resolves once its class is defined in the scope.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::forward::ForwardRef;
use super::scope::Scope;
use crate::check::{CheckError, CheckResult};
use crate::observability::{Event, Logger, MetricsRegistry};
use crate::pith::{ClassCatalog, ClassRef};

/// Resolves forward references to classes.
///
/// The cache is keyed by canonical name; a resolver is meant to serve a
/// single scope.
#[derive(Debug)]
pub struct ForwardRefResolver {
    catalog: Arc<ClassCatalog>,
    metrics: Arc<MetricsRegistry>,
    logger: Logger,
    cache: RwLock<HashMap<String, ClassRef>>,
}

impl ForwardRefResolver {
    pub fn new(catalog: Arc<ClassCatalog>, metrics: Arc<MetricsRegistry>, logger: Logger) -> Self {
        Self {
            catalog,
            metrics,
            logger,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a forward reference against a scope.
    ///
    /// # Errors
    ///
    /// - `MalformedForwardRef` if the name is not a dotted identifier
    /// - `UnresolvedForwardRef` if no class is found
    pub fn resolve(&self, fref: &ForwardRef, scope: &Scope) -> CheckResult<ClassRef> {
        let canonical = fref.canonical_name();

        if let Some(class) = self.cached(&canonical) {
            self.metrics.increment_forward_ref_cache_hits();
            return Ok(class);
        }

        fref.validate()?;

        let found = scope.lookup(&canonical).or_else(|| {
            if fref.is_absolute() {
                None
            } else {
                self.catalog.builtin(fref.name()).cloned()
            }
        });

        let Some(class) = found else {
            self.logger.log(
                Event::ForwardRefUnresolved,
                &[("name", fref.name()), ("canonical", canonical.as_str())],
            );
            return Err(CheckError::unresolved_forward_ref(canonical));
        };

        // A concurrent resolution may have won the race; keep the first entry.
        let class = self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(canonical.clone())
            .or_insert(class)
            .clone();

        self.metrics.increment_forward_refs_resolved();
        if self.logger.enabled(Event::ForwardRefResolved) {
            let qualname = class.qualname();
            self.logger.log(
                Event::ForwardRefResolved,
                &[("canonical", canonical.as_str()), ("class", qualname.as_str())],
            );
        }
        Ok(class)
    }

    /// Number of memoized resolutions.
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn cached(&self, canonical: &str) -> Option<ClassRef> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(canonical)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CheckErrorCode;
    use crate::pith::Class;

    fn resolver() -> ForwardRefResolver {
        ForwardRefResolver::new(
            Arc::new(ClassCatalog::new()),
            Arc::new(MetricsRegistry::new()),
            Logger::default(),
        )
    }

    #[test]
    fn test_resolves_relative_name_in_module() {
        let resolver = resolver();
        let scope = Scope::new();
        let user = Class::new("app.models", "User", vec![]);
        scope.define(user.clone());

        let fref = ForwardRef::new("User").in_module("app.models");
        assert_eq!(resolver.resolve(&fref, &scope).unwrap(), user);
    }

    #[test]
    fn test_resolves_absolute_name() {
        let resolver = resolver();
        let scope = Scope::new();
        let user = Class::new("app.models", "User", vec![]);
        scope.define(user.clone());

        let fref = ForwardRef::new("app.models.User").in_module("elsewhere");
        assert_eq!(resolver.resolve(&fref, &scope).unwrap(), user);
    }

    #[test]
    fn test_relative_name_falls_back_to_builtins() {
        let resolver = resolver();
        let class = resolver.resolve(&ForwardRef::new("int").in_module("app"), &Scope::new()).unwrap();
        assert_eq!(class.qualname(), "builtins.int");
    }

    #[test]
    fn test_absolute_name_skips_builtins() {
        let resolver = resolver();
        let err = resolver.resolve(&ForwardRef::new("app.int"), &Scope::new()).unwrap_err();
        assert_eq!(err.code(), CheckErrorCode::ForwardRefUnresolved);
    }

    #[test]
    fn test_unresolved_until_defined() {
        let resolver = resolver();
        let scope = Scope::new();
        let fref = ForwardRef::new("Late").in_module("app");

        let err = resolver.resolve(&fref, &scope).unwrap_err();
        assert_eq!(err.code(), CheckErrorCode::ForwardRefUnresolved);
        assert_eq!(resolver.cached_len(), 0);

        scope.define(Class::new("app", "Late", vec![]));
        assert_eq!(resolver.resolve(&fref, &scope).unwrap().name(), "Late");
        assert_eq!(resolver.cached_len(), 1);
    }

    #[test]
    fn test_resolution_is_memoized_and_idempotent() {
        let metrics = Arc::new(MetricsRegistry::new());
        let resolver = ForwardRefResolver::new(
            Arc::new(ClassCatalog::new()),
            metrics.clone(),
            Logger::default(),
        );
        let scope = Scope::new();
        scope.define(Class::new("app", "Widget", vec![]));
        let fref = ForwardRef::new("app.Widget");

        let first = resolver.resolve(&fref, &scope).unwrap();
        let second = resolver.resolve(&fref, &scope).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(metrics.snapshot().forward_refs_resolved, 1);
        assert_eq!(metrics.snapshot().forward_ref_cache_hits, 1);
    }

    #[test]
    fn test_malformed_name_is_a_distinct_error() {
        let resolver = resolver();
        let err = resolver
            .resolve(&ForwardRef::new("not a name"), &Scope::new())
            .unwrap_err();
        assert_eq!(err.code(), CheckErrorCode::ForwardRefMalformed);
    }

    #[test]
    fn test_concurrent_resolution() {
        use std::thread;

        let resolver = Arc::new(resolver());
        let scope = Scope::new();
        scope.define(Class::new("app", "Shared", vec![]));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                let scope = scope.clone();
                thread::spawn(move || resolver.resolve(&ForwardRef::new("app.Shared"), &scope).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().qualname(), "app.Shared");
        }
        assert_eq!(resolver.cached_len(), 1);
    }
}
