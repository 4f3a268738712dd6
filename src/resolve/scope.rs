//! Name scopes consulted by forward references
//!
//! A scope maps names to classes. Classes may be defined after hints
//! referring to them are built; the scope is a shared handle so that later
//! definitions are visible to already-compiled checkers.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::pith::ClassRef;

/// Shared name-to-class mapping.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    classes: Arc<RwLock<HashMap<String, ClassRef>>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a class under its qualified name.
    pub fn define(&self, class: ClassRef) {
        self.define_as(class.qualname(), class);
    }

    /// Define a class under an arbitrary name.
    pub fn define_as(&self, name: impl Into<String>, class: ClassRef) {
        self.classes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), class);
    }

    pub fn lookup(&self, name: &str) -> Option<ClassRef> {
        self.classes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.classes.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pith::Class;

    #[test]
    fn test_define_under_qualified_name() {
        let scope = Scope::new();
        scope.define(Class::new("app.models", "User", vec![]));

        assert!(scope.contains("app.models.User"));
        assert!(!scope.contains("User"));
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn test_define_as_alias() {
        let scope = Scope::new();
        let user = Class::new("app.models", "User", vec![]);
        scope.define_as("User", user.clone());

        assert_eq!(scope.lookup("User"), Some(user));
    }

    #[test]
    fn test_clones_share_definitions() {
        let scope = Scope::new();
        let handle = scope.clone();
        assert!(handle.is_empty());

        scope.define(Class::new("app", "Late", vec![]));
        assert!(handle.contains("app.Late"));
    }
}
