//! Nominal classes of the pith model
//!
//! Classes are identified by qualified name (module + name). Two `Class`
//! values with the same qualified name are the same class, regardless of
//! which catalog or scope produced them.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Module name shared by every builtin class.
pub const BUILTINS_MODULE: &str = "builtins";

/// Shared handle to a class.
pub type ClassRef = Arc<Class>;

/// A nominal class with ordered base classes.
#[derive(Debug)]
pub struct Class {
    module: String,
    name: String,
    bases: Vec<ClassRef>,
}

impl Class {
    /// Create a new class.
    pub fn new(
        module: impl Into<String>,
        name: impl Into<String>,
        bases: Vec<ClassRef>,
    ) -> ClassRef {
        Arc::new(Self {
            module: module.into(),
            name: name.into(),
            bases,
        })
    }

    /// Create a builtin class.
    pub fn builtin(name: impl Into<String>, bases: Vec<ClassRef>) -> ClassRef {
        Self::new(BUILTINS_MODULE, name, bases)
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[ClassRef] {
        &self.bases
    }

    /// Fully-qualified name, `<module>.<name>`.
    pub fn qualname(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }

    /// Name as rendered in hints and causes.
    ///
    /// Builtins drop their module; `NoneType` renders as `None`.
    pub fn display_name(&self) -> String {
        if self.is_builtin() {
            if self.name == "NoneType" {
                "None".to_string()
            } else {
                self.name.clone()
            }
        } else {
            self.qualname()
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.module == BUILTINS_MODULE
    }

    /// Returns true for the root class `builtins.object`.
    pub fn is_object(&self) -> bool {
        self.is_builtin() && self.name == "object"
    }

    /// Nominal subclass test. Every class subclasses `object` and itself.
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        if other.is_object() || self == other {
            return true;
        }
        self.bases.iter().any(|base| base.is_subclass_of(other))
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.module == other.module && self.name == other.name
    }
}

impl Eq for Class {}

impl Hash for Class {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.module.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
