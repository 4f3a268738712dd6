//! Forward references
//!
//! A forward reference names a class that may not exist yet when the hint is
//! built. Names containing a `.` are absolute. Relative names are
//! canonicalized against the module the reference was declared in, if any.

use std::fmt;

use crate::check::{CheckError, CheckResult};

/// Deferred, by-name class reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForwardRef {
    name: String,
    module: Option<String>,
}

impl ForwardRef {
    /// Create a forward reference. Construction never resolves or validates.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: None,
        }
    }

    /// Declare the module relative names are resolved against.
    pub fn in_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn is_absolute(&self) -> bool {
        self.name.contains('.')
    }

    /// Name looked up in the scope.
    ///
    /// Absolute names are preserved as is, even when a module is declared.
    pub fn canonical_name(&self) -> String {
        match &self.module {
            Some(module) if !self.is_absolute() => format!("{}.{}", module, self.name),
            _ => self.name.clone(),
        }
    }

    /// Reject names that could never resolve to a class.
    pub fn validate(&self) -> CheckResult<()> {
        validate_dotted(&self.name)
            .map_err(|reason| CheckError::malformed_forward_ref(&self.name, reason))?;
        if let Some(module) = &self.module {
            validate_dotted(module).map_err(|reason| {
                CheckError::malformed_forward_ref(&self.name, format!("module {}", reason))
            })?;
        }
        Ok(())
    }
}

impl fmt::Display for ForwardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.name)
    }
}

fn validate_dotted(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is empty".into());
    }
    for segment in name.split('.') {
        let mut chars = segment.chars();
        match chars.next() {
            None => return Err(format!("name '{}' has an empty segment", name)),
            Some(c) if !(c.is_alphabetic() || c == '_') => {
                return Err(format!("segment '{}' is not an identifier", segment))
            }
            Some(_) => {}
        }
        if !chars.all(|c| c.is_alphanumeric() || c == '_') {
            return Err(format!("segment '{}' is not an identifier", segment));
        }
    }
    Ok(())
}
