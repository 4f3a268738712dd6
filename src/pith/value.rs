//! Runtime values checked against hints
//!
//! A `Pith` is borrowed by the checker and the sleuth for the duration of a
//! single call and is never mutated by either.

use serde_json::Value;
use std::collections::BTreeMap;

use super::class::{ClassRef, BUILTINS_MODULE};

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Pith {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Pith>),
    Tuple(Vec<Pith>),
    Set(Vec<Pith>),
    FrozenSet(Vec<Pith>),
    /// Insertion-ordered key/value entries
    Dict(Vec<(Pith, Pith)>),
    /// A class object
    Type(ClassRef),
    /// An instance of a user-defined class
    Object(Instance),
}

/// An instance of a user-defined class carrying named attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    class: ClassRef,
    attrs: BTreeMap<String, Pith>,
}

impl Instance {
    pub fn new(class: ClassRef) -> Self {
        Self {
            class,
            attrs: BTreeMap::new(),
        }
    }

    /// Builder-style attribute assignment.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Pith>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn class(&self) -> &ClassRef {
        &self.class
    }

    pub fn attr(&self, name: &str) -> Option<&Pith> {
        self.attrs.get(name)
    }

    pub fn attrs(&self) -> &BTreeMap<String, Pith> {
        &self.attrs
    }
}

impl Pith {
    pub fn str(value: impl Into<String>) -> Self {
        Pith::Str(value.into())
    }

    pub fn list(items: impl IntoIterator<Item = Pith>) -> Self {
        Pith::List(items.into_iter().collect())
    }

    pub fn tuple(items: impl IntoIterator<Item = Pith>) -> Self {
        Pith::Tuple(items.into_iter().collect())
    }

    pub fn set(items: impl IntoIterator<Item = Pith>) -> Self {
        Pith::Set(items.into_iter().collect())
    }

    pub fn dict(entries: impl IntoIterator<Item = (Pith, Pith)>) -> Self {
        Pith::Dict(entries.into_iter().collect())
    }

    /// Items of a builtin sequence or set, in iteration order.
    pub fn items(&self) -> Option<&[Pith]> {
        match self {
            Pith::List(items)
            | Pith::Tuple(items)
            | Pith::Set(items)
            | Pith::FrozenSet(items) => Some(items),
            _ => None,
        }
    }

    /// Entries of a dict.
    pub fn entries(&self) -> Option<&[(Pith, Pith)]> {
        match self {
            Pith::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    /// Attribute lookup. Only instances of user-defined classes carry attributes.
    pub fn attr(&self, name: &str) -> Option<&Pith> {
        match self {
            Pith::Object(instance) => instance.attr(name),
            _ => None,
        }
    }

    /// Name of the runtime class of this value, as rendered in causes.
    pub fn type_name(&self) -> String {
        let name = match self {
            Pith::None => "NoneType",
            Pith::Bool(_) => "bool",
            Pith::Int(_) => "int",
            Pith::Float(_) => "float",
            Pith::Str(_) => "str",
            Pith::Bytes(_) => "bytes",
            Pith::List(_) => "list",
            Pith::Tuple(_) => "tuple",
            Pith::Set(_) => "set",
            Pith::FrozenSet(_) => "frozenset",
            Pith::Dict(_) => "dict",
            Pith::Type(_) => "type",
            Pith::Object(instance) => {
                let class = instance.class();
                return if class.module() == BUILTINS_MODULE {
                    class.name().to_string()
                } else {
                    class.qualname()
                };
            }
        };
        name.to_string()
    }
}

impl From<bool> for Pith {
    fn from(value: bool) -> Self {
        Pith::Bool(value)
    }
}

impl From<i64> for Pith {
    fn from(value: i64) -> Self {
        Pith::Int(value)
    }
}

impl From<i32> for Pith {
    fn from(value: i32) -> Self {
        Pith::Int(i64::from(value))
    }
}

impl From<f64> for Pith {
    fn from(value: f64) -> Self {
        Pith::Float(value)
    }
}

impl From<&str> for Pith {
    fn from(value: &str) -> Self {
        Pith::Str(value.to_string())
    }
}

impl From<String> for Pith {
    fn from(value: String) -> Self {
        Pith::Str(value)
    }
}

impl From<Instance> for Pith {
    fn from(value: Instance) -> Self {
        Pith::Object(value)
    }
}

impl From<ClassRef> for Pith {
    fn from(value: ClassRef) -> Self {
        Pith::Type(value)
    }
}

impl From<Value> for Pith {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Pith::None,
            Value::Bool(b) => Pith::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Pith::Int(i)
                } else {
                    // u64 beyond i64::MAX and every non-integer land here
                    Pith::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Pith::Str(s),
            Value::Array(items) => Pith::List(items.into_iter().map(Pith::from).collect()),
            Value::Object(map) => Pith::Dict(
                map.into_iter()
                    .map(|(k, v)| (Pith::Str(k), Pith::from(v)))
                    .collect(),
            ),
        }
    }
}
