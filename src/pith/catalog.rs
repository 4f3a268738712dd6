//! Immutable catalog of builtin classes
//!
//! Built once by the engine and passed by reference to the compiler, the
//! sleuth and the forward reference resolver.

use std::collections::HashMap;

use super::class::{Class, ClassRef};
use super::value::Pith;

/// Table of builtin classes and the runtime class of every pith variant.
#[derive(Debug)]
pub struct ClassCatalog {
    object: ClassRef,
    none_type: ClassRef,
    bool_: ClassRef,
    int: ClassRef,
    float: ClassRef,
    str_: ClassRef,
    bytes: ClassRef,
    list: ClassRef,
    tuple: ClassRef,
    dict: ClassRef,
    set: ClassRef,
    frozenset: ClassRef,
    type_: ClassRef,
    by_name: HashMap<String, ClassRef>,
}

impl ClassCatalog {
    /// Build the catalog.
    pub fn new() -> Self {
        let object = Class::builtin("object", vec![]);
        let root = || vec![object.clone()];

        let int = Class::builtin("int", root());
        let bool_ = Class::builtin("bool", vec![int.clone()]);

        let catalog_entries = [
            Class::builtin("NoneType", root()),
            bool_.clone(),
            int.clone(),
            Class::builtin("float", root()),
            Class::builtin("str", root()),
            Class::builtin("bytes", root()),
            Class::builtin("list", root()),
            Class::builtin("tuple", root()),
            Class::builtin("dict", root()),
            Class::builtin("set", root()),
            Class::builtin("frozenset", root()),
            Class::builtin("type", root()),
            object.clone(),
        ];

        let by_name: HashMap<String, ClassRef> = catalog_entries
            .iter()
            .map(|class| (class.name().to_string(), class.clone()))
            .collect();
        let get = |name: &str| by_name[name].clone();
        let (none_type, float, str_, bytes) = (get("NoneType"), get("float"), get("str"), get("bytes"));
        let (list, tuple, dict, set) = (get("list"), get("tuple"), get("dict"), get("set"));
        let (frozenset, type_) = (get("frozenset"), get("type"));

        Self {
            none_type,
            float,
            str_,
            bytes,
            list,
            tuple,
            dict,
            set,
            frozenset,
            type_,
            object,
            bool_,
            int,
            by_name,
        }
    }

    pub fn object(&self) -> &ClassRef {
        &self.object
    }

    pub fn none_type(&self) -> &ClassRef {
        &self.none_type
    }

    pub fn bool(&self) -> &ClassRef {
        &self.bool_
    }

    pub fn int(&self) -> &ClassRef {
        &self.int
    }

    pub fn float(&self) -> &ClassRef {
        &self.float
    }

    pub fn str(&self) -> &ClassRef {
        &self.str_
    }

    pub fn bytes(&self) -> &ClassRef {
        &self.bytes
    }

    pub fn list(&self) -> &ClassRef {
        &self.list
    }

    pub fn tuple(&self) -> &ClassRef {
        &self.tuple
    }

    pub fn dict(&self) -> &ClassRef {
        &self.dict
    }

    pub fn set(&self) -> &ClassRef {
        &self.set
    }

    pub fn frozenset(&self) -> &ClassRef {
        &self.frozenset
    }

    pub fn type_(&self) -> &ClassRef {
        &self.type_
    }

    /// Look up a builtin class by bare name (e.g. `"int"`).
    pub fn builtin(&self, name: &str) -> Option<&ClassRef> {
        self.by_name.get(name)
    }

    /// Number of builtin classes.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Runtime class of a pith.
    pub fn class_of<'a>(&'a self, pith: &'a Pith) -> &'a ClassRef {
        match pith {
            Pith::None => &self.none_type,
            Pith::Bool(_) => &self.bool_,
            Pith::Int(_) => &self.int,
            Pith::Float(_) => &self.float,
            Pith::Str(_) => &self.str_,
            Pith::Bytes(_) => &self.bytes,
            Pith::List(_) => &self.list,
            Pith::Tuple(_) => &self.tuple,
            Pith::Set(_) => &self.set,
            Pith::FrozenSet(_) => &self.frozenset,
            Pith::Dict(_) => &self.dict,
            Pith::Type(_) => &self.type_,
            Pith::Object(instance) => instance.class(),
        }
    }

    /// Nominal instance-of test.
    pub fn is_instance(&self, pith: &Pith, class: &ClassRef) -> bool {
        self.class_of(pith).is_subclass_of(class)
    }

    /// Whether instances of `class` expose items (list, tuple, set, frozenset).
    pub fn is_item_container(&self, class: &ClassRef) -> bool {
        [&self.list, &self.tuple, &self.set, &self.frozenset]
            .iter()
            .any(|container| class.is_subclass_of(container))
    }

    /// Whether instances of `class` expose key/value entries.
    pub fn is_mapping(&self, class: &ClassRef) -> bool {
        class.is_subclass_of(&self.dict)
    }
}

impl Default for ClassCatalog {
    fn default() -> Self {
        Self::new()
    }
}
