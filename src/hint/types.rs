//! Hint tree definitions
//!
//! Supported signs:
//! - Any: every pith
//! - Class: instances of a class
//! - Union: any member
//! - Annotated: a hint plus ordered validators
//! - ForwardRef: a class named lazily
//! - ContainerOf: list[T], set[T], frozenset[T], tuple[T, ...]
//! - TupleFixed: tuple[A, B, ...] and tuple[()]
//! - MappingOf: dict[K, V]
//! - Literal: one of a fixed set of values

use std::fmt;

use crate::pith::{repr, ClassCatalog, ClassRef, Pith};
use crate::resolve::ForwardRef;
use crate::vale::SubscriptedIs;

/// Structural category of a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintSign {
    Any,
    Class,
    Union,
    Annotated,
    ForwardRef,
    ContainerOf,
    TupleFixed,
    MappingOf,
    Literal,
}

impl HintSign {
    /// Returns the sign name for logs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            HintSign::Any => "ANY",
            HintSign::Class => "CLASS",
            HintSign::Union => "UNION",
            HintSign::Annotated => "ANNOTATED",
            HintSign::ForwardRef => "FORWARDREF",
            HintSign::ContainerOf => "CONTAINER_OF",
            HintSign::TupleFixed => "TUPLE_FIXED",
            HintSign::MappingOf => "MAPPING_OF",
            HintSign::Literal => "LITERAL",
        }
    }
}

impl fmt::Display for HintSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata attached to an `Annotated` hint.
#[derive(Debug, Clone)]
pub enum Metadatum {
    /// A validator subscription
    Is(SubscriptedIs),
    /// Any other annotation object, by representation. Malformed.
    Opaque(String),
}

impl fmt::Display for Metadatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metadatum::Is(validator) => write!(f, "{}", validator),
            Metadatum::Opaque(rendered) => write!(f, "{}", rendered),
        }
    }
}

impl From<SubscriptedIs> for Metadatum {
    fn from(validator: SubscriptedIs) -> Self {
        Metadatum::Is(validator)
    }
}

/// A type hint.
#[derive(Debug, Clone)]
pub enum Hint {
    Any,
    Class(ClassRef),
    Union(Vec<Hint>),
    Annotated {
        hint: Box<Hint>,
        metadata: Vec<Metadatum>,
    },
    ForwardRef(ForwardRef),
    ContainerOf {
        origin: ClassRef,
        item: Box<Hint>,
    },
    TupleFixed(Vec<Hint>),
    MappingOf {
        origin: ClassRef,
        key: Box<Hint>,
        value: Box<Hint>,
    },
    Literal(Vec<Pith>),
}

impl Hint {
    pub fn any() -> Self {
        Hint::Any
    }

    pub fn class(class: ClassRef) -> Self {
        Hint::Class(class)
    }

    pub fn union(members: impl IntoIterator<Item = Hint>) -> Self {
        Hint::Union(members.into_iter().collect())
    }

    /// `hint | None`
    pub fn optional(hint: Hint, catalog: &ClassCatalog) -> Self {
        Hint::Union(vec![hint, Hint::Class(catalog.none_type().clone())])
    }

    /// `Annotated[hint, v1, v2, ...]`
    pub fn annotated(hint: Hint, validators: impl IntoIterator<Item = SubscriptedIs>) -> Self {
        Hint::Annotated {
            hint: Box::new(hint),
            metadata: validators.into_iter().map(Metadatum::Is).collect(),
        }
    }

    /// `Annotated[hint, ...]` with arbitrary metadata.
    pub fn annotated_with(hint: Hint, metadata: Vec<Metadatum>) -> Self {
        Hint::Annotated {
            hint: Box::new(hint),
            metadata,
        }
    }

    /// Forward reference by name. Never resolved here.
    pub fn forward_ref(name: impl Into<String>) -> Self {
        Hint::ForwardRef(ForwardRef::new(name))
    }

    pub fn container_of(origin: ClassRef, item: Hint) -> Self {
        Hint::ContainerOf {
            origin,
            item: Box::new(item),
        }
    }

    /// `list[item]`
    pub fn list_of(catalog: &ClassCatalog, item: Hint) -> Self {
        Self::container_of(catalog.list().clone(), item)
    }

    /// `set[item]`
    pub fn set_of(catalog: &ClassCatalog, item: Hint) -> Self {
        Self::container_of(catalog.set().clone(), item)
    }

    /// `tuple[item, ...]`
    pub fn tuple_of(catalog: &ClassCatalog, item: Hint) -> Self {
        Self::container_of(catalog.tuple().clone(), item)
    }

    /// `tuple[a, b, ...]`, or `tuple[()]` when empty
    pub fn tuple(items: impl IntoIterator<Item = Hint>) -> Self {
        Hint::TupleFixed(items.into_iter().collect())
    }

    /// `dict[key, value]`
    pub fn dict_of(catalog: &ClassCatalog, key: Hint, value: Hint) -> Self {
        Hint::MappingOf {
            origin: catalog.dict().clone(),
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// `Literal[v1, v2, ...]`. A pith matches an instance of a value's class
    /// equal to it, so `Literal[1]` accepts `True`.
    pub fn literal(values: impl IntoIterator<Item = Pith>) -> Self {
        Hint::Literal(values.into_iter().collect())
    }

    pub fn sign(&self) -> HintSign {
        match self {
            Hint::Any => HintSign::Any,
            Hint::Class(_) => HintSign::Class,
            Hint::Union(_) => HintSign::Union,
            Hint::Annotated { .. } => HintSign::Annotated,
            Hint::ForwardRef(_) => HintSign::ForwardRef,
            Hint::ContainerOf { .. } => HintSign::ContainerOf,
            Hint::TupleFixed(_) => HintSign::TupleFixed,
            Hint::MappingOf { .. } => HintSign::MappingOf,
            Hint::Literal(_) => HintSign::Literal,
        }
    }

    /// Direct child hints, in declaration order.
    pub fn children(&self) -> Vec<&Hint> {
        match self {
            Hint::Any | Hint::Class(_) | Hint::ForwardRef(_) | Hint::Literal(_) => Vec::new(),
            Hint::Union(members) | Hint::TupleFixed(members) => members.iter().collect(),
            Hint::Annotated { hint, .. } => vec![hint.as_ref()],
            Hint::ContainerOf { item, .. } => vec![item.as_ref()],
            Hint::MappingOf { key, value, .. } => vec![key.as_ref(), value.as_ref()],
        }
    }

    /// Nesting depth; leaves have depth 1.
    ///
    /// Walks the whole tree. Use [`Hint::exceeds_depth`] to test a hint of
    /// unknown depth against a cap.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(|child| child.depth()).max().unwrap_or(0)
    }

    /// Whether `depth() > max_depth`, descending at most `max_depth + 1` levels.
    pub fn exceeds_depth(&self, max_depth: usize) -> bool {
        let Some(below) = max_depth.checked_sub(1) else {
            return true;
        };
        match self {
            Hint::Any | Hint::Class(_) | Hint::ForwardRef(_) | Hint::Literal(_) => false,
            Hint::Union(members) | Hint::TupleFixed(members) => {
                members.iter().any(|member| member.exceeds_depth(below))
            }
            Hint::Annotated { hint, .. } => hint.exceeds_depth(below),
            Hint::ContainerOf { item, .. } => item.exceeds_depth(below),
            Hint::MappingOf { key, value, .. } => {
                key.exceeds_depth(below) || value.exceeds_depth(below)
            }
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Any => write!(f, "Any"),
            Hint::Class(class) => write!(f, "{}", class),
            Hint::Union(members) => write_joined(f, members, " | "),
            Hint::Annotated { hint, metadata } => {
                write!(f, "Annotated[{}", hint)?;
                for metadatum in metadata {
                    write!(f, ", {}", metadatum)?;
                }
                write!(f, "]")
            }
            Hint::ForwardRef(fref) => write!(f, "{}", fref),
            Hint::ContainerOf { origin, item } if origin.is_builtin() && origin.name() == "tuple" => {
                write!(f, "{}[{}, ...]", origin, item)
            }
            Hint::ContainerOf { origin, item } => write!(f, "{}[{}]", origin, item),
            Hint::TupleFixed(items) if items.is_empty() => write!(f, "tuple[()]"),
            Hint::TupleFixed(items) => {
                write!(f, "tuple[")?;
                write_joined(f, items, ", ")?;
                write!(f, "]")
            }
            Hint::MappingOf { origin, key, value } => write!(f, "{}[{}, {}]", origin, key, value),
            Hint::Literal(values) => {
                let rendered: Vec<String> = values.iter().map(repr).collect();
                write!(f, "Literal[{}]", rendered.join(", "))
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, hints: &[Hint], separator: &str) -> fmt::Result {
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", hint)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pith::Class;
    use crate::vale::Is;

    #[test]
    fn test_signs() {
        let catalog = ClassCatalog::new();
        assert_eq!(Hint::any().sign(), HintSign::Any);
        assert_eq!(Hint::class(catalog.int().clone()).sign(), HintSign::Class);
        assert_eq!(Hint::forward_ref("Foo").sign(), HintSign::ForwardRef);
        assert_eq!(Hint::list_of(&catalog, Hint::any()).sign(), HintSign::ContainerOf);
        assert_eq!(Hint::tuple(vec![]).sign(), HintSign::TupleFixed);
        assert_eq!(
            Hint::dict_of(&catalog, Hint::any(), Hint::any()).sign(),
            HintSign::MappingOf
        );
        assert_eq!(Hint::literal(vec![Pith::Int(1)]).sign(), HintSign::Literal);
        assert_eq!(HintSign::ContainerOf.as_str(), "CONTAINER_OF");
    }

    #[test]
    fn test_display() {
        let catalog = ClassCatalog::new();
        let int = || Hint::class(catalog.int().clone());
        let str_ = || Hint::class(catalog.str().clone());

        assert_eq!(Hint::union(vec![int(), str_()]).to_string(), "int | str");
        assert_eq!(Hint::optional(int(), &catalog).to_string(), "int | None");
        assert_eq!(Hint::list_of(&catalog, int()).to_string(), "list[int]");
        assert_eq!(Hint::tuple_of(&catalog, int()).to_string(), "tuple[int, ...]");
        assert_eq!(Hint::tuple(vec![int(), str_()]).to_string(), "tuple[int, str]");
        assert_eq!(Hint::tuple(vec![]).to_string(), "tuple[()]");
        assert_eq!(Hint::dict_of(&catalog, str_(), int()).to_string(), "dict[str, int]");
        assert_eq!(
            Hint::literal(vec![Pith::Int(1), Pith::str("a")]).to_string(),
            "Literal[1, 'a']"
        );
        assert_eq!(Hint::forward_ref("app.User").to_string(), "'app.User'");
        assert_eq!(
            Hint::class(Class::new("app", "User", vec![])).to_string(),
            "app.User"
        );
    }

    #[test]
    fn test_annotated_display() {
        let catalog = ClassCatalog::new();
        let hint = Hint::annotated_with(
            Hint::class(catalog.int().clone()),
            vec![
                Metadatum::Is(Is::new("x > 0", |_| true)),
                Metadatum::Opaque("'units'".into()),
            ],
        );
        assert_eq!(hint.to_string(), "Annotated[int, Is[x > 0], 'units']");
    }

    #[test]
    fn test_depth() {
        let catalog = ClassCatalog::new();
        let int = Hint::class(catalog.int().clone());
        assert_eq!(int.depth(), 1);

        let nested = Hint::list_of(&catalog, Hint::union(vec![int.clone(), Hint::list_of(&catalog, int)]));
        assert_eq!(nested.depth(), 4);
    }

    #[test]
    fn test_exceeds_depth_matches_depth() {
        let catalog = ClassCatalog::new();
        let int = Hint::class(catalog.int().clone());
        let hint = Hint::dict_of(
            &catalog,
            int.clone(),
            Hint::union(vec![int.clone(), Hint::list_of(&catalog, int.clone())]),
        );
        assert_eq!(hint.depth(), 4);

        for max_depth in 0..8 {
            assert_eq!(hint.exceeds_depth(max_depth), hint.depth() > max_depth);
        }
        assert!(int.exceeds_depth(0));
        assert!(!int.exceeds_depth(1));
    }

    #[test]
    fn test_exceeds_depth_stops_at_cap() {
        let catalog = ClassCatalog::new();
        let mut hint = Hint::class(catalog.int().clone());
        for _ in 0..20_000 {
            hint = Hint::list_of(&catalog, hint);
        }
        assert!(hint.exceeds_depth(64));
    }

    #[test]
    fn test_children_order() {
        let catalog = ClassCatalog::new();
        let hint = Hint::dict_of(
            &catalog,
            Hint::class(catalog.str().clone()),
            Hint::class(catalog.int().clone()),
        );
        let children: Vec<String> = hint.children().iter().map(|c| c.to_string()).collect();
        assert_eq!(children, vec!["str", "int"]);
    }
}
