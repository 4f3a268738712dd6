//! Validator subscriptions and their combinators
//!
//! A `SubscriptedIs` is either a leaf wrapping a predicate and its rendered
//! representation, or a combination of other validators under `&`, `|` or
//! `~`. Combined validators short-circuit exactly like `&&`, `||` and `!`.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::sync::Arc;

use crate::pith::Pith;

/// Boolean predicate over a pith.
pub type Predicate = Arc<dyn Fn(&Pith) -> bool + Send + Sync>;

/// Combinator joining validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
    Not,
}

impl Combinator {
    /// Operator rendered in representations.
    pub fn symbol(&self) -> &'static str {
        match self {
            Combinator::And => "&",
            Combinator::Or => "|",
            Combinator::Not => "~",
        }
    }
}

/// A named, combinable validator.
#[derive(Clone)]
pub struct SubscriptedIs {
    node: Arc<IsNode>,
}

enum IsNode {
    Leaf { predicate: Predicate, repr: String },
    Binary {
        combinator: Combinator,
        left: SubscriptedIs,
        right: SubscriptedIs,
    },
    Negated(SubscriptedIs),
}

impl SubscriptedIs {
    /// Create a leaf validator from a full representation and a predicate.
    pub fn new<F>(repr: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Pith) -> bool + Send + Sync + 'static,
    {
        Self {
            node: Arc::new(IsNode::Leaf {
                predicate: Arc::new(predicate),
                repr: repr.into(),
            }),
        }
    }

    /// Evaluate this validator against a pith.
    pub fn is_valid(&self, pith: &Pith) -> bool {
        match self.node.as_ref() {
            IsNode::Leaf { predicate, .. } => predicate(pith),
            IsNode::Binary {
                combinator: Combinator::And,
                left,
                right,
            } => left.is_valid(pith) && right.is_valid(pith),
            IsNode::Binary { left, right, .. } => left.is_valid(pith) || right.is_valid(pith),
            IsNode::Negated(inner) => !inner.is_valid(pith),
        }
    }

    /// Combinator of this validator, or `None` for a leaf.
    pub fn combinator(&self) -> Option<Combinator> {
        match self.node.as_ref() {
            IsNode::Leaf { .. } => None,
            IsNode::Binary { combinator, .. } => Some(*combinator),
            IsNode::Negated(_) => Some(Combinator::Not),
        }
    }

    /// Operands of this validator: none for a leaf, one for `~`, two otherwise.
    pub fn operands(&self) -> Vec<&SubscriptedIs> {
        match self.node.as_ref() {
            IsNode::Leaf { .. } => Vec::new(),
            IsNode::Binary { left, right, .. } => vec![left, right],
            IsNode::Negated(inner) => vec![inner],
        }
    }

    /// `self & other`
    pub fn and(&self, other: &SubscriptedIs) -> SubscriptedIs {
        self.binary(Combinator::And, other)
    }

    /// `self | other`
    pub fn or(&self, other: &SubscriptedIs) -> SubscriptedIs {
        self.binary(Combinator::Or, other)
    }

    /// `~self`
    pub fn negate(&self) -> SubscriptedIs {
        Self {
            node: Arc::new(IsNode::Negated(self.clone())),
        }
    }

    /// Rendered representation.
    pub fn repr(&self) -> String {
        self.to_string()
    }

    fn binary(&self, combinator: Combinator, other: &SubscriptedIs) -> SubscriptedIs {
        Self {
            node: Arc::new(IsNode::Binary {
                combinator,
                left: self.clone(),
                right: other.clone(),
            }),
        }
    }
}

impl fmt::Display for SubscriptedIs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.as_ref() {
            IsNode::Leaf { repr, .. } => write!(f, "{}", repr),
            IsNode::Binary {
                combinator,
                left,
                right,
            } => write!(f, "({} {} {})", left, combinator.symbol(), right),
            IsNode::Negated(inner) => write!(f, "~{}", inner),
        }
    }
}

impl fmt::Debug for SubscriptedIs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptedIs({})", self)
    }
}

impl BitAnd for SubscriptedIs {
    type Output = SubscriptedIs;

    fn bitand(self, rhs: SubscriptedIs) -> SubscriptedIs {
        self.and(&rhs)
    }
}

impl BitAnd for &SubscriptedIs {
    type Output = SubscriptedIs;

    fn bitand(self, rhs: &SubscriptedIs) -> SubscriptedIs {
        self.and(rhs)
    }
}

impl BitOr for SubscriptedIs {
    type Output = SubscriptedIs;

    fn bitor(self, rhs: SubscriptedIs) -> SubscriptedIs {
        self.or(&rhs)
    }
}

impl BitOr for &SubscriptedIs {
    type Output = SubscriptedIs;

    fn bitor(self, rhs: &SubscriptedIs) -> SubscriptedIs {
        self.or(rhs)
    }
}

impl Not for SubscriptedIs {
    type Output = SubscriptedIs;

    fn not(self) -> SubscriptedIs {
        self.negate()
    }
}

impl Not for &SubscriptedIs {
    type Output = SubscriptedIs;

    fn not(self) -> SubscriptedIs {
        self.negate()
    }
}
