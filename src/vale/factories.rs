//! Validator factories
//!
//! - `Is`: arbitrary predicate
//! - `IsEqual`: equality against a constant
//! - `IsAttr`: attribute satisfying a nested validator
//! - `IsSubclass`: class object subclassing a class
//! - `IsMatch`: string matching a regular expression

use regex::Regex;

use super::is::SubscriptedIs;
use crate::check::{CheckError, CheckResult};
use crate::pith::{repr, ClassRef, Pith};

/// Arbitrary predicate validator, rendered `Is[<repr>]`.
pub struct Is;

impl Is {
    pub fn new<F>(repr: impl AsRef<str>, predicate: F) -> SubscriptedIs
    where
        F: Fn(&Pith) -> bool + Send + Sync + 'static,
    {
        SubscriptedIs::new(format!("Is[{}]", repr.as_ref()), predicate)
    }
}

/// Equality validator, rendered `IsEqual[<value>]`.
pub struct IsEqual;

impl IsEqual {
    pub fn new(expected: impl Into<Pith>) -> SubscriptedIs {
        let expected = expected.into();
        SubscriptedIs::new(format!("IsEqual[{}]", repr(&expected)), move |pith| {
            *pith == expected
        })
    }
}

/// Attribute validator, rendered `IsAttr['<name>', <validator>]`.
///
/// Piths without the attribute fail.
pub struct IsAttr;

impl IsAttr {
    pub fn new(name: impl Into<String>, validator: SubscriptedIs) -> SubscriptedIs {
        let name = name.into();
        let rendered = format!("IsAttr['{}', {}]", name, validator);
        SubscriptedIs::new(rendered, move |pith| {
            pith.attr(&name)
                .map_or(false, |value| validator.is_valid(value))
        })
    }
}

/// Subclass validator over class objects, rendered `IsSubclass[<class>]`.
pub struct IsSubclass;

impl IsSubclass {
    pub fn new(base: ClassRef) -> SubscriptedIs {
        let rendered = format!("IsSubclass[{}]", base);
        SubscriptedIs::new(rendered, move |pith| match pith {
            Pith::Type(class) => class.is_subclass_of(&base),
            _ => false,
        })
    }
}

/// Regular expression validator over strings, rendered `IsMatch['<pattern>']`.
///
/// The pattern is searched anywhere in the string; anchor it to match whole strings.
pub struct IsMatch;

impl IsMatch {
    pub fn new(pattern: &str) -> CheckResult<SubscriptedIs> {
        let rendered = format!("IsMatch[{}]", repr(&Pith::str(pattern)));
        let regex = Regex::new(pattern)
            .map_err(|e| CheckError::invalid_validator(rendered.clone(), e.to_string()))?;
        Ok(SubscriptedIs::new(rendered, move |pith| match pith {
            Pith::Str(s) => regex.is_match(s),
            _ => false,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CheckErrorCode;
    use crate::pith::{Class, Instance};

    #[test]
    fn test_is_renders_and_evaluates() {
        let positive = Is::new("x > 0", |p| matches!(p, Pith::Int(i) if *i > 0));
        assert_eq!(positive.repr(), "Is[x > 0]");
        assert!(positive.is_valid(&Pith::Int(1)));
        assert!(!positive.is_valid(&Pith::Int(0)));
    }

    #[test]
    fn test_is_equal() {
        let validator = IsEqual::new("on");
        assert_eq!(validator.repr(), "IsEqual['on']");
        assert!(validator.is_valid(&Pith::str("on")));
        assert!(!validator.is_valid(&Pith::str("off")));
    }

    #[test]
    fn test_is_attr() {
        let user = Class::new("app", "User", vec![]);
        let validator = IsAttr::new("role", IsEqual::new("admin"));
        assert_eq!(validator.repr(), "IsAttr['role', IsEqual['admin']]");

        let admin = Pith::from(Instance::new(user.clone()).with_attr("role", "admin"));
        let guest = Pith::from(Instance::new(user.clone()).with_attr("role", "guest"));
        let anonymous = Pith::from(Instance::new(user));

        assert!(validator.is_valid(&admin));
        assert!(!validator.is_valid(&guest));
        assert!(!validator.is_valid(&anonymous));
        assert!(!validator.is_valid(&Pith::str("admin")));
    }

    #[test]
    fn test_is_subclass() {
        let shape = Class::new("geo", "Shape", vec![]);
        let circle = Class::new("geo", "Circle", vec![shape.clone()]);
        let validator = IsSubclass::new(shape.clone());

        assert_eq!(validator.repr(), "IsSubclass[geo.Shape]");
        assert!(validator.is_valid(&Pith::Type(circle)));
        assert!(!validator.is_valid(&Pith::Type(Class::new("geo", "Line", vec![]))));
        assert!(!validator.is_valid(&Pith::Object(Instance::new(shape))));
    }

    #[test]
    fn test_is_match() {
        let validator = IsMatch::new("^[a-z]+$").unwrap();
        assert_eq!(validator.repr(), "IsMatch['^[a-z]+$']");
        assert!(validator.is_valid(&Pith::str("abc")));
        assert!(!validator.is_valid(&Pith::str("abc1")));
        assert!(!validator.is_valid(&Pith::Int(1)));
    }

    #[test]
    fn test_is_match_rejects_bad_pattern() {
        let err = IsMatch::new("([a-z").unwrap_err();
        assert_eq!(err.code(), CheckErrorCode::ValidatorInvalid);
    }
}
