//! Checker error types
//!
//! Validation rejections are never errors: a compiled procedure returns
//! `Ok(false)` and the sleuth returns `Ok(Some(cause))`. `CheckError` covers
//! the two remaining classes:
//!
//! - definition-time defects (malformed hints, malformed metadata,
//!   unresolvable forward references, excessive nesting, bad configuration)
//! - consistency violations between the compiler and the sleuth
//!
//! Error codes:
//! - HINT_MALFORMED
//! - HINT_MALFORMED_METADATA
//! - HINT_TOO_DEEP
//! - FORWARD_REF_MALFORMED
//! - FORWARD_REF_UNRESOLVED
//! - VALIDATOR_INVALID
//! - CONFIG_INVALID
//! - VERDICT_INCONSISTENT

use std::fmt;
use thiserror::Error;

/// Class of a checker error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A bug in the hint, validator or configuration
    Defect,
    /// The compiler and the sleuth disagree
    Consistency,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorClass::Defect => write!(f, "DEFECT"),
            ErrorClass::Consistency => write!(f, "CONSISTENCY"),
        }
    }
}

/// Stable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckErrorCode {
    HintMalformed,
    HintMalformedMetadata,
    HintTooDeep,
    ForwardRefMalformed,
    ForwardRefUnresolved,
    ValidatorInvalid,
    ConfigInvalid,
    VerdictInconsistent,
}

impl CheckErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            CheckErrorCode::HintMalformed => "HINT_MALFORMED",
            CheckErrorCode::HintMalformedMetadata => "HINT_MALFORMED_METADATA",
            CheckErrorCode::HintTooDeep => "HINT_TOO_DEEP",
            CheckErrorCode::ForwardRefMalformed => "FORWARD_REF_MALFORMED",
            CheckErrorCode::ForwardRefUnresolved => "FORWARD_REF_UNRESOLVED",
            CheckErrorCode::ValidatorInvalid => "VALIDATOR_INVALID",
            CheckErrorCode::ConfigInvalid => "CONFIG_INVALID",
            CheckErrorCode::VerdictInconsistent => "VERDICT_INCONSISTENT",
        }
    }

    /// Returns the class of this error
    pub fn class(&self) -> ErrorClass {
        match self {
            CheckErrorCode::VerdictInconsistent => ErrorClass::Consistency,
            _ => ErrorClass::Defect,
        }
    }
}

impl fmt::Display for CheckErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Irrecoverable checker failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("type hint {hint} malformed: {reason}")]
    MalformedHint { hint: String, reason: String },

    #[error("{label} type hint {hint} metadatum {metadatum} not a validator subscription")]
    MalformedMetadata {
        label: String,
        hint: String,
        metadatum: String,
    },

    #[error("type hint nested deeper than {max_depth} levels")]
    HintTooDeep { max_depth: usize },

    #[error("forward reference '{name}' malformed: {reason}")]
    MalformedForwardRef { name: String, reason: String },

    #[error("forward reference '{name}' unresolvable in scope")]
    UnresolvedForwardRef { name: String },

    #[error("validator {repr} invalid: {reason}")]
    InvalidValidator { repr: String, reason: String },

    #[error("configuration invalid: {0}")]
    InvalidConfig(String),

    #[error("{label} verdict for type hint {hint} inconsistent: {detail}")]
    InconsistentVerdict {
        label: String,
        hint: String,
        detail: String,
    },
}

impl CheckError {
    pub fn malformed_hint(hint: impl fmt::Display, reason: impl Into<String>) -> Self {
        CheckError::MalformedHint {
            hint: hint.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed_metadata(
        label: impl Into<String>,
        hint: impl fmt::Display,
        metadatum: impl fmt::Display,
    ) -> Self {
        CheckError::MalformedMetadata {
            label: label.into(),
            hint: hint.to_string(),
            metadatum: metadatum.to_string(),
        }
    }

    pub fn too_deep(max_depth: usize) -> Self {
        CheckError::HintTooDeep { max_depth }
    }

    pub fn malformed_forward_ref(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CheckError::MalformedForwardRef {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn unresolved_forward_ref(name: impl Into<String>) -> Self {
        CheckError::UnresolvedForwardRef { name: name.into() }
    }

    pub fn invalid_validator(repr: impl Into<String>, reason: impl Into<String>) -> Self {
        CheckError::InvalidValidator {
            repr: repr.into(),
            reason: reason.into(),
        }
    }

    pub fn inconsistent(
        label: impl Into<String>,
        hint: impl fmt::Display,
        detail: impl Into<String>,
    ) -> Self {
        CheckError::InconsistentVerdict {
            label: label.into(),
            hint: hint.to_string(),
            detail: detail.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> CheckErrorCode {
        match self {
            CheckError::MalformedHint { .. } => CheckErrorCode::HintMalformed,
            CheckError::MalformedMetadata { .. } => CheckErrorCode::HintMalformedMetadata,
            CheckError::HintTooDeep { .. } => CheckErrorCode::HintTooDeep,
            CheckError::MalformedForwardRef { .. } => CheckErrorCode::ForwardRefMalformed,
            CheckError::UnresolvedForwardRef { .. } => CheckErrorCode::ForwardRefUnresolved,
            CheckError::InvalidValidator { .. } => CheckErrorCode::ValidatorInvalid,
            CheckError::InvalidConfig(_) => CheckErrorCode::ConfigInvalid,
            CheckError::InconsistentVerdict { .. } => CheckErrorCode::VerdictInconsistent,
        }
    }

    /// Returns the class of this error
    pub fn class(&self) -> ErrorClass {
        self.code().class()
    }

    pub fn is_defect(&self) -> bool {
        self.class() == ErrorClass::Defect
    }

    pub fn is_consistency_violation(&self) -> bool {
        self.class() == ErrorClass::Consistency
    }
}

/// Result type for checker operations
pub type CheckResult<T> = Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CheckErrorCode::HintMalformedMetadata.code(), "HINT_MALFORMED_METADATA");
        assert_eq!(CheckErrorCode::ForwardRefUnresolved.code(), "FORWARD_REF_UNRESOLVED");
        assert_eq!(CheckErrorCode::HintTooDeep.code(), "HINT_TOO_DEEP");
        assert_eq!(CheckErrorCode::VerdictInconsistent.code(), "VERDICT_INCONSISTENT");
    }

    #[test]
    fn test_error_classes() {
        assert!(CheckError::too_deep(8).is_defect());
        assert!(CheckError::unresolved_forward_ref("Foo").is_defect());
        assert!(CheckError::inconsistent("x", "int", "drift").is_consistency_violation());
        assert!(!CheckError::inconsistent("x", "int", "drift").is_defect());
    }

    #[test]
    fn test_error_display() {
        let err = CheckError::malformed_metadata("parameter 'x'", "Annotated[int, 'meta']", "'meta'");
        let display = err.to_string();
        assert!(display.contains("parameter 'x'"));
        assert!(display.contains("'meta'"));
        assert_eq!(err.code(), CheckErrorCode::HintMalformedMetadata);

        let err = CheckError::unresolved_forward_ref("app.Missing");
        assert!(err.to_string().contains("app.Missing"));
    }
}
