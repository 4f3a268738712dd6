//! Annotated causes
//!
//! The annotated hint is diagnosed first; its cause is more fundamental than
//! any validator's. Validators follow in declared order and the first one
//! rejecting the pith is the cause.

use super::context::CauseSleuth;
use crate::check::{annotated_validators, CheckResult};
use crate::hint::{Hint, Metadatum};

pub(super) fn annotated_cause(
    sleuth: &CauseSleuth<'_>,
    child: &Hint,
    metadata: &[Metadatum],
) -> CheckResult<Option<String>> {
    let validators = annotated_validators(sleuth.exception_label(), sleuth.hint(), metadata)?;

    if let Some(cause) = sleuth.permute(child, sleuth.pith()).get_cause_or_none()? {
        return Ok(Some(cause));
    }

    Ok(validators
        .into_iter()
        .find(|validator| !validator.is_valid(sleuth.pith()))
        .map(|validator| format!("{} violates validator {}", sleuth.describe(), validator)))
}
