//! Causes for hints without child hints: classes, forward references, literals

use super::context::CauseSleuth;
use crate::check::{CheckError, CheckResult};
use crate::pith::{ClassRef, Pith};
use crate::resolve::ForwardRef;

pub(super) fn class_cause(sleuth: &CauseSleuth<'_>, class: &ClassRef) -> Option<String> {
    if class.is_object() || sleuth.runtime().is_instance(sleuth.pith(), class) {
        return None;
    }
    Some(format!("{} not instance of {}", sleuth.describe(), class))
}

pub(super) fn forward_ref_cause(
    sleuth: &CauseSleuth<'_>,
    fref: &ForwardRef,
) -> CheckResult<Option<String>> {
    fref.validate()?;
    let class = sleuth.runtime().resolve(fref)?;
    Ok(class_cause(sleuth, &class))
}

pub(super) fn literal_cause(sleuth: &CauseSleuth<'_>, values: &[Pith]) -> CheckResult<Option<String>> {
    if values.is_empty() {
        return Err(CheckError::malformed_hint(sleuth.hint(), "literal has no values"));
    }
    let runtime = sleuth.runtime();
    if values.iter().any(|value| runtime.matches_literal(sleuth.pith(), value)) {
        return Ok(None);
    }
    let expected: Vec<String> = values.iter().map(|value| sleuth.represent(value)).collect();
    Ok(Some(format!("{} not any of {}", sleuth.describe(), expected.join(", "))))
}
