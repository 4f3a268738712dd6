//! Union causes
//!
//! A union is violated only when every member is. No single member is the
//! cause, so the cause lists every member's cause in declaration order.

use super::context::CauseSleuth;
use crate::check::{CheckError, CheckResult};
use crate::hint::Hint;

pub(super) fn union_cause(sleuth: &CauseSleuth<'_>, members: &[Hint]) -> CheckResult<Option<String>> {
    if members.is_empty() {
        return Err(CheckError::malformed_hint(sleuth.hint(), "union has no members"));
    }

    let mut causes = Vec::with_capacity(members.len());
    for member in members {
        match sleuth.permute(member, sleuth.pith()).get_cause_or_none()? {
            None => return Ok(None),
            Some(cause) => causes.push(format!("{}: {}", member, cause)),
        }
    }

    Ok(Some(format!(
        "{} matches no member of {} ({})",
        sleuth.describe(),
        sleuth.hint(),
        causes.join("; ")
    )))
}
