//! Container causes: homogeneous containers, fixed tuples, mappings
//!
//! Items are visited through the same sampling as the compiled check, and
//! the first offending item is the cause.

use super::context::CauseSleuth;
use super::leaf::class_cause;
use crate::check::{sample_indices, CheckError, CheckResult};
use crate::hint::Hint;
use crate::pith::ClassRef;

pub(super) fn container_cause(
    sleuth: &CauseSleuth<'_>,
    origin: &ClassRef,
    item: &Hint,
) -> CheckResult<Option<String>> {
    let runtime = sleuth.runtime();
    if !runtime.catalog().is_item_container(origin) {
        return Err(CheckError::malformed_hint(sleuth.hint(), format!("{} exposes no items", origin)));
    }
    if let Some(cause) = class_cause(sleuth, origin) {
        return Ok(Some(cause));
    }
    let Some(items) = sleuth.pith().items() else {
        return Ok(Some(format!("{} exposes no items", sleuth.describe())));
    };

    for index in sample_indices(items.len(), sleuth.config().strategy, sleuth.seed()) {
        if let Some(cause) = sleuth.permute(item, &items[index]).get_cause_or_none()? {
            return Ok(Some(format!("{} index {} item {}", origin, index, cause)));
        }
    }
    Ok(None)
}

pub(super) fn tuple_cause(sleuth: &CauseSleuth<'_>, members: &[Hint]) -> CheckResult<Option<String>> {
    let tuple = sleuth.runtime().catalog().tuple();
    if let Some(cause) = class_cause(sleuth, tuple) {
        return Ok(Some(cause));
    }
    let Some(items) = sleuth.pith().items() else {
        return Ok(Some(format!("{} exposes no items", sleuth.describe())));
    };

    if items.len() != members.len() {
        return Ok(Some(format!(
            "tuple {} length {} not {}",
            sleuth.represent(sleuth.pith()),
            items.len(),
            members.len()
        )));
    }

    for (index, (member, item)) in members.iter().zip(items).enumerate() {
        if let Some(cause) = sleuth.permute(member, item).get_cause_or_none()? {
            return Ok(Some(format!("tuple index {} item {}", index, cause)));
        }
    }
    Ok(None)
}

pub(super) fn mapping_cause(
    sleuth: &CauseSleuth<'_>,
    origin: &ClassRef,
    key: &Hint,
    value: &Hint,
) -> CheckResult<Option<String>> {
    let runtime = sleuth.runtime();
    if !runtime.catalog().is_mapping(origin) {
        return Err(CheckError::malformed_hint(sleuth.hint(), format!("{} exposes no entries", origin)));
    }
    if let Some(cause) = class_cause(sleuth, origin) {
        return Ok(Some(cause));
    }
    let Some(entries) = sleuth.pith().entries() else {
        return Ok(Some(format!("{} exposes no entries", sleuth.describe())));
    };

    for index in sample_indices(entries.len(), sleuth.config().strategy, sleuth.seed()) {
        let (k, v) = &entries[index];
        if let Some(cause) = sleuth.permute(key, k).get_cause_or_none()? {
            return Ok(Some(format!("{} key {}", origin, cause)));
        }
        if let Some(cause) = sleuth.permute(value, v).get_cause_or_none()? {
            return Ok(Some(format!(
                "{} key {} value {}",
                origin,
                sleuth.represent(k),
                cause
            )));
        }
    }
    Ok(None)
}
