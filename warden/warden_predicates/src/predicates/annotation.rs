//! Predicates over an annotation being acted on.

#![deny(missing_docs)]

use warden_core::model::PredicateResult;

use super::{acting_user, target_annotation};
use crate::model::{Context, Identity};

/// The context names an annotation.
pub fn annotation_found(_identity: &Identity, context: &Context) -> PredicateResult {
    Ok(context.annotation.is_some())
}

/// The annotation is visible beyond its author.
pub fn annotation_shared(_identity: &Identity, context: &Context) -> PredicateResult {
    Ok(target_annotation(context)?.shared)
}

/// The annotation is private to its author.
pub fn annotation_not_shared(_identity: &Identity, context: &Context) -> PredicateResult {
    Ok(!target_annotation(context)?.shared)
}

/// The annotation has not been deleted.
pub fn annotation_live(_identity: &Identity, context: &Context) -> PredicateResult {
    Ok(!target_annotation(context)?.deleted)
}

/// The acting user wrote the annotation.
pub fn annotation_created_by_user(identity: &Identity, context: &Context) -> PredicateResult {
    Ok(acting_user(identity)?.userid == target_annotation(context)?.userid)
}
