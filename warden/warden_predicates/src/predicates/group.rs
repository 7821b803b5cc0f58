//! Predicates over a group being acted on.

#![deny(missing_docs)]

use warden_core::model::PredicateResult;

use super::{acting_client, acting_user, target_group};
use crate::model::{Context, GroupRole, Identity, JoinableBy, ReadableBy, WriteableBy};

/// The context names a group.
pub fn group_found(_identity: &Identity, context: &Context) -> PredicateResult {
    Ok(context.group.is_some())
}

/// Members of the group may write in it.
pub fn group_writable_by_members(_identity: &Identity, context: &Context) -> PredicateResult {
    Ok(target_group(context)?.writeable_by == Some(WriteableBy::Members))
}

/// Any user of the group's authority may write in it.
pub fn group_writable_by_authority(_identity: &Identity, context: &Context) -> PredicateResult {
    Ok(target_group(context)?.writeable_by == Some(WriteableBy::Authority))
}

/// Anyone, signed in or not, may read the group.
pub fn group_readable_by_world(_identity: &Identity, context: &Context) -> PredicateResult {
    Ok(target_group(context)?.readable_by == Some(ReadableBy::World))
}

/// Only members of the group may read it.
pub fn group_readable_by_members(_identity: &Identity, context: &Context) -> PredicateResult {
    Ok(target_group(context)?.readable_by == Some(ReadableBy::Members))
}

/// Any user of the group's authority may join it.
pub fn group_joinable_by_authority(_identity: &Identity, context: &Context) -> PredicateResult {
    Ok(target_group(context)?.joinable_by == Some(JoinableBy::Authority))
}

/// The acting user created the group.
pub fn group_created_by_user(identity: &Identity, context: &Context) -> PredicateResult {
    let user = acting_user(identity)?;
    Ok(target_group(context)?.creator == Some(user.id))
}

/// The acting user holds the owner role in the group.
pub fn group_has_user_as_owner(identity: &Identity, context: &Context) -> PredicateResult {
    has_user_as_role(identity, context, GroupRole::Owner)
}

/// The acting user holds the admin role in the group.
pub fn group_has_user_as_admin(identity: &Identity, context: &Context) -> PredicateResult {
    has_user_as_role(identity, context, GroupRole::Admin)
}

/// The acting user holds the moderator role in the group.
pub fn group_has_user_as_moderator(identity: &Identity, context: &Context) -> PredicateResult {
    has_user_as_role(identity, context, GroupRole::Moderator)
}

/// The acting user has any membership of the group, whatever its roles.
pub fn group_has_user_as_member(identity: &Identity, context: &Context) -> PredicateResult {
    let group = target_group(context)?;
    Ok(acting_user(identity)?.membership_of(group.id).is_some())
}

/// The group and the acting user share an authority.
pub fn group_matches_user_authority(identity: &Identity, context: &Context) -> PredicateResult {
    Ok(target_group(context)?.authority == acting_user(identity)?.authority)
}

/// The group and the acting client share an authority.
pub fn group_matches_authenticated_client_authority(
    identity: &Identity,
    context: &Context,
) -> PredicateResult {
    Ok(target_group(context)?.authority == acting_client(identity)?.authority)
}

// Roles are matched exactly: an owner is not implicitly an admin.
fn has_user_as_role(identity: &Identity, context: &Context, role: GroupRole) -> PredicateResult {
    let group = target_group(context)?;
    Ok(acting_user(identity)?
        .membership_of(group.id)
        .is_some_and(|membership| membership.has_role(role)))
}
