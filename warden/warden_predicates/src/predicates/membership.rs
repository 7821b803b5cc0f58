//! Removing users from groups.
//!
//! Roles rank `member < moderator < admin < owner`. Anyone may leave a group
//! they belong to. Removing someone else requires at least the
//! [`minimum_remover`](GroupRole::minimum_remover) of the highest role they hold:
//!
//! | Target holds      | Remover needs at least |
//! |-------------------|------------------------|
//! | owner or admin    | owner                  |
//! | moderator         | admin                  |
//! | member (no roles) | moderator              |

#![deny(missing_docs)]

use std::collections::BTreeSet;
use warden_core::model::{PredicateError, PredicateResult};

use super::{acting_user, target_group};
use crate::model::{Context, GroupRole, Identity};

/// Whether a member holding `actor_roles` may remove one holding `target_roles`.
///
/// A target with no roles counts as a plain member. An actor with no roles
/// can remove nobody else.
pub fn can_remove(actor_roles: &BTreeSet<GroupRole>, target_roles: &BTreeSet<GroupRole>) -> bool {
    let target = target_roles
        .iter()
        .next_back()
        .copied()
        .unwrap_or(GroupRole::Member);

    actor_roles
        .iter()
        .next_back()
        .is_some_and(|actor| *actor >= target.minimum_remover())
}

/// The acting user may remove `context.user` from `context.group`.
///
/// False when the acting user is not a member of the group, and when the
/// context does not say who is being removed.
pub fn group_member_remove(identity: &Identity, context: &Context) -> PredicateResult {
    let user = acting_user(identity)?;
    let group = target_group(context)?;

    let Some(actor) = user.membership_of(group.id) else {
        return Ok(false);
    };

    let Some(target_user) = context.user.as_ref() else {
        return Ok(false);
    };

    if target_user.userid == user.userid {
        return Ok(true);
    }

    let Some(target) = context.membership.as_ref() else {
        return Ok(false);
    };

    if target.group != group.id {
        return Err(PredicateError::Malformed(format!(
            "membership is of group {} but the context group is {}",
            target.group, group.id
        )));
    }

    Ok(can_remove(&actor.roles, &target.roles))
}
