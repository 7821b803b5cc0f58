//! The standard predicate library.
//!
//! Every predicate here is a plain function over [`Identity`] and [`Context`].
//! [`StandardPredicates::register`] adds them all to a registry together with
//! their parent declarations and hands back the resulting handles, which
//! [`standard_permission_map`](crate::permissions::standard_permission_map)
//! composes into permissions.
//!
//! A predicate that reads an attribute one of its parents guarantees returns
//! [`PredicateError::MissingAttribute`] when evaluated without that parent.

pub mod annotation;
pub mod auth;
pub mod group;
pub mod membership;
pub mod user;

use warden_core::model::PredicateError;
use warden_core::{PredicateId, PredicateRegistry, RegistryError};

use crate::model::{Annotation, AuthClient, Context, Group, Identity, User};

/// Handles to every standard predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardPredicates {
    pub authenticated: PredicateId,
    pub authenticated_user: PredicateId,
    pub user_is_staff: PredicateId,
    pub user_is_admin: PredicateId,
    pub authenticated_client: PredicateId,
    pub authenticated_client_is_lms: PredicateId,

    pub user_found: PredicateId,
    pub user_authority_matches_authenticated_client: PredicateId,

    pub annotation_found: PredicateId,
    pub annotation_shared: PredicateId,
    pub annotation_not_shared: PredicateId,
    pub annotation_live: PredicateId,
    pub annotation_created_by_user: PredicateId,

    pub group_found: PredicateId,
    pub group_writable_by_members: PredicateId,
    pub group_writable_by_authority: PredicateId,
    pub group_readable_by_world: PredicateId,
    pub group_readable_by_members: PredicateId,
    pub group_joinable_by_authority: PredicateId,
    pub group_created_by_user: PredicateId,
    pub group_has_user_as_owner: PredicateId,
    pub group_has_user_as_admin: PredicateId,
    pub group_has_user_as_moderator: PredicateId,
    pub group_has_user_as_member: PredicateId,
    pub group_matches_user_authority: PredicateId,
    pub group_matches_authenticated_client_authority: PredicateId,
    pub group_member_remove: PredicateId,
}

impl StandardPredicates {
    /// Register the standard predicates.
    ///
    /// # Arguments
    ///
    /// * `registry` - The registry to add them to.
    ///
    /// # Returns
    ///
    /// * `Ok(StandardPredicates)` - Handles to the new predicates.
    /// * `Err(RegistryError)` - If one of the names is already taken.
    pub fn register(
        registry: &mut PredicateRegistry<Identity, Context>,
    ) -> Result<Self, RegistryError> {
        let authenticated = registry.register("authenticated", auth::authenticated, &[])?;
        let authenticated_user =
            registry.register("authenticated_user", auth::authenticated_user, &[authenticated])?;
        let user_is_staff =
            registry.register("user_is_staff", auth::user_is_staff, &[authenticated_user])?;
        let user_is_admin =
            registry.register("user_is_admin", auth::user_is_admin, &[authenticated_user])?;
        let authenticated_client = registry.register(
            "authenticated_client",
            auth::authenticated_client,
            &[authenticated],
        )?;
        let authenticated_client_is_lms = registry.register(
            "authenticated_client_is_lms",
            auth::authenticated_client_is_lms,
            &[authenticated_client],
        )?;

        let user_found = registry.register("user_found", user::user_found, &[])?;
        let user_authority_matches_authenticated_client = registry.register(
            "user_authority_matches_authenticated_client",
            user::user_authority_matches_authenticated_client,
            &[authenticated_client, user_found],
        )?;

        let annotation_found =
            registry.register("annotation_found", annotation::annotation_found, &[])?;
        let annotation_shared = registry.register(
            "annotation_shared",
            annotation::annotation_shared,
            &[annotation_found],
        )?;
        let annotation_not_shared = registry.register(
            "annotation_not_shared",
            annotation::annotation_not_shared,
            &[annotation_found],
        )?;
        let annotation_live = registry.register(
            "annotation_live",
            annotation::annotation_live,
            &[annotation_found],
        )?;
        let annotation_created_by_user = registry.register(
            "annotation_created_by_user",
            annotation::annotation_created_by_user,
            &[authenticated_user, annotation_found],
        )?;

        let group_found = registry.register("group_found", group::group_found, &[])?;
        let user_and_group = [authenticated_user, group_found];

        let group_writable_by_members = registry.register(
            "group_writable_by_members",
            group::group_writable_by_members,
            &[group_found],
        )?;
        let group_writable_by_authority = registry.register(
            "group_writable_by_authority",
            group::group_writable_by_authority,
            &[group_found],
        )?;
        let group_readable_by_world = registry.register(
            "group_readable_by_world",
            group::group_readable_by_world,
            &[group_found],
        )?;
        let group_readable_by_members = registry.register(
            "group_readable_by_members",
            group::group_readable_by_members,
            &[group_found],
        )?;
        let group_joinable_by_authority = registry.register(
            "group_joinable_by_authority",
            group::group_joinable_by_authority,
            &[group_found],
        )?;
        let group_created_by_user = registry.register(
            "group_created_by_user",
            group::group_created_by_user,
            &user_and_group,
        )?;
        let group_has_user_as_owner = registry.register(
            "group_has_user_as_owner",
            group::group_has_user_as_owner,
            &user_and_group,
        )?;
        let group_has_user_as_admin = registry.register(
            "group_has_user_as_admin",
            group::group_has_user_as_admin,
            &user_and_group,
        )?;
        let group_has_user_as_moderator = registry.register(
            "group_has_user_as_moderator",
            group::group_has_user_as_moderator,
            &user_and_group,
        )?;
        let group_has_user_as_member = registry.register(
            "group_has_user_as_member",
            group::group_has_user_as_member,
            &user_and_group,
        )?;
        let group_matches_user_authority = registry.register(
            "group_matches_user_authority",
            group::group_matches_user_authority,
            &user_and_group,
        )?;
        let group_matches_authenticated_client_authority = registry.register(
            "group_matches_authenticated_client_authority",
            group::group_matches_authenticated_client_authority,
            &[authenticated_client, group_found],
        )?;
        let group_member_remove = registry.register(
            "group_member_remove",
            membership::group_member_remove,
            &user_and_group,
        )?;

        Ok(Self {
            authenticated,
            authenticated_user,
            user_is_staff,
            user_is_admin,
            authenticated_client,
            authenticated_client_is_lms,
            user_found,
            user_authority_matches_authenticated_client,
            annotation_found,
            annotation_shared,
            annotation_not_shared,
            annotation_live,
            annotation_created_by_user,
            group_found,
            group_writable_by_members,
            group_writable_by_authority,
            group_readable_by_world,
            group_readable_by_members,
            group_joinable_by_authority,
            group_created_by_user,
            group_has_user_as_owner,
            group_has_user_as_admin,
            group_has_user_as_moderator,
            group_has_user_as_member,
            group_matches_user_authority,
            group_matches_authenticated_client_authority,
            group_member_remove,
        })
    }
}

pub(crate) fn acting_user(identity: &Identity) -> Result<&User, PredicateError> {
    identity
        .user
        .as_ref()
        .ok_or_else(|| PredicateError::missing("identity.user"))
}

pub(crate) fn acting_client(identity: &Identity) -> Result<&AuthClient, PredicateError> {
    identity
        .auth_client
        .as_ref()
        .ok_or_else(|| PredicateError::missing("identity.auth_client"))
}

pub(crate) fn target_group(context: &Context) -> Result<&Group, PredicateError> {
    context
        .group
        .as_ref()
        .ok_or_else(|| PredicateError::missing("context.group"))
}

pub(crate) fn target_annotation(context: &Context) -> Result<&Annotation, PredicateError> {
    context
        .annotation
        .as_ref()
        .ok_or_else(|| PredicateError::missing("context.annotation"))
}

pub(crate) fn target_user(context: &Context) -> Result<&User, PredicateError> {
    context
        .user
        .as_ref()
        .ok_or_else(|| PredicateError::missing("context.user"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn registered() -> (PredicateRegistry<Identity, Context>, StandardPredicates) {
        let mut registry = PredicateRegistry::new();
        let predicates = StandardPredicates::register(&mut registry).unwrap();
        (registry, predicates)
    }

    #[test]
    fn test_registers_every_predicate_once() {
        let (registry, predicates) = registered();
        assert_eq!(registry.len(), 27);

        let ids: HashSet<_> = registry.ids().collect();
        assert_eq!(ids.len(), 27);
        assert!(ids.contains(&predicates.group_member_remove));
    }

    #[test]
    fn test_parent_declarations() {
        let (registry, p) = registered();

        assert!(registry.parents(p.authenticated).unwrap().is_empty());
        assert_eq!(
            registry.parents(p.user_is_admin).unwrap(),
            &[p.authenticated_user]
        );
        assert_eq!(
            registry
                .parents(p.user_authority_matches_authenticated_client)
                .unwrap(),
            &[p.authenticated_client, p.user_found]
        );
        assert_eq!(
            registry.parents(p.group_member_remove).unwrap(),
            &[p.authenticated_user, p.group_found]
        );
        assert_eq!(
            registry
                .parents(p.group_matches_authenticated_client_authority)
                .unwrap(),
            &[p.authenticated_client, p.group_found]
        );
    }

    #[test]
    fn test_names_match_functions() {
        let (registry, p) = registered();
        assert_eq!(registry.lookup("group_found"), Some(p.group_found));
        assert_eq!(registry.name(p.annotation_live), Some("annotation_live"));
    }

    #[test]
    fn test_registering_twice_fails() {
        let (mut registry, _) = registered();
        let err = StandardPredicates::register(&mut registry).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(ref name) if name == "authenticated"));
    }
}
