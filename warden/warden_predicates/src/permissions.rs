//! The standard permissions and the map that grants them.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use warden_core::PermissionMap;

use crate::predicates::StandardPredicates;

/// Error parsing a permission name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

/// A standard permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    AdminHighRisk,
    AdminLowRisk,

    UserCreate,
    UserRead,
    UserUpdate,

    GroupCreate,
    GroupRead,
    GroupWrite,
    GroupEdit,
    GroupJoin,
    GroupModerate,
    GroupMemberAdd,
    GroupMemberRemove,
    GroupUpsert,

    AnnotationRead,
    AnnotationCreate,
    AnnotationUpdate,
    AnnotationDelete,
    AnnotationFlag,
    AnnotationModerate,

    ApiBulkAction,
}

impl Permission {
    /// Every standard permission.
    pub const ALL: [Permission; 21] = [
        Self::AdminHighRisk,
        Self::AdminLowRisk,
        Self::UserCreate,
        Self::UserRead,
        Self::UserUpdate,
        Self::GroupCreate,
        Self::GroupRead,
        Self::GroupWrite,
        Self::GroupEdit,
        Self::GroupJoin,
        Self::GroupModerate,
        Self::GroupMemberAdd,
        Self::GroupMemberRemove,
        Self::GroupUpsert,
        Self::AnnotationRead,
        Self::AnnotationCreate,
        Self::AnnotationUpdate,
        Self::AnnotationDelete,
        Self::AnnotationFlag,
        Self::AnnotationModerate,
        Self::ApiBulkAction,
    ];

    /// The name this permission is checked under.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdminHighRisk => "admin:high_risk",
            Self::AdminLowRisk => "admin:low_risk",
            Self::UserCreate => "user:create",
            Self::UserRead => "user:read",
            Self::UserUpdate => "user:update",
            Self::GroupCreate => "group:create",
            Self::GroupRead => "group:read",
            Self::GroupWrite => "group:write",
            Self::GroupEdit => "group:edit",
            Self::GroupJoin => "group:join",
            Self::GroupModerate => "group:moderate",
            Self::GroupMemberAdd => "group:member_add",
            Self::GroupMemberRemove => "group:member_remove",
            Self::GroupUpsert => "group:upsert",
            Self::AnnotationRead => "annotation:read",
            Self::AnnotationCreate => "annotation:create",
            Self::AnnotationUpdate => "annotation:update",
            Self::AnnotationDelete => "annotation:delete",
            Self::AnnotationFlag => "annotation:flag",
            Self::AnnotationModerate => "annotation:moderate",
            Self::ApiBulkAction => "api:bulk_action",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|permission| permission.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

/// Build the standard permission map over the standard predicates.
///
/// Each entry lists alternative clauses; the predicates in a clause only name
/// what the permission is about, and their parents are added on resolution.
pub fn standard_permission_map(p: &StandardPredicates) -> PermissionMap {
    use Permission::*;

    let mut map = PermissionMap::new();
    let mut grant = |permission: Permission, clauses: Vec<Vec<_>>| {
        map.insert(permission.as_str(), clauses);
    };

    grant(AdminHighRisk, vec![vec![p.user_is_admin]]);
    grant(AdminLowRisk, vec![vec![p.user_is_admin], vec![p.user_is_staff]]);

    grant(UserCreate, vec![vec![p.authenticated_client]]);
    grant(
        UserRead,
        vec![vec![p.user_authority_matches_authenticated_client]],
    );
    grant(
        UserUpdate,
        vec![vec![p.user_authority_matches_authenticated_client]],
    );

    grant(GroupCreate, vec![vec![p.authenticated_user]]);
    grant(
        GroupRead,
        vec![
            vec![p.group_readable_by_world],
            vec![p.group_readable_by_members, p.group_has_user_as_member],
        ],
    );
    grant(
        GroupWrite,
        vec![
            vec![p.group_writable_by_members, p.group_has_user_as_member],
            vec![p.group_writable_by_authority, p.group_matches_user_authority],
        ],
    );
    grant(
        GroupEdit,
        vec![
            vec![p.group_created_by_user],
            vec![p.group_has_user_as_owner],
            vec![p.group_has_user_as_admin],
        ],
    );
    grant(
        GroupJoin,
        vec![vec![
            p.group_joinable_by_authority,
            p.group_matches_user_authority,
        ]],
    );
    grant(
        GroupModerate,
        vec![
            vec![p.group_created_by_user],
            vec![p.group_has_user_as_owner],
            vec![p.group_has_user_as_admin],
            vec![p.group_has_user_as_moderator],
        ],
    );
    grant(
        GroupMemberAdd,
        vec![vec![p.group_matches_authenticated_client_authority]],
    );
    grant(GroupMemberRemove, vec![vec![p.group_member_remove]]);
    grant(GroupUpsert, vec![vec![p.group_created_by_user]]);

    grant(
        AnnotationRead,
        vec![
            vec![p.annotation_live, p.annotation_shared, p.group_readable_by_world],
            vec![
                p.annotation_live,
                p.annotation_shared,
                p.group_readable_by_members,
                p.group_has_user_as_member,
            ],
            vec![p.annotation_live, p.annotation_created_by_user],
        ],
    );
    grant(AnnotationCreate, vec![vec![p.authenticated_user]]);
    grant(
        AnnotationUpdate,
        vec![vec![p.annotation_live, p.annotation_created_by_user]],
    );
    grant(
        AnnotationDelete,
        vec![vec![p.annotation_live, p.annotation_created_by_user]],
    );
    grant(AnnotationFlag, vec![vec![p.authenticated_user]]);
    grant(
        AnnotationModerate,
        vec![
            vec![p.group_created_by_user],
            vec![p.group_has_user_as_owner],
            vec![p.group_has_user_as_admin],
            vec![p.group_has_user_as_moderator],
        ],
    );

    grant(ApiBulkAction, vec![vec![p.authenticated_client_is_lms]]);

    map
}
