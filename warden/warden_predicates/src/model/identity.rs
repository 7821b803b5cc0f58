//! Who is acting: a user, an API client, or both.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use warden_core::Id;

use super::context::GroupId;

/// Marker for user identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserMarker;

/// Marker for auth client identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientMarker;

/// Unique identifier for a user.
pub type UserId = Id<UserMarker>;

/// Unique identifier for an auth client.
pub type ClientId = Id<ClientMarker>;

/// Role held in a group membership, ordered from least to most privileged.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    Member,
    Moderator,
    Admin,
    Owner,
}

impl GroupRole {
    /// The least privileged role that may remove someone holding this role.
    ///
    /// Owners and admins can only be removed by owners, moderators by admins,
    /// and plain members by moderators.
    pub fn minimum_remover(self) -> GroupRole {
        match self {
            Self::Owner | Self::Admin => Self::Owner,
            Self::Moderator => Self::Admin,
            Self::Member => Self::Moderator,
        }
    }

    /// Get the name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for GroupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's membership of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// The group this membership is of
    pub group: GroupId,

    /// Roles held in the group; empty means a plain member
    #[serde(default)]
    pub roles: BTreeSet<GroupRole>,
}

impl Membership {
    /// Create a membership holding the given roles.
    pub fn new(group: GroupId, roles: impl IntoIterator<Item = GroupRole>) -> Self {
        Self {
            group,
            roles: roles.into_iter().collect(),
        }
    }

    /// Whether this membership holds `role` exactly.
    pub fn has_role(&self, role: GroupRole) -> bool {
        self.roles.contains(&role)
    }

    /// The most privileged role held, if any.
    pub fn highest_role(&self) -> Option<GroupRole> {
        self.roles.iter().next_back().copied()
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: UserId,

    /// Account identifier, e.g. `acct:alice@example.com`
    pub userid: String,

    /// Authority the account belongs to
    pub authority: String,

    #[serde(default)]
    pub staff: bool,

    #[serde(default)]
    pub admin: bool,

    #[serde(default)]
    pub memberships: Vec<Membership>,
}

impl User {
    /// Create a plain user `acct:{username}@{authority}` with no memberships.
    pub fn new(username: &str, authority: &str) -> Self {
        Self {
            id: UserId::new(),
            userid: format!("acct:{}@{}", username, authority),
            authority: authority.to_string(),
            staff: false,
            admin: false,
            memberships: Vec::new(),
        }
    }

    /// Mark this user as staff.
    pub fn with_staff(mut self, staff: bool) -> Self {
        self.staff = staff;
        self
    }

    /// Mark this user as an administrator.
    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    /// Add a membership of `group` holding `roles`.
    pub fn with_membership(
        mut self,
        group: GroupId,
        roles: impl IntoIterator<Item = GroupRole>,
    ) -> Self {
        self.memberships.push(Membership::new(group, roles));
        self
    }

    /// This user's membership of `group`, if any.
    pub fn membership_of(&self, group: GroupId) -> Option<&Membership> {
        self.memberships.iter().find(|m| m.group == group)
    }
}

/// An API client acting on behalf of an authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClient {
    #[serde(default)]
    pub id: ClientId,

    /// Authority the client acts for
    pub authority: String,
}

impl AuthClient {
    pub fn new(authority: &str) -> Self {
        Self {
            id: ClientId::new(),
            authority: authority.to_string(),
        }
    }
}

/// The acting party of a permission check.
///
/// Both fields empty means an anonymous request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub user: Option<User>,

    #[serde(default)]
    pub auth_client: Option<AuthClient>,
}

impl Identity {
    /// An identity with neither user nor client.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An identity for a signed-in user.
    pub fn for_user(user: User) -> Self {
        Self {
            user: Some(user),
            auth_client: None,
        }
    }

    /// An identity for an API client with no user.
    pub fn for_client(client: AuthClient) -> Self {
        Self {
            user: None,
            auth_client: Some(client),
        }
    }

    /// Attach an auth client to this identity.
    pub fn with_auth_client(mut self, client: AuthClient) -> Self {
        self.auth_client = Some(client);
        self
    }

    /// Whether anyone at all is acting.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() || self.auth_client.is_some()
    }
}
