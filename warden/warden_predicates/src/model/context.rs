//! What is being acted on.

use serde::{Deserialize, Serialize};
use warden_core::Id;

use super::identity::{Membership, User, UserId};

/// Marker for group identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupMarker;

/// Marker for annotation identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationMarker;

/// Unique identifier for a group.
pub type GroupId = Id<GroupMarker>;

/// Unique identifier for an annotation.
pub type AnnotationId = Id<AnnotationMarker>;

/// Who may read a group's annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadableBy {
    Members,
    World,
}

/// Who may write annotations in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteableBy {
    Authority,
    Members,
}

/// Who may join a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinableBy {
    Authority,
}

/// A group of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: GroupId,

    /// Authority the group belongs to
    pub authority: String,

    /// User who created the group
    #[serde(default)]
    pub creator: Option<UserId>,

    #[serde(default)]
    pub readable_by: Option<ReadableBy>,

    #[serde(default)]
    pub writeable_by: Option<WriteableBy>,

    #[serde(default)]
    pub joinable_by: Option<JoinableBy>,
}

impl Group {
    /// Create a private group: no creator, not readable, writable or joinable.
    pub fn new(authority: &str) -> Self {
        Self {
            id: GroupId::new(),
            authority: authority.to_string(),
            creator: None,
            readable_by: None,
            writeable_by: None,
            joinable_by: None,
        }
    }

    /// An open group: world readable, writable by members of the authority.
    pub fn open(authority: &str) -> Self {
        Self::new(authority)
            .with_readable_by(ReadableBy::World)
            .with_writeable_by(WriteableBy::Authority)
            .with_joinable_by(JoinableBy::Authority)
    }

    /// A private group: readable and writable by its members.
    pub fn private(authority: &str) -> Self {
        Self::new(authority)
            .with_readable_by(ReadableBy::Members)
            .with_writeable_by(WriteableBy::Members)
            .with_joinable_by(JoinableBy::Authority)
    }

    pub fn with_creator(mut self, creator: UserId) -> Self {
        self.creator = Some(creator);
        self
    }

    pub fn with_readable_by(mut self, readable_by: ReadableBy) -> Self {
        self.readable_by = Some(readable_by);
        self
    }

    pub fn with_writeable_by(mut self, writeable_by: WriteableBy) -> Self {
        self.writeable_by = Some(writeable_by);
        self
    }

    pub fn with_joinable_by(mut self, joinable_by: JoinableBy) -> Self {
        self.joinable_by = Some(joinable_by);
        self
    }
}

/// An annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub id: AnnotationId,

    /// Account identifier of the author
    pub userid: String,

    /// Whether the annotation is visible beyond its author
    #[serde(default)]
    pub shared: bool,

    #[serde(default)]
    pub deleted: bool,
}

impl Annotation {
    /// A private, live annotation by `userid`.
    pub fn new(userid: impl Into<String>) -> Self {
        Self {
            id: AnnotationId::new(),
            userid: userid.into(),
            shared: false,
            deleted: false,
        }
    }

    pub fn with_shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }
}

/// The resource of a permission check.
///
/// Every field is optional; the `*_found` predicates test for presence and
/// gate everything that reads the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// A user being acted on, e.g. the target of a membership removal
    #[serde(default)]
    pub user: Option<User>,

    #[serde(default)]
    pub group: Option<Group>,

    #[serde(default)]
    pub annotation: Option<Annotation>,

    /// The target user's membership of `group`
    #[serde(default)]
    pub membership: Option<Membership>,
}

impl Context {
    /// An empty context, for permissions that only look at the identity.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Acting on a group.
    pub fn for_group(group: Group) -> Self {
        Self {
            group: Some(group),
            ..Self::default()
        }
    }

    /// Acting on an annotation, optionally in a group.
    pub fn for_annotation(annotation: Annotation, group: Option<Group>) -> Self {
        Self {
            annotation: Some(annotation),
            group,
            ..Self::default()
        }
    }

    /// Acting on a user.
    pub fn for_user(user: User) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    /// Acting on `user`'s `membership` of `group`.
    pub fn for_membership(group: Group, user: User, membership: Membership) -> Self {
        Self {
            user: Some(user),
            group: Some(group),
            membership: Some(membership),
            annotation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GroupRole;

    #[test]
    fn test_group_presets() {
        let open = Group::open("example.com");
        assert_eq!(open.readable_by, Some(ReadableBy::World));
        assert_eq!(open.writeable_by, Some(WriteableBy::Authority));

        let private = Group::private("example.com");
        assert_eq!(private.readable_by, Some(ReadableBy::Members));
        assert_eq!(private.writeable_by, Some(WriteableBy::Members));

        let restricted = Group::new("example.com");
        assert!(restricted.readable_by.is_none());
        assert!(restricted.creator.is_none());
    }

    #[test]
    fn test_context_constructors() {
        let group = Group::private("example.com");
        let user = User::new("dan", "example.com");
        let membership = Membership::new(group.id, [GroupRole::Member]);

        let context = Context::for_membership(group.clone(), user, membership);
        assert_eq!(context.group.as_ref().map(|g| g.id), Some(group.id));
        assert!(context.membership.is_some());
        assert!(context.annotation.is_none());

        let context = Context::for_annotation(Annotation::new("acct:dan@example.com"), None);
        assert!(context.group.is_none());
        assert!(!context.annotation.unwrap().shared);
    }

    #[test]
    fn test_context_from_json() {
        let context: Context = serde_json::from_str(
            r#"{
                "group": {
                    "authority": "example.com",
                    "readable_by": "world",
                    "writeable_by": "authority"
                }
            }"#,
        )
        .unwrap();

        let group = context.group.unwrap();
        assert_eq!(group.readable_by, Some(ReadableBy::World));
        assert!(group.joinable_by.is_none());
        assert!(context.user.is_none());
    }
}
