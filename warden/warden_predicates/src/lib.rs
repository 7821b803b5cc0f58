//! # Warden Predicates
//!
//! The standard predicates and permissions for annotation groups, built on
//! `warden_core`.
//!
//! ```
//! use warden_predicates::{Authorizer, Context, Group, GroupRole, Identity, Membership, Permission, User};
//!
//! let authorizer = Authorizer::standard().unwrap();
//!
//! let group = Group::private("example.com");
//! let moderator = User::new("mod", "example.com").with_membership(group.id, [GroupRole::Moderator]);
//! let member = User::new("member", "example.com").with_membership(group.id, [GroupRole::Member]);
//! let membership = Membership::new(group.id, [GroupRole::Member]);
//!
//! let context = Context::for_membership(group, member, membership);
//! assert!(authorizer
//!     .check(Permission::GroupMemberRemove, &Identity::for_user(moderator), &context)
//!     .unwrap());
//! ```

pub mod authorizer;
pub mod model;
pub mod permissions;
pub mod predicates;

pub use authorizer::{standard_registry, Authorizer};
pub use model::{
    Annotation, AnnotationId, AuthClient, ClientId, Context, Group, GroupId, GroupRole, Identity,
    JoinableBy, Membership, ReadableBy, User, UserId, WriteableBy,
};
pub use permissions::{standard_permission_map, Permission, UnknownPermission};
pub use predicates::StandardPredicates;
