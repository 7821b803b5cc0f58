//! Identity and context types the standard predicates read.

pub mod context;
pub mod identity;

pub use context::{
    Annotation, AnnotationId, Context, Group, GroupId, JoinableBy, ReadableBy, WriteableBy,
};
pub use identity::{AuthClient, ClientId, GroupRole, Identity, Membership, User, UserId};
