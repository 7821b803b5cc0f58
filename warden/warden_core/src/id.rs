//! Identifiers used throughout Warden.
//!
//! Two kinds of identifier live here:
//!
//! - [`Id<T>`], a UUID wrapper with a phantom marker so that identifiers of
//!   different entity kinds (users, groups, annotations, ...) cannot be mixed up.
//!   Domain crates define their own markers and aliases on top of it.
//! - [`PredicateId`], the handle a [`PredicateRegistry`](crate::registry::PredicateRegistry)
//!   hands out on registration. Predicates are compared by handle, never by name.
//!
//! # Examples
//!
//! ```
//! use warden_core::id::Id;
//! use std::str::FromStr;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
//! struct GroupMarker;
//! type GroupId = Id<GroupMarker>;
//!
//! let id_str = "550e8400-e29b-41d4-a716-446655440000";
//! let group_id = GroupId::from_str(id_str).unwrap();
//! assert_eq!(group_id.to_string(), id_str);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// A type-safe identifier based on UUID.
///
/// Serializes as the bare UUID string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    uuid: Uuid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random identifier.
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create an identifier from a specific UUID.
    ///
    /// # Examples
    ///
    /// ```
    /// use warden_core::id::Id;
    /// use uuid::Uuid;
    ///
    /// let uuid = Uuid::new_v4();
    /// let id: Id<()> = Id::from_uuid(uuid);
    /// assert_eq!(id.uuid(), uuid);
    /// ```
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _marker: PhantomData,
        }
    }

    /// Get the underlying UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Create a nil (all zeros) identifier.
    pub fn nil() -> Self {
        Self::from_uuid(Uuid::nil())
    }

    /// Check if this is a nil identifier.
    pub fn is_nil(&self) -> bool {
        self.uuid.is_nil()
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }
}

/// Handle for a predicate registered in a
/// [`PredicateRegistry`](crate::registry::PredicateRegistry).
///
/// Handles are only minted by the registry, so two handles are equal exactly
/// when they refer to the same registered predicate. Registering the same
/// function twice yields two distinct predicates.
///
/// A handle carries the token of the registry that issued it. Any other
/// registry treats it as unknown, so a handle can never be read as a
/// different predicate that happens to sit at the same position elsewhere.
/// Handles cannot be deserialized; configuration refers to predicates by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PredicateId {
    registry: Uuid,
    index: usize,
}

impl PredicateId {
    pub(crate) fn new(registry: Uuid, index: usize) -> Self {
        Self { registry, index }
    }

    /// Token of the registry that issued this handle.
    pub(crate) fn registry(self) -> Uuid {
        self.registry
    }

    pub(crate) fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for PredicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "predicate#{}", self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    struct UserMarker;
    type UserId = Id<UserMarker>;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    struct GroupMarker;
    type GroupId = Id<GroupMarker>;

    #[test]
    fn test_id_new() {
        let id1 = UserId::new();
        let id2 = UserId::new();
        assert_ne!(id1, id2, "Generated IDs should be unique");
    }

    #[test]
    fn test_id_from_str() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = UserId::from_str(uuid_str).unwrap();
        assert_eq!(id.to_string(), uuid_str);
        assert!(UserId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_id_nil() {
        let nil_id = GroupId::nil();
        assert_eq!(nil_id.to_string(), "00000000-0000-0000-0000-000000000000");
        assert!(nil_id.is_nil());
        assert!(!GroupId::new().is_nil());
    }

    #[test]
    fn test_same_uuid_different_kinds() {
        let same_uuid = Uuid::new_v4();
        let user_id = UserId::from_uuid(same_uuid);
        let group_id = GroupId::from_uuid(same_uuid);

        // Same UUID underneath, but the types keep them apart.
        assert_eq!(user_id.uuid(), group_id.uuid());
    }

    #[test]
    fn test_id_serializes_as_plain_uuid() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = GroupId::from_str(uuid_str).unwrap();

        let serialized = serde_json::to_string(&id).unwrap();
        assert_eq!(serialized, format!("\"{}\"", uuid_str));

        let deserialized: GroupId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_predicate_ids_from_different_registries_differ() {
        let first = PredicateId::new(Uuid::new_v4(), 0);
        let second = PredicateId::new(Uuid::new_v4(), 0);
        assert_eq!(first.index(), second.index());
        assert_ne!(first, second);
    }

    #[test]
    fn test_predicate_id_display() {
        let registry = Uuid::new_v4();
        let id = PredicateId::new(registry, 3);
        assert_eq!(id.index(), 3);
        assert_eq!(id.registry(), registry);
        assert_eq!(id.to_string(), "predicate#3");
    }
}
