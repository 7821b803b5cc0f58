//! Clauses and permission maps.
//!
//! A [`Clause`] is an AND of predicates; a permission is an OR of clauses; a
//! [`PermissionMap`] names every permission the application knows about. These
//! are the raw, as-declared shapes. The resolved counterparts are produced by
//! [`resolve`](crate::engine::resolve).

use std::collections::BTreeMap;

use crate::id::PredicateId;

/// An ordered list of predicates that must all hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Clause(Vec<PredicateId>);

impl Clause {
    /// Create a clause from predicates in declaration order.
    pub fn new(predicates: impl IntoIterator<Item = PredicateId>) -> Self {
        Self(predicates.into_iter().collect())
    }

    /// The predicates of this clause, in declaration order.
    pub fn predicates(&self) -> &[PredicateId] {
        &self.0
    }

    /// Number of predicates in this clause.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this clause has no predicates (and is therefore always true).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PredicateId>> for Clause {
    fn from(predicates: Vec<PredicateId>) -> Self {
        Self(predicates)
    }
}

impl<const N: usize> From<[PredicateId; N]> for Clause {
    fn from(predicates: [PredicateId; N]) -> Self {
        Self(predicates.to_vec())
    }
}

/// A clause after expansion.
///
/// Every predicate appears once, and every predicate appears after all of the
/// predicates it requires. Evaluating it left to right with short-circuit AND
/// never runs a predicate whose prerequisites have not already held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResolvedClause(Vec<PredicateId>);

impl ResolvedClause {
    pub(crate) fn from_sequence(sequence: Vec<PredicateId>) -> Self {
        Self(sequence)
    }

    /// The evaluation sequence.
    pub fn predicates(&self) -> &[PredicateId] {
        &self.0
    }

    /// Number of predicates in the evaluation sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// View this sequence as an ordinary clause, e.g. to expand it again.
    pub fn to_clause(&self) -> Clause {
        Clause(self.0.clone())
    }
}

/// Permission names mapped to the clauses that grant them.
///
/// Iteration is ordered by permission name; the order in which permissions
/// were added carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMap {
    permissions: BTreeMap<String, Vec<Clause>>,
}

impl PermissionMap {
    /// Create an empty permission map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clauses for a permission, replacing any previous clauses.
    ///
    /// # Arguments
    ///
    /// * `permission` - The permission name.
    /// * `clauses` - The clauses, any one of which grants the permission.
    pub fn insert<I, T>(&mut self, permission: impl Into<String>, clauses: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Clause>,
    {
        self.permissions.insert(
            permission.into(),
            clauses.into_iter().map(Into::into).collect(),
        );
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_permission<I, T>(mut self, permission: impl Into<String>, clauses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Clause>,
    {
        self.insert(permission, clauses);
        self
    }

    /// Append one more clause to a permission, creating it if needed.
    pub fn add_clause(&mut self, permission: impl Into<String>, clause: impl Into<Clause>) {
        self.permissions
            .entry(permission.into())
            .or_default()
            .push(clause.into());
    }

    /// The clauses for a permission.
    pub fn get(&self, permission: &str) -> Option<&[Clause]> {
        self.permissions.get(permission).map(Vec::as_slice)
    }

    /// Whether a permission is present.
    pub fn contains(&self, permission: &str) -> bool {
        self.permissions.contains_key(permission)
    }

    /// Iterate over permissions and their clauses.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Clause])> {
        self.permissions
            .iter()
            .map(|(name, clauses)| (name.as_str(), clauses.as_slice()))
    }

    /// Number of permissions.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Whether the map has no permissions.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<PredicateId> {
        let registry = uuid::Uuid::new_v4();
        (0..n).map(|index| PredicateId::new(registry, index)).collect()
    }

    #[test]
    fn test_clause_preserves_order() {
        let ids = ids(3);
        let clause = Clause::new([ids[2], ids[0], ids[1]]);
        assert_eq!(clause.predicates(), &[ids[2], ids[0], ids[1]]);
        assert_eq!(clause.len(), 3);
        assert!(Clause::default().is_empty());
    }

    #[test]
    fn test_permission_map_insert_and_add() {
        let ids = ids(3);
        let mut map = PermissionMap::new().with_permission("read", [[ids[0]]]);
        map.add_clause("read", [ids[1], ids[2]]);
        map.add_clause("write", vec![ids[2]]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("read").unwrap().len(), 2);
        assert_eq!(map.get("write").unwrap()[0].predicates(), &[ids[2]]);
        assert!(map.get("delete").is_none());
    }

    #[test]
    fn test_permission_map_iterates_by_name() {
        let ids = ids(1);
        let map = PermissionMap::new()
            .with_permission("zeta", [[ids[0]]])
            .with_permission("alpha", [[ids[0]]]);

        let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_insert_replaces_clauses() {
        let ids = ids(2);
        let mut map = PermissionMap::new();
        map.insert("read", [[ids[0]], [ids[1]]]);
        map.insert("read", [[ids[1]]]);
        assert_eq!(map.get("read").unwrap().len(), 1);
    }
}
