//! Predicate registry.
//!
//! The registry is where predicates are given their identity. Each
//! registration returns a [`PredicateId`] handle and records the predicate's
//! parents: the predicates that must hold before it is even meaningful to ask
//! it. Parents are declared once and never change afterwards, so the
//! dependency relation is fixed for the lifetime of the registry.
//!
//! Most predicates are registered in one step with [`PredicateRegistry::register`],
//! which only accepts parents that already exist. When a predicate has to be
//! referenced before its parents are known, [`PredicateRegistry::declare`] hands
//! out the handle first and [`PredicateRegistry::require`] fills in the parents
//! later. That makes cycles expressible, which is why the expander checks for
//! them.
//!
//! ```
//! use warden_core::model::PredicateResult;
//! use warden_core::registry::PredicateRegistry;
//!
//! fn signed_in(identity: &Option<String>, _: &()) -> PredicateResult {
//!     Ok(identity.is_some())
//! }
//!
//! fn is_root(identity: &Option<String>, _: &()) -> PredicateResult {
//!     Ok(identity.as_deref() == Some("root"))
//! }
//!
//! let mut registry: PredicateRegistry<Option<String>, ()> = PredicateRegistry::new();
//! let signed_in = registry.register("signed_in", signed_in, &[]).unwrap();
//! let is_root = registry.register("is_root", is_root, &[signed_in]).unwrap();
//!
//! assert_eq!(registry.parents(is_root).unwrap(), &[signed_in]);
//! assert_eq!(registry.lookup("is_root"), Some(is_root));
//! ```

use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use crate::error::RegistryError;
use crate::id::PredicateId;
use crate::model::{Predicate, PredicateResult};

struct Entry<I, C> {
    name: String,
    predicate: Box<dyn Predicate<I, C>>,
    parents: Vec<PredicateId>,
    parents_declared: bool,
}

/// A set of named predicates and their declared parents.
///
/// Every registry has its own token, stamped into the handles it issues.
/// Handles issued by another registry are reported as unknown.
pub struct PredicateRegistry<I, C> {
    token: Uuid,
    entries: Vec<Entry<I, C>>,
    names: HashMap<String, PredicateId>,
}

impl<I, C> PredicateRegistry<I, C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            token: Uuid::new_v4(),
            entries: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Register a predicate together with its parents.
    ///
    /// # Arguments
    ///
    /// * `name` - A unique, human-readable name used in diagnostics and configuration.
    /// * `predicate` - The test itself.
    /// * `parents` - Predicates that must hold first, in evaluation order.
    ///
    /// # Returns
    ///
    /// * `Ok(PredicateId)` - The handle for the new predicate.
    /// * `Err(RegistryError)` - If the name is taken or a parent is unknown.
    pub fn register<P>(
        &mut self,
        name: impl Into<String>,
        predicate: P,
        parents: &[PredicateId],
    ) -> Result<PredicateId, RegistryError>
    where
        P: Predicate<I, C> + 'static,
    {
        self.check_known(parents)?;
        let id = self.declare(name, predicate)?;
        self.require(id, parents.iter().copied())?;
        Ok(id)
    }

    /// Register a predicate whose parents will be declared later.
    ///
    /// Until [`require`](Self::require) is called the predicate has no parents.
    pub fn declare<P>(
        &mut self,
        name: impl Into<String>,
        predicate: P,
    ) -> Result<PredicateId, RegistryError>
    where
        P: Predicate<I, C> + 'static,
    {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        let id = PredicateId::new(self.token, self.entries.len());
        self.names.insert(name.clone(), id);
        self.entries.push(Entry {
            name,
            predicate: Box::new(predicate),
            parents: Vec::new(),
            parents_declared: false,
        });

        Ok(id)
    }

    /// Declare the parents of a previously declared predicate.
    ///
    /// This can be done exactly once per predicate. The parents are not
    /// checked for cycles here; expansion rejects cyclic declarations.
    pub fn require(
        &mut self,
        id: PredicateId,
        parents: impl IntoIterator<Item = PredicateId>,
    ) -> Result<(), RegistryError> {
        let parents: Vec<PredicateId> = parents.into_iter().collect();
        self.check_known(&parents)?;

        let entry = self
            .entry_mut(id)
            .ok_or(RegistryError::UnknownPredicate(id))?;

        if entry.parents_declared {
            return Err(RegistryError::ParentsAlreadyDeclared(entry.name.clone()));
        }

        entry.parents = parents;
        entry.parents_declared = true;
        Ok(())
    }

    /// The direct parents of a predicate, in declaration order.
    pub fn parents(&self, id: PredicateId) -> Result<&[PredicateId], RegistryError> {
        self.entry(id)
            .map(|entry| entry.parents.as_slice())
            .ok_or(RegistryError::UnknownPredicate(id))
    }

    /// The name a predicate was registered under.
    pub fn name(&self, id: PredicateId) -> Option<&str> {
        self.entry(id).map(|entry| entry.name.as_str())
    }

    /// Find a predicate by name.
    pub fn lookup(&self, name: &str) -> Option<PredicateId> {
        self.names.get(name).copied()
    }

    /// Whether the handle belongs to this registry.
    pub fn contains(&self, id: PredicateId) -> bool {
        self.entry(id).is_some()
    }

    /// Run a single predicate.
    pub fn test(
        &self,
        id: PredicateId,
        identity: &I,
        context: &C,
    ) -> Result<PredicateResult, RegistryError> {
        self.entry(id)
            .map(|entry| entry.predicate.test(identity, context))
            .ok_or(RegistryError::UnknownPredicate(id))
    }

    /// All handles, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = PredicateId> + '_ {
        (0..self.entries.len()).map(|index| PredicateId::new(self.token, index))
    }

    /// Number of registered predicates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name lookup for a handle that is known to be valid.
    ///
    /// Only used for handles that passed through expansion against this registry.
    pub(crate) fn name_of(&self, id: PredicateId) -> &str {
        &self.entries[id.index()].name
    }

    /// Run a predicate whose handle is known to be valid.
    pub(crate) fn test_unchecked(
        &self,
        id: PredicateId,
        identity: &I,
        context: &C,
    ) -> PredicateResult {
        self.entries[id.index()].predicate.test(identity, context)
    }

    fn entry(&self, id: PredicateId) -> Option<&Entry<I, C>> {
        if id.registry() != self.token {
            return None;
        }
        self.entries.get(id.index())
    }

    fn entry_mut(&mut self, id: PredicateId) -> Option<&mut Entry<I, C>> {
        if id.registry() != self.token {
            return None;
        }
        self.entries.get_mut(id.index())
    }

    fn check_known(&self, ids: &[PredicateId]) -> Result<(), RegistryError> {
        match ids.iter().find(|id| !self.contains(**id)) {
            Some(unknown) => Err(RegistryError::UnknownPredicate(*unknown)),
            None => Ok(()),
        }
    }
}

impl<I, C> Default for PredicateRegistry<I, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, C> fmt::Debug for PredicateRegistry<I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|entry| {
                let parents: Vec<&str> = entry
                    .parents
                    .iter()
                    .map(|parent| self.entries[parent.index()].name.as_str())
                    .collect();
                (entry.name.as_str(), parents)
            }))
            .finish()
    }
}
