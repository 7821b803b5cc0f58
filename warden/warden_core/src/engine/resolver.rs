//! Permission map resolution.
//!
//! This module turns a raw [`PermissionMap`] into a [`ResolvedPermissionMap`]
//! by expanding every clause of every permission. Resolution happens once,
//! when the application is configured. The resolved map is immutable and is
//! the only thing permission checks ever look at.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::engine::expander::ClauseExpander;
use crate::error::ResolutionError;
use crate::model::{PermissionMap, ResolvedClause};
use crate::registry::PredicateRegistry;

/// A permission map whose clauses are ready for evaluation.
///
/// Holds the registry its predicate handles refer to, so it is self-contained.
/// Share it with `Arc`; it is never modified after resolution.
pub struct ResolvedPermissionMap<I, C> {
    registry: Arc<PredicateRegistry<I, C>>,
    permissions: BTreeMap<String, Vec<ResolvedClause>>,
}

/// The evaluation plan of one permission, by predicate name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionPlan {
    /// The permission name.
    pub permission: String,

    /// One evaluation sequence per clause.
    pub clauses: Vec<Vec<String>>,
}

impl fmt::Display for PermissionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.permission)?;
        for (index, clause) in self.clauses.iter().enumerate() {
            if clause.is_empty() {
                writeln!(f, "  [{}] (always)", index)?;
            } else {
                writeln!(f, "  [{}] {}", index, clause.join(" -> "))?;
            }
        }
        Ok(())
    }
}

/// Expand every clause of every permission in `map`.
///
/// # Arguments
///
/// * `registry` - The registry the map's predicate handles belong to.
/// * `map` - The permission map as declared.
///
/// # Returns
///
/// * `Ok(ResolvedPermissionMap)` - The fully expanded map.
/// * `Err(ResolutionError)` - On the first cycle or unknown predicate. Nothing
///   partial is returned.
pub fn resolve<I, C>(
    registry: Arc<PredicateRegistry<I, C>>,
    map: &PermissionMap,
) -> Result<ResolvedPermissionMap<I, C>, ResolutionError> {
    let expander = ClauseExpander::new(&registry);
    let mut permissions = BTreeMap::new();
    let mut sequence_len = 0;

    for (permission, clauses) in map.iter() {
        let resolved = clauses
            .iter()
            .map(|clause| expander.expand(clause))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            permission,
            clauses = resolved.len(),
            predicates = resolved.iter().map(ResolvedClause::len).sum::<usize>(),
            "Resolved permission"
        );

        sequence_len += resolved.iter().map(ResolvedClause::len).sum::<usize>();
        permissions.insert(permission.to_string(), resolved);
    }

    info!(
        permissions = permissions.len(),
        predicates = registry.len(),
        sequence_len,
        "Resolved permission map"
    );

    Ok(ResolvedPermissionMap {
        registry,
        permissions,
    })
}

impl<I, C> ResolvedPermissionMap<I, C> {
    /// The registry the plans refer to.
    pub fn registry(&self) -> &PredicateRegistry<I, C> {
        &self.registry
    }

    /// The resolved clauses for a permission.
    pub fn clauses(&self, permission: &str) -> Option<&[ResolvedClause]> {
        self.permissions.get(permission).map(Vec::as_slice)
    }

    /// Whether a permission is present.
    pub fn contains(&self, permission: &str) -> bool {
        self.permissions.contains_key(permission)
    }

    /// Permission names, in order.
    pub fn permissions(&self) -> impl Iterator<Item = &str> {
        self.permissions.keys().map(String::as_str)
    }

    /// Number of permissions.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Whether there are no permissions.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// The evaluation plan of one permission, by predicate name.
    pub fn describe(&self, permission: &str) -> Option<PermissionPlan> {
        self.permissions
            .get_key_value(permission)
            .map(|(name, clauses)| self.plan_for(name, clauses))
    }

    /// The evaluation plans of every permission.
    pub fn plan(&self) -> Vec<PermissionPlan> {
        self.permissions
            .iter()
            .map(|(name, clauses)| self.plan_for(name, clauses))
            .collect()
    }

    fn plan_for(&self, permission: &str, clauses: &[ResolvedClause]) -> PermissionPlan {
        PermissionPlan {
            permission: permission.to_string(),
            clauses: clauses
                .iter()
                .map(|clause| {
                    clause
                        .predicates()
                        .iter()
                        .map(|id| self.registry.name_of(*id).to_string())
                        .collect()
                })
                .collect(),
        }
    }
}

impl<I, C> fmt::Debug for ResolvedPermissionMap<I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedPermissionMap")
            .field("permissions", &self.plan())
            .finish()
    }
}
