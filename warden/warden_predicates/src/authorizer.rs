//! A ready-to-use authorizer over the standard predicates.

use std::sync::Arc;
use tracing::info;
use warden_core::{
    resolve, Decision, EvaluationError, PermissionMap, PredicateRegistry, RegistryError,
    ResolvedPermissionMap, Result, WardenConfig,
};

use crate::model::{Context, Identity};
use crate::permissions::{standard_permission_map, Permission};
use crate::predicates::StandardPredicates;

/// A registry holding only the standard predicates.
///
/// # Returns
///
/// * `Ok((registry, handles))` - The registry and a handle to every predicate.
/// * `Err(RegistryError)` - Never in practice; registration into an empty
///   registry cannot collide.
pub fn standard_registry(
) -> std::result::Result<(PredicateRegistry<Identity, Context>, StandardPredicates), RegistryError>
{
    let mut registry = PredicateRegistry::new();
    let predicates = StandardPredicates::register(&mut registry)?;
    Ok((registry, predicates))
}

/// Answers permission questions about [`Identity`] and [`Context`].
///
/// The permission map is resolved once, on construction. Clones share it.
#[derive(Debug, Clone)]
pub struct Authorizer {
    resolved: Arc<ResolvedPermissionMap<Identity, Context>>,
}

impl Authorizer {
    /// An authorizer for the standard permission map.
    pub fn standard() -> Result<Self> {
        let (registry, predicates) = standard_registry()?;
        let map = standard_permission_map(&predicates);
        Self::build(registry, &map)
    }

    /// An authorizer for the permission map in `config`, or the standard map
    /// when the configuration has none.
    ///
    /// # Returns
    ///
    /// * `Ok(Authorizer)` - The resolved authorizer.
    /// * `Err(Error::Config)` - If the configuration names an unknown predicate.
    /// * `Err(Error::Resolution)` - If the map cannot be resolved.
    pub fn from_config(config: &WardenConfig) -> Result<Self> {
        let (registry, predicates) = standard_registry()?;

        let map = match &config.permissions {
            Some(permissions) => {
                info!(
                    permissions = permissions.permissions.len(),
                    "Using configured permission map"
                );
                permissions.to_permission_map(&registry)?
            }
            None => standard_permission_map(&predicates),
        };

        Self::build(registry, &map)
    }

    fn build(registry: PredicateRegistry<Identity, Context>, map: &PermissionMap) -> Result<Self> {
        let resolved = resolve(Arc::new(registry), map)?;
        Ok(Self {
            resolved: Arc::new(resolved),
        })
    }

    /// Check a standard permission.
    pub fn check(
        &self,
        permission: Permission,
        identity: &Identity,
        context: &Context,
    ) -> std::result::Result<bool, EvaluationError> {
        self.resolved.check(permission.as_str(), identity, context)
    }

    /// Check a permission by name; unknown names are denied.
    pub fn check_named(
        &self,
        permission: &str,
        identity: &Identity,
        context: &Context,
    ) -> std::result::Result<bool, EvaluationError> {
        self.resolved.check(permission, identity, context)
    }

    /// Check a permission by name and record how the decision was reached.
    pub fn evaluate(
        &self,
        permission: &str,
        identity: &Identity,
        context: &Context,
    ) -> std::result::Result<Decision, EvaluationError> {
        self.resolved.evaluate(permission, identity, context)
    }

    /// The resolved permission map.
    pub fn resolved(&self) -> &ResolvedPermissionMap<Identity, Context> {
        &self.resolved
    }
}
