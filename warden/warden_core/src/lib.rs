//! # Warden Core
//!
//! `warden_core` decides whether a named permission is granted to an identity
//! acting on a context.
//!
//! Key concepts:
//!
//! 1. **Predicate**: A pure boolean test over an identity and a context. A
//!    predicate may declare parents: other predicates that must hold first.
//!
//! 2. **Clause**: Predicates that must all hold (AND).
//!
//! 3. **Permission**: Clauses any one of which grants it (OR).
//!
//! 4. **Resolution**: Expanding every clause, once and ahead of time, into a
//!    flat evaluation sequence in which parents precede children and no
//!    predicate repeats. Cyclic parent declarations are rejected here.
//!
//! 5. **Evaluation**: Walking the resolved clauses for a permission with
//!    short-circuit AND inside a clause and OR across clauses.
//!
//! ```
//! use std::sync::Arc;
//! use warden_core::model::{PermissionMap, PredicateResult};
//! use warden_core::registry::PredicateRegistry;
//! use warden_core::engine::{check, resolve};
//!
//! fn signed_in(user: &Option<&str>, _: &()) -> PredicateResult {
//!     Ok(user.is_some())
//! }
//!
//! fn is_admin(user: &Option<&str>, _: &()) -> PredicateResult {
//!     Ok(*user == Some("admin"))
//! }
//!
//! let mut registry: PredicateRegistry<Option<&'static str>, ()> = PredicateRegistry::new();
//! let signed_in = registry.register("signed_in", signed_in, &[]).unwrap();
//! let is_admin = registry.register("is_admin", is_admin, &[signed_in]).unwrap();
//!
//! let map = PermissionMap::new().with_permission("admin:page", [[is_admin]]);
//! let resolved = resolve(Arc::new(registry), &map).unwrap();
//!
//! assert!(check(&resolved, "admin:page", &Some("admin"), &()).unwrap());
//! assert!(!check(&resolved, "admin:page", &None, &()).unwrap());
//! assert!(!check(&resolved, "no:such:permission", &Some("admin"), &()).unwrap());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod id;
pub mod model;
pub mod registry;

// Re-export key types for convenience
pub use config::{LogLevel, LoggingConfig, PermissionMapConfig, WardenConfig};
pub use engine::{
    check, evaluate, resolve, ClauseExpander, PermissionPlan, ResolvedPermissionMap,
};
pub use error::{ConfigError, Error, EvaluationError, RegistryError, ResolutionError, Result};
pub use id::{Id, PredicateId};
pub use model::{
    Clause, ClauseTrace, Decision, DecisionResult, PermissionMap, Predicate, PredicateError,
    PredicateResult, ResolvedClause,
};
pub use registry::PredicateRegistry;
